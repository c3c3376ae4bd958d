//! Multi-level queue structure for MLFQ.
//!
//! An ordered list of per-level FIFO queues, each paired with a fixed
//! quantum. Level 0 is the highest priority; the level index *is* the
//! priority, there is no separate priority field.

use crate::error::ConfigError;
use crate::ready_queue::ReadyQueue;
use ticksched_types::Process;

#[derive(Debug, Default)]
pub struct MultiLevelQueue {
    levels: Vec<ReadyQueue>,
    quanta: Vec<u64>,
}

impl MultiLevelQueue {
    /// Creates a structure with one queue per quantum.
    ///
    /// # Errors
    ///
    /// `NoLevels` for an empty quanta list, `ZeroQuantum` if any level's
    /// quantum is zero.
    pub fn new(quanta: Vec<u64>) -> Result<Self, ConfigError> {
        if quanta.is_empty() {
            return Err(ConfigError::NoLevels);
        }
        if quanta.iter().any(|&q| q == 0) {
            return Err(ConfigError::ZeroQuantum);
        }

        let levels = quanta.iter().map(|_| ReadyQueue::new()).collect();
        Ok(Self { levels, quanta })
    }

    pub fn num_levels(&self) -> usize {
        self.levels.len()
    }

    /// The fixed quantum of the given level.
    pub fn quantum_at(&self, level: usize) -> u64 {
        self.quanta[level]
    }

    pub fn push(&mut self, level: usize, process: Process) {
        self.levels[level].push(process);
    }

    pub fn pop(&mut self, level: usize) -> Option<Process> {
        self.levels[level].pop()
    }

    pub fn front(&self, level: usize) -> Option<&Process> {
        self.levels[level].front()
    }

    pub fn front_mut(&mut self, level: usize) -> Option<&mut Process> {
        self.levels[level].front_mut()
    }

    /// Index of the first non-empty level, scanning from level 0. This
    /// scan order is the priority order.
    pub fn first_occupied_level(&self) -> Option<usize> {
        self.levels.iter().position(|q| !q.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.levels.iter().all(ReadyQueue::is_empty)
    }

    pub fn len(&self) -> usize {
        self.levels.iter().map(ReadyQueue::len).sum()
    }

    /// Moves every process in every level > 0 back to level 0 with the
    /// level-0 quantum. Prevents starvation of demoted processes.
    pub fn boost(&mut self) -> usize {
        let quantum = self.quanta[0];
        let mut moved = 0;

        for level in 1..self.levels.len() {
            while let Some(mut process) = self.levels[level].pop() {
                process.set_quantum(quantum);
                self.levels[0].push(process);
                moved += 1;
            }
        }
        moved
    }

    /// Removes and returns everything, level 0 first, head first.
    pub fn drain(&mut self) -> Vec<Process> {
        self.levels.iter_mut().flat_map(ReadyQueue::drain).collect()
    }
}
