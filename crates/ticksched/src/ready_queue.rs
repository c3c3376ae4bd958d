//! FIFO ready queue for FCFS, Round-Robin, Lottery, and MLFQ levels.
//!
//! Insertion order is preserved; a process is only ever resident in one
//! ready structure at a time (ownership moves with the `Process` value).

use std::collections::VecDeque;

use ticksched_types::{Pid, Process};

#[derive(Debug, Clone, Default)]
pub struct ReadyQueue {
    items: VecDeque<Process>,
}

impl ReadyQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a process to the tail.
    pub fn push(&mut self, process: Process) {
        self.items.push_back(process);
    }

    /// Removes and returns the head process.
    pub fn pop(&mut self) -> Option<Process> {
        self.items.pop_front()
    }

    pub fn front(&self) -> Option<&Process> {
        self.items.front()
    }

    /// Mutable access to the head, for the multi-tick head occupation
    /// FCFS and quantum-based schedulers rely on.
    pub fn front_mut(&mut self) -> Option<&mut Process> {
        self.items.front_mut()
    }

    /// Removes a process anywhere in the queue by identity.
    pub fn remove(&mut self, pid: Pid) -> Option<Process> {
        let idx = self.items.iter().position(|p| p.pid() == pid)?;
        self.items.remove(idx)
    }

    /// Mutable access to a process anywhere in the queue by identity.
    pub fn get_mut(&mut self, pid: Pid) -> Option<&mut Process> {
        self.items.iter_mut().find(|p| p.pid() == pid)
    }

    pub fn contains(&self, pid: Pid) -> bool {
        self.items.iter().any(|p| p.pid() == pid)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Process> {
        self.items.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Removes and returns everything, head first.
    pub fn drain(&mut self) -> Vec<Process> {
        self.items.drain(..).collect()
    }
}
