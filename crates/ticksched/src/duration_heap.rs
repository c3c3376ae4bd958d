//! Min-heap keyed on remaining duration, for SJF and SRTF.
//!
//! Ordering is `(remaining, pid)`: the pid secondary key keeps ties
//! deterministic. There is no decrease-key; SRTF re-keys by popping,
//! executing, and pushing back, which lets the heap re-evaluate priority
//! every tick.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use ticksched_types::Process;

#[derive(Debug)]
struct Entry(Process);

impl Entry {
    fn key(&self) -> (u64, u32) {
        (self.0.remaining(), self.0.pid().as_u32())
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    // Reversed so the BinaryHeap max-heap behaves as a min-heap.
    fn cmp(&self, other: &Self) -> Ordering {
        other.key().cmp(&self.key())
    }
}

#[derive(Debug, Default)]
pub struct DurationHeap {
    heap: BinaryHeap<Entry>,
}

impl DurationHeap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, process: Process) {
        self.heap.push(Entry(process));
    }

    /// Removes and returns the process with the least remaining duration.
    pub fn pop(&mut self) -> Option<Process> {
        self.heap.pop().map(|e| e.0)
    }

    pub fn peek(&self) -> Option<&Process> {
        self.heap.peek().map(|e| &e.0)
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Removes and returns everything in priority order.
    pub fn drain(&mut self) -> Vec<Process> {
        let mut out = Vec::with_capacity(self.heap.len());
        while let Some(process) = self.pop() {
            out.push(process);
        }
        out
    }
}
