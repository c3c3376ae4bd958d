//! Arrival stack: not-yet-started processes ordered by arrival time.
//!
//! Stored descending by arrival time so the nearest arrival is always on
//! top. After any bulk insertion the caller must invoke [`ArrivalStack::sort`]
//! before simulation starts; the stack does not re-sort on its own.

use ticksched_types::Process;

#[derive(Debug, Clone, Default)]
pub struct ArrivalStack {
    items: Vec<Process>,
}

impl ArrivalStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a sorted stack from a process set.
    pub fn from_processes(processes: Vec<Process>) -> Self {
        let mut stack = Self { items: processes };
        stack.sort();
        stack
    }

    pub fn push(&mut self, process: Process) {
        self.items.push(process);
    }

    pub fn pop(&mut self) -> Option<Process> {
        self.items.pop()
    }

    pub fn peek(&self) -> Option<&Process> {
        self.items.last()
    }

    /// Sorts by arrival time descending, so the process with the nearest
    /// arrival ends up on top. Equal arrivals order by pid descending, so
    /// they pop in pid order and original creation order wins ties in the
    /// ready structures downstream.
    pub fn sort(&mut self) {
        self.items.sort_by(|a, b| {
            b.arrival_time()
                .cmp(&a.arrival_time())
                .then(b.pid().cmp(&a.pid()))
        });
    }

    /// Pops every process whose arrival time equals `tick`.
    ///
    /// Only meaningful on a sorted stack.
    pub fn take_arrivals(&mut self, tick: u64) -> Vec<Process> {
        let mut arrived = Vec::new();
        while self
            .peek()
            .is_some_and(|p| p.arrival_time() == tick)
        {
            if let Some(process) = self.pop() {
                arrived.push(process);
            }
        }
        arrived
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Removes and returns everything still on the stack.
    pub fn drain(&mut self) -> Vec<Process> {
        std::mem::take(&mut self.items)
    }
}
