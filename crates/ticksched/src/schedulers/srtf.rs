//! Shortest Remaining Time First: preemptive.
//!
//! Arrivals go straight into the heap keyed by current remaining
//! duration; the running process is popped, executed for one tick, and
//! pushed back, so a shorter newcomer can outrank it at the very next
//! tick. Reinsertion is the re-keying mechanism; there is no decrease-key.

use tracing::debug;

use ticksched_types::{Process, ProcessState};

use crate::arrival::ArrivalStack;
use crate::duration_heap::DurationHeap;
use crate::error::ConfigError;
use crate::schedulers::{validate_processes, Scheduler};
use crate::table::ProcessTable;
use crate::trace::{TickState, Trace};

pub struct Srtf {
    arrivals: ArrivalStack,
    heap: DurationHeap,
    table: ProcessTable,
    trace: Trace,
    tick: u64,
}

impl Srtf {
    pub fn new(processes: Vec<Process>) -> Result<Self, ConfigError> {
        validate_processes(&processes)?;
        let table = ProcessTable::from_processes(&processes);

        Ok(Self {
            arrivals: ArrivalStack::from_processes(processes),
            heap: DurationHeap::new(),
            table,
            trace: Trace::new(),
            tick: 0,
        })
    }
}

impl Scheduler for Srtf {
    fn step(&mut self) -> bool {
        if self.arrivals.is_empty() && self.heap.is_empty() {
            return false;
        }

        for mut process in self.arrivals.take_arrivals(self.tick) {
            process.set_state(ProcessState::Ready);
            self.heap.push(process);
        }

        match self.heap.pop() {
            Some(mut process) => {
                let pid = process.pid();
                let finished = process.execute_tick();
                self.trace.record(TickState::Ran(pid), 0);

                if finished {
                    debug!(tick = self.tick, %pid, "process finished");
                } else {
                    self.heap.push(process);
                }
            }
            None => self.trace.record(TickState::Idle, 0),
        }

        self.tick += 1;
        true
    }

    fn trace(&self) -> &Trace {
        &self.trace
    }

    fn label(&self) -> &str {
        "SRTF"
    }

    fn process_table(&self) -> &ProcessTable {
        &self.table
    }

    fn drain_ready(&mut self) -> Vec<Process> {
        self.heap.drain()
    }

    fn drain_arrivals(&mut self) -> Vec<Process> {
        self.arrivals.drain()
    }
}
