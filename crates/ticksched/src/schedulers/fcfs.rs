//! First-Come-First-Served: non-preemptive, strict FIFO.

use tracing::debug;

use ticksched_types::{Process, ProcessState};

use crate::arrival::ArrivalStack;
use crate::error::ConfigError;
use crate::ready_queue::ReadyQueue;
use crate::schedulers::{validate_processes, Scheduler};
use crate::table::ProcessTable;
use crate::trace::{TickState, Trace};

/// FCFS scheduler. The head-of-queue process occupies the head across
/// ticks until it completes; there is no quantum.
pub struct Fcfs {
    arrivals: ArrivalStack,
    ready: ReadyQueue,
    table: ProcessTable,
    trace: Trace,
    tick: u64,
}

impl Fcfs {
    pub fn new(processes: Vec<Process>) -> Result<Self, ConfigError> {
        validate_processes(&processes)?;
        let table = ProcessTable::from_processes(&processes);

        Ok(Self {
            arrivals: ArrivalStack::from_processes(processes),
            ready: ReadyQueue::new(),
            table,
            trace: Trace::new(),
            tick: 0,
        })
    }
}

impl Scheduler for Fcfs {
    fn step(&mut self) -> bool {
        if self.arrivals.is_empty() && self.ready.is_empty() {
            return false;
        }

        for mut process in self.arrivals.take_arrivals(self.tick) {
            process.set_state(ProcessState::Ready);
            self.ready.push(process);
        }

        let executed = self.ready.front_mut().map(|process| {
            let pid = process.pid();
            (pid, process.execute_tick())
        });

        match executed {
            Some((pid, finished)) => {
                self.trace.record(TickState::Ran(pid), 0);
                if finished {
                    self.ready.pop();
                    debug!(tick = self.tick, %pid, "process finished");
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
        "FCFS"
    }

    fn process_table(&self) -> &ProcessTable {
        &self.table
    }

    fn drain_ready(&mut self) -> Vec<Process> {
        self.ready.drain()
    }

    fn drain_arrivals(&mut self) -> Vec<Process> {
        self.arrivals.drain()
    }
}
