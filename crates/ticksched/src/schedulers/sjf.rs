//! Shortest Job First: non-preemptive.
//!
//! Arrivals after tick 0 park in a waiting list and are only admitted to
//! the heap between jobs (on completion or on an idle tick), never
//! mid-execution. That gives textbook non-preemptive behavior despite the
//! re-orderable heap underneath.

use tracing::debug;

use ticksched_types::{Process, ProcessState};

use crate::arrival::ArrivalStack;
use crate::duration_heap::DurationHeap;
use crate::error::ConfigError;
use crate::schedulers::{validate_processes, Scheduler};
use crate::table::ProcessTable;
use crate::trace::{TickState, Trace};

pub struct Sjf {
    arrivals: ArrivalStack,
    heap: DurationHeap,
    waiting: Vec<Process>,
    table: ProcessTable,
    trace: Trace,
    tick: u64,
}

impl Sjf {
    pub fn new(processes: Vec<Process>) -> Result<Self, ConfigError> {
        validate_processes(&processes)?;
        let table = ProcessTable::from_processes(&processes);

        Ok(Self {
            arrivals: ArrivalStack::from_processes(processes),
            heap: DurationHeap::new(),
            waiting: Vec::new(),
            table,
            trace: Trace::new(),
            tick: 0,
        })
    }

    fn admit_waiting(&mut self) {
        for process in self.waiting.drain(..) {
            self.heap.push(process);
        }
    }
}

impl Scheduler for Sjf {
    fn step(&mut self) -> bool {
        if self.arrivals.is_empty() && self.heap.is_empty() && self.waiting.is_empty() {
            return false;
        }

        for mut process in self.arrivals.take_arrivals(self.tick) {
            process.set_state(ProcessState::Ready);
            self.waiting.push(process);
        }

        // The initial batch goes straight in; everything after competes
        // only between jobs.
        if self.tick == 0 {
            self.admit_waiting();
        }

        match self.heap.pop() {
            Some(mut process) => {
                let pid = process.pid();
                let finished = process.execute_tick();
                self.trace.record(TickState::Ran(pid), 0);

                if finished {
                    debug!(tick = self.tick, %pid, "process finished");
                    self.admit_waiting();
                } else {
                    self.heap.push(process);
                }
            }
            None => {
                self.trace.record(TickState::Idle, 0);
                self.admit_waiting();
            }
        }

        self.tick += 1;
        true
    }

    fn trace(&self) -> &Trace {
        &self.trace
    }

    fn label(&self) -> &str {
        "SJF"
    }

    fn process_table(&self) -> &ProcessTable {
        &self.table
    }

    fn drain_ready(&mut self) -> Vec<Process> {
        let mut out = self.heap.drain();
        out.append(&mut self.waiting);
        out
    }

    fn drain_arrivals(&mut self) -> Vec<Process> {
        self.arrivals.drain()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ticksched_types::Pid;

    fn process(id: u32, arrival: u64, duration: u64) -> Process {
        Process::new(Pid::new(id), arrival, duration).unwrap()
    }

    #[test]
    fn initial_batch_runs_shortest_first() {
        let mut sjf = Sjf::new(vec![process(1, 0, 3), process(2, 0, 1), process(3, 0, 2)])
            .unwrap();
        let trace = sjf.run();

        assert_eq!(
            trace.state_names(),
            vec!["P2", "P3", "P3", "P1", "P1", "P1"]
        );
    }

    #[test]
    fn shorter_late_arrival_does_not_preempt() {
        // P2 (1 tick) arrives while P1 (4 ticks) runs; P1 keeps the CPU.
        let mut sjf = Sjf::new(vec![process(1, 0, 4), process(2, 1, 1)]).unwrap();
        let trace = sjf.run();

        assert_eq!(trace.state_names(), vec!["P1", "P1", "P1", "P1", "P2"]);
    }

    #[test]
    fn waiting_list_flushes_between_jobs() {
        // P2 and P3 arrive mid-P1; at P1's completion the shorter of the
        // two wins.
        let mut sjf = Sjf::new(vec![process(1, 0, 3), process(2, 1, 2), process(3, 2, 1)])
            .unwrap();
        let trace = sjf.run();

        assert_eq!(
            trace.state_names(),
            vec!["P1", "P1", "P1", "P3", "P2", "P2"]
        );
    }

    #[test]
    fn idle_gap_admits_waiting_arrivals() {
        let mut sjf = Sjf::new(vec![process(1, 2, 2)]).unwrap();
        let trace = sjf.run();

        assert_eq!(trace.state_names(), vec!["idle", "idle", "idle", "P1", "P1"]);
    }
}
