//! Round-Robin: preemptive with a scheduler-wide time slice.
//!
//! Newly arrived processes and quantum-expired carry-overs both append to
//! the FIFO tail, arrivals first, so arrival order wins ties at the same
//! tick. An expired process parks in a pending list merged back at the
//! start of the *next* tick; that guarantees a full quantum of separation
//! before it can be rescheduled.

use tracing::debug;

use ticksched_types::{Process, ProcessState};

use crate::arrival::ArrivalStack;
use crate::error::ConfigError;
use crate::ready_queue::ReadyQueue;
use crate::schedulers::{validate_processes, Scheduler};
use crate::table::ProcessTable;
use crate::trace::{TickState, Trace};

#[derive(Debug)]
pub struct RoundRobin {
    arrivals: ArrivalStack,
    ready: ReadyQueue,
    pending: Vec<Process>,
    quantum: u64,
    table: ProcessTable,
    trace: Trace,
    tick: u64,
}

impl RoundRobin {
    /// Creates a Round-Robin scheduler with the given time slice.
    ///
    /// # Errors
    ///
    /// [`ConfigError::ZeroQuantum`] if `quantum == 0`.
    pub fn new(processes: Vec<Process>, quantum: u64) -> Result<Self, ConfigError> {
        if quantum == 0 {
            return Err(ConfigError::ZeroQuantum);
        }
        validate_processes(&processes)?;
        let table = ProcessTable::from_processes(&processes);

        Ok(Self {
            arrivals: ArrivalStack::from_processes(processes),
            ready: ReadyQueue::new(),
            pending: Vec::new(),
            quantum,
            table,
            trace: Trace::new(),
            tick: 0,
        })
    }
}

impl Scheduler for RoundRobin {
    fn step(&mut self) -> bool {
        if self.arrivals.is_empty() && self.ready.is_empty() && self.pending.is_empty() {
            return false;
        }

        // Arrivals enqueue before last tick's expired carry-overs.
        for mut process in self.arrivals.take_arrivals(self.tick) {
            process.set_state(ProcessState::Ready);
            process.set_quantum(self.quantum);
            self.ready.push(process);
        }
        for mut process in self.pending.drain(..) {
            process.set_quantum(self.quantum);
            self.ready.push(process);
        }

        let executed = self.ready.front_mut().map(|process| {
            let pid = process.pid();
            let finished = process.execute_tick();
            process.consume_quantum();
            (pid, finished, process.quantum())
        });

        match executed {
            Some((pid, finished, quantum_left)) => {
                self.trace.record(TickState::Ran(pid), 0);

                if finished {
                    self.ready.pop();
                    debug!(tick = self.tick, %pid, "process finished");
                } else if quantum_left == 0 {
                    // Expired: park until the start of the next tick.
                    if let Some(process) = self.ready.pop() {
                        self.pending.push(process);
                    }
                }
                // Otherwise it stays at the head and keeps running.
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
        "Round-Robin"
    }

    fn process_table(&self) -> &ProcessTable {
        &self.table
    }

    fn drain_ready(&mut self) -> Vec<Process> {
        let mut out = self.ready.drain();
        out.append(&mut self.pending);
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
    fn rejects_zero_quantum() {
        assert_eq!(
            RoundRobin::new(vec![], 0).unwrap_err(),
            ConfigError::ZeroQuantum
        );
    }

    #[test]
    fn unit_quantum_alternates() {
        let mut rr = RoundRobin::new(vec![process(1, 0, 2), process(2, 0, 2)], 1).unwrap();
        let trace = rr.run();

        assert_eq!(trace.state_names(), vec!["P1", "P2", "P1", "P2"]);
    }

    #[test]
    fn full_quantum_runs_uninterrupted() {
        let mut rr = RoundRobin::new(vec![process(1, 0, 5), process(2, 0, 2)], 3).unwrap();
        let trace = rr.run();

        assert_eq!(
            trace.state_names(),
            vec!["P1", "P1", "P1", "P2", "P2", "P1", "P1"]
        );
    }

    #[test]
    fn arrival_beats_carry_over_at_same_tick() {
        // P1 expires its slice at tick 1; P2 arrives at tick 2. The
        // arrival enqueues before the carried-over P1.
        let mut rr = RoundRobin::new(vec![process(1, 0, 4), process(2, 2, 2)], 2).unwrap();
        let trace = rr.run();

        assert_eq!(
            trace.state_names(),
            vec!["P1", "P1", "P2", "P2", "P1", "P1"]
        );
    }

    #[test]
    fn fairness_bound_holds_while_all_ready() {
        // 3 processes, quantum 2: no process waits more than (n-1)*q = 4
        // ticks between consecutive executions while all are ready.
        let quantum = 2u64;
        let processes = vec![process(1, 0, 6), process(2, 0, 6), process(3, 0, 6)];
        let n = processes.len() as u64;

        let mut rr = RoundRobin::new(processes, quantum).unwrap();
        let trace = rr.run();

        for id in 1..=3u32 {
            let ticks: Vec<_> = trace
                .states()
                .iter()
                .enumerate()
                .filter(|(_, s)| s.pid() == Some(Pid::new(id)))
                .map(|(i, _)| i as u64)
                .collect();
            for pair in ticks.windows(2) {
                assert!(
                    pair[1] - pair[0] - 1 <= (n - 1) * quantum,
                    "P{id} waited too long between ticks {} and {}",
                    pair[0],
                    pair[1]
                );
            }
        }
    }
}
