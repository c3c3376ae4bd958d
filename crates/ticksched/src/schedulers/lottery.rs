//! Lottery scheduling: weighted random selection by ticket share.
//!
//! Each tick draws a uniform winning ticket in `[0, totalTickets)` and
//! walks the ready queue accumulating ticket counts; the first process
//! whose cumulative sum exceeds the draw wins. Queue order is irrelevant
//! to fairness but must stay stable so a fixed seed reproduces the trace.
//!
//! A winner with quantum left is pinned and re-selected without a second
//! draw until its quantum runs out or it finishes. In non-preemptive mode
//! the pin holds until the process finishes and the quantum is inert.

use tracing::debug;

use ticksched_types::{Pid, Process, ProcessState};

use crate::arrival::ArrivalStack;
use crate::error::ConfigError;
use crate::ready_queue::ReadyQueue;
use crate::rng::SimRng;
use crate::schedulers::{validate_processes, Scheduler};
use crate::table::ProcessTable;
use crate::trace::{TickState, Trace};

#[derive(Debug)]
pub struct Lottery {
    arrivals: ArrivalStack,
    ready: ReadyQueue,
    /// Quantum-expired processes parked until the next tick, so a loser
    /// cannot starve at the queue tail forever.
    waiting: Vec<Process>,
    quantum: u64,
    preemptive: bool,
    rng: SimRng,
    /// Winner carried over from the previous tick, selected again in lieu
    /// of a fresh draw.
    pick_next: Option<Pid>,
    table: ProcessTable,
    trace: Trace,
    tick: u64,
}

impl Lottery {
    /// Creates a lottery scheduler. Preemptive by default.
    ///
    /// # Errors
    ///
    /// [`ConfigError::ZeroQuantum`] if `quantum == 0`,
    /// [`ConfigError::MissingTickets`] if any process carries no tickets.
    pub fn new(processes: Vec<Process>, quantum: u64, seed: u64) -> Result<Self, ConfigError> {
        if quantum == 0 {
            return Err(ConfigError::ZeroQuantum);
        }
        validate_processes(&processes)?;
        for process in &processes {
            if process.tickets().unwrap_or(0) == 0 {
                return Err(ConfigError::MissingTickets(process.pid()));
            }
        }
        let table = ProcessTable::from_processes(&processes);

        Ok(Self {
            arrivals: ArrivalStack::from_processes(processes),
            ready: ReadyQueue::new(),
            waiting: Vec::new(),
            quantum,
            preemptive: true,
            rng: SimRng::new(seed),
            pick_next: None,
            table,
            trace: Trace::new(),
            tick: 0,
        })
    }

    /// Non-preemptive mode pins each winner until it finishes; the
    /// quantum is inert.
    #[must_use]
    pub fn with_preemptive(mut self, preemptive: bool) -> Self {
        self.preemptive = preemptive;
        self
    }

    /// Weighted draw over the current ready queue, or the pinned winner
    /// from last tick if it is still present.
    fn select_winner(&mut self) -> Option<Pid> {
        if let Some(pid) = self.pick_next {
            if self.ready.contains(pid) {
                return Some(pid);
            }
            self.pick_next = None;
        }

        let total: u64 = self
            .ready
            .iter()
            .map(|p| p.tickets().unwrap_or(0))
            .sum();
        if total == 0 {
            return None;
        }

        let winning_ticket = self.rng.next_u64_range(0, total);
        let mut cumulative = 0;
        for process in self.ready.iter() {
            cumulative += process.tickets().unwrap_or(0);
            if winning_ticket < cumulative {
                let pid = process.pid();
                debug!(tick = self.tick, winning_ticket, total, %pid, "lottery draw");
                return Some(pid);
            }
        }
        None
    }
}

impl Scheduler for Lottery {
    fn step(&mut self) -> bool {
        if self.arrivals.is_empty() && self.ready.is_empty() && self.waiting.is_empty() {
            return false;
        }

        for mut process in self.arrivals.take_arrivals(self.tick) {
            process.set_state(ProcessState::Ready);
            process.set_quantum(self.quantum);
            self.ready.push(process);
        }
        for mut process in self.waiting.drain(..) {
            process.set_quantum(self.quantum);
            self.ready.push(process);
        }

        let executed = self.select_winner().and_then(|pid| {
            self.ready.get_mut(pid).map(|process| {
                let finished = process.execute_tick();
                process.consume_quantum();
                (pid, finished, process.quantum())
            })
        });

        match executed {
            Some((pid, finished, quantum_left)) => {
                self.trace.record(TickState::Ran(pid), 0);

                if finished {
                    self.ready.remove(pid);
                    self.pick_next = None;
                    debug!(tick = self.tick, %pid, "process finished");
                } else if self.preemptive && quantum_left == 0 {
                    // Park it; a fresh draw happens next tick and the
                    // parked process re-enters with a full quantum.
                    if let Some(mut process) = self.ready.remove(pid) {
                        process.set_state(ProcessState::Ready);
                        self.waiting.push(process);
                    }
                    self.pick_next = None;
                } else {
                    self.pick_next = Some(pid);
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
        "Lottery"
    }

    fn process_table(&self) -> &ProcessTable {
        &self.table
    }

    fn drain_ready(&mut self) -> Vec<Process> {
        self.pick_next = None;
        let mut out = self.ready.drain();
        out.append(&mut self.waiting);
        out
    }

    fn drain_arrivals(&mut self) -> Vec<Process> {
        self.arrivals.drain()
    }
}
