//! Multi-Level Feedback Queue.
//!
//! Processes enter at level 0 and drift toward the last level as they
//! exhaust quanta; a periodic boost moves everything back to level 0 so
//! demoted processes cannot starve. Selection scans level 0 downward and
//! the first non-empty level's head wins, so the level index is the
//! priority order.
//!
//! With I/O stalling enabled, each candidate flips a coin against its own
//! I/O probability before running. A stalled candidate is set aside for
//! the tick (not demoted) and the scan moves on; if every candidate
//! stalls, the tick is recorded as `I/O` and still consumes time.

use tracing::debug;

use ticksched_types::{Process, ProcessState};

use crate::arrival::ArrivalStack;
use crate::error::ConfigError;
use crate::multilevel::MultiLevelQueue;
use crate::rng::SimRng;
use crate::schedulers::{validate_processes, Scheduler};
use crate::table::ProcessTable;
use crate::trace::{TickState, Trace};

// ============================================================================
// Configuration
// ============================================================================

/// MLFQ policy parameters, validated at construction.
#[derive(Debug, Clone)]
pub struct MlfqConfig {
    quanta: Vec<u64>,
    boost_time: u64,
    preemptive: bool,
    io_stalls: bool,
    seed: u64,
}

impl MlfqConfig {
    /// Creates a configuration with `levels` priority levels, one quantum
    /// per level, and a boost every `boost_time` ticks.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NoLevels`] for zero levels,
    /// [`ConfigError::LevelQuantaMismatch`] when the quanta list does not
    /// match the level count, [`ConfigError::ZeroQuantum`] for any zero
    /// quantum and [`ConfigError::ZeroBoostTime`] for a zero boost
    /// interval.
    pub fn new(levels: usize, quanta: Vec<u64>, boost_time: u64) -> Result<Self, ConfigError> {
        if levels == 0 {
            return Err(ConfigError::NoLevels);
        }
        if quanta.len() != levels {
            return Err(ConfigError::LevelQuantaMismatch {
                levels,
                quanta: quanta.len(),
            });
        }
        if quanta.iter().any(|&q| q == 0) {
            return Err(ConfigError::ZeroQuantum);
        }
        if boost_time == 0 {
            return Err(ConfigError::ZeroBoostTime);
        }

        Ok(Self {
            quanta,
            boost_time,
            preemptive: true,
            io_stalls: false,
            seed: 0,
        })
    }

    /// Non-preemptive mode pins the running process until it finishes or
    /// exhausts its quantum. Preemptive (the default) re-scans from level
    /// 0 every tick.
    #[must_use]
    pub fn with_preemptive(mut self, preemptive: bool) -> Self {
        self.preemptive = preemptive;
        self
    }

    /// Enables per-tick I/O coin flips against each process's own I/O
    /// probability. Off by default.
    #[must_use]
    pub fn with_io_stalls(mut self, io_stalls: bool) -> Self {
        self.io_stalls = io_stalls;
        self
    }

    /// Seed for the I/O coin-flip stream.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

// ============================================================================
// Scheduler
// ============================================================================

pub struct Mlfq {
    arrivals: ArrivalStack,
    levels: MultiLevelQueue,
    boost_time: u64,
    preemptive: bool,
    io_stalls: bool,
    rng: SimRng,
    /// Level whose head is the currently pinned process (non-preemptive
    /// mode only). Cleared whenever that head can change.
    pinned: Option<usize>,
    /// Level recorded for idle and I/O ticks, mirroring the last level a
    /// process ran at.
    prev_level: usize,
    table: ProcessTable,
    trace: Trace,
    tick: u64,
}

impl Mlfq {
    pub fn new(processes: Vec<Process>, config: MlfqConfig) -> Result<Self, ConfigError> {
        validate_processes(&processes)?;
        let table = ProcessTable::from_processes(&processes);
        let levels = MultiLevelQueue::new(config.quanta)?;

        Ok(Self {
            arrivals: ArrivalStack::from_processes(processes),
            levels,
            boost_time: config.boost_time,
            preemptive: config.preemptive,
            io_stalls: config.io_stalls,
            rng: SimRng::new(config.seed),
            pinned: None,
            prev_level: 0,
            table,
            trace: Trace::new(),
            tick: 0,
        })
    }

    /// The level to try next: the pinned level while its head survives,
    /// otherwise a fresh scan from level 0.
    fn candidate_level(&mut self) -> Option<usize> {
        match self.pinned {
            Some(level) if self.levels.front(level).is_some() => Some(level),
            _ => {
                self.pinned = None;
                self.levels.first_occupied_level()
            }
        }
    }
}

impl Scheduler for Mlfq {
    fn step(&mut self) -> bool {
        if self.arrivals.is_empty() && self.levels.is_empty() {
            return false;
        }

        for mut process in self.arrivals.take_arrivals(self.tick) {
            process.set_state(ProcessState::Ready);
            process.set_quantum(self.levels.quantum_at(0));
            self.levels.push(0, process);
        }

        if self.tick % self.boost_time == 0 {
            let moved = self.levels.boost();
            if moved > 0 {
                debug!(tick = self.tick, moved, "boost to level 0");
                // The pinned head may have been moved.
                self.pinned = None;
            }
        }

        // Scan for a runnable candidate, setting stalled ones aside.
        let mut stalled: Vec<(usize, Process)> = Vec::new();
        let mut outcome = None;

        while let Some(level) = self.candidate_level() {
            let io_probability = self
                .levels
                .front(level)
                .map_or(0.0, Process::io_probability);

            if self.io_stalls && io_probability > 0.0 && self.rng.chance(io_probability) {
                if let Some(mut process) = self.levels.pop(level) {
                    process.set_state(ProcessState::Stopped);
                    debug!(tick = self.tick, pid = %process.pid(), level, "I/O stall");
                    stalled.push((level, process));
                }
                self.pinned = None;
                continue;
            }

            let executed = self.levels.front_mut(level).map(|process| {
                let pid = process.pid();
                let finished = process.execute_tick();
                process.consume_quantum();
                (pid, finished, process.quantum())
            });
            if let Some((pid, finished, quantum_left)) = executed {
                outcome = Some((pid, level, finished, quantum_left));
            }
            break;
        }

        match outcome {
            Some((pid, level, finished, quantum_left)) => {
                self.trace.record(TickState::Ran(pid), level);
                self.prev_level = level;

                if finished {
                    self.levels.pop(level);
                    self.pinned = None;
                    debug!(tick = self.tick, %pid, level, "process finished");
                } else if quantum_left == 0 {
                    // Demote one level; the last level rotates to its own
                    // tail with a fresh quantum.
                    if let Some(mut process) = self.levels.pop(level) {
                        process.set_state(ProcessState::Ready);
                        let next = (level + 1).min(self.levels.num_levels() - 1);
                        process.set_quantum(self.levels.quantum_at(next));
                        self.levels.push(next, process);
                        if next != level {
                            debug!(tick = self.tick, %pid, from = level, to = next, "demoted");
                        }
                    }
                    self.pinned = None;
                } else {
                    self.pinned = if self.preemptive { None } else { Some(level) };
                }
            }
            None if stalled.is_empty() => {
                self.trace.record(TickState::Idle, self.prev_level);
            }
            None => {
                // Every candidate stalled on I/O; the tick still passes.
                self.trace.record(TickState::Io, self.prev_level);
            }
        }

        // Stalled processes return to the tails of their levels, not
        // demoted.
        for (level, mut process) in stalled {
            process.set_state(ProcessState::Ready);
            self.levels.push(level, process);
        }

        self.tick += 1;
        true
    }

    fn trace(&self) -> &Trace {
        &self.trace
    }

    fn label(&self) -> &str {
        "MLFQ"
    }

    fn process_table(&self) -> &ProcessTable {
        &self.table
    }

    fn drain_ready(&mut self) -> Vec<Process> {
        self.pinned = None;
        self.levels.drain()
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

    fn config(quanta: Vec<u64>, boost_time: u64) -> MlfqConfig {
        let levels = quanta.len();
        MlfqConfig::new(levels, quanta, boost_time).unwrap()
    }

    #[test]
    fn rejects_mismatched_quanta() {
        assert_eq!(
            MlfqConfig::new(3, vec![2, 4], 100).unwrap_err(),
            ConfigError::LevelQuantaMismatch {
                levels: 3,
                quanta: 2
            }
        );
    }

    #[test]
    fn rejects_zero_boost_time() {
        assert_eq!(
            MlfqConfig::new(2, vec![2, 4], 0).unwrap_err(),
            ConfigError::ZeroBoostTime
        );
    }

    #[test]
    fn demotes_after_quantum_exhaustion() {
        let mut mlfq =
            Mlfq::new(vec![process(1, 0, 5)], config(vec![2, 4, 100], 1000)).unwrap();
        let trace = mlfq.run();

        assert_eq!(trace.state_names(), vec!["P1", "P1", "P1", "P1", "P1"]);
        assert_eq!(trace.levels(), &[0, 0, 1, 1, 1]);
    }

    #[test]
    fn boost_returns_demoted_process_to_level_zero() {
        let mut mlfq = Mlfq::new(vec![process(1, 0, 6)], config(vec![2, 2, 100], 4)).unwrap();
        let trace = mlfq.run();

        // Demoted twice, then boosted at tick 4 back to level 0.
        assert_eq!(trace.levels(), &[0, 0, 1, 1, 0, 0]);
    }

    #[test]
    fn preemptive_mode_yields_to_higher_level_arrival() {
        let processes = vec![process(1, 0, 5), process(2, 3, 1)];
        let mut mlfq = Mlfq::new(processes, config(vec![2, 4], 1000)).unwrap();
        let trace = mlfq.run();

        assert_eq!(
            trace.state_names(),
            vec!["P1", "P1", "P1", "P2", "P1", "P1"]
        );
        assert_eq!(trace.levels(), &[0, 0, 1, 0, 1, 1]);
    }

    #[test]
    fn non_preemptive_mode_pins_the_running_process() {
        let processes = vec![process(1, 0, 5), process(2, 3, 1)];
        let cfg = config(vec![2, 4], 1000).with_preemptive(false);
        let mut mlfq = Mlfq::new(processes, cfg).unwrap();
        let trace = mlfq.run();

        // P1 holds the CPU at level 1 despite P2 waiting at level 0.
        assert_eq!(
            trace.state_names(),
            vec!["P1", "P1", "P1", "P1", "P1", "P2"]
        );
        assert_eq!(trace.levels(), &[0, 0, 1, 1, 1, 0]);
    }

    #[test]
    fn io_stalls_preserve_execution_count() {
        let cfg = config(vec![2, 4], 1000).with_io_stalls(true).with_seed(99);
        let mut mlfq = Mlfq::new(
            vec![process(1, 0, 4)
                .with_io_probability(0.5)
                .unwrap()],
            cfg,
        )
        .unwrap();
        let trace = mlfq.run();

        let ran = trace.ticks_for(Pid::new(1));
        let io = trace
            .states()
            .iter()
            .filter(|s| **s == TickState::Io)
            .count();

        assert_eq!(ran, 4);
        assert_eq!(ran + io, trace.len());
        assert_eq!(trace.states().last(), Some(&TickState::Ran(Pid::new(1))));
    }

    #[test]
    fn io_stall_trace_is_seed_deterministic() {
        let build = || {
            let cfg = config(vec![2, 4], 1000).with_io_stalls(true).with_seed(7);
            Mlfq::new(
                vec![
                    process(1, 0, 3).with_io_probability(0.4).unwrap(),
                    process(2, 1, 3).with_io_probability(0.4).unwrap(),
                ],
                cfg,
            )
            .unwrap()
        };

        let first = build().run();
        let second = build().run();
        assert_eq!(first, second);
    }

    #[test]
    fn idle_gap_keeps_previous_level() {
        let mut mlfq = Mlfq::new(
            vec![process(1, 0, 3), process(2, 5, 1)],
            config(vec![2, 4], 1000),
        )
        .unwrap();
        let trace = mlfq.run();

        assert_eq!(
            trace.state_names(),
            vec!["P1", "P1", "P1", "idle", "idle", "P2"]
        );
        // The idle ticks carry the level P1 last ran at.
        assert_eq!(trace.levels(), &[0, 0, 1, 1, 1, 0]);
    }
}
