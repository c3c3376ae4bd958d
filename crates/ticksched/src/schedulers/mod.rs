//! The six scheduling policies and the contract they share.
//!
//! Every variant advances simulated time one tick per `step()` call and
//! appends exactly one `{state, level}` entry per tick. `run()` is the
//! only looping point; the model is fully synchronous and single-threaded,
//! and a tick is an atomic unit of work.

mod fcfs;
mod lottery;
mod mlfq;
mod round_robin;
mod sjf;
mod srtf;

pub use fcfs::Fcfs;
pub use lottery::Lottery;
pub use mlfq::{Mlfq, MlfqConfig};
pub use round_robin::RoundRobin;
pub use sjf::Sjf;
pub use srtf::Srtf;

use std::collections::BTreeSet;

use ticksched_types::Process;

use crate::error::ConfigError;
use crate::table::ProcessTable;
use crate::trace::Trace;

// ============================================================================
// Scheduler Contract
// ============================================================================

/// The step/run contract every policy implements.
///
/// An external driver (GUI, CLI, test harness) constructs a variant with a
/// process set and policy parameters, then calls [`Scheduler::step`] until
/// it returns `false`, or [`Scheduler::run`] to do the loop in one call.
pub trait Scheduler {
    /// Advances simulated time by exactly one tick.
    ///
    /// Returns `false` and performs no state mutation when there is
    /// nothing left to do; calling it again keeps returning `false`.
    fn step(&mut self) -> bool;

    /// The trace accumulated so far; fully inspectable between steps.
    fn trace(&self) -> &Trace;

    /// Human-readable policy label.
    fn label(&self) -> &str;

    /// Static arrival/duration data captured at construction, keyed for
    /// the metrics derivation.
    fn process_table(&self) -> &ProcessTable;

    /// Drains every ready/parked structure, in scheduling order, for a
    /// "change schedule" hand-off to a differently-configured scheduler.
    fn drain_ready(&mut self) -> Vec<Process>;

    /// Drains the not-yet-arrived processes.
    fn drain_arrivals(&mut self) -> Vec<Process>;

    /// Steps until completion and returns the full trace.
    fn run(&mut self) -> Trace {
        while self.step() {}
        self.trace().clone()
    }
}

// ============================================================================
// Process-Set Admission
// ============================================================================

/// Validates a process set before a scheduler takes ownership of it.
///
/// Rejects duplicate pids and dependencies on pids outside the set.
/// Dependency edges are admission metadata only; no policy consults them
/// during selection.
pub(crate) fn validate_processes(processes: &[Process]) -> Result<(), ConfigError> {
    let mut seen = BTreeSet::new();
    for process in processes {
        if !seen.insert(process.pid()) {
            return Err(ConfigError::DuplicatePid(process.pid()));
        }
    }

    for process in processes {
        if let Some(dep) = process.depends_on() {
            if !seen.contains(&dep) {
                return Err(ConfigError::DependencyNotFound {
                    process: process.pid(),
                    missing: dep,
                });
            }
        }
    }
    Ok(())
}
