//! Scheduling metrics derived from a finished trace.
//!
//! A pure function over the state lane of a [`Trace`](crate::Trace) and
//! the static process data captured at construction. A process that never
//! appears in the trace is omitted from the result; callers guarantee
//! every process eventually executes at least one tick.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ticksched_types::Pid;

use crate::table::ProcessTable;
use crate::trace::TickState;

// ============================================================================
// Per-Process Metrics
// ============================================================================

/// Timing metrics for one process, all in ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessMetrics {
    pub arrival_time: u64,
    /// Tick index of the first execution.
    pub first_run: u64,
    /// One past the tick index of the last execution.
    pub finish_time: u64,
    /// Original total burst length.
    pub duration: u64,
    /// Turnaround minus duration: time spent ready but not running.
    pub waiting_time: u64,
    /// Ticks between arrival and first execution.
    pub response_time: u64,
    /// Ticks between arrival and completion, inclusive.
    pub turnaround_time: u64,
}

impl ProcessMetrics {
    /// The positional row `[arrival, first, finish, duration, waiting,
    /// response, turnaround]` used by tabular front ends.
    pub fn as_row(&self) -> [u64; 7] {
        [
            self.arrival_time,
            self.first_run,
            self.finish_time,
            self.duration,
            self.waiting_time,
            self.response_time,
            self.turnaround_time,
        ]
    }
}

/// Derives per-process metrics from a trace's state lane.
///
/// For each process that appears at least once, the first and last tick
/// indices of occurrence yield:
///
/// - `finish_time = last + 1`
/// - `turnaround_time = last - arrival + 1`
/// - `response_time = first - arrival`
/// - `waiting_time = turnaround_time - duration`
pub fn calculate(states: &[TickState], table: &ProcessTable) -> BTreeMap<Pid, ProcessMetrics> {
    let mut occurrences: BTreeMap<Pid, (usize, usize)> = BTreeMap::new();

    for (idx, state) in states.iter().enumerate() {
        if let Some(pid) = state.pid() {
            occurrences
                .entry(pid)
                .and_modify(|(_, last)| *last = idx)
                .or_insert((idx, idx));
        }
    }

    let mut metrics = BTreeMap::new();
    for (pid, (first, last)) in occurrences {
        let Some(data) = table.get(pid) else {
            continue;
        };
        let first = first as u64;
        let last = last as u64;

        let turnaround_time = (last + 1).saturating_sub(data.arrival_time);
        let response_time = first.saturating_sub(data.arrival_time);
        let waiting_time = turnaround_time.saturating_sub(data.duration);

        metrics.insert(
            pid,
            ProcessMetrics {
                arrival_time: data.arrival_time,
                first_run: first,
                finish_time: last + 1,
                duration: data.duration,
                waiting_time,
                response_time,
                turnaround_time,
            },
        );
    }
    metrics
}

// ============================================================================
// Aggregate Summary
// ============================================================================

/// Averages over a metrics map, for comparing schedulers on the same
/// process set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSummary {
    pub average_waiting_time: f64,
    pub average_response_time: f64,
}

/// Computes the aggregate summary. Returns `None` on an empty map.
pub fn summarize(metrics: &BTreeMap<Pid, ProcessMetrics>) -> Option<PerformanceSummary> {
    if metrics.is_empty() {
        return None;
    }

    let count = metrics.len() as f64;
    let waiting: u64 = metrics.values().map(|m| m.waiting_time).sum();
    let response: u64 = metrics.values().map(|m| m.response_time).sum();

    Some(PerformanceSummary {
        average_waiting_time: waiting as f64 / count,
        average_response_time: response as f64 / count,
    })
}

// ============================================================================
// Tests
// ============================================================================
