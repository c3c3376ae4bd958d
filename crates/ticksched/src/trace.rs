//! Per-tick simulation trace.
//!
//! Every call to `step()` appends exactly one entry to the `state` lane
//! (which process ran, `idle`, or `I/O`) and one to the parallel `level`
//! lane (0 for flat schedulers, the occupied priority level for MLFQ).
//! The trace serializes to the `{"state": [...], "level": [...]}` shape
//! downstream Gantt/metrics consumers expect, with states rendered as
//! strings (`"P3"`, `"idle"`, `"I/O"`).

use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use ticksched_types::Pid;

// ============================================================================
// Tick State
// ============================================================================

/// Outcome of a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickState {
    /// The named process executed for this tick.
    Ran(Pid),
    /// No process was eligible to run.
    Idle,
    /// Every candidate stalled on I/O; the tick was consumed anyway.
    Io,
}

impl TickState {
    /// Returns the pid if a process ran this tick.
    pub fn pid(&self) -> Option<Pid> {
        match self {
            TickState::Ran(pid) => Some(*pid),
            TickState::Idle | TickState::Io => None,
        }
    }
}

impl Display for TickState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TickState::Ran(pid) => write!(f, "{pid}"),
            TickState::Idle => write!(f, "idle"),
            TickState::Io => write!(f, "I/O"),
        }
    }
}

/// Error parsing a trace state string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTickStateError(String);

impl Display for ParseTickStateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognized trace state {:?}", self.0)
    }
}

impl std::error::Error for ParseTickStateError {}

impl FromStr for TickState {
    type Err = ParseTickStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "idle" => Ok(TickState::Idle),
            "I/O" => Ok(TickState::Io),
            _ => s
                .strip_prefix('P')
                .and_then(|digits| digits.parse::<u32>().ok())
                .map(|id| TickState::Ran(Pid::new(id)))
                .ok_or_else(|| ParseTickStateError(s.to_owned())),
        }
    }
}

impl Serialize for TickState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TickState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Trace
// ============================================================================

/// The ordered per-tick record of a scheduler run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trace {
    state: Vec<TickState>,
    level: Vec<usize>,
}

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one tick's outcome. Called exactly once per `step()`.
    pub fn record(&mut self, state: TickState, level: usize) {
        self.state.push(state);
        self.level.push(level);
    }

    /// Number of ticks recorded so far.
    pub fn len(&self) -> usize {
        self.state.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    pub fn states(&self) -> &[TickState] {
        &self.state
    }

    pub fn levels(&self) -> &[usize] {
        &self.level
    }

    /// States rendered as display strings (`"P3"`, `"idle"`, `"I/O"`).
    pub fn state_names(&self) -> Vec<String> {
        self.state.iter().map(ToString::to_string).collect()
    }

    /// Number of ticks in which the given process executed.
    pub fn ticks_for(&self, pid: Pid) -> usize {
        self.state
            .iter()
            .filter(|s| s.pid() == Some(pid))
            .count()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn tick_state_display() {
        assert_eq!(TickState::Ran(Pid::new(3)).to_string(), "P3");
        assert_eq!(TickState::Idle.to_string(), "idle");
        assert_eq!(TickState::Io.to_string(), "I/O");
    }

    #[test_case("P12")]
    #[test_case("idle")]
    #[test_case("I/O")]
    fn tick_state_parses_back(s: &str) {
        let state: TickState = s.parse().unwrap();
        assert_eq!(state.to_string(), s);
    }

    #[test_case("Q1")]
    #[test_case("Px")]
    #[test_case("")]
    fn unrecognized_state_fails_to_parse(s: &str) {
        assert!(s.parse::<TickState>().is_err());
    }

    #[test]
    fn trace_lanes_stay_parallel() {
        let mut trace = Trace::new();
        trace.record(TickState::Ran(Pid::new(1)), 0);
        trace.record(TickState::Idle, 2);

        assert_eq!(trace.len(), 2);
        assert_eq!(trace.levels(), &[0, 2]);
        assert_eq!(trace.state_names(), vec!["P1", "idle"]);
    }

    #[test]
    fn trace_serializes_like_the_chart_input() {
        let mut trace = Trace::new();
        trace.record(TickState::Idle, 0);
        trace.record(TickState::Ran(Pid::new(2)), 1);
        trace.record(TickState::Io, 1);

        let json = serde_json::to_string(&trace).unwrap();
        assert_eq!(json, r#"{"state":["idle","P2","I/O"],"level":[0,1,1]}"#);

        let back: Trace = serde_json::from_str(&json).unwrap();
        assert_eq!(back, trace);
    }

    #[test]
    fn ticks_for_counts_only_executions() {
        let mut trace = Trace::new();
        trace.record(TickState::Ran(Pid::new(1)), 0);
        trace.record(TickState::Io, 0);
        trace.record(TickState::Ran(Pid::new(1)), 0);
        trace.record(TickState::Ran(Pid::new(2)), 0);

        assert_eq!(trace.ticks_for(Pid::new(1)), 2);
        assert_eq!(trace.ticks_for(Pid::new(2)), 1);
    }
}
