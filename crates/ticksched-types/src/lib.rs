//! # ticksched-types: Core types for `ticksched`
//!
//! This crate contains the shared types used across the simulator:
//! - Process identity ([`Pid`], [`PidSequence`])
//! - The simulated workload unit ([`Process`], [`ProcessState`])
//! - Construction errors ([`ProcessError`])
//!
//! A [`Process`] is a mostly-immutable record (arrival time, total burst
//! duration, lottery tickets, dependency) plus the mutable fields a
//! scheduler owns at runtime (remaining duration, remaining quantum,
//! state). All construction goes through [`Process::new`], which rejects
//! invalid records up front; nothing is clamped or silently defaulted.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Errors
// ============================================================================

/// Errors produced when constructing a [`Process`].
#[derive(Debug, Error, PartialEq)]
pub enum ProcessError {
    /// A process must occupy at least one tick; zero-duration processes
    /// can never appear in a trace and are rejected outright.
    #[error("process duration must be at least 1 tick")]
    ZeroDuration,

    /// I/O stall probability is a per-tick chance and must be in [0, 1].
    #[error("I/O probability {0} is outside [0.0, 1.0]")]
    IoProbabilityOutOfRange(f64),
}

// ============================================================================
// Process Identity
// ============================================================================

/// Unique identifier for a simulated process.
///
/// Displays as the process name used in traces: `P1`, `P2`, ...
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct Pid(u32);

impl Pid {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn as_u32(self) -> u32 {
        self.0
    }
}

impl Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

impl From<u32> for Pid {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<Pid> for u32 {
    fn from(pid: Pid) -> Self {
        pid.0
    }
}

/// Monotonic generator of process ids.
///
/// Whoever constructs processes (a test harness, a generator, a front end)
/// owns one of these; there is no hidden global counter, so independent
/// simulations never interfere with each other's naming.
///
/// # Examples
///
/// ```
/// # use ticksched_types::PidSequence;
/// let mut seq = PidSequence::new();
/// assert_eq!(seq.next_pid().to_string(), "P1");
/// assert_eq!(seq.next_pid().to_string(), "P2");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PidSequence {
    next: u32,
}

impl PidSequence {
    /// Creates a sequence starting at `P1`.
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Creates a sequence starting at an arbitrary id.
    pub fn starting_at(first: u32) -> Self {
        Self { next: first }
    }

    /// Returns the next pid and advances the sequence.
    pub fn next_pid(&mut self) -> Pid {
        let pid = Pid::new(self.next);
        self.next += 1;
        pid
    }
}

impl Default for PidSequence {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Process State
// ============================================================================

/// Lifecycle state of a simulated process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProcessState {
    /// Created but not yet arrived.
    Embryo,
    /// Eligible to run, waiting in a ready structure.
    Ready,
    /// Executed during the current tick.
    Running,
    /// Consumed the current tick stalled on I/O rather than executing.
    Stopped,
}

// ============================================================================
// Process
// ============================================================================

/// One simulated workload unit.
///
/// Static attributes (`arrival_time`, `duration`, `io_probability`,
/// `tickets`, `depends_on`) are fixed at construction; `remaining`,
/// `quantum` and `state` are mutated tick-by-tick by whichever scheduler
/// currently owns the process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Process {
    pid: Pid,
    arrival_time: u64,
    duration: u64,
    remaining: u64,
    state: ProcessState,
    quantum: u64,
    io_probability: f64,
    tickets: Option<u64>,
    depends_on: Option<Pid>,
}

impl Process {
    /// Creates a new process.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessError::ZeroDuration`] if `duration == 0`. A
    /// process that arrives with no work to do cannot occupy a tick and
    /// would be silently invisible to the metrics derivation, so it is
    /// rejected here instead.
    pub fn new(pid: Pid, arrival_time: u64, duration: u64) -> Result<Self, ProcessError> {
        if duration == 0 {
            return Err(ProcessError::ZeroDuration);
        }

        Ok(Self {
            pid,
            arrival_time,
            duration,
            remaining: duration,
            state: ProcessState::Embryo,
            quantum: 0,
            io_probability: 0.0,
            tickets: None,
            depends_on: None,
        })
    }

    /// Sets the per-tick I/O stall probability (used by MLFQ).
    ///
    /// # Errors
    ///
    /// Returns [`ProcessError::IoProbabilityOutOfRange`] unless
    /// `0.0 <= probability <= 1.0`.
    pub fn with_io_probability(mut self, probability: f64) -> Result<Self, ProcessError> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(ProcessError::IoProbabilityOutOfRange(probability));
        }
        self.io_probability = probability;
        Ok(self)
    }

    /// Sets the lottery ticket count.
    pub fn with_tickets(mut self, tickets: u64) -> Self {
        self.tickets = Some(tickets);
        self
    }

    /// Declares a dependency on another process.
    ///
    /// Dependencies are validated when the process set is handed to a
    /// scheduler; selection logic does not consult them.
    pub fn with_dependency(mut self, depends_on: Pid) -> Self {
        self.depends_on = Some(depends_on);
        self
    }

    pub fn pid(&self) -> Pid {
        self.pid
    }

    /// The display name used in traces (`P1`, `P2`, ...).
    pub fn name(&self) -> String {
        self.pid.to_string()
    }

    pub fn arrival_time(&self) -> u64 {
        self.arrival_time
    }

    /// Total burst length; never changes after construction.
    pub fn duration(&self) -> u64 {
        self.duration
    }

    /// Ticks of execution still owed.
    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    pub fn state(&self) -> ProcessState {
        self.state
    }

    pub fn set_state(&mut self, state: ProcessState) {
        self.state = state;
    }

    /// Remaining allotted ticks at the current priority level. Meaning
    /// differs per scheduler; FCFS/SJF/SRTF ignore it entirely.
    pub fn quantum(&self) -> u64 {
        self.quantum
    }

    pub fn set_quantum(&mut self, quantum: u64) {
        self.quantum = quantum;
    }

    /// Consumes one tick of the current quantum.
    pub fn consume_quantum(&mut self) {
        self.quantum = self.quantum.saturating_sub(1);
    }

    pub fn io_probability(&self) -> f64 {
        self.io_probability
    }

    pub fn tickets(&self) -> Option<u64> {
        self.tickets
    }

    pub fn depends_on(&self) -> Option<Pid> {
        self.depends_on
    }

    /// Executes the process for exactly one tick, decrementing the
    /// remaining duration. Returns `true` if the process finished on this
    /// tick.
    ///
    /// A finished process must never be executed again; the scheduler
    /// removes it from all structures the moment this returns `true`.
    pub fn execute_tick(&mut self) -> bool {
        debug_assert!(self.remaining > 0, "executed a finished process");
        self.state = ProcessState::Running;
        self.remaining -= 1;
        self.remaining == 0
    }

    pub fn is_finished(&self) -> bool {
        self.remaining == 0
    }
}

// ============================================================================
// Tests
// ============================================================================
