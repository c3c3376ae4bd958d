//! Scheduler configuration error types.

use thiserror::Error;
use ticksched_types::Pid;

/// Errors produced when constructing a scheduler.
///
/// Constructors fail fast on malformed configuration; the core never
/// substitutes defaults for bad input. Front ends may catch these and
/// re-prompt.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("quantum must be at least 1 tick")]
    ZeroQuantum,

    #[error("multi-level structure needs at least one level")]
    NoLevels,

    #[error("structure has {levels} levels but {quanta} quanta")]
    LevelQuantaMismatch { levels: usize, quanta: usize },

    #[error("boost interval must be at least 1 tick")]
    ZeroBoostTime,

    #[error("process {process} depends on unknown process {missing}")]
    DependencyNotFound { process: Pid, missing: Pid },

    #[error("duplicate process id {0}")]
    DuplicatePid(Pid),

    #[error("process {0} has no lottery tickets")]
    MissingTickets(Pid),
}
