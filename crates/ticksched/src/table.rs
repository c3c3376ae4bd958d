//! Static per-process data captured at scheduler construction.
//!
//! Schedulers mutate the remaining duration of the processes they own, so
//! the original arrival/duration pairs must be recorded up front for the
//! metrics derivation and for front ends that tabulate process sets.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ticksched_types::{Pid, Process};

/// Immutable arrival/duration pair for one process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessStatic {
    pub arrival_time: u64,
    pub duration: u64,
}

/// Map from pid to its static data, ordered by pid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessTable {
    entries: BTreeMap<Pid, ProcessStatic>,
}

impl ProcessTable {
    /// Captures the static data of a process set.
    pub fn from_processes(processes: &[Process]) -> Self {
        let entries = processes
            .iter()
            .map(|p| {
                (
                    p.pid(),
                    ProcessStatic {
                        arrival_time: p.arrival_time(),
                        duration: p.duration(),
                    },
                )
            })
            .collect();
        Self { entries }
    }

    pub fn get(&self, pid: Pid) -> Option<&ProcessStatic> {
        self.entries.get(&pid)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Pid, &ProcessStatic)> {
        self.entries.iter().map(|(pid, data)| (*pid, data))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
