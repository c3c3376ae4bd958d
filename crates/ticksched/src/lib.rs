//! # ticksched: Discrete-Time CPU-Scheduling Simulation
//!
//! Given a set of synthetic processes (arrival time, burst duration,
//! optional I/O behavior, optional lottery tickets), this crate simulates
//! the passage of time one tick at a time and records, per tick, which
//! process ran and at what priority level. From the trace it derives the
//! standard scheduling metrics.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      Scheduler Variants                       │
//! │   Fcfs   Sjf   Srtf   RoundRobin   Mlfq   Lottery             │
//! │                                                               │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │                   Queue Primitives                      │  │
//! │  │  ArrivalStack  ReadyQueue  DurationHeap  MultiLevelQueue│  │
//! │  └────────────────────────────────────────────────────────┘  │
//! │                                                               │
//! │  ┌──────────────┐   ┌──────────────┐   ┌──────────────────┐  │
//! │  │ Trace        │   │ SimRng       │   │ Metrics          │  │
//! │  │ (per tick)   │   │ (seeded)     │   │ (pure derivation)│  │
//! │  └──────────────┘   └──────────────┘   └──────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use ticksched::{metrics, Fcfs, Scheduler};
//! use ticksched_types::{Pid, Process};
//!
//! let processes = vec![
//!     Process::new(Pid::new(1), 0, 3).unwrap(),
//!     Process::new(Pid::new(2), 1, 2).unwrap(),
//! ];
//!
//! let mut fcfs = Fcfs::new(processes).unwrap();
//! let trace = fcfs.run();
//! assert_eq!(trace.state_names(), vec!["P1", "P1", "P1", "P2", "P2"]);
//!
//! let per_process = metrics::calculate(trace.states(), fcfs.process_table());
//! assert_eq!(per_process[&Pid::new(2)].waiting_time, 2);
//! ```
//!
//! The model is fully synchronous and single-threaded. The only sources
//! of nondeterminism are the lottery draw and the MLFQ I/O coin flip,
//! both seeded through [`SimRng`]: same seed, same trace.

pub mod arrival;
pub mod duration_heap;
pub mod error;
pub mod metrics;
pub mod multilevel;
pub mod ready_queue;
pub mod rng;
pub mod schedulers;
pub mod table;
pub mod trace;

pub use arrival::ArrivalStack;
pub use duration_heap::DurationHeap;
pub use error::ConfigError;
pub use metrics::{PerformanceSummary, ProcessMetrics};
pub use multilevel::MultiLevelQueue;
pub use ready_queue::ReadyQueue;
pub use rng::SimRng;
pub use schedulers::{Fcfs, Lottery, Mlfq, MlfqConfig, RoundRobin, Scheduler, Sjf, Srtf};
pub use table::{ProcessStatic, ProcessTable};
pub use trace::{TickState, Trace};
