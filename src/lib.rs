//! Discrete-event simulation of FCFS, SJF, SRTF and Round Robin CPU
//! scheduling over a fixed batch of tasks, with context-switch overhead,
//! an exact execution timeline and derived statistics.

pub mod config;
pub mod error;
pub mod executor;
pub mod metrics;
pub mod scheduler;
pub mod simulator;
pub mod task;
pub mod time;
pub mod timeline;

/// Prelude for convenient imports
pub mod prelude;

// Re-exports
pub use config::SimConfig;
pub use error::SimError;
pub use executor::Executor;
pub use simulator::{SimulationOutcome, Simulator};
