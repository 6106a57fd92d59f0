use crate::time::SimTime;
use thiserror::Error;

/// Simulation errors
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Invalid time quantum: {0} (must be a positive integer)")]
    InvalidQuantum(i64),

    #[error("Invalid time quantum: `{0}` is not an integer")]
    MalformedQuantum(String),

    #[error("Round Robin requires a time quantum")]
    MissingQuantum,

    #[error("Unknown scheduling policy: {0}")]
    UnknownPolicy(String),

    #[error("Simulation stalled at t={now}: {unfinished} task(s) unfinished with no ready task and no future arrival")]
    SimulationStall { now: SimTime, unfinished: usize },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Execution failed: {0}")]
    ExecutionFailed(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
