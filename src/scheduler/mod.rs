//! Scheduling policies and the discrete-event engine

/// Simulation engine
pub mod engine;
/// Policy descriptor
pub mod policy;
/// Round Robin ready queue
pub mod round_robin;
/// Ready-set selection rules
pub mod selector;

pub use engine::{Engine, RunSummary};
pub use policy::{parse_quantum, PolicyType, SchedulingPolicy};
pub use round_robin::ReadyQueue;
