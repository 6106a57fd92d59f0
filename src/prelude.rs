//! Prelude for convenient imports

// Simulation
pub use crate::config::SimConfig;
pub use crate::executor::{Executor, PolicyRequest, PolicyRun};
pub use crate::simulator::{SimulationOutcome, Simulator};

// Tasks
pub use crate::task::{load_tasks, parse_tasks, Pid, Task, TaskDef, TaskRegistry};

// Scheduler
pub use crate::scheduler::{
    parse_quantum, Engine, PolicyType, ReadyQueue, RunSummary, SchedulingPolicy,
};

// Timeline
pub use crate::timeline::{GanttChart, Occupant, Segment, Timeline};

// Metrics
pub use crate::metrics::{MetricsExporter, Report, Statistics, TaskStats};

// Time
pub use crate::time::{SimTime, EPSILON};

// Error
pub use crate::SimError;
