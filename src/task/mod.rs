//! Task definitions, per-task run state and the task registry

/// Task definition and run state
pub mod definition;
/// Task input loading
pub mod loader;
/// Task registry
pub mod registry;

pub use definition::{Pid, Task, TaskDef};
pub use loader::{load_tasks, parse_tasks};
pub use registry::TaskRegistry;
