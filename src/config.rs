use crate::SimError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default context-switch overhead in time units
pub const DEFAULT_CONTEXT_SWITCH_OVERHEAD: f64 = 0.1;

/// Default upper bound on loaded tasks
pub const DEFAULT_MAX_TASKS: usize = 1000;

/// Simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Time charged whenever the CPU moves from one task to another
    pub context_switch_overhead: f64,

    /// Maximum number of tasks read from input
    pub max_tasks: usize,
}

impl SimConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self {
            context_switch_overhead: DEFAULT_CONTEXT_SWITCH_OVERHEAD,
            max_tasks: DEFAULT_MAX_TASKS,
        }
    }

    /// Set context-switch overhead
    pub fn with_context_switch_overhead(mut self, overhead: f64) -> Self {
        self.context_switch_overhead = overhead;
        self
    }

    /// Set maximum task count
    pub fn with_max_tasks(mut self, max_tasks: usize) -> Self {
        self.max_tasks = max_tasks;
        self
    }

    /// Check the configuration is usable
    pub fn validate(&self) -> Result<(), SimError> {
        if !self.context_switch_overhead.is_finite() || self.context_switch_overhead < 0.0 {
            return Err(SimError::ConfigError(format!(
                "context_switch_overhead must be a finite non-negative number, got {}",
                self.context_switch_overhead
            )));
        }
        if self.max_tasks == 0 {
            return Err(SimError::ConfigError(
                "max_tasks must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| SimError::ConfigError(format!("invalid config JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            SimError::ConfigError(format!("could not read '{}': {}", path.display(), e))
        })?;
        Self::from_json(&contents)
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::new()
    }
}
