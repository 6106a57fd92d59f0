use crate::metrics::{MetricsExporter, Report, Statistics};
use crate::scheduler::{Engine, RunSummary, SchedulingPolicy};
use crate::task::{Pid, Task, TaskDef, TaskRegistry};
use crate::time::SimTime;
use crate::timeline::{GanttChart, Timeline};
use crate::{SimConfig, SimError};
use tracing::warn;

/// Result of one policy run over a task batch
#[derive(Debug, Clone)]
pub struct SimulationOutcome {
    policy: SchedulingPolicy,
    context_switch_overhead: SimTime,
    tasks: Vec<Task>,
    timeline: Timeline,
    summary: RunSummary,
}

impl SimulationOutcome {
    /// Get policy
    pub fn policy(&self) -> SchedulingPolicy {
        self.policy
    }

    /// Get the overhead charged per switch
    pub fn context_switch_overhead(&self) -> SimTime {
        self.context_switch_overhead
    }

    /// Final task state, sorted by (arrival, pid)
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Look up a task by pid
    pub fn task(&self, pid: Pid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.pid() == pid)
    }

    /// Get timeline
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Get engine counters
    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }

    /// Compute statistics
    pub fn statistics(&self) -> Statistics {
        Statistics::compute(&self.tasks, &self.timeline)
    }

    /// Build the Gantt chart
    pub fn gantt(&self) -> GanttChart {
        GanttChart::from_timeline(&self.timeline)
    }

    /// Build the text report
    pub fn report(&self) -> Report {
        Report::new(self.gantt(), self.statistics())
    }

    /// Export as JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        MetricsExporter::new(self).export_json()
    }
}

/// Runs scheduling simulations. Every run owns its own registry and
/// timeline, so one simulator can serve many independent runs.
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    config: SimConfig,
}

impl Simulator {
    /// Create a simulator with default configuration
    pub fn new() -> Self {
        Self::with_config(SimConfig::default())
    }

    /// Create a simulator with custom configuration
    pub fn with_config(config: SimConfig) -> Self {
        Self { config }
    }

    /// Get configuration
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Simulate `policy` over `tasks`
    pub fn run(
        &self,
        tasks: &[TaskDef],
        policy: SchedulingPolicy,
    ) -> Result<SimulationOutcome, SimError> {
        self.config.validate()?;

        let max_tasks = self.config.max_tasks;
        let defs = if tasks.len() > max_tasks {
            warn!(
                "[{}] {} tasks supplied, simulating the first {}",
                policy,
                tasks.len(),
                max_tasks
            );
            &tasks[..max_tasks]
        } else {
            tasks
        };

        let mut registry = TaskRegistry::new(defs.to_vec())?;
        let mut timeline = Timeline::new();
        let engine = Engine::new(policy, self.config.context_switch_overhead);
        let summary = engine.run(&mut registry, &mut timeline)?;

        Ok(SimulationOutcome {
            policy,
            context_switch_overhead: self.config.context_switch_overhead,
            tasks: registry.into_tasks(),
            timeline,
            summary,
        })
    }
}
