use super::{Pid, Task, TaskDef};
use crate::time::{self, SimTime};
use crate::SimError;
use std::collections::HashSet;

/// Owns every task of one simulation run, sorted by (arrival, pid).
///
/// That order is the tie-break baseline for all policies, and positions in
/// the registry stay stable for the whole run so the engine and the Round
/// Robin queue can refer to tasks by index.
#[derive(Debug, Clone)]
pub struct TaskRegistry {
    tasks: Vec<Task>,
}

impl TaskRegistry {
    /// Create a registry from task definitions
    pub fn new(defs: Vec<TaskDef>) -> Result<Self, SimError> {
        if defs.is_empty() {
            return Err(SimError::MalformedInput("no tasks to schedule".to_string()));
        }

        let mut seen = HashSet::with_capacity(defs.len());
        for def in &defs {
            if def.burst == 0 {
                return Err(SimError::MalformedInput(format!(
                    "task P{} has a zero burst",
                    def.pid
                )));
            }
            if !seen.insert(def.pid) {
                return Err(SimError::MalformedInput(format!(
                    "duplicate pid {}",
                    def.pid
                )));
            }
        }

        let mut tasks: Vec<Task> = defs.into_iter().map(Task::new).collect();
        tasks.sort_by(|a, b| {
            a.def()
                .arrival
                .cmp(&b.def().arrival)
                .then_with(|| a.pid().cmp(&b.pid()))
        });

        Ok(Self { tasks })
    }

    /// Get task count
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Get all tasks in registry order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Consume the registry, returning final task state
    pub fn into_tasks(self) -> Vec<Task> {
        self.tasks
    }

    /// Look up a task by pid
    pub fn get(&self, pid: Pid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.pid() == pid)
    }

    pub(crate) fn task(&self, index: usize) -> &Task {
        &self.tasks[index]
    }

    pub(crate) fn task_mut(&mut self, index: usize) -> &mut Task {
        &mut self.tasks[index]
    }

    /// Ready tasks at `now`, with their registry index
    pub fn ready(&self, now: SimTime) -> impl Iterator<Item = (usize, &Task)> {
        self.tasks
            .iter()
            .enumerate()
            .filter(move |(_, t)| t.is_ready(now))
    }

    /// Check if every task has finished
    pub fn all_done(&self) -> bool {
        self.tasks.iter().all(Task::is_done)
    }

    /// Check if any unfinished task has arrived by `now`
    pub fn any_ready(&self, now: SimTime) -> bool {
        self.tasks.iter().any(|t| t.is_ready(now))
    }

    /// Earliest arrival strictly after `now` among unfinished tasks
    pub fn next_arrival_after(&self, now: SimTime) -> Option<SimTime> {
        self.tasks
            .iter()
            .filter(|t| !t.is_done() && time::strictly_after(t.arrival(), now))
            .map(Task::arrival)
            .min_by(|a, b| a.total_cmp(b))
    }

    /// Number of tasks not yet finished
    pub fn unfinished_count(&self) -> usize {
        self.tasks.iter().filter(|t| !t.is_done()).count()
    }
}
