use crate::time::{self, SimTime};
use serde::{Deserialize, Serialize};

/// Task identifier as read from input
pub type Pid = i64;

/// Immutable task definition: one `pid arrival burst` triple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskDef {
    /// Unique task id
    pub pid: Pid,
    /// Arrival time
    pub arrival: u64,
    /// Total CPU time required
    pub burst: u64,
}

impl TaskDef {
    /// Create a new task definition
    pub fn new(pid: Pid, arrival: u64, burst: u64) -> Self {
        Self {
            pid,
            arrival,
            burst,
        }
    }
}

/// A task plus its mutable run state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Task {
    def: TaskDef,
    remaining: SimTime,
    first_start: Option<SimTime>,
    finish: Option<SimTime>,
    done: bool,
}

impl Task {
    /// Create a fresh, never-scheduled task
    pub fn new(def: TaskDef) -> Self {
        Self {
            def,
            remaining: def.burst as SimTime,
            first_start: None,
            finish: None,
            done: false,
        }
    }

    /// Get definition
    pub fn def(&self) -> &TaskDef {
        &self.def
    }

    /// Get pid
    pub fn pid(&self) -> Pid {
        self.def.pid
    }

    /// Get arrival time
    pub fn arrival(&self) -> SimTime {
        self.def.arrival as SimTime
    }

    /// Get original burst
    pub fn burst(&self) -> SimTime {
        self.def.burst as SimTime
    }

    /// Get remaining CPU time
    pub fn remaining(&self) -> SimTime {
        self.remaining
    }

    /// Time of first CPU allocation, if any
    pub fn first_start(&self) -> Option<SimTime> {
        self.first_start
    }

    /// Completion time, if finished
    pub fn finish(&self) -> Option<SimTime> {
        self.finish
    }

    /// Check if the task has been dispatched at least once
    pub fn is_started(&self) -> bool {
        self.first_start.is_some()
    }

    /// Check if the task has finished
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Check if the task is ready at `now`
    pub fn is_ready(&self, now: SimTime) -> bool {
        !self.done && time::at_or_before(self.arrival(), now)
    }

    /// Record a dispatch at `now`. Returns true on the first allocation only.
    pub(crate) fn start_at(&mut self, now: SimTime) -> bool {
        if self.first_start.is_some() {
            return false;
        }
        self.first_start = Some(now);
        true
    }

    /// Charge `duration` of CPU time
    pub(crate) fn consume(&mut self, duration: SimTime) {
        self.remaining = (self.remaining - duration).max(0.0);
    }

    /// Mark finished at `now`
    pub(crate) fn complete(&mut self, now: SimTime) {
        self.remaining = 0.0;
        self.finish = Some(now);
        self.done = true;
    }
}

impl From<TaskDef> for Task {
    fn from(def: TaskDef) -> Self {
        Self::new(def)
    }
}
