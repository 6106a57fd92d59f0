use crate::task::{Pid, Task};
use crate::time::SimTime;
use crate::timeline::Timeline;
use serde::Serialize;

/// Timing figures for one finished task
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TaskStats {
    pub pid: Pid,
    pub arrival: SimTime,
    pub burst: SimTime,
    pub first_start: SimTime,
    pub finish: SimTime,
    /// `finish - arrival - burst`
    pub waiting: SimTime,
    /// `finish - arrival`
    pub turnaround: SimTime,
    /// `first_start - arrival`
    pub response: SimTime,
}

impl TaskStats {
    /// Compute figures for a task. `None` until it has started and finished.
    pub fn from_task(task: &Task) -> Option<Self> {
        let first_start = task.first_start()?;
        let finish = task.finish()?;
        let arrival = task.arrival();
        let burst = task.burst();

        Some(Self {
            pid: task.pid(),
            arrival,
            burst,
            first_start,
            finish,
            waiting: finish - arrival - burst,
            turnaround: finish - arrival,
            response: first_start - arrival,
        })
    }
}

/// Aggregate figures for one simulation run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    per_task: Vec<TaskStats>,
    avg_waiting: SimTime,
    avg_turnaround: SimTime,
    avg_response: SimTime,
    total_burst: SimTime,
    makespan: SimTime,
    utilization: f64,
}

impl Statistics {
    /// Derive statistics from final task state and the timeline
    pub fn compute(tasks: &[Task], timeline: &Timeline) -> Self {
        let per_task: Vec<TaskStats> = tasks.iter().filter_map(TaskStats::from_task).collect();
        let total_burst: SimTime = tasks.iter().map(Task::burst).sum();
        let makespan = timeline.makespan();

        let utilization = if makespan > 0.0 {
            total_burst / makespan * 100.0
        } else {
            0.0
        };

        Self {
            avg_waiting: mean(per_task.iter().map(|s| s.waiting)),
            avg_turnaround: mean(per_task.iter().map(|s| s.turnaround)),
            avg_response: mean(per_task.iter().map(|s| s.response)),
            per_task,
            total_burst,
            makespan,
            utilization,
        }
    }

    /// Get per-task figures, in registry order
    pub fn per_task(&self) -> &[TaskStats] {
        &self.per_task
    }

    /// Get figures for one task
    pub fn task(&self, pid: Pid) -> Option<&TaskStats> {
        self.per_task.iter().find(|s| s.pid == pid)
    }

    /// Get average waiting time
    pub fn avg_waiting(&self) -> SimTime {
        self.avg_waiting
    }

    /// Get average turnaround time
    pub fn avg_turnaround(&self) -> SimTime {
        self.avg_turnaround
    }

    /// Get average response time
    pub fn avg_response(&self) -> SimTime {
        self.avg_response
    }

    /// Get total CPU demand
    pub fn total_burst(&self) -> SimTime {
        self.total_burst
    }

    /// Get makespan
    pub fn makespan(&self) -> SimTime {
        self.makespan
    }

    /// CPU utilization in percent
    pub fn utilization(&self) -> f64 {
        self.utilization
    }
}

fn mean(values: impl Iterator<Item = SimTime>) -> SimTime {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as SimTime
    }
}
