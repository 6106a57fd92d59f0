//! Execution timeline: an append-only, self-merging list of segments

/// Gantt chart rendering
pub mod gantt;

pub use gantt::GanttChart;

use crate::task::Pid;
use crate::time::{self, SimTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Who holds the CPU during a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "pid", rename_all = "snake_case")]
pub enum Occupant {
    /// A task is running
    Task(Pid),
    /// Nothing is ready
    Idle,
    /// Switch overhead between two tasks
    ContextSwitch,
}

impl Occupant {
    /// Numeric code for idle time in charts
    pub const IDLE_CODE: Pid = -1;
    /// Numeric code for context-switch time
    pub const CONTEXT_SWITCH_CODE: Pid = -2;

    /// Numeric code: the pid for tasks, negative sentinels otherwise
    pub fn code(&self) -> Pid {
        match self {
            Occupant::Task(pid) => *pid,
            Occupant::Idle => Self::IDLE_CODE,
            Occupant::ContextSwitch => Self::CONTEXT_SWITCH_CODE,
        }
    }

    /// Get task pid, if a task
    pub fn pid(&self) -> Option<Pid> {
        match self {
            Occupant::Task(pid) => Some(*pid),
            _ => None,
        }
    }

    /// Check if a task
    pub fn is_task(&self) -> bool {
        matches!(self, Occupant::Task(_))
    }
}

impl fmt::Display for Occupant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Occupant::Task(pid) => write!(f, "P{}", pid),
            Occupant::Idle => write!(f, "IDLE"),
            Occupant::ContextSwitch => write!(f, "CS"),
        }
    }
}

/// Half-open interval `[start, end)` held by one occupant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: SimTime,
    pub end: SimTime,
    pub occupant: Occupant,
}

impl Segment {
    /// Create a new segment
    pub fn new(start: SimTime, end: SimTime, occupant: Occupant) -> Self {
        Self {
            start,
            end,
            occupant,
        }
    }

    /// Get duration
    pub fn duration(&self) -> SimTime {
        self.end - self.start
    }

    /// Check if `instant` falls inside `[start, end)`
    pub fn contains(&self, instant: SimTime) -> bool {
        self.start <= instant && self.end > instant
    }
}

/// Ordered execution record of one simulation run.
///
/// No two adjacent segments share an occupant: a contiguous interval for
/// the current occupant extends the last segment in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Timeline {
    segments: Vec<Segment>,
}

impl Timeline {
    /// Create an empty timeline
    pub fn new() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Record `[start, end)` for `occupant`. Zero or negative lengths are ignored.
    pub fn record(&mut self, start: SimTime, end: SimTime, occupant: Occupant) {
        if end <= start {
            return;
        }

        if let Some(last) = self.segments.last_mut() {
            if last.occupant == occupant && time::approx_eq(last.end, start) {
                last.end = end;
                return;
            }
        }

        self.segments.push(Segment::new(start, end, occupant));
    }

    /// Get all segments
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Get segment count
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Start of the first segment, or 0 when empty
    pub fn start(&self) -> SimTime {
        self.segments.first().map_or(0.0, |s| s.start)
    }

    /// End of the last segment that is not a context switch, or 0 when empty
    pub fn makespan(&self) -> SimTime {
        self.segments
            .iter()
            .rev()
            .find(|s| s.occupant != Occupant::ContextSwitch)
            .map_or(0.0, |s| s.end)
    }

    /// Occupant at `instant`, if any segment covers it
    pub fn occupant_at(&self, instant: SimTime) -> Option<Occupant> {
        self.segments
            .iter()
            .find(|s| s.contains(instant))
            .map(|s| s.occupant)
    }

    /// Total time held by `occupant`
    pub fn busy_time(&self, occupant: Occupant) -> SimTime {
        self.segments
            .iter()
            .filter(|s| s.occupant == occupant)
            .map(Segment::duration)
            .sum()
    }

    /// Total time spent running tasks
    pub fn task_time(&self) -> SimTime {
        self.segments
            .iter()
            .filter(|s| s.occupant.is_task())
            .map(Segment::duration)
            .sum()
    }

    /// Number of context-switch segments
    pub fn context_switch_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| s.occupant == Occupant::ContextSwitch)
            .count()
    }
}
