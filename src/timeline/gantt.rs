use super::{Occupant, Timeline};
use crate::time::{self, SimTime};
use std::fmt;

/// Text Gantt chart at one cell per whole time unit.
///
/// Cell `t` shows whoever occupies `t + EPSILON`. Cells that land on a
/// context switch are dropped from the chart; instants no segment covers
/// render as idle.
#[derive(Debug, Clone, PartialEq)]
pub struct GanttChart {
    cells: Vec<Occupant>,
}

impl GanttChart {
    /// Build the chart from a timeline
    pub fn from_timeline(timeline: &Timeline) -> Self {
        let units = whole_units(timeline.makespan());
        let cells = (0..units)
            .map(|t| {
                timeline
                    .occupant_at(t as SimTime + time::EPSILON)
                    .unwrap_or(Occupant::Idle)
            })
            .filter(|occupant| *occupant != Occupant::ContextSwitch)
            .collect();

        Self { cells }
    }

    /// Get cells, in time order
    pub fn cells(&self) -> &[Occupant] {
        &self.cells
    }

    /// Render as `Gantt Chart:\n| P1 | P2 | ... |`
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for GanttChart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Gantt Chart:\n|")?;
        for cell in &self.cells {
            write!(f, " P{} |", cell.code())?;
        }
        Ok(())
    }
}

fn whole_units(makespan: SimTime) -> u64 {
    let units = (makespan - time::EPSILON).ceil();
    if units > 0.0 {
        units as u64
    } else {
        0
    }
}
