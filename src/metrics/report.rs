use super::Statistics;
use crate::timeline::GanttChart;
use std::fmt;

/// Text report: Gantt chart followed by the four summary lines
#[derive(Debug, Clone)]
pub struct Report {
    gantt: GanttChart,
    statistics: Statistics,
}

impl Report {
    /// Create a new report
    pub fn new(gantt: GanttChart, statistics: Statistics) -> Self {
        Self { gantt, statistics }
    }

    /// Get Gantt chart
    pub fn gantt(&self) -> &GanttChart {
        &self.gantt
    }

    /// Get statistics
    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    /// Render the full report
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = &self.statistics;
        writeln!(f, "{}", self.gantt)?;
        writeln!(f, "Average Waiting Time = {:.2}", stats.avg_waiting())?;
        writeln!(f, "Average Turnaround Time = {:.2}", stats.avg_turnaround())?;
        writeln!(f, "Average Response Time = {:.2}", stats.avg_response())?;
        writeln!(f, "CPU Utilization = {:.2} %", stats.utilization())
    }
}
