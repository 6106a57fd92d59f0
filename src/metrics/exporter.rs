use crate::simulator::SimulationOutcome;

/// Exports simulation results for other tools
pub struct MetricsExporter<'a> {
    outcome: &'a SimulationOutcome,
}

impl<'a> MetricsExporter<'a> {
    /// Create a new exporter
    pub fn new(outcome: &'a SimulationOutcome) -> Self {
        Self { outcome }
    }

    /// Export statistics and segments as JSON
    pub fn export_json(&self) -> Result<String, serde_json::Error> {
        let outcome = self.outcome;
        let stats = outcome.statistics();

        let segments: Vec<_> = outcome
            .timeline()
            .segments()
            .iter()
            .map(|s| {
                serde_json::json!({
                    "start": s.start,
                    "end": s.end,
                    "occupant": s.occupant.to_string(),
                    "code": s.occupant.code(),
                })
            })
            .collect();

        let report = serde_json::json!({
            "policy": outcome.policy().name(),
            "quantum": outcome.policy().quantum().map(|q| q.get()),
            "context_switch_overhead": outcome.context_switch_overhead(),
            "summary": outcome.summary(),
            "average_waiting_time": stats.avg_waiting(),
            "average_turnaround_time": stats.avg_turnaround(),
            "average_response_time": stats.avg_response(),
            "cpu_utilization": stats.utilization(),
            "makespan": stats.makespan(),
            "tasks": stats.per_task(),
            "segments": segments,
        });

        serde_json::to_string_pretty(&report)
    }

    /// Get outcome
    pub fn outcome(&self) -> &SimulationOutcome {
        self.outcome
    }
}
