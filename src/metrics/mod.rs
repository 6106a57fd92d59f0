//! Performance statistics and report output

/// JSON export
pub mod exporter;
/// Text report
pub mod report;
/// Waiting, turnaround, response and utilization figures
pub mod stats;

pub use exporter::MetricsExporter;
pub use report::Report;
pub use stats::{Statistics, TaskStats};
