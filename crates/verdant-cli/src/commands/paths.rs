//! Paths command implementation.

use anyhow::Result;
use serde::Serialize;
use tabled::Tabled;
use verdant_core::MetricPath;

use crate::cli::OutputFormat;
use crate::output::print_output;

#[derive(Debug, Serialize, Tabled)]
struct PathRow {
    #[tabled(rename = "Path")]
    path: &'static str,
    #[tabled(rename = "Category")]
    category: &'static str,
    #[tabled(rename = "Metric")]
    metric: &'static str,
}

/// Execute the paths command.
pub fn execute(format: OutputFormat) -> Result<()> {
    let rows: Vec<PathRow> = MetricPath::ALL
        .into_iter()
        .map(|path| PathRow {
            path: path.as_str(),
            category: path.category().as_str(),
            metric: path.metric_name(),
        })
        .collect();

    print_output(&rows, format)
}
