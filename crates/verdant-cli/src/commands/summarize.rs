//! Summarize command implementation.
//!
//! Computes statistics for a series given on the command line.

use anyhow::Result;
use clap::Args;
use verdant_analytics::summarize_with_unit;

use crate::cli::OutputFormat;
use crate::output::{print_json, print_output, KeyValue};

/// Arguments for the summarize command.
#[derive(Args, Debug)]
pub struct SummarizeArgs {
    /// Observations, oldest first
    #[arg(required = true, allow_negative_numbers = true)]
    pub values: Vec<f64>,

    /// Unit label carried into the statistics
    #[arg(short, long, default_value = "")]
    pub unit: String,
}

/// Execute the summarize command.
pub fn execute(args: SummarizeArgs, format: OutputFormat) -> Result<()> {
    let stats = summarize_with_unit(&args.values, &args.unit)?;

    match format {
        OutputFormat::Json => print_json(&stats)?,
        OutputFormat::Table => {
            let previous = stats
                .previous
                .map_or_else(|| "-".to_string(), |value| value.to_string());

            let rows = vec![
                KeyValue::new("Current", stats.current.to_string()),
                KeyValue::new("Previous", previous),
                KeyValue::new("Min", format!("{:.2}", stats.min)),
                KeyValue::new("Max", format!("{:.2}", stats.max)),
                KeyValue::new("Average", format!("{:.2}", stats.average)),
                KeyValue::new("Trend", format!("{:+.2}", stats.trend)),
                KeyValue::new("YoY Change", format!("{:+}", stats.year_over_year_change)),
                KeyValue::new("Unit", stats.unit.clone()),
            ];
            print_output(&rows, format)?;
        }
    }

    Ok(())
}
