//! Output formatting utilities.

use colored::Colorize;
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};
use verdant_core::{Diagnostics, FundStatistics};

use crate::cli::OutputFormat;

/// Formats and prints rows based on the specified format.
pub fn print_output<T: Serialize + Tabled>(data: &[T], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => print_table(data),
        OutputFormat::Json => print_json(data),
    }
}

/// Prints data as a formatted table.
fn print_table<T: Tabled>(data: &[T]) -> anyhow::Result<()> {
    if data.is_empty() {
        println!("No results.");
        return Ok(());
    }

    let table = Table::new(data)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .to_string();

    println!("{}", table);
    Ok(())
}

/// Prints data as JSON.
pub fn print_json<T: Serialize + ?Sized>(data: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

/// Prints a success message.
pub fn print_success(message: &str) {
    eprintln!("{} {}", "✓".green(), message);
}

/// Prints a warning message.
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message);
}

/// Prints a header for a section.
pub fn print_header(title: &str) {
    println!("\n{}", title.bold().underline());
}

/// Reports skipped assets and aggregation warnings on stderr.
pub fn print_diagnostics(diagnostics: &Diagnostics) {
    for failure in &diagnostics.skipped_assets {
        print_warning(&failure.to_string());
    }
    for warning in &diagnostics.warnings {
        print_warning(&warning.to_string());
    }
}

/// A key-value pair for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct KeyValue {
    #[tabled(rename = "Statistic")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl KeyValue {
    /// Creates a new key-value pair.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// One fund statistic row.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct StatisticRow {
    #[tabled(rename = "Category")]
    pub category: String,
    #[tabled(rename = "Metric")]
    pub metric: String,
    #[tabled(rename = "Avg YoY Change")]
    pub value: String,
}

/// Flattens fund statistics into table rows in schema order.
pub fn statistic_rows(statistics: &FundStatistics) -> Vec<StatisticRow> {
    statistics
        .iter()
        .map(|(path, value)| StatisticRow {
            category: path.category().to_string(),
            metric: path.segments().skip(1).collect::<Vec<_>>().join("."),
            value: format!("{value:+.4}"),
        })
        .collect()
}
