//! Aggregate command implementation.
//!
//! Recomputes `fund_statistics` for an analysis document whose assets may
//! have been produced or edited elsewhere.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use verdant_analytics::{aggregate_documents, parse_document, AnalysisConfig};

use crate::cli::{MissingArg, OutputFormat};
use crate::commands::read_input;
use crate::error::CliError;
use crate::output::{print_json, print_output, print_warning, statistic_rows};

/// Arguments for the aggregate command.
#[derive(Args, Debug)]
pub struct AggregateArgs {
    /// Analysis document (JSON). Reads stdin when omitted or `-`.
    pub input: Option<PathBuf>,

    /// Contribution of assets missing a metric (overrides the config file)
    #[arg(long, value_enum)]
    pub missing: Option<MissingArg>,
}

/// Execute the aggregate command.
pub fn execute(args: AggregateArgs, format: OutputFormat, config: &AnalysisConfig) -> Result<()> {
    let mut config = config.clone();
    if let Some(missing) = args.missing {
        config.missing_contribution = missing.into();
    }

    let document = parse_document(&read_input(args.input.as_deref())?)?;
    let assets = document
        .get("assets_analysis")
        .and_then(|assets| assets.as_array())
        .ok_or_else(|| CliError::InvalidDocument("expected an `assets_analysis` array".into()))?;

    let aggregation = aggregate_documents(assets, &config);
    for warning in &aggregation.warnings {
        print_warning(&warning.to_string());
    }

    match format {
        OutputFormat::Json => print_json(&aggregation.statistics)?,
        OutputFormat::Table => print_output(&statistic_rows(&aggregation.statistics), format)?,
    }

    Ok(())
}
