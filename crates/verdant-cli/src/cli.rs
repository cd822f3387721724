//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use verdant_analytics::{FailurePolicy, MissingContribution};

use crate::commands::{AggregateArgs, AnalyzeArgs, SummarizeArgs};

/// Verdant - ESG fund metric aggregation CLI
#[derive(Parser)]
#[command(name = "verdant")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "json", global = true)]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log per-asset progress
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Analysis configuration file (TOML)
    #[arg(short, long, global = true, env = "VERDANT_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a fund document and emit the analysis document
    Analyze(AnalyzeArgs),

    /// Compute statistics for an ad-hoc series of observations
    Summarize(SummarizeArgs),

    /// Recompute fund statistics from an existing analysis document
    Aggregate(AggregateArgs),

    /// List the metric paths of the fixed schema
    Paths,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    Table,
    /// JSON format
    #[default]
    Json,
}

/// Per-asset failure handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    /// Drop failing assets and report them
    Skip,
    /// Stop at the first failing asset
    Abort,
}

impl From<PolicyArg> for FailurePolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Skip => FailurePolicy::Skip,
            PolicyArg::Abort => FailurePolicy::Abort,
        }
    }
}

/// How assets without a usable value count in fund averages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MissingArg {
    /// Count the asset as contributing zero
    Zero,
    /// Leave the asset out of that metric's average
    Exclude,
    /// Report 0 for any metric some asset cannot supply
    ZeroPath,
}

impl From<MissingArg> for MissingContribution {
    fn from(arg: MissingArg) -> Self {
        match arg {
            MissingArg::Zero => MissingContribution::Zero,
            MissingArg::Exclude => MissingContribution::Exclude,
            MissingArg::ZeroPath => MissingContribution::ZeroPath,
        }
    }
}
