//! Analyze command implementation.
//!
//! Runs the full pipeline over a fund document.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use verdant_analytics::{analyze, AnalysisConfig};

use crate::cli::{MissingArg, OutputFormat, PolicyArg};
use crate::commands::{read_input, write_output};
use crate::output::{
    print_diagnostics, print_header, print_output, print_success, statistic_rows,
};

/// Arguments for the analyze command.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Fund document (JSON). Reads stdin when omitted or `-`.
    pub input: Option<PathBuf>,

    /// Write the analysis document here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Per-asset failure policy (overrides the config file)
    #[arg(long, value_enum)]
    pub policy: Option<PolicyArg>,

    /// Contribution of assets missing a metric (overrides the config file)
    #[arg(long, value_enum)]
    pub missing: Option<MissingArg>,

    /// Disable parallel processing
    #[arg(long)]
    pub sequential: bool,

    /// Emit compact JSON instead of pretty-printed
    #[arg(long)]
    pub compact: bool,
}

impl AnalyzeArgs {
    fn apply(&self, config: &AnalysisConfig) -> AnalysisConfig {
        let mut config = config.clone();
        if let Some(policy) = self.policy {
            config.failure_policy = policy.into();
        }
        if let Some(missing) = self.missing {
            config.missing_contribution = missing.into();
        }
        if self.sequential {
            config.parallel = false;
        }
        config
    }
}

/// Execute the analyze command.
pub fn execute(
    args: AnalyzeArgs,
    format: OutputFormat,
    config: &AnalysisConfig,
    quiet: bool,
) -> Result<()> {
    let config = args.apply(config);
    let input = read_input(args.input.as_deref())?;

    let report = analyze(input, &config)?;
    print_diagnostics(&report.diagnostics);

    let result = &report.result;
    let document = if args.compact {
        serde_json::to_string(result)?
    } else {
        serde_json::to_string_pretty(result)?
    };

    match (&args.output, format) {
        (Some(path), _) => {
            write_output(path, &document)?;
            if !quiet {
                print_success(&format!(
                    "{} assets analyzed ({} skipped), written to {}",
                    result.assets_analysis.len(),
                    report.diagnostics.skipped_assets.len(),
                    path.display()
                ));
            }
        }
        (None, OutputFormat::Table) => {
            if !quiet {
                print_header(&format!("{} ({})", result.fund_name, result.analysis_period));
            }
            print_output(&statistic_rows(&result.fund_statistics), format)?;
        }
        (None, OutputFormat::Json) => println!("{document}"),
    }

    Ok(())
}
