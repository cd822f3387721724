//! Verdant CLI - Command-line interface for ESG fund metric aggregation.
//!
//! # Usage
//!
//! ```bash
//! # Analyze a fund document (time-series or monthly shape)
//! verdant analyze fund.json -o analysis.json
//!
//! # Print only the fund statistics as a table
//! verdant --format table analyze fund.json
//!
//! # Statistics for an ad-hoc series
//! verdant summarize 10 20 15 --unit tCO2e
//!
//! # Recompute fund statistics of an edited analysis document
//! verdant aggregate analysis.json
//!
//! # List the metric schema
//! verdant paths
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod error;
mod output;
mod settings;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.quiet, cli.verbose);

    let format = cli.format;
    let config = settings::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Analyze(args) => commands::analyze::execute(args, format, &config, cli.quiet)?,
        Commands::Summarize(args) => commands::summarize::execute(args, format)?,
        Commands::Aggregate(args) => commands::aggregate::execute(args, format, &config)?,
        Commands::Paths => commands::paths::execute(format)?,
    }

    Ok(())
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_tracing(quiet: bool, verbose: bool) {
    let default_level = if verbose {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}
