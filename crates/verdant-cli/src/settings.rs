//! Analysis configuration loading.
//!
//! ```toml
//! parallel = true
//! parallel_threshold = 64
//! failure_policy = "skip"          # or "abort"
//! missing_contribution = "zero"    # or "exclude", "zero-path"
//! default_analysis_period = "unspecified"
//! ```

use std::path::Path;

use tracing::debug;
use verdant_analytics::AnalysisConfig;

use crate::error::{CliError, CliResult};

/// Loads the configuration file, or the defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> CliResult<AnalysisConfig> {
    let Some(path) = path else {
        return Ok(AnalysisConfig::default());
    };

    let content = std::fs::read_to_string(path).map_err(|source| CliError::File {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse_config(&content).map_err(|message| CliError::Config {
        path: path.to_path_buf(),
        message,
    })?;

    debug!(path = %path.display(), ?config, "loaded analysis config");
    Ok(config)
}

fn parse_config(content: &str) -> Result<AnalysisConfig, String> {
    toml::from_str(content).map_err(|e| e.to_string())
}
