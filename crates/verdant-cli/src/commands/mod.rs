//! CLI command implementations.

pub mod aggregate;
pub mod analyze;
pub mod paths;
pub mod summarize;

// Re-export submodules for convenience
pub use aggregate::AggregateArgs;
pub use analyze::AnalyzeArgs;
pub use summarize::SummarizeArgs;

use std::io::Read;
use std::path::Path;

use crate::error::{CliError, CliResult};

/// Reads a document from `path`, or from stdin when the path is absent or `-`.
pub fn read_input(path: Option<&Path>) -> CliResult<String> {
    match path {
        Some(path) if path != Path::new("-") => {
            std::fs::read_to_string(path).map_err(|source| CliError::File {
                path: path.to_path_buf(),
                source,
            })
        }
        _ => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

/// Writes `content` to `path`.
pub fn write_output(path: &Path, content: &str) -> CliResult<()> {
    std::fs::write(path, content).map_err(|source| CliError::File {
        path: path.to_path_buf(),
        source,
    })
}
