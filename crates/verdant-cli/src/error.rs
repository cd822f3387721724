//! CLI error types.

use std::path::PathBuf;

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file could not be read or parsed.
    #[error("Configuration error in {}: {message}", path.display())]
    Config {
        /// Path of the configuration file.
        path: PathBuf,
        /// What went wrong.
        message: String,
    },

    /// Input or output file error.
    #[error("IO error on {}: {source}", path.display())]
    File {
        /// Path being read or written.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// IO error on stdin or stdout.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Document does not have the layout a command needs.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
