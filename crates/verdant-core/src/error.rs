//! Error types for ESG metric aggregation.
//!
//! Fund-wide errors ([`VerdantError::Parse`], [`VerdantError::UnsupportedInputShape`])
//! stop a run before any asset is touched. Asset-scoped errors
//! ([`VerdantError::InvalidInput`], [`VerdantError::MissingMetric`]) only abort the
//! asset they were raised for; see [`VerdantError::is_asset_scoped`].

use thiserror::Error;

/// Result type for Verdant operations.
pub type VerdantResult<T> = Result<T, VerdantError>;

/// Errors that can occur while normalizing, transforming or aggregating ESG data.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VerdantError {
    /// Input text is not valid JSON.
    #[error("Parse error: {message}")]
    Parse {
        /// Message from the JSON parser, including line and column.
        message: String,
    },

    /// Valid JSON that matches neither the time-series nor the monthly input shape.
    #[error("Unsupported input shape: {reason}")]
    UnsupportedInputShape {
        /// What was found instead of a recognised shape.
        reason: String,
    },

    /// A value sequence or asset entry is malformed.
    #[error("Invalid input at '{path}'{}: {reason}", asset_context(.asset))]
    InvalidInput {
        /// Asset the error belongs to, if any.
        asset: Option<String>,
        /// Location of the offending value (metric path or document path).
        path: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// A metric required by the fixed schema is absent from an asset.
    #[error("Asset '{asset}' is missing required metric '{path}'")]
    MissingMetric {
        /// Asset name.
        asset: String,
        /// Dotted metric path, e.g. `environmental.CO2_emission`.
        path: String,
    },
}

fn asset_context(asset: &Option<String>) -> String {
    match asset {
        Some(name) => format!(" in asset '{name}'"),
        None => String::new(),
    }
}

impl VerdantError {
    /// Create a parse error.
    #[must_use]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Create an unsupported input shape error.
    #[must_use]
    pub fn unsupported_shape(reason: impl Into<String>) -> Self {
        Self::UnsupportedInputShape {
            reason: reason.into(),
        }
    }

    /// Create an invalid input error that is not tied to an asset.
    #[must_use]
    pub fn invalid_input(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            asset: None,
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid input error for a specific asset.
    #[must_use]
    pub fn invalid_asset_input(
        asset: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidInput {
            asset: Some(asset.into()),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a missing metric error.
    #[must_use]
    pub fn missing_metric(asset: impl Into<String>, path: impl Into<String>) -> Self {
        Self::MissingMetric {
            asset: asset.into(),
            path: path.into(),
        }
    }

    /// Attaches an asset and a location to an error raised without that context.
    ///
    /// Used when the summarizer rejects a sequence: it only knows about the
    /// values, the transformer knows which asset and metric they came from.
    #[must_use]
    pub fn in_asset(self, asset: &str, path: &str) -> Self {
        match self {
            Self::InvalidInput {
                asset: None,
                reason,
                ..
            } => Self::invalid_asset_input(asset, path, reason),
            other => other,
        }
    }

    /// Returns true if the error only invalidates a single asset.
    #[must_use]
    pub fn is_asset_scoped(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput { asset: Some(_), .. } | Self::MissingMetric { .. }
        )
    }

    /// Name of the asset the error belongs to, if any.
    #[must_use]
    pub fn asset(&self) -> Option<&str> {
        match self {
            Self::InvalidInput { asset, .. } => asset.as_deref(),
            Self::MissingMetric { asset, .. } => Some(asset),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for VerdantError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = VerdantError::missing_metric("Acme", "environmental.CO2_emission");
        assert_eq!(
            err.to_string(),
            "Asset 'Acme' is missing required metric 'environmental.CO2_emission'"
        );

        let err = VerdantError::invalid_input("values", "sequence is empty");
        assert_eq!(err.to_string(), "Invalid input at 'values': sequence is empty");

        let err = VerdantError::invalid_asset_input("Acme", "social.pay_equity_ratio", "bad");
        assert!(err.to_string().contains("in asset 'Acme'"));
        assert!(err.to_string().contains("social.pay_equity_ratio"));
    }

    #[test]
    fn test_in_asset_attaches_context() {
        let err = VerdantError::invalid_input("values", "contains NaN")
            .in_asset("Acme", "governance.ethics_violations");

        assert_eq!(
            err,
            VerdantError::invalid_asset_input("Acme", "governance.ethics_violations", "contains NaN")
        );
        assert!(err.is_asset_scoped());
        assert_eq!(err.asset(), Some("Acme"));
    }

    #[test]
    fn test_scope() {
        assert!(!VerdantError::parse("eof").is_asset_scoped());
        assert!(!VerdantError::unsupported_shape("array").is_asset_scoped());
        assert!(!VerdantError::invalid_input("fund_name", "missing").is_asset_scoped());
        assert!(VerdantError::missing_metric("A", "x").is_asset_scoped());
    }

    #[test]
    fn test_from_serde_json() {
        let err: VerdantError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, VerdantError::Parse { .. }));
    }
}
