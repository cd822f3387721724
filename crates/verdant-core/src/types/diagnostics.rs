//! Side-channel records produced next to an analysis result.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::VerdantError;
use crate::schema::MetricPath;

/// An asset that could not contribute a value to one fund-wide metric.
///
/// Non-fatal: the metric is still aggregated, the asset's contribution
/// falls back according to the configured policy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregationWarning {
    /// Name of the asset.
    pub asset: String,
    /// Metric the asset could not contribute to.
    pub path: MetricPath,
    /// Why the value was unusable.
    pub reason: String,
}

impl AggregationWarning {
    /// Creates a new warning.
    #[must_use]
    pub fn new(asset: impl Into<String>, path: MetricPath, reason: impl Into<String>) -> Self {
        Self {
            asset: asset.into(),
            path,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for AggregationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "asset '{}' could not contribute to '{}': {}",
            self.asset, self.path, self.reason
        )
    }
}

/// An asset dropped from the result because its transform failed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetFailure {
    /// Position of the asset in the input document.
    pub index: usize,
    /// Name of the asset, or `asset[<index>]` when the entry had none.
    pub asset: String,
    /// The error that aborted the asset.
    #[serde(serialize_with = "serialize_display")]
    pub error: VerdantError,
}

fn serialize_display<S: Serializer>(error: &VerdantError, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}

impl fmt::Display for AssetFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "skipped asset #{} '{}': {}", self.index, self.asset, self.error)
    }
}

/// Everything that went wrong without stopping the run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Diagnostics {
    /// Assets excluded from `assets_analysis`.
    pub skipped_assets: Vec<AssetFailure>,
    /// Assets that could not contribute to a fund-wide metric.
    pub warnings: Vec<AggregationWarning>,
}

impl Diagnostics {
    /// Returns true if no asset was skipped and no warning was raised.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.skipped_assets.is_empty() && self.warnings.is_empty()
    }
}
