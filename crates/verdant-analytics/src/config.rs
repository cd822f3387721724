//! Configuration for fund analysis runs.

use serde::{Deserialize, Serialize};

/// What happens when one asset fails to transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Drop the asset from the result and record it in the diagnostics.
    #[default]
    Skip,
    /// Fail the whole run with the first asset error, in input order.
    Abort,
}

/// How an asset that cannot supply a value counts towards a fund-wide average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingContribution {
    /// The asset contributes `0` and still counts in the denominator.
    #[default]
    Zero,
    /// The asset is left out of that metric's average.
    Exclude,
    /// The whole metric falls back to `0` as soon as one asset cannot
    /// supply it.
    #[serde(rename = "zero-path")]
    ZeroPath,
}

/// Configuration for fund analysis.
///
/// Controls parallelism, failure handling and aggregation fallbacks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Enable parallel processing (requires 'parallel' feature).
    pub parallel: bool,

    /// Minimum asset count to trigger parallel processing.
    /// Below this threshold, sequential is faster due to thread overhead.
    pub parallel_threshold: usize,

    /// Per-asset failure handling.
    pub failure_policy: FailurePolicy,

    /// Contribution of assets that cannot supply a metric value.
    pub missing_contribution: MissingContribution,

    /// Analysis period used when neither the document nor its time points provide one.
    pub default_analysis_period: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            parallel_threshold: 64,
            failure_policy: FailurePolicy::Skip,
            missing_contribution: MissingContribution::Zero,
            default_analysis_period: "unspecified".to_string(),
        }
    }
}

impl AnalysisConfig {
    /// Creates a new config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a config that always uses sequential processing.
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Sets whether to use parallel processing.
    #[must_use]
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Sets the threshold for parallel processing.
    #[must_use]
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Sets the failure policy.
    #[must_use]
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// Sets the missing-contribution mode.
    #[must_use]
    pub fn with_missing_contribution(mut self, mode: MissingContribution) -> Self {
        self.missing_contribution = mode;
        self
    }

    /// Sets the fallback analysis period label.
    #[must_use]
    pub fn with_default_analysis_period(mut self, period: impl Into<String>) -> Self {
        self.default_analysis_period = period.into();
        self
    }

    /// Returns true if parallel processing should be used for the given count.
    #[must_use]
    pub fn should_parallelize(&self, count: usize) -> bool {
        cfg!(feature = "parallel") && self.parallel && count >= self.parallel_threshold
    }
}
