//! End-to-end analysis: parse, normalize, transform every asset, aggregate.

use serde::Serialize;
use tracing::{info, warn};
use verdant_core::{AnalysisResult, AssetFailure, Diagnostics, VerdantResult};

use crate::aggregate::aggregate;
use crate::config::{AnalysisConfig, FailurePolicy};
use crate::normalize::{normalize, InputDocument, NormalizedFund};
use crate::parallel::maybe_parallel_map;
use crate::transform::transform_asset;

/// The analysis document plus everything that went wrong on the way.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    /// The output document.
    pub result: AnalysisResult,
    /// Skipped assets and aggregation warnings.
    pub diagnostics: Diagnostics,
}

/// Runs the full pipeline over a fund document.
///
/// # Errors
///
/// - [`VerdantError::Parse`](verdant_core::VerdantError::Parse) for malformed JSON text
/// - [`VerdantError::UnsupportedInputShape`](verdant_core::VerdantError::UnsupportedInputShape)
///   when the document matches neither input shape
/// - a fund-wide `InvalidInput` when the fund has no name
/// - the first asset error, in input order, under [`FailurePolicy::Abort`]
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use verdant_analytics::{analyze, AnalysisConfig};
///
/// let doc = json!({ "fund_name": "Empty Fund", "assets_analysis": [] });
/// let report = analyze(doc, &AnalysisConfig::default()).unwrap();
///
/// assert_eq!(report.result.fund_name, "Empty Fund");
/// assert_eq!(report.result.analysis_period, "unspecified");
/// assert!(report.diagnostics.is_clean());
/// ```
pub fn analyze(
    input: impl Into<InputDocument>,
    config: &AnalysisConfig,
) -> VerdantResult<AnalysisReport> {
    let document = input.into().into_value()?;
    let fund = normalize(&document)?;
    analyze_normalized(&fund, config)
}

/// Runs transform and aggregation over an already normalized fund.
pub fn analyze_normalized(
    fund: &NormalizedFund,
    config: &AnalysisConfig,
) -> VerdantResult<AnalysisReport> {
    let outcomes = maybe_parallel_map(&fund.assets, config, |entry| match entry {
        Ok(raw) => transform_asset(raw),
        Err(err) => Err(err.clone()),
    });

    let mut assets_analysis = Vec::with_capacity(outcomes.len());
    let mut skipped_assets = Vec::new();

    for (index, outcome) in outcomes.into_iter().enumerate() {
        match outcome {
            Ok(analysis) => assets_analysis.push(analysis),
            Err(error) if config.failure_policy == FailurePolicy::Abort => return Err(error),
            Err(error) => {
                let asset = error
                    .asset()
                    .map_or_else(|| format!("asset[{index}]"), str::to_string);
                warn!(index, asset = %asset, error = %error, "skipping asset");
                skipped_assets.push(AssetFailure {
                    index,
                    asset,
                    error,
                });
            }
        }
    }

    let aggregation = aggregate(&assets_analysis, config);

    let result = AnalysisResult {
        fund_name: fund.fund_name.clone(),
        analysis_period: fund.resolve_period(&config.default_analysis_period),
        assets_analysis,
        fund_statistics: aggregation.statistics,
    };

    info!(
        fund = %result.fund_name,
        assets = result.assets_analysis.len(),
        skipped = skipped_assets.len(),
        warnings = aggregation.warnings.len(),
        "analysis complete"
    );

    Ok(AnalysisReport {
        result,
        diagnostics: Diagnostics {
            skipped_assets,
            warnings: aggregation.warnings,
        },
    })
}
