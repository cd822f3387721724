//! Fund-level output document.

use serde::{Deserialize, Serialize};

use super::AssetAnalysis;
use crate::schema::MetricSet;

/// Fund-wide average `year_over_year_change` for every schema metric.
pub type FundStatistics = MetricSet<f64>;

/// The analysis document handed to downstream renderers.
///
/// Key names and nesting are relied upon verbatim by chart and report
/// consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Fund name.
    pub fund_name: String,

    /// Label of the analysed period.
    pub analysis_period: String,

    /// One entry per successfully transformed asset, in input order.
    pub assets_analysis: Vec<AssetAnalysis>,

    /// Fund-wide roll-ups.
    pub fund_statistics: FundStatistics,
}

impl AnalysisResult {
    /// Looks up an asset by name.
    #[must_use]
    pub fn asset(&self, name: &str) -> Option<&AssetAnalysis> {
        self.assets_analysis.iter().find(|a| a.name == name)
    }
}
