//! Per-asset analysis block.

use serde::{Deserialize, Serialize};

use super::MetricSeries;
use crate::schema::MetricSet;

/// Metric block of one asset: a [`MetricSeries`] for every schema slot.
pub type AssetMetrics = MetricSet<MetricSeries>;

/// Normalized analysis of one fund holding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetAnalysis {
    /// Asset name.
    pub name: String,

    /// Sector, when the input provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,

    /// Time axis and metric series.
    pub time_series: TimeSeries,
}

/// Time axis shared by all metrics of an asset, plus the metrics themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    /// Period labels, in input order.
    pub time_points: Vec<String>,

    /// One series per schema metric.
    pub metrics: AssetMetrics,
}

impl AssetAnalysis {
    /// Number of periods on the time axis.
    #[must_use]
    pub fn period_count(&self) -> usize {
        self.time_series.time_points.len()
    }
}
