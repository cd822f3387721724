//! Per-metric statistics.

use serde::{Deserialize, Serialize};

/// Point statistics derived from one metric's value sequence.
///
/// `average`, `min`, `max` and `trend` are rounded to two decimal places;
/// `current` and `previous` are the observed values unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricStats {
    /// Last observation.
    pub current: f64,

    /// Second-to-last observation, absent for single-observation sequences.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<f64>,

    /// Smallest observation.
    pub min: f64,

    /// Largest observation.
    pub max: f64,

    /// Arithmetic mean.
    pub average: f64,

    /// Last observation minus first observation.
    pub trend: f64,

    /// Most recent observation minus the previous one, `0` with fewer than two.
    pub year_over_year_change: f64,

    /// Unit label, empty when the source carries none.
    #[serde(default)]
    pub unit: String,
}

/// A leaf metric: the raw sequence, its unit and its statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSeries {
    /// Observations in time-point order.
    pub values: Vec<f64>,

    /// Unit label, empty when the source carries none.
    #[serde(default)]
    pub unit: String,

    /// Statistics computed from `values`.
    pub stats: MetricStats,
}
