//! Canonical raw input representation.

use serde_json::Value;

use crate::schema::{MetricPath, MetricSet};

/// One asset as read from an input document, before any statistics exist.
///
/// Each schema slot holds the metric object exactly as it appeared in the
/// input (normally `{"values": [...], "unit": "..."}`), or `None` when the
/// document does not carry that metric. Leaves are validated by the
/// transformer, so a malformed metric only fails its own asset.
#[derive(Debug, Clone, PartialEq)]
pub struct RawAsset {
    /// Asset name.
    pub name: String,

    /// Sector, if the input provides one.
    pub sector: Option<String>,

    /// Period labels, in input order.
    pub time_points: Vec<String>,

    /// Raw metric objects by schema slot.
    pub metrics: MetricSet<Option<Value>>,
}

impl RawAsset {
    /// Creates an asset with no metrics.
    #[must_use]
    pub fn new(name: impl Into<String>, time_points: Vec<String>) -> Self {
        Self {
            name: name.into(),
            sector: None,
            time_points,
            metrics: MetricSet::default(),
        }
    }

    /// Sets the sector.
    #[must_use]
    pub fn with_sector(mut self, sector: impl Into<String>) -> Self {
        self.sector = Some(sector.into());
        self
    }

    /// Stores the raw metric object for `path`.
    #[must_use]
    pub fn with_metric(mut self, path: MetricPath, metric: Value) -> Self {
        *self.metrics.get_mut(path) = Some(metric);
        self
    }

    /// Schema paths the asset carries no metric for.
    #[must_use]
    pub fn missing_paths(&self) -> Vec<MetricPath> {
        self.metrics
            .iter()
            .filter(|(_, metric)| metric.is_none())
            .map(|(path, _)| path)
            .collect()
    }
}
