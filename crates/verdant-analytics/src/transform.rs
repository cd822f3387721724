//! Asset transformer.
//!
//! Applies the summarizer to every metric of the fixed schema for one raw
//! asset and assembles its [`AssetAnalysis`]. Raw metric objects are validated
//! here, at the boundary, so the statistics code only ever sees finite
//! sequences of the expected length.

use serde_json::Value;
use tracing::debug;
use verdant_core::{
    AssetAnalysis, AssetMetrics, MetricPath, MetricSeries, RawAsset, TimeSeries, VerdantError,
    VerdantResult,
};

use crate::normalize::{json_kind, raw_asset_from_time_series};
use crate::summarize::summarize_series;

/// Builds the analysis block for one asset.
///
/// The input is never modified and `time_points` are copied in their
/// original order.
///
/// # Errors
///
/// - [`VerdantError::MissingMetric`] for the first schema metric the asset lacks
/// - [`VerdantError::InvalidInput`] when a metric is not a `{values, unit}`
///   object, a value is not a finite number, a sequence is empty, or a
///   sequence length differs from the number of time points
pub fn transform_asset(raw: &RawAsset) -> VerdantResult<AssetAnalysis> {
    if raw.time_points.is_empty() {
        return Err(VerdantError::invalid_asset_input(
            &raw.name,
            "time_series.time_points",
            "asset declares no time points",
        ));
    }

    let metrics = AssetMetrics::try_from_fn(|path| {
        let metric = raw
            .metrics
            .get(path)
            .as_ref()
            .ok_or_else(|| VerdantError::missing_metric(&raw.name, path.as_str()))?;
        metric_series(&raw.name, path, metric, raw.time_points.len())
    })?;

    debug!(
        asset = %raw.name,
        periods = raw.time_points.len(),
        "transformed asset"
    );

    Ok(AssetAnalysis {
        name: raw.name.clone(),
        sector: raw.sector.clone(),
        time_series: TimeSeries {
            time_points: raw.time_points.clone(),
            metrics,
        },
    })
}

/// Transforms a single asset given as a time-series-shaped JSON object.
pub fn transform_asset_value(asset: &Value) -> VerdantResult<AssetAnalysis> {
    transform_asset(&raw_asset_from_time_series(0, asset)?)
}

fn metric_series(
    asset: &str,
    path: MetricPath,
    metric: &Value,
    expected_len: usize,
) -> VerdantResult<MetricSeries> {
    let invalid = |reason: String| VerdantError::invalid_asset_input(asset, path.as_str(), reason);

    let object = metric
        .as_object()
        .ok_or_else(|| invalid(format!("expected a metric object, found {}", json_kind(metric))))?;

    let items = match object.get("values") {
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(invalid(format!(
                "`values` must be an array, found {}",
                json_kind(other)
            )))
        }
        None => return Err(invalid("metric has no `values` sequence".to_string())),
    };

    let values = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            item.as_f64()
                .ok_or_else(|| invalid(format!("observation {index} is not a number ({item})")))
        })
        .collect::<VerdantResult<Vec<f64>>>()?;

    let unit = match object.get("unit") {
        None | Some(Value::Null) => "",
        Some(Value::String(unit)) => unit.as_str(),
        Some(other) => {
            return Err(invalid(format!(
                "`unit` must be a string, found {}",
                json_kind(other)
            )))
        }
    };

    let series =
        summarize_series(values, unit).map_err(|err| err.in_asset(asset, path.as_str()))?;

    if series.values.len() != expected_len {
        return Err(invalid(format!(
            "{} observations for {} time points",
            series.values.len(),
            expected_len
        )));
    }

    Ok(series)
}
