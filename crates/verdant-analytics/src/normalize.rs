//! Input normalization.
//!
//! Two document shapes are accepted and both are adapted to [`RawAsset`]s
//! before any statistics are computed:
//!
//! - **Time-series shape**: `fund_name`, `analysis_period`, and an
//!   `assets_analysis` list whose entries carry `time_series.time_points` and
//!   `time_series.metrics.<category>.<metric>.{values, unit}`.
//! - **Monthly shape**: `fund.name` and `fund.assets`, each asset carrying a
//!   `data` object keyed by month with flat metric values per month.
//!
//! Anything else is rejected with [`VerdantError::UnsupportedInputShape`].
//! Structural problems inside a single asset entry are kept per asset so
//! one malformed holding does not reject the document.

use serde_json::{json, Map, Value};
use verdant_core::{MetricPath, MetricSet, RawAsset, VerdantError, VerdantResult};

/// A document as handed to the pipeline: raw text or an already-parsed value.
#[derive(Debug, Clone, PartialEq)]
pub enum InputDocument {
    /// Serialized JSON text.
    Text(String),
    /// Parsed JSON structure.
    Parsed(Value),
}

impl InputDocument {
    /// Returns the parsed document, parsing text input first.
    ///
    /// # Errors
    ///
    /// [`VerdantError::Parse`] if the text is not valid JSON.
    pub fn into_value(self) -> VerdantResult<Value> {
        match self {
            Self::Text(text) => parse_document(&text),
            Self::Parsed(value) => Ok(value),
        }
    }
}

impl From<&str> for InputDocument {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for InputDocument {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Value> for InputDocument {
    fn from(value: Value) -> Self {
        Self::Parsed(value)
    }
}

impl From<&Value> for InputDocument {
    fn from(value: &Value) -> Self {
        Self::Parsed(value.clone())
    }
}

/// Parses JSON text into a document value.
pub fn parse_document(text: &str) -> VerdantResult<Value> {
    serde_json::from_str(text).map_err(|e| VerdantError::parse(e.to_string()))
}

/// Which input shape a document uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputShape {
    /// Pre-structured per-category time series (`assets_analysis`).
    TimeSeries,
    /// Flat records keyed by month (`fund.assets[].data`).
    Monthly,
}

/// Detects the shape of a parsed document.
pub fn detect_shape(document: &Value) -> VerdantResult<InputShape> {
    let Some(root) = document.as_object() else {
        return Err(VerdantError::unsupported_shape(format!(
            "expected a JSON object at the top level, found {}",
            json_kind(document)
        )));
    };

    if let Some(assets) = root.get("assets_analysis") {
        if !assets.is_array() {
            return Err(VerdantError::unsupported_shape(format!(
                "`assets_analysis` must be an array, found {}",
                json_kind(assets)
            )));
        }
        return Ok(InputShape::TimeSeries);
    }

    if let Some(fund) = root.get("fund") {
        return match fund.get("assets") {
            Some(Value::Array(_)) => Ok(InputShape::Monthly),
            Some(other) => Err(VerdantError::unsupported_shape(format!(
                "`fund.assets` must be an array, found {}",
                json_kind(other)
            ))),
            None => Err(VerdantError::unsupported_shape("`fund` object has no `assets` list")),
        };
    }

    let keys: Vec<&str> = root.keys().map(String::as_str).collect();
    Err(VerdantError::unsupported_shape(format!(
        "expected `assets_analysis` (time-series shape) or `fund.assets` (monthly shape), found keys [{}]",
        keys.join(", ")
    )))
}

/// A fund document adapted to the canonical raw form.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedFund {
    /// Fund name.
    pub fund_name: String,
    /// Analysis period declared by the document, if any.
    pub analysis_period: Option<String>,
    /// Shape the document was read from.
    pub shape: InputShape,
    /// One entry per input asset, in input order. Entries that could not be
    /// read as an asset hold the error for that asset.
    pub assets: Vec<VerdantResult<RawAsset>>,
}

impl NormalizedFund {
    /// Resolves the analysis period label.
    ///
    /// Declared period first, then `"<first> - <last>"` from the time points of
    /// the first readable asset, then `default`.
    #[must_use]
    pub fn resolve_period(&self, default: &str) -> String {
        if let Some(period) = &self.analysis_period {
            return period.clone();
        }
        let time_points = self
            .assets
            .iter()
            .filter_map(|asset| asset.as_ref().ok())
            .map(|asset| &asset.time_points)
            .find(|points| !points.is_empty());

        match time_points.map(Vec::as_slice) {
            Some([only]) => only.clone(),
            Some([first, .., last]) => format!("{first} - {last}"),
            _ => default.to_string(),
        }
    }

    /// Number of readable assets.
    #[must_use]
    pub fn readable_count(&self) -> usize {
        self.assets.iter().filter(|asset| asset.is_ok()).count()
    }
}

/// Adapts a parsed document of either shape.
///
/// # Errors
///
/// - [`VerdantError::UnsupportedInputShape`] if the shape is not recognised
/// - [`VerdantError::InvalidInput`] (fund-wide) if the fund has no name
pub fn normalize(document: &Value) -> VerdantResult<NormalizedFund> {
    let shape = detect_shape(document)?;
    match shape {
        InputShape::TimeSeries => normalize_time_series(document),
        InputShape::Monthly => normalize_monthly(document),
    }
}

fn normalize_time_series(document: &Value) -> VerdantResult<NormalizedFund> {
    let fund_name = fund_name(document.get("fund_name"), "fund_name")?;
    let assets = array_items(document.get("assets_analysis"))
        .iter()
        .enumerate()
        .map(|(index, asset)| raw_asset_from_time_series(index, asset))
        .collect();

    Ok(NormalizedFund {
        fund_name,
        analysis_period: period(document.get("analysis_period")),
        shape: InputShape::TimeSeries,
        assets,
    })
}

fn normalize_monthly(document: &Value) -> VerdantResult<NormalizedFund> {
    let fund = &document["fund"];
    let fund_name = fund_name(fund.get("name"), "fund.name")?;
    let assets = array_items(fund.get("assets"))
        .iter()
        .enumerate()
        .map(|(index, asset)| raw_asset_from_monthly(index, asset))
        .collect();

    Ok(NormalizedFund {
        fund_name,
        analysis_period: period(fund.get("analysis_period"))
            .or_else(|| period(document.get("analysis_period"))),
        shape: InputShape::Monthly,
        assets,
    })
}

/// Reads one `assets_analysis` entry.
pub fn raw_asset_from_time_series(index: usize, asset: &Value) -> VerdantResult<RawAsset> {
    let location = format!("assets_analysis[{index}]");
    let (object, name) = asset_header(index, &location, asset)?;

    let time_series = object
        .get("time_series")
        .and_then(Value::as_object)
        .ok_or_else(|| {
            VerdantError::invalid_asset_input(
                &name,
                format!("{location}.time_series"),
                "asset has no `time_series` object",
            )
        })?;

    let time_points = time_point_labels(&name, time_series.get("time_points"))?;
    let metrics_root = time_series.get("metrics").unwrap_or(&Value::Null);
    let metrics = MetricSet::from_fn(|path| {
        path.segments()
            .try_fold(metrics_root, |node, segment| node.get(segment))
            .filter(|leaf| !leaf.is_null())
            .cloned()
    });

    Ok(RawAsset {
        name,
        sector: sector(object),
        time_points,
        metrics,
    })
}

/// Reads one `fund.assets` entry of the monthly shape.
pub fn raw_asset_from_monthly(index: usize, asset: &Value) -> VerdantResult<RawAsset> {
    let location = format!("fund.assets[{index}]");
    let (object, name) = asset_header(index, &location, asset)?;

    let data = object.get("data").and_then(Value::as_object).ok_or_else(|| {
        VerdantError::invalid_asset_input(
            &name,
            format!("{location}.data"),
            "asset has no monthly `data` object",
        )
    })?;

    for (month, record) in data {
        if !record.is_object() {
            return Err(VerdantError::invalid_asset_input(
                &name,
                format!("{location}.data.{month}"),
                format!("expected a monthly record object, found {}", json_kind(record)),
            ));
        }
    }

    let time_points = data.keys().cloned().collect();
    let metrics = MetricSet::from_fn(|path| monthly_metric(data, path));

    Ok(RawAsset {
        name,
        sector: sector(object),
        time_points,
        metrics,
    })
}

/// Collects one metric across all months.
///
/// `None` unless every month carries the metric, so a gap in any month
/// surfaces as a missing metric for the asset.
fn monthly_metric(data: &Map<String, Value>, path: MetricPath) -> Option<Value> {
    let values = data
        .values()
        .map(|record| monthly_lookup(record, path).cloned())
        .collect::<Option<Vec<Value>>>()?;

    Some(json!({ "values": values, "unit": "" }))
}

fn monthly_lookup(record: &Value, path: MetricPath) -> Option<&Value> {
    match path {
        MetricPath::BoardDiversityFemale | MetricPath::BoardDiversityMinority => record
            .get("Board_Diversity")
            .or_else(|| record.get("board_diversity"))?
            .get(path.metric_name()),
        _ => record.get(path.metric_name()),
    }
}

fn asset_header<'a>(
    index: usize,
    location: &str,
    asset: &'a Value,
) -> VerdantResult<(&'a Map<String, Value>, String)> {
    let fallback = format!("asset[{index}]");

    let object = asset.as_object().ok_or_else(|| {
        VerdantError::invalid_asset_input(
            &fallback,
            location,
            format!("expected an asset object, found {}", json_kind(asset)),
        )
    })?;

    let name = object
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            VerdantError::invalid_asset_input(&fallback, format!("{location}.name"), "asset has no name")
        })?
        .to_string();

    Ok((object, name))
}

fn time_point_labels(asset: &str, value: Option<&Value>) -> VerdantResult<Vec<String>> {
    let invalid = |reason: String| {
        VerdantError::invalid_asset_input(asset, "time_series.time_points", reason)
    };

    let Some(Value::Array(items)) = value else {
        return Err(invalid("asset declares no time points".to_string()));
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| invalid(format!("time point {index} is not a string ({item})")))
        })
        .collect()
}

fn fund_name(value: Option<&Value>, location: &str) -> VerdantResult<String> {
    value
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| VerdantError::invalid_input(location, "fund name must be a string"))
}

fn period(value: Option<&Value>) -> Option<String> {
    value.and_then(Value::as_str).map(str::to_string)
}

fn sector(object: &Map<String, Value>) -> Option<String> {
    object.get("sector").and_then(Value::as_str).map(str::to_string)
}

fn array_items(value: Option<&Value>) -> &[Value] {
    value
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// Short name of a JSON value's type, for error messages.
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
