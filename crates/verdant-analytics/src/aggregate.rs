//! Fund aggregator.
//!
//! Averages each metric's `year_over_year_change` across a fund's assets.
//! An asset that cannot supply a finite value for a path degrades to a
//! warning instead of an error; how it then counts, or whether the whole
//! path falls back to `0`, is set by [`MissingContribution`]. Sums are exact decimal sums so the result does
//! not depend on asset order.

use rust_decimal::Decimal;
use serde_json::Value;
use tracing::warn;
use verdant_core::rounding::{to_decimal, to_f64};
use verdant_core::{AggregationWarning, AssetAnalysis, FundStatistics, MetricPath, MetricSet};

use crate::config::{AnalysisConfig, MissingContribution};
use crate::parallel::maybe_parallel_map;

/// Something the aggregator can read year-over-year changes from.
pub trait YearOverYearSource {
    /// Name used in warnings. `index` is the position in the asset list.
    fn label(&self, index: usize) -> String;

    /// The `year_over_year_change` stored for `path`, or why it is unavailable.
    fn year_over_year_change(&self, path: MetricPath) -> Result<f64, String>;
}

impl YearOverYearSource for AssetAnalysis {
    fn label(&self, _index: usize) -> String {
        self.name.clone()
    }

    fn year_over_year_change(&self, path: MetricPath) -> Result<f64, String> {
        Ok(self.time_series.metrics.get(path).stats.year_over_year_change)
    }
}

/// Asset analysis documents that have already been serialized, possibly
/// edited, and read back. Unknown fields are ignored.
impl YearOverYearSource for Value {
    fn label(&self, index: usize) -> String {
        self.get("name")
            .and_then(Value::as_str)
            .map_or_else(|| format!("asset[{index}]"), str::to_string)
    }

    fn year_over_year_change(&self, path: MetricPath) -> Result<f64, String> {
        let metrics = self
            .get("time_series")
            .and_then(|series| series.get("metrics"))
            .ok_or_else(|| "asset has no `time_series.metrics`".to_string())?;

        let metric = path
            .segments()
            .try_fold(metrics, |node, segment| node.get(segment))
            .ok_or_else(|| format!("metric `{path}` is absent"))?;

        metric
            .get("stats")
            .and_then(|stats| stats.get("year_over_year_change"))
            .and_then(Value::as_f64)
            .ok_or_else(|| format!("metric `{path}` has no numeric `stats.year_over_year_change`"))
    }
}

/// Fund statistics together with the warnings raised while computing them.
#[derive(Debug, Clone, PartialEq)]
pub struct FundAggregation {
    /// Per-path fund-wide averages.
    pub statistics: FundStatistics,
    /// One entry per (asset, path) that could not contribute.
    pub warnings: Vec<AggregationWarning>,
}

/// Aggregates with the default configuration and discards warnings.
///
/// An empty asset list yields `0` for every path.
///
/// # Example
///
/// ```
/// use verdant_analytics::aggregate_fund;
/// use verdant_core::MetricPath;
///
/// let stats = aggregate_fund(&[]);
/// assert_eq!(*stats.get(MetricPath::EthicsViolations), 0.0);
/// ```
#[must_use]
pub fn aggregate_fund(assets: &[AssetAnalysis]) -> FundStatistics {
    aggregate(assets, &AnalysisConfig::default()).statistics
}

/// Aggregates typed asset analyses.
#[must_use]
pub fn aggregate_fund_with(assets: &[AssetAnalysis], config: &AnalysisConfig) -> FundAggregation {
    aggregate(assets, config)
}

/// Aggregates asset analysis documents given as JSON values, walking each
/// metric by its dotted path.
#[must_use]
pub fn aggregate_documents(assets: &[Value], config: &AnalysisConfig) -> FundAggregation {
    aggregate(assets, config)
}

/// Aggregates any list of year-over-year sources.
pub fn aggregate<S>(assets: &[S], config: &AnalysisConfig) -> FundAggregation
where
    S: YearOverYearSource + Sync,
{
    let contributions = maybe_parallel_map(assets, config, |asset| {
        MetricSet::from_fn(|path| contribution(asset, path))
    });

    let mut warnings = Vec::new();
    let statistics = MetricSet::from_fn(|path| {
        let mut sum = Decimal::ZERO;
        let mut count = 0usize;
        let mut failed = false;

        for (index, (asset, contributed)) in assets.iter().zip(&contributions).enumerate() {
            let outcome = contributed
                .get(path)
                .clone()
                .and_then(|value| {
                    sum.checked_add(value)
                        .ok_or_else(|| "running sum exceeds the decimal range".to_string())
                });

            match outcome {
                Ok(next) => {
                    sum = next;
                    count += 1;
                }
                Err(reason) => {
                    let warning = AggregationWarning::new(asset.label(index), path, reason);
                    warn!(asset = %warning.asset, path = %path, "{}", warning.reason);
                    warnings.push(warning);
                    failed = true;
                    if config.missing_contribution == MissingContribution::Zero {
                        count += 1;
                    }
                }
            }
        }

        if failed && config.missing_contribution == MissingContribution::ZeroPath {
            return 0.0;
        }
        mean(sum, count)
    });

    FundAggregation { statistics, warnings }
}

fn contribution<S: YearOverYearSource>(asset: &S, path: MetricPath) -> Result<Decimal, String> {
    let change = asset.year_over_year_change(path)?;
    if !change.is_finite() {
        return Err(format!("year_over_year_change is not finite ({change})"));
    }
    to_decimal(change).ok_or_else(|| format!("year_over_year_change {change} is outside the decimal range"))
}

fn mean(sum: Decimal, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    sum.checked_div(Decimal::from(count)).map_or(0.0, to_f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use verdant_core::{MetricSeries, MetricStats, TimeSeries};

    fn asset(name: &str, change: f64) -> AssetAnalysis {
        AssetAnalysis {
            name: name.to_string(),
            sector: None,
            time_series: TimeSeries {
                time_points: vec!["Jan".to_string(), "Feb".to_string()],
                metrics: MetricSet::from_fn(|_| MetricSeries {
                    values: vec![0.0, change],
                    unit: String::new(),
                    stats: MetricStats {
                        current: change,
                        previous: Some(0.0),
                        min: change.min(0.0),
                        max: change.max(0.0),
                        average: change / 2.0,
                        trend: change,
                        year_over_year_change: change,
                        unit: String::new(),
                    },
                }),
            },
        }
    }

    #[test]
    fn test_empty_fund_is_zero() {
        let stats = aggregate_fund(&[]);
        for (_, value) in stats.iter() {
            assert_eq!(*value, 0.0);
        }
    }

    #[test]
    fn test_plain_mean() {
        let stats = aggregate_fund(&[asset("A", -4.0), asset("B", 1.0)]);
        for (_, value) in stats.iter() {
            assert_eq!(*value, -1.5);
        }
    }

    #[test]
    fn test_mean_has_no_binary_noise() {
        let stats = aggregate_fund(&[asset("A", 0.1), asset("B", 0.2)]);
        assert_eq!(*stats.get(MetricPath::WaterUsage), 0.15);
    }

    #[test]
    fn test_non_finite_change_degrades() {
        let mut broken = asset("B", 0.0);
        broken
            .time_series
            .metrics
            .get_mut(MetricPath::BoardIndependence)
            .stats
            .year_over_year_change = f64::NAN;

        let result = aggregate_fund_with(&[asset("A", 6.0), broken], &AnalysisConfig::default());

        assert_eq!(*result.statistics.get(MetricPath::BoardIndependence), 3.0);
        assert_eq!(*result.statistics.get(MetricPath::WaterUsage), 3.0);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].asset, "B");
        assert_eq!(result.warnings[0].path, MetricPath::BoardIndependence);
    }

    fn document(name: &str, change: f64) -> Value {
        serde_json::to_value(asset(name, change)).unwrap()
    }

    fn without_ethics_violations(mut doc: Value) -> Value {
        doc["time_series"]["metrics"]["governance"]
            .as_object_mut()
            .unwrap()
            .remove("ethics_violations");
        doc
    }

    #[test]
    fn test_missing_path_contributes_zero() {
        let docs = vec![document("A", 8.0), without_ethics_violations(document("B", 2.0))];
        let result = aggregate_documents(&docs, &AnalysisConfig::default());

        assert_eq!(*result.statistics.get(MetricPath::EthicsViolations), 4.0);
        assert_eq!(*result.statistics.get(MetricPath::CybersecurityIncidents), 5.0);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].asset, "B");
        assert_eq!(result.warnings[0].path, MetricPath::EthicsViolations);
        assert!(result.warnings[0].reason.contains("governance.ethics_violations"));
    }

    #[test]
    fn test_missing_path_excluded() {
        let docs = vec![document("A", 8.0), without_ethics_violations(document("B", 2.0))];
        let config = AnalysisConfig::default().with_missing_contribution(MissingContribution::Exclude);
        let result = aggregate_documents(&docs, &config);

        assert_eq!(*result.statistics.get(MetricPath::EthicsViolations), 8.0);
        assert_eq!(*result.statistics.get(MetricPath::CybersecurityIncidents), 5.0);
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_missing_path_zeroes_whole_path() {
        let docs = vec![document("A", 8.0), without_ethics_violations(document("B", 2.0))];
        let config = AnalysisConfig::default().with_missing_contribution(MissingContribution::ZeroPath);
        let result = aggregate_documents(&docs, &config);

        assert_eq!(*result.statistics.get(MetricPath::EthicsViolations), 0.0);
        assert_eq!(*result.statistics.get(MetricPath::CybersecurityIncidents), 5.0);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].path, MetricPath::EthicsViolations);
    }

    #[test]
    fn test_running_sum_overflow_warns() {
        let config = AnalysisConfig::sequential();
        let result = aggregate_fund_with(&[asset("A", 5.0e28), asset("B", 5.0e28)], &config);

        assert_eq!(result.warnings.len(), MetricPath::ALL.len());
        for warning in &result.warnings {
            assert_eq!(warning.asset, "B");
            assert!(warning.reason.contains("decimal range"), "{}", warning.reason);
        }
        // B still counts as a zero contribution.
        for (_, value) in result.statistics.iter() {
            assert!((value / 2.5e28 - 1.0).abs() < 1e-9, "{value}");
        }

        let config = config.with_missing_contribution(MissingContribution::ZeroPath);
        let result = aggregate_fund_with(&[asset("A", 5.0e28), asset("B", 5.0e28)], &config);
        for (_, value) in result.statistics.iter() {
            assert_eq!(*value, 0.0);
        }
    }

    #[test]
    fn test_change_outside_decimal_range_warns() {
        let result = aggregate_fund_with(&[asset("A", 1.0e29), asset("B", 4.0)], &AnalysisConfig::default());

        assert_eq!(result.warnings.len(), MetricPath::ALL.len());
        assert!(result.warnings.iter().all(|w| w.asset == "A"));
        assert!(result.warnings[0].reason.contains("outside the decimal range"));
        assert_eq!(*result.statistics.get(MetricPath::WaterUsage), 2.0);
    }

    #[test]
    fn test_excluded_everywhere_is_zero() {
        let docs = vec![json!({ "name": "A" }), json!(42)];
        let config = AnalysisConfig::default().with_missing_contribution(MissingContribution::Exclude);
        let result = aggregate_documents(&docs, &config);

        for (_, value) in result.statistics.iter() {
            assert_eq!(*value, 0.0);
        }
        assert_eq!(result.warnings.len(), 2 * MetricPath::ALL.len());
        assert!(result.warnings.iter().any(|w| w.asset == "asset[1]"));
    }

    #[test]
    fn test_non_numeric_change_in_document() {
        let mut doc = document("A", 1.0);
        doc["time_series"]["metrics"]["environmental"]["CO2_emission"]["stats"]
            ["year_over_year_change"] = json!("n/a");

        let result = aggregate_documents(&[doc], &AnalysisConfig::default());
        assert_eq!(*result.statistics.get(MetricPath::Co2Emission), 0.0);
        assert_eq!(*result.statistics.get(MetricPath::WaterUsage), 1.0);
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_documents_match_typed() {
        let typed = vec![asset("A", 1.25), asset("B", -3.5), asset("C", 0.75)];
        let docs: Vec<Value> = typed.iter().map(|a| serde_json::to_value(a).unwrap()).collect();

        let config = AnalysisConfig::default();
        assert_eq!(
            aggregate_fund_with(&typed, &config).statistics,
            aggregate_documents(&docs, &config).statistics
        );
    }

    #[test]
    fn test_order_independent() {
        let forward = vec![asset("A", 0.1), asset("B", 0.7), asset("C", -0.3)];
        let mut reversed = forward.clone();
        reversed.reverse();

        assert_eq!(aggregate_fund(&forward), aggregate_fund(&reversed));
    }
}
