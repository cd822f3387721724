//! Time-series summarizer.
//!
//! Turns one metric's ordered observations into [`MetricStats`]. Arithmetic
//! runs on the decimal form of the observations whenever every observation
//! has an exact decimal form and no intermediate leaves the decimal range;
//! otherwise the sequence is summarized in `f64`. Either way `average`,
//! `min`, `max` and `trend` are rounded to two places, half away from zero.

use rust_decimal::Decimal;
use verdant_core::rounding::{round_stat, round_stat_f64, to_exact_decimal, to_f64};
use verdant_core::{MetricSeries, MetricStats, VerdantError, VerdantResult};

const VALUES_PATH: &str = "values";

/// Computes statistics for a sequence with no unit label.
///
/// # Errors
///
/// [`VerdantError::InvalidInput`] if `values` is empty or contains a value
/// that is not finite, or if a derived statistic overflows `f64`.
///
/// # Example
///
/// ```
/// use verdant_analytics::summarize;
///
/// let stats = summarize(&[10.0, 20.0, 15.0]).unwrap();
/// assert_eq!(stats.current, 15.0);
/// assert_eq!(stats.previous, Some(20.0));
/// assert_eq!(stats.average, 15.0);
/// assert_eq!(stats.trend, 5.0);
/// assert_eq!(stats.year_over_year_change, -5.0);
/// ```
pub fn summarize(values: &[f64]) -> VerdantResult<MetricStats> {
    summarize_with_unit(values, "")
}

/// Computes statistics for a sequence, carrying `unit` into the result.
pub fn summarize_with_unit(values: &[f64], unit: &str) -> VerdantResult<MetricStats> {
    let Some(&current) = values.last() else {
        return Err(VerdantError::invalid_input(VALUES_PATH, "sequence is empty"));
    };

    if let Some((index, value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(VerdantError::invalid_input(
            VALUES_PATH,
            format!("observation {index} is not a finite number ({value})"),
        ));
    }

    let spread = match exact_decimals(values).and_then(|decimals| decimal_spread(&decimals)) {
        Some(spread) => spread,
        None => float_spread(values)?,
    };

    Ok(MetricStats {
        current,
        previous: values.len().checked_sub(2).map(|i| values[i]),
        min: spread.min,
        max: spread.max,
        average: spread.average,
        trend: spread.trend,
        year_over_year_change: spread.change,
        unit: unit.to_string(),
    })
}

/// Builds the full [`MetricSeries`] leaf for a sequence.
pub fn summarize_series(values: Vec<f64>, unit: impl Into<String>) -> VerdantResult<MetricSeries> {
    let unit = unit.into();
    let stats = summarize_with_unit(&values, &unit)?;
    Ok(MetricSeries { values, unit, stats })
}

/// Derived statistics, already rounded where rounding applies.
struct Spread {
    min: f64,
    max: f64,
    average: f64,
    trend: f64,
    change: f64,
}

fn exact_decimals(values: &[f64]) -> Option<Vec<Decimal>> {
    values.iter().map(|&value| to_exact_decimal(value)).collect()
}

/// `None` if any intermediate leaves the decimal range.
fn decimal_spread(decimals: &[Decimal]) -> Option<Spread> {
    let first = *decimals.first()?;
    let last = *decimals.last()?;

    let sum = decimals
        .iter()
        .try_fold(Decimal::ZERO, |acc, d| acc.checked_add(*d))?;
    let average = sum.checked_div(Decimal::from(decimals.len()))?;
    let min = decimals.iter().min().copied()?;
    let max = decimals.iter().max().copied()?;
    let trend = last.checked_sub(first)?;
    let change = match decimals.len().checked_sub(2) {
        Some(i) => last.checked_sub(decimals[i])?,
        None => Decimal::ZERO,
    };

    Some(Spread {
        min: round_stat(min),
        max: round_stat(max),
        average: round_stat(average),
        trend: round_stat(trend),
        change: to_f64(change),
    })
}

fn float_spread(values: &[f64]) -> VerdantResult<Spread> {
    let first = values[0];
    let last = values[values.len() - 1];
    let count = values.len() as f64;

    let sum: f64 = values.iter().sum();
    let average = if sum.is_finite() {
        sum / count
    } else {
        values.iter().map(|v| v / count).sum()
    };
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let trend = last - first;
    let change = values.len().checked_sub(2).map_or(0.0, |i| last - values[i]);

    for (name, value) in [
        ("average", average),
        ("trend", trend),
        ("year-over-year change", change),
    ] {
        if !value.is_finite() {
            return Err(VerdantError::invalid_input(
                VALUES_PATH,
                format!("{name} exceeds the f64 range"),
            ));
        }
    }

    Ok(Spread {
        min: round_stat_f64(min),
        max: round_stat_f64(max),
        average: round_stat_f64(average),
        trend: round_stat_f64(trend),
        change,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_sequence() {
        let stats = summarize(&[10.0, 20.0, 15.0]).unwrap();
        assert_eq!(
            stats,
            MetricStats {
                current: 15.0,
                previous: Some(20.0),
                min: 10.0,
                max: 20.0,
                average: 15.0,
                trend: 5.0,
                year_over_year_change: -5.0,
                unit: String::new(),
            }
        );
    }

    #[test]
    fn test_single_observation() {
        let stats = summarize(&[7.25]).unwrap();
        assert_eq!(stats.current, 7.25);
        assert_eq!(stats.previous, None);
        assert_eq!(stats.year_over_year_change, 0.0);
        assert_eq!(stats.trend, 0.0);
        assert_eq!(stats.min, 7.25);
        assert_eq!(stats.max, 7.25);
    }

    #[test]
    fn test_empty_rejected() {
        let err = summarize(&[]).unwrap_err();
        assert!(matches!(err, VerdantError::InvalidInput { .. }));
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_non_finite_rejected() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = summarize(&[1.0, bad, 3.0]).unwrap_err();
            assert!(err.to_string().contains("observation 1"), "{err}");
        }
    }

    #[test]
    fn test_change_past_decimal_range_does_not_overflow() {
        // Sum and trend fit in a decimal, last - previous does not.
        let stats = summarize(&[0.0, -7.0e28, 7.0e28]).unwrap();
        assert_eq!(stats.year_over_year_change, 7.0e28 + 7.0e28);
        assert_eq!(stats.trend, 7.0e28);
        assert_eq!(stats.average, 0.0);
        assert_eq!(stats.previous, Some(-7.0e28));
    }

    #[test]
    fn test_large_finite_values_accepted() {
        let stats = summarize(&[1e29, 1e29]).unwrap();
        assert_eq!(stats.average, 1e29);
        assert_eq!(stats.min, 1e29);
        assert_eq!(stats.year_over_year_change, 0.0);

        let stats = summarize(&[1e300, 2e300]).unwrap();
        assert_eq!(stats.average, (1e300 + 2e300) / 2.0);
        assert_eq!(stats.year_over_year_change, 1e300);
    }

    #[test]
    fn test_tiny_values_keep_their_change() {
        let stats = summarize(&[0.0, 1e-30]).unwrap();
        assert_eq!(stats.current, 1e-30);
        assert_eq!(stats.year_over_year_change, 1e-30);
        // Rounded statistics are still rounded to two places.
        assert_eq!(stats.max, 0.0);
        assert_eq!(stats.trend, 0.0);
    }

    #[test]
    fn test_average_of_extremes_does_not_overflow() {
        let stats = summarize(&[f64::MAX, f64::MAX]).unwrap();
        assert_eq!(stats.average, f64::MAX);
    }

    #[test]
    fn test_trend_past_f64_range_rejected() {
        let err = summarize(&[-f64::MAX, f64::MAX]).unwrap_err();
        assert!(matches!(err, VerdantError::InvalidInput { .. }));
        assert!(err.to_string().contains("trend exceeds the f64 range"));
    }

    #[test]
    fn test_average_rounds_half_away_from_zero() {
        // Mean is exactly 0.125 / -0.125.
        assert_eq!(summarize(&[0.0, 0.25]).unwrap().average, 0.13);
        assert_eq!(summarize(&[0.0, -0.25]).unwrap().average, -0.13);
    }

    #[test]
    fn test_average_of_thirds() {
        let stats = summarize(&[1.0, 1.0, 2.0]).unwrap();
        assert_eq!(stats.average, 1.33);
    }

    #[test]
    fn test_change_has_no_binary_noise() {
        let stats = summarize(&[0.1, 0.3]).unwrap();
        assert_eq!(stats.year_over_year_change, 0.2);
        assert_eq!(stats.trend, 0.2);
    }

    #[test]
    fn test_min_max_rounded() {
        let stats = summarize(&[1.234, 5.678]).unwrap();
        assert_eq!(stats.min, 1.23);
        assert_eq!(stats.max, 5.68);
        // Raw observations are not rounded.
        assert_eq!(stats.current, 5.678);
        assert_eq!(stats.previous, Some(1.234));
    }

    #[test]
    fn test_unit_carried() {
        let stats = summarize_with_unit(&[1.0, 2.0], "tCO2e").unwrap();
        assert_eq!(stats.unit, "tCO2e");
    }

    #[test]
    fn test_summarize_series() {
        let series = summarize_series(vec![3.0, 1.0], "%").unwrap();
        assert_eq!(series.values, vec![3.0, 1.0]);
        assert_eq!(series.unit, "%");
        assert_eq!(series.stats.unit, "%");
        assert_eq!(series.stats.year_over_year_change, -2.0);
    }

    #[test]
    fn test_deterministic() {
        let values = [12.5, 13.75, 11.0, 14.2, 13.9];
        let a = summarize(&values).unwrap();
        let b = summarize(&values).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.average.to_bits(), b.average.to_bits());
    }
}
