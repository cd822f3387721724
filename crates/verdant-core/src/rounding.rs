//! Decimal arithmetic helpers.
//!
//! Statistics are computed on the decimal representation of the observed
//! values rather than on their binary expansion, so `0.3 - 0.1` is `0.2`
//! and `1.005` rounds to `1.01`. Rounding is always half away from zero.
//!
//! Values the decimal type cannot hold exactly (beyond about `7.9e28`, or
//! with more than 28 fractional digits) use the `f64` helpers instead.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places used for every rounded statistic.
pub const STAT_DECIMAL_PLACES: u32 = 2;

/// Converts a finite `f64` to its shortest decimal form.
///
/// Returns `None` for NaN, infinities and magnitudes outside the decimal range.
#[must_use]
pub fn to_decimal(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    Decimal::from_f64(value)
}

/// Converts to decimal only if converting back yields the same `f64`.
///
/// `None` for non-finite values, magnitudes outside the decimal range and
/// values too small to survive the 28-digit scale (`1e-30` would become `0`).
#[must_use]
pub fn to_exact_decimal(value: f64) -> Option<Decimal> {
    to_decimal(value).filter(|d| to_f64(*d) == value)
}

/// Converts a decimal back to the nearest `f64`.
#[must_use]
pub fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

/// Rounds half away from zero to `dp` decimal places.
#[must_use]
pub fn round_half_away(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds to the statistic precision and converts back to `f64`.
#[must_use]
pub fn round_stat(value: Decimal) -> f64 {
    to_f64(round_half_away(value, STAT_DECIMAL_PLACES))
}

/// Rounds an `f64` half away from zero to the statistic precision.
///
/// Magnitudes of `2^52` and above have no fractional part and are returned
/// unchanged.
#[must_use]
pub fn round_stat_f64(value: f64) -> f64 {
    const INTEGRAL_FROM: f64 = 4_503_599_627_370_496.0;
    if !value.is_finite() || value.abs() >= INTEGRAL_FROM {
        return value;
    }
    let scale = 10f64.powi(STAT_DECIMAL_PLACES as i32);
    (value * scale).round() / scale
}
