//! T3 (Tillson T3 Moving Average) indicator.
//!
//! T3 is a smoothed moving average developed by Tim Tillson that uses
//! a combination of six EMAs with a volume factor to reduce lag while
//! maintaining smoothness.
//!
//! # Formula
//!
//! T3 = c1×e6 + c2×e5 + c3×e4 + c4×e3
//!
//! where `e1 = EMA(data, period)` and each following `eK` is the EMA of the
//! defined region of `e(K-1)`. Every EMA is SMA-seeded.
//!
//! Coefficients (v = volume factor, 0.7 by default):
//! - c1 = -v³
//! - c2 = 3v² + 3v³
//! - c3 = -6v² - 3v - 3v³
//! - c4 = 1 + 3v + v³ + 3v²
//!
//! # Lookback
//!
//! The lookback period is `6 × (period - 1)`.

use crate::error::{Error, Result};
use crate::indicators::ema::{ema_values, standard_alpha};
use crate::traits::{
    reject, validate_indicator_input, validate_output_buffer, validate_period, SeriesElement,
};

/// Default volume factor.
pub const T3_VFACTOR: f64 = 0.7;

/// Computes the lookback period for T3: `6 × (period - 1)`.
#[inline]
#[must_use]
pub const fn t3_lookback(period: usize) -> usize {
    if period == 0 {
        0
    } else {
        (period - 1).saturating_mul(6)
    }
}

/// Returns the minimum input length required for T3 calculation.
#[inline]
#[must_use]
pub const fn t3_min_len(period: usize) -> usize {
    t3_lookback(period).saturating_add(1)
}

/// Computes T3 with the default volume factor (0.7).
///
/// # Errors
///
/// - `Error::InvalidParameter` if `period` is zero
/// - `Error::InvalidInput` if `data` is empty
/// - `Error::InsufficientData` if `data` is shorter than `6 × (period - 1) + 1`
///
/// # Example
///
/// ```
/// use ta_engine::indicators::t3::t3;
///
/// let data = vec![10.0_f64; 20];
/// let result = t3(&data, 3).unwrap();
/// assert!(result[11].is_none());
/// assert!((result[12].unwrap() - 10.0).abs() < 1e-9);
/// ```
#[must_use = "this returns a Result with the T3 values, which should be used"]
pub fn t3<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<Option<T>>> {
    let mut output = vec![None; data.len()];
    t3_into(data, period, &mut output)?;
    Ok(output)
}

/// Computes T3 with the default volume factor into a pre-allocated buffer.
///
/// # Errors
///
/// As [`t3`], plus `Error::BufferTooSmall`.
#[must_use = "this returns a Result with the count of defined T3 values"]
pub fn t3_into<T: SeriesElement>(
    data: &[T],
    period: usize,
    output: &mut [Option<T>],
) -> Result<usize> {
    t3_full_into(data, period, T3_VFACTOR, output)
}

/// Computes T3 with a custom volume factor in `[0, 1]`.
///
/// # Errors
///
/// As [`t3`], plus `Error::InvalidParameter` if `vfactor` is outside `[0, 1]`.
#[must_use = "this returns a Result with the T3 values, which should be used"]
pub fn t3_full<T: SeriesElement>(
    data: &[T],
    period: usize,
    vfactor: f64,
) -> Result<Vec<Option<T>>> {
    let mut output = vec![None; data.len()];
    t3_full_into(data, period, vfactor, &mut output)?;
    Ok(output)
}

/// Computes T3 with a custom volume factor into a pre-allocated buffer.
///
/// # Errors
///
/// As [`t3_full`], plus `Error::BufferTooSmall`.
#[must_use = "this returns a Result with the count of defined T3 values"]
pub fn t3_full_into<T: SeriesElement>(
    data: &[T],
    period: usize,
    vfactor: f64,
    output: &mut [Option<T>],
) -> Result<usize> {
    validate_period(period, "period", "t3")?;
    if !(0.0..=1.0).contains(&vfactor) {
        return Err(reject(Error::InvalidParameter {
            indicator: "t3",
            parameter: "vfactor",
            reason: "volume factor must be in [0, 1]",
        }));
    }
    validate_indicator_input(data, period, "period", t3_min_len(period), "t3")?;
    validate_output_buffer(output, data.len(), "t3")?;

    let v = T::from_f64(vfactor)?;
    let three = T::three();
    let six = three + three;
    let v2 = v * v;
    let v3 = v2 * v;
    let c1 = -v3;
    let c2 = three * v2 + three * v3;
    let c3 = -six * v2 - three * v - three * v3;
    let c4 = T::one() + three * v + v3 + three * v2;

    let alpha = standard_alpha::<T>(period)?;
    let e1 = ema_values(data, period, alpha)?;
    let e2 = ema_values(&e1, period, alpha)?;
    let e3 = ema_values(&e2, period, alpha)?;
    let e4 = ema_values(&e3, period, alpha)?;
    let e5 = ema_values(&e4, period, alpha)?;
    let e6 = ema_values(&e5, period, alpha)?;

    let lookback = t3_lookback(period);
    let skip = period - 1;
    for slot in output.iter_mut().take(lookback) {
        *slot = None;
    }
    // e3 starts at 3 × skip, e6 at 6 × skip
    for (k, slot) in output[lookback..data.len()].iter_mut().enumerate() {
        *slot = Some(
            c1 * e6[k] + c2 * e5[k + skip] + c3 * e4[k + 2 * skip] + c4 * e3[k + 3 * skip],
        );
    }

    Ok(data.len() - lookback)
}
