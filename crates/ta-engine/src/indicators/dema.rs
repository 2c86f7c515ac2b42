//! Double Exponential Moving Average (DEMA) indicator.
//!
//! DEMA reduces the lag inherent in traditional moving averages by applying
//! a combination of single and double-smoothed EMAs.
//!
//! # Formula
//!
//! ```text
//! EMA1 = EMA(data, period)
//! EMA2 = EMA(EMA1 over its defined region, period)
//! DEMA = 2 × EMA1 - EMA2
//! ```
//!
//! Both EMAs are SMA-seeded, so the first defined value sits at index
//! `2 × (period - 1)`.
//!
//! # Example
//!
//! ```
//! use ta_engine::indicators::dema::dema;
//!
//! let data: Vec<f64> = (1..=10).map(f64::from).collect();
//! let result = dema(&data, 3).unwrap();
//!
//! assert!(result[..4].iter().all(Option::is_none));
//! // A straight line has no lag to remove
//! assert!((result[4].unwrap() - 5.0).abs() < 1e-12);
//! ```

use crate::error::Result;
use crate::indicators::ema::{ema_values, standard_alpha};
use crate::traits::{validate_indicator_input, validate_output_buffer, SeriesElement};

/// Returns the lookback period for DEMA: `2 × (period - 1)`.
///
/// # Example
///
/// ```
/// use ta_engine::indicators::dema::dema_lookback;
///
/// assert_eq!(dema_lookback(5), 8);
/// assert_eq!(dema_lookback(14), 26);
/// ```
#[inline]
#[must_use]
pub const fn dema_lookback(period: usize) -> usize {
    if period == 0 {
        0
    } else {
        (period - 1).saturating_mul(2)
    }
}

/// Returns the minimum input length required for DEMA: `2 × period - 1`.
#[inline]
#[must_use]
pub const fn dema_min_len(period: usize) -> usize {
    dema_lookback(period).saturating_add(1)
}

/// Computes the Double Exponential Moving Average.
///
/// # Errors
///
/// - `Error::InvalidParameter` if `period` is zero
/// - `Error::InvalidInput` if `data` is empty
/// - `Error::InsufficientData` if `data` is shorter than `2 × period - 1`
#[must_use = "this returns a Result with the DEMA values, which should be used"]
pub fn dema<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<Option<T>>> {
    let mut output = vec![None; data.len()];
    dema_into(data, period, &mut output)?;
    Ok(output)
}

/// Computes DEMA into a pre-allocated output buffer.
///
/// Returns the number of defined samples.
///
/// # Errors
///
/// As [`dema`], plus `Error::BufferTooSmall` if `output` is shorter than `data`.
#[must_use = "this returns a Result with the count of defined DEMA values"]
pub fn dema_into<T: SeriesElement>(
    data: &[T],
    period: usize,
    output: &mut [Option<T>],
) -> Result<usize> {
    validate_indicator_input(data, period, "period", dema_min_len(period), "dema")?;
    validate_output_buffer(output, data.len(), "dema")?;

    let alpha = standard_alpha::<T>(period)?;
    let ema1 = ema_values(data, period, alpha)?;
    let ema2 = ema_values(&ema1, period, alpha)?;

    let lookback = dema_lookback(period);
    // ema1 starts at index period - 1, ema2 at index 2 × (period - 1)
    let skip = period - 1;
    for slot in output.iter_mut().take(lookback) {
        *slot = None;
    }
    for ((slot, &e1), &e2) in output[lookback..data.len()]
        .iter_mut()
        .zip(&ema1[skip..])
        .zip(&ema2)
    {
        *slot = Some(T::two() * e1 - e2);
    }

    Ok(data.len() - lookback)
}
