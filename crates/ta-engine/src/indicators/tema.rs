//! Triple Exponential Moving Average (TEMA) indicator.
//!
//! # Formula
//!
//! ```text
//! EMA1 = EMA(data, period)
//! EMA2 = EMA(EMA1, period)
//! EMA3 = EMA(EMA2, period)
//! TEMA = 3 × EMA1 - 3 × EMA2 + EMA3
//! ```
//!
//! Each EMA runs over the defined region of the previous one, so the lookback
//! is `3 × (period - 1)`.

use crate::error::Result;
use crate::indicators::ema::{ema_values, standard_alpha};
use crate::traits::{validate_indicator_input, validate_output_buffer, SeriesElement};

/// Returns the lookback period for TEMA: `3 × (period - 1)`.
///
/// # Example
///
/// ```
/// use ta_engine::indicators::tema::tema_lookback;
///
/// assert_eq!(tema_lookback(5), 12);
/// ```
#[inline]
#[must_use]
pub const fn tema_lookback(period: usize) -> usize {
    if period == 0 {
        0
    } else {
        (period - 1).saturating_mul(3)
    }
}

/// Returns the minimum input length required for TEMA.
#[inline]
#[must_use]
pub const fn tema_min_len(period: usize) -> usize {
    tema_lookback(period).saturating_add(1)
}

/// Computes the Triple Exponential Moving Average.
///
/// # Errors
///
/// - `Error::InvalidParameter` if `period` is zero
/// - `Error::InvalidInput` if `data` is empty
/// - `Error::InsufficientData` if `data` is shorter than `3 × period - 2`
///
/// # Example
///
/// ```
/// use ta_engine::indicators::tema::tema;
///
/// let data: Vec<f64> = (0..12).map(f64::from).collect();
/// let result = tema(&data, 3).unwrap();
/// assert!(result[5].is_none());
/// assert!((result[6].unwrap() - 6.0).abs() < 1e-12);
/// ```
#[must_use = "this returns a Result with the TEMA values, which should be used"]
pub fn tema<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<Option<T>>> {
    let mut output = vec![None; data.len()];
    tema_into(data, period, &mut output)?;
    Ok(output)
}

/// Computes TEMA into a pre-allocated output buffer.
///
/// # Errors
///
/// As [`tema`], plus `Error::BufferTooSmall`.
#[must_use = "this returns a Result with the count of defined TEMA values"]
pub fn tema_into<T: SeriesElement>(
    data: &[T],
    period: usize,
    output: &mut [Option<T>],
) -> Result<usize> {
    validate_indicator_input(data, period, "period", tema_min_len(period), "tema")?;
    validate_output_buffer(output, data.len(), "tema")?;

    let alpha = standard_alpha::<T>(period)?;
    let ema1 = ema_values(data, period, alpha)?;
    let ema2 = ema_values(&ema1, period, alpha)?;
    let ema3 = ema_values(&ema2, period, alpha)?;

    let lookback = tema_lookback(period);
    let skip = period - 1;
    let three = T::three();
    for slot in output.iter_mut().take(lookback) {
        *slot = None;
    }
    for (((slot, &e1), &e2), &e3) in output[lookback..data.len()]
        .iter_mut()
        .zip(&ema1[2 * skip..])
        .zip(&ema2[skip..])
        .zip(&ema3)
    {
        *slot = Some((three * e1 - three * e2) + e3);
    }

    Ok(data.len() - lookback)
}
