//! Triangular Moving Average (TRIMA) indicator.
//!
//! TRIMA is a double-smoothed SMA whose effective weights form a triangle
//! peaking at the middle of the window.
//!
//! # Formula
//!
//! ```text
//! odd period:  n1 = n2 = (period + 1) / 2
//! even period: n1 = period / 2 + 1, n2 = period / 2
//! TRIMA = SMA(SMA(data, n1), n2)
//! ```
//!
//! `(n1 - 1) + (n2 - 1) = period - 1`, so TRIMA shares SMA's lookback.
//!
//! # Example
//!
//! ```
//! use ta_engine::indicators::trima::trima;
//!
//! let data = vec![1.0_f64, 2.0, 3.0, 4.0, 5.0];
//! let result = trima(&data, 5).unwrap();
//!
//! // Weights 1, 2, 3, 2, 1 over 9
//! assert!((result[4].unwrap() - 27.0 / 9.0).abs() < 1e-12);
//! ```

use crate::error::Result;
use crate::indicators::sma::sma_values;
use crate::traits::{validate_indicator_input, validate_output_buffer, SeriesElement};

/// Returns the lookback period for TRIMA: `period - 1`.
#[inline]
#[must_use]
pub const fn trima_lookback(period: usize) -> usize {
    if period == 0 {
        0
    } else {
        period - 1
    }
}

/// Returns the minimum input length required for TRIMA: `period`.
#[inline]
#[must_use]
pub const fn trima_min_len(period: usize) -> usize {
    period
}

/// Splits `period` into the two SMA lengths `(n1, n2)`.
#[inline]
const fn trima_split(period: usize) -> (usize, usize) {
    if period % 2 == 1 {
        let half = period / 2 + 1;
        (half, half)
    } else {
        (period / 2 + 1, period / 2)
    }
}

/// Computes the Triangular Moving Average.
///
/// # Errors
///
/// - `Error::InvalidParameter` if `period` is zero
/// - `Error::InvalidInput` if `data` is empty
/// - `Error::InsufficientData` if `data` is shorter than `period`
#[must_use = "this returns a Result with the TRIMA values, which should be used"]
pub fn trima<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<Option<T>>> {
    let mut output = vec![None; data.len()];
    trima_into(data, period, &mut output)?;
    Ok(output)
}

/// Computes TRIMA into a pre-allocated output buffer.
///
/// # Errors
///
/// As [`trima`], plus `Error::BufferTooSmall`.
#[must_use = "this returns a Result with the count of defined TRIMA values"]
pub fn trima_into<T: SeriesElement>(
    data: &[T],
    period: usize,
    output: &mut [Option<T>],
) -> Result<usize> {
    validate_indicator_input(data, period, "period", trima_min_len(period), "trima")?;
    validate_output_buffer(output, data.len(), "trima")?;

    let (n1, n2) = trima_split(period);
    let first = sma_values(data, n1)?;
    let second = sma_values(&first, n2)?;

    let lookback = trima_lookback(period);
    for slot in output.iter_mut().take(lookback) {
        *slot = None;
    }
    for (slot, value) in output[lookback..data.len()].iter_mut().zip(second) {
        *slot = Some(value);
    }

    Ok(data.len() - lookback)
}
