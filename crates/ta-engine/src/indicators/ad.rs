//! Chaikin Accumulation/Distribution Line (AD)
//!
//! The Accumulation/Distribution Line is a cumulative volume-based indicator designed
//! to measure the cumulative flow of money into and out of a security.
//!
//! # Formula
//!
//! ```text
//! Money Flow Multiplier = ((close - low) - (high - close)) / (high - low)
//! Money Flow Volume = Money Flow Multiplier × volume
//! AD = cumulative sum of Money Flow Volume
//! ```
//!
//! # Edge Cases
//!
//! - When `high == low`, the Money Flow Multiplier is 0 (no range to compute)
//! - First value is the first Money Flow Volume
//! - A NaN bar makes the line NaN from that bar on
//!
//! # Example
//!
//! ```
//! use ta_engine::indicators::ad;
//!
//! let high = [25.0_f64, 26.0, 25.5, 26.5, 27.0];
//! let low = [24.0_f64, 24.5, 24.0, 25.0, 25.5];
//! let close = [24.5_f64, 25.5, 24.5, 26.0, 26.5];
//! let volume = [1000.0_f64, 1500.0, 1200.0, 1800.0, 2000.0];
//!
//! let result = ad(&high, &low, &close, &volume).unwrap();
//! assert_eq!(result.len(), 5);
//! assert_eq!(result[0], Some(0.0));
//! ```

use crate::error::Result;
use crate::traits::{validate_output_buffer, validate_same_length, SeriesElement, ValidatedInput};

/// Returns the lookback period for AD.
///
/// AD has no lookback - the first output is defined.
#[inline]
#[must_use]
pub const fn ad_lookback() -> usize {
    0
}

/// Returns the minimum data length required for AD.
#[inline]
#[must_use]
pub const fn ad_min_len() -> usize {
    1
}

/// Computes AD (Chaikin A/D Line) and returns a newly allocated vector.
///
/// Every index is defined.
///
/// # Errors
///
/// - `Error::InvalidInput` if the series are empty
/// - `Error::DimensionMismatch` if the series lengths differ
pub fn ad<T: SeriesElement>(
    high: &[T],
    low: &[T],
    close: &[T],
    volume: &[T],
) -> Result<Vec<Option<T>>> {
    let mut output = vec![None; high.len()];
    ad_into(high, low, close, volume, &mut output)?;
    Ok(output)
}

/// Computes AD (Chaikin A/D Line) into a pre-allocated output buffer.
///
/// Returns the number of defined samples, which is the input length.
///
/// # Errors
///
/// As [`ad`], plus `Error::BufferTooSmall`.
pub fn ad_into<T: SeriesElement>(
    high: &[T],
    low: &[T],
    close: &[T],
    volume: &[T],
    output: &mut [Option<T>],
) -> Result<usize> {
    high.validate_not_empty("ad")?;
    validate_same_length(&[
        ("high", high.len()),
        ("low", low.len()),
        ("close", close.len()),
        ("volume", volume.len()),
    ])?;
    let len = high.len();
    validate_output_buffer(output, len, "ad")?;

    let mut ad_value = T::zero();
    for i in 0..len {
        let (h, l, c) = (high[i], low[i], close[i]);
        let mfm = if h == l {
            T::zero()
        } else {
            ((c - l) - (h - c)) / (h - l)
        };
        ad_value = ad_value + mfm * volume[i];
        output[i] = Some(ad_value);
    }

    Ok(len)
}
