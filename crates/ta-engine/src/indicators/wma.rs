//! Weighted Moving Average (WMA) indicator.
//!
//! The Weighted Moving Average assigns linearly decreasing weights to older prices,
//! giving more importance to recent data compared to a simple moving average.
//!
//! # Algorithm
//!
//! O(n) rolling update:
//! 1. The initial weighted sum is computed over the first `period` elements
//! 2. For each following element:
//!    - every value in the window loses one weight unit (subtract the window sum)
//!    - the oldest value, now at weight 0, leaves the window
//!    - the new value enters with weight `period`
//!
//! Non-finite samples are tracked by the shared
//! [`RollingWindow`](crate::kernels::RollingWindow) and contribute zero to the
//! weighted sum, so the output recovers once they leave the window. A weighted
//! sum that overflows is recomputed from the window's samples.
//!
//! # Formula
//!
//! ```text
//! WMA = (P₁ × n + P₂ × (n-1) + ... + Pₙ × 1) / (n × (n+1) / 2)
//! ```
//!
//! Where `P₁` is the most recent price (highest weight) and `Pₙ` is the oldest.
//!
//! # Example
//!
//! ```
//! use ta_engine::indicators::wma::wma;
//!
//! let data = vec![1.0_f64, 2.0, 3.0, 4.0, 5.0];
//! let result = wma(&data, 3).unwrap();
//!
//! assert!(result[0].is_none());
//! assert!(result[1].is_none());
//!
//! // WMA[2] = (1×1 + 2×2 + 3×3) / 6 = 14/6
//! assert!((result[2].unwrap() - 14.0 / 6.0).abs() < 1e-12);
//! ```

use crate::error::Result;
use crate::kernels::RollingWindow;
use crate::traits::{validate_indicator_input, validate_output_buffer, SeriesElement};

/// Returns the lookback period for WMA: `period - 1`.
///
/// # Example
///
/// ```
/// use ta_engine::indicators::wma::wma_lookback;
///
/// assert_eq!(wma_lookback(5), 4);
/// assert_eq!(wma_lookback(14), 13);
/// ```
#[inline]
#[must_use]
pub const fn wma_lookback(period: usize) -> usize {
    if period == 0 {
        0
    } else {
        period - 1
    }
}

/// Returns the minimum input length required for WMA: `period`.
#[inline]
#[must_use]
pub const fn wma_min_len(period: usize) -> usize {
    period
}

/// Computes the Weighted Moving Average.
///
/// # Errors
///
/// - `Error::InvalidParameter` if `period` is zero
/// - `Error::InvalidInput` if `data` is empty
/// - `Error::InsufficientData` if `data` is shorter than `period`
#[must_use = "this returns a Result with the WMA values, which should be used"]
pub fn wma<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<Option<T>>> {
    let mut output = vec![None; data.len()];
    wma_into(data, period, &mut output)?;
    Ok(output)
}

/// Computes the Weighted Moving Average into a pre-allocated output buffer.
///
/// Returns the number of defined samples.
///
/// # Errors
///
/// As [`wma`], plus `Error::BufferTooSmall` if `output` is shorter than `data`.
#[must_use = "this returns a Result with the count of defined WMA values"]
pub fn wma_into<T: SeriesElement>(
    data: &[T],
    period: usize,
    output: &mut [Option<T>],
) -> Result<usize> {
    validate_indicator_input(data, period, "period", wma_min_len(period), "wma")?;
    validate_output_buffer(output, data.len(), "wma")?;

    let period_t = T::from_usize(period)?;
    // n × (n + 1) / 2
    let weight_sum = period_t * (period_t + T::one()) / T::two();

    let mut window = RollingWindow::new();
    let mut weighted_sum = T::zero();

    for (i, &value) in data.iter().enumerate() {
        let finite = if value.is_finite() { value } else { T::zero() };
        if i < period {
            weighted_sum = weighted_sum + finite * T::from_usize(i + 1)?;
        } else {
            weighted_sum = weighted_sum - window.finite_sum() + finite * period_t;
        }
        let rebuilt = window.advance(data, i, period);
        if rebuilt || !weighted_sum.is_finite() {
            weighted_sum = weighted_window_sum(&data[(i + 1).saturating_sub(period)..=i]);
        }

        output[i] = if i + 1 < period {
            None
        } else if window.has_non_finite() {
            // Weights are positive, so the IEEE class of the weighted sum
            // equals that of the plain sum.
            Some(window.sum())
        } else {
            Some(weighted_sum / weight_sum)
        };
    }

    Ok(data.len() - wma_lookback(period))
}

/// Weighted sum `Σ (k + 1) · x[k]` over the finite samples of one window.
fn weighted_window_sum<T: SeriesElement>(window: &[T]) -> T {
    let mut weight = T::zero();
    let mut total = T::zero();
    for &value in window {
        weight = weight + T::one();
        if value.is_finite() {
            total = total + value * weight;
        }
    }
    total
}
