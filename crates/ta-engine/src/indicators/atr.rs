//! Average True Range (ATR) indicator.
//!
//! The Average True Range is a volatility indicator that measures the degree of
//! price volatility by decomposing the entire range of a security's price for a
//! given period. It was developed by J. Welles Wilder Jr.
//!
//! # Algorithm
//!
//! O(n) with Wilder's smoothing:
//!
//! 1. Calculate True Range (TR) for each bar. The first bar has no previous
//!    close, so its TR is its own range.
//! 2. The first ATR, at index `period - 1`, is the simple mean of
//!    `TR[0..period]`.
//! 3. Subsequent values follow `ATR[i] = (ATR[i-1] × (period-1) + TR[i]) / period`.
//!
//! # Formula
//!
//! ```text
//! TR[0] = High[0] - Low[0]
//! TR[i] = max(
//!     High[i] - Low[i],            // Current range
//!     |High[i] - Close[i-1]|,      // Gap up from previous close
//!     |Low[i] - Close[i-1]|        // Gap down from previous close
//! )
//! ```
//!
//! A NaN in any of the three terms makes that TR NaN, and ATR carries it forward.
//!
//! # Example
//!
//! ```
//! use ta_engine::indicators::atr::{atr, true_range};
//!
//! let high = vec![48.70_f64, 48.72, 48.90, 48.87, 48.82, 49.05, 49.20, 49.35, 49.92, 50.19];
//! let low = vec![47.79_f64, 48.14, 48.39, 48.37, 48.24, 48.64, 48.94, 48.86, 49.50, 49.87];
//! let close = vec![48.16_f64, 48.61, 48.75, 48.63, 48.74, 49.03, 49.07, 49.32, 49.91, 50.13];
//!
//! let tr = true_range(&high, &low, &close).unwrap();
//! assert!((tr[0].unwrap() - 0.91).abs() < 1e-12);
//!
//! let result = atr(&high, &low, &close, 5).unwrap();
//! assert!(result[3].is_none());
//! assert!(result[4].is_some());
//! ```

use crate::error::Result;
use crate::kernels::Wilder;
use crate::traits::{
    validate_output_buffer, validate_period, validate_same_length, SeriesElement, ValidatedInput,
};

/// Returns the lookback period for ATR: `period - 1`.
///
/// # Example
///
/// ```
/// use ta_engine::indicators::atr::atr_lookback;
///
/// assert_eq!(atr_lookback(14), 13);
/// ```
#[inline]
#[must_use]
pub const fn atr_lookback(period: usize) -> usize {
    if period == 0 {
        0
    } else {
        period - 1
    }
}

/// Returns the minimum input length required for ATR: `period`.
#[inline]
#[must_use]
pub const fn atr_min_len(period: usize) -> usize {
    period
}

/// Returns the lookback period for True Range: 0.
#[inline]
#[must_use]
pub const fn true_range_lookback() -> usize {
    0
}

/// Returns the minimum input length for True Range: 1.
#[inline]
#[must_use]
pub const fn true_range_min_len() -> usize {
    1
}

/// True range of one bar given the previous close.
#[inline]
fn true_range_value<T: SeriesElement>(high: T, low: T, prev_close: T) -> T {
    let range = high - low;
    let gap_up = (high - prev_close).abs();
    let gap_down = (low - prev_close).abs();
    // Float::max skips NaN operands
    if range.is_nan() || gap_up.is_nan() || gap_down.is_nan() {
        T::nan()
    } else {
        range.max(gap_up).max(gap_down)
    }
}

fn validate_hlc<T: SeriesElement>(
    high: &[T],
    low: &[T],
    close: &[T],
    min_len: usize,
    indicator: &'static str,
) -> Result<()> {
    high.validate_not_empty(indicator)?;
    validate_same_length(&[
        ("high", high.len()),
        ("low", low.len()),
        ("close", close.len()),
    ])?;
    high.validate_min_length(min_len, indicator)
}

/// Computes the True Range for every bar.
///
/// # Errors
///
/// - `Error::InvalidInput` if the series are empty
/// - `Error::DimensionMismatch` if the series lengths differ
#[must_use = "this returns a Result with the True Range values, which should be used"]
pub fn true_range<T: SeriesElement>(high: &[T], low: &[T], close: &[T]) -> Result<Vec<Option<T>>> {
    let mut output = vec![None; high.len()];
    true_range_into(high, low, close, &mut output)?;
    Ok(output)
}

/// Computes the True Range into a pre-allocated buffer.
///
/// # Errors
///
/// As [`true_range`], plus `Error::BufferTooSmall`.
#[must_use = "this returns a Result with the count of defined True Range values"]
pub fn true_range_into<T: SeriesElement>(
    high: &[T],
    low: &[T],
    close: &[T],
    output: &mut [Option<T>],
) -> Result<usize> {
    validate_hlc(high, low, close, true_range_min_len(), "true_range")?;
    validate_output_buffer(output, high.len(), "true_range")?;

    output[0] = Some(high[0] - low[0]);
    for i in 1..high.len() {
        output[i] = Some(true_range_value(high[i], low[i], close[i - 1]));
    }

    Ok(high.len())
}

/// Computes the Average True Range.
///
/// # Errors
///
/// - `Error::InvalidParameter` if `period` is zero
/// - `Error::InvalidInput` if the series are empty
/// - `Error::DimensionMismatch` if the series lengths differ
/// - `Error::InsufficientData` if the series are shorter than `period`
#[must_use = "this returns a Result with the ATR values, which should be used"]
pub fn atr<T: SeriesElement>(
    high: &[T],
    low: &[T],
    close: &[T],
    period: usize,
) -> Result<Vec<Option<T>>> {
    let mut output = vec![None; high.len()];
    atr_into(high, low, close, period, &mut output)?;
    Ok(output)
}

/// Computes ATR into a pre-allocated buffer.
///
/// Returns the number of defined samples, `len - period + 1`.
///
/// # Errors
///
/// As [`atr`], plus `Error::BufferTooSmall`.
///
/// # Example
///
/// ```
/// use ta_engine::indicators::atr::atr_into;
///
/// let high = vec![10.0_f64; 6];
/// let low = vec![8.0_f64; 6];
/// let close = vec![9.0_f64; 6];
/// let mut output = vec![None; 6];
///
/// assert_eq!(atr_into(&high, &low, &close, 3, &mut output).unwrap(), 4);
/// assert_eq!(output[2], Some(2.0));
/// ```
#[must_use = "this returns a Result with the count of defined ATR values"]
pub fn atr_into<T: SeriesElement>(
    high: &[T],
    low: &[T],
    close: &[T],
    period: usize,
    output: &mut [Option<T>],
) -> Result<usize> {
    validate_period(period, "period", "atr")?;
    validate_hlc(high, low, close, atr_min_len(period), "atr")?;
    let n = high.len();
    validate_output_buffer(output, n, "atr")?;

    let tr = |i: usize| {
        if i == 0 {
            high[0] - low[0]
        } else {
            true_range_value(high[i], low[i], close[i - 1])
        }
    };

    let lookback = atr_lookback(period);
    for slot in output.iter_mut().take(lookback) {
        *slot = None;
    }

    let mut smoother = Wilder::new(period)?;
    let seed_sum = (0..period).fold(T::zero(), |acc, i| acc + tr(i));
    output[lookback] = Some(smoother.seed_sum(seed_sum));
    for i in period..n {
        output[i] = Some(smoother.update(tr(i)));
    }

    Ok(n - lookback)
}

// ==================== Configuration Type ====================

/// ATR configuration with fluent builder API.
///
/// # Example
///
/// ```
/// use ta_engine::indicators::atr::Atr;
///
/// let high: Vec<f64> = (0..20).map(|i| 11.0 + f64::from(i)).collect();
/// let low: Vec<f64> = (0..20).map(|i| 9.0 + f64::from(i)).collect();
/// let close: Vec<f64> = (0..20).map(|i| 10.0 + f64::from(i)).collect();
///
/// let result = Atr::default().compute(&high, &low, &close).unwrap();
/// assert!(result[12].is_none());
/// assert!(result[13].is_some());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Atr {
    period: usize,
}

impl Default for Atr {
    /// Period 14.
    fn default() -> Self {
        Self { period: 14 }
    }
}

impl Atr {
    /// Creates a configuration with the default period (14).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the smoothing period.
    ///
    /// Legal range: ≥ 1. Default: 14
    #[must_use]
    pub const fn period(mut self, period: usize) -> Self {
        self.period = period;
        self
    }

    /// Checks the parameters without touching any data.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidParameter` if the period is zero.
    pub fn validate(&self) -> Result<()> {
        validate_period(self.period, "period", "atr")
    }

    /// Computes ATR using the configured period.
    ///
    /// # Errors
    ///
    /// See [`atr`].
    pub fn compute<T: SeriesElement>(
        &self,
        high: &[T],
        low: &[T],
        close: &[T],
    ) -> Result<Vec<Option<T>>> {
        atr(high, low, close, self.period)
    }

    /// Computes ATR into a pre-allocated buffer.
    ///
    /// # Errors
    ///
    /// See [`atr_into`].
    pub fn compute_into<T: SeriesElement>(
        &self,
        high: &[T],
        low: &[T],
        close: &[T],
        output: &mut [Option<T>],
    ) -> Result<usize> {
        atr_into(high, low, close, self.period, output)
    }

    /// Returns the period.
    #[must_use]
    pub const fn get_period(&self) -> usize {
        self.period
    }

    /// Returns the lookback for this configuration.
    #[must_use]
    pub const fn lookback(&self) -> usize {
        atr_lookback(self.period)
    }

    /// Returns the minimum input length for this configuration.
    #[must_use]
    pub const fn min_len(&self) -> usize {
        atr_min_len(self.period)
    }
}
