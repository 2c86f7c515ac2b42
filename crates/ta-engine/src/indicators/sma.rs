//! Simple Moving Average (SMA) indicator.
//!
//! The Simple Moving Average is the unweighted mean of the previous `period`
//! data points. It smooths price data to reveal the underlying trend.
//!
//! # Algorithm
//!
//! The running sum is updated incrementally with the
//! [`RollingWindow`](crate::kernels::RollingWindow) kernel:
//! 1. Accumulate the first `period` values
//! 2. For each following value, subtract the oldest and add the new one
//!
//! This gives O(n) time regardless of the period. Floating-point drift is that
//! of the incremental sum, not of re-summing every window.
//!
//! # Formula
//!
//! ```text
//! SMA[i] = None                                  for i < period - 1
//! SMA[i] = (x[i-period+1] + ... + x[i]) / period for i ≥ period - 1
//! ```
//!
//! # Example
//!
//! ```
//! use ta_engine::indicators::sma::sma;
//!
//! let data: Vec<f64> = (1..=10).map(f64::from).collect();
//! let result = sma(&data, 5).unwrap();
//!
//! assert!(result[..4].iter().all(Option::is_none));
//! assert_eq!(result[4], Some(3.0));
//! assert_eq!(result[9], Some(8.0));
//! ```

use crate::error::Result;
use crate::kernels::RollingWindow;
use crate::traits::{validate_indicator_input, validate_output_buffer, validate_period, SeriesElement};

/// Returns the lookback period for SMA: `period - 1`.
///
/// # Example
///
/// ```
/// use ta_engine::indicators::sma::sma_lookback;
///
/// assert_eq!(sma_lookback(5), 4);
/// assert_eq!(sma_lookback(1), 0);
/// ```
#[inline]
#[must_use]
pub const fn sma_lookback(period: usize) -> usize {
    if period == 0 {
        0
    } else {
        period - 1
    }
}

/// Returns the minimum input length required for SMA: `period`.
#[inline]
#[must_use]
pub const fn sma_min_len(period: usize) -> usize {
    period
}

/// Computes the Simple Moving Average.
///
/// # Returns
///
/// A vector of the input's length. The first `period - 1` samples are `None`.
///
/// # Errors
///
/// - `Error::InvalidParameter` if `period` is zero
/// - `Error::InvalidInput` if `data` is empty
/// - `Error::InsufficientData` if `data` is shorter than `period`
///
/// # Example
///
/// ```
/// use ta_engine::indicators::sma::sma;
///
/// let result = sma(&[1.0_f64, 2.0, 3.0, 4.0, 5.0], 3).unwrap();
/// assert_eq!(result, vec![None, None, Some(2.0), Some(3.0), Some(4.0)]);
/// ```
#[must_use = "this returns a Result with the SMA values, which should be used"]
pub fn sma<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<Option<T>>> {
    let mut output = vec![None; data.len()];
    sma_into(data, period, &mut output)?;
    Ok(output)
}

/// Computes the Simple Moving Average into a pre-allocated output buffer.
///
/// Returns the number of defined samples, `data.len() - (period - 1)`.
///
/// # Errors
///
/// As [`sma`], plus `Error::BufferTooSmall` if `output` is shorter than `data`.
///
/// # Example
///
/// ```
/// use ta_engine::indicators::sma::sma_into;
///
/// let data = vec![1.0_f64, 2.0, 3.0, 4.0, 5.0];
/// let mut output = vec![None; 5];
/// let defined = sma_into(&data, 3, &mut output).unwrap();
///
/// assert_eq!(defined, 3);
/// assert!(output[1].is_none());
/// ```
#[must_use = "this returns a Result with the count of defined SMA values"]
pub fn sma_into<T: SeriesElement>(
    data: &[T],
    period: usize,
    output: &mut [Option<T>],
) -> Result<usize> {
    validate_indicator_input(data, period, "period", sma_min_len(period), "sma")?;
    validate_output_buffer(output, data.len(), "sma")?;

    sma_core(data, period, output)?;

    Ok(data.len() - sma_lookback(period))
}

/// SMA recurrence over a validated series.
///
/// Writes `output[..data.len()]`, with `None` for the warm-up region.
pub(crate) fn sma_core<T: SeriesElement>(
    data: &[T],
    period: usize,
    output: &mut [Option<T>],
) -> Result<()> {
    let period_t = T::from_usize(period)?;
    let mut window = RollingWindow::new();

    for i in 0..data.len() {
        window.advance(data, i, period);
        output[i] = if i + 1 >= period {
            Some(window.mean(period_t))
        } else {
            None
        };
    }
    Ok(())
}

/// Dense SMA over a validated series: only the defined values, in order.
///
/// The returned vector has `data.len() - (period - 1)` elements. Used by
/// kernels that chain averages over the defined region of another average.
pub(crate) fn sma_values<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<T>> {
    let period_t = T::from_usize(period)?;
    let mut window = RollingWindow::new();
    let mut values = Vec::with_capacity(data.len().saturating_sub(sma_lookback(period)));

    for i in 0..data.len() {
        window.advance(data, i, period);
        if i + 1 >= period {
            values.push(window.mean(period_t));
        }
    }
    Ok(values)
}

// ==================== Configuration Type ====================

/// Simple Moving Average configuration with fluent builder API.
///
/// # Example
///
/// ```
/// use ta_engine::indicators::sma::Sma;
///
/// let prices = vec![1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0];
///
/// // Default period is 5
/// let result = Sma::default().compute(&prices).unwrap();
/// assert_eq!(result[4], Some(3.0));
///
/// let result = Sma::new().period(2).compute(&prices).unwrap();
/// assert_eq!(result[1], Some(1.5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Sma {
    period: usize,
}

impl Default for Sma {
    /// Period 5.
    fn default() -> Self {
        Self { period: 5 }
    }
}

impl Sma {
    /// Creates a configuration with the default period (5).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the averaging period.
    ///
    /// Legal range: ≥ 1. Default: 5
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
        validate_period(self.period, "period", "sma")
    }

    /// Computes the SMA using the configured period.
    ///
    /// # Errors
    ///
    /// See [`sma`].
    pub fn compute<T: SeriesElement>(&self, data: &[T]) -> Result<Vec<Option<T>>> {
        sma(data, self.period)
    }

    /// Computes the SMA into a pre-allocated buffer.
    ///
    /// # Errors
    ///
    /// See [`sma_into`].
    pub fn compute_into<T: SeriesElement>(
        &self,
        data: &[T],
        output: &mut [Option<T>],
    ) -> Result<usize> {
        sma_into(data, self.period, output)
    }

    /// Returns the period.
    #[must_use]
    pub const fn get_period(&self) -> usize {
        self.period
    }

    /// Returns the lookback for this configuration.
    #[must_use]
    pub const fn lookback(&self) -> usize {
        sma_lookback(self.period)
    }

    /// Returns the minimum input length for this configuration.
    #[must_use]
    pub const fn min_len(&self) -> usize {
        sma_min_len(self.period)
    }
}
