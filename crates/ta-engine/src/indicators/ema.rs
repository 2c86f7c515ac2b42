//! Exponential Moving Average (EMA) indicator.
//!
//! The Exponential Moving Average is a trend-following indicator that gives more
//! weight to recent prices. Unlike the Simple Moving Average, the EMA responds
//! more quickly to recent price changes.
//!
//! # Algorithm
//!
//! This implementation computes EMA with O(n) time complexity using:
//! 1. The first defined EMA value is the SMA of the first `period` elements,
//!    bit-identical to [`sma`](crate::indicators::sma())'s value at that index
//! 2. Subsequent values use the recursive formula: `EMA = α × Price + (1 - α) × EMA_prev`
//!
//! # Smoothing Variants
//!
//! - **Standard EMA**: `α = 2 / (period + 1)`
//! - **Wilder's Smoothing**: `α = 1 / period`
//! - **Custom**: any `α` in `(0, 1]` via [`ema_with_alpha`]
//!
//! # Formula
//!
//! ```text
//! EMA[0..period-2] = None
//! EMA[period-1]    = SMA(prices[0..period])
//! EMA[i]           = α × Price[i] + (1 - α) × EMA[i-1]
//! ```
//!
//! A NaN or infinite sample that reaches the recurrence stays in the state for
//! the rest of the series.
//!
//! # Example
//!
//! ```
//! use ta_engine::indicators::ema::{ema, ema_wilder};
//!
//! let data = vec![1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0];
//!
//! let result = ema(&data, 3).unwrap();
//! assert!(result[0].is_none());
//! assert!(result[1].is_none());
//! assert_eq!(result[2], Some(2.0));
//!
//! let wilder = ema_wilder(&data, 3).unwrap();
//! assert_eq!(wilder[2], Some(2.0));
//! ```

use crate::error::{Error, Result};
use crate::kernels::RollingWindow;
use crate::traits::{
    reject, validate_indicator_input, validate_output_buffer, validate_period, SeriesElement,
};

/// Returns the lookback period for EMA: `period - 1`.
///
/// # Example
///
/// ```
/// use ta_engine::indicators::ema::ema_lookback;
///
/// assert_eq!(ema_lookback(5), 4);
/// assert_eq!(ema_lookback(14), 13);
/// ```
#[inline]
#[must_use]
pub const fn ema_lookback(period: usize) -> usize {
    if period == 0 {
        0
    } else {
        period - 1
    }
}

/// Returns the minimum input length required for EMA: `period`.
#[inline]
#[must_use]
pub const fn ema_min_len(period: usize) -> usize {
    period
}

/// Computes the Exponential Moving Average using standard smoothing.
///
/// Standard EMA uses smoothing factor `α = 2 / (period + 1)`.
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
/// use ta_engine::indicators::ema::ema;
///
/// let data = vec![10.0_f64, 11.0, 12.0, 13.0, 14.0, 15.0];
/// let result = ema(&data, 3).unwrap();
///
/// assert!(result[1].is_none());
/// assert_eq!(result[2], Some(11.0));
/// // 0.5 × 13 + 0.5 × 11
/// assert_eq!(result[3], Some(12.0));
/// ```
#[must_use = "this returns a Result with the EMA values, which should be used"]
pub fn ema<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<Option<T>>> {
    let mut output = vec![None; data.len()];
    ema_into(data, period, &mut output)?;
    Ok(output)
}

/// Computes the standard EMA into a pre-allocated output buffer.
///
/// Returns the number of defined samples, `data.len() - (period - 1)`.
///
/// # Errors
///
/// As [`ema`], plus `Error::BufferTooSmall` if `output` is shorter than `data`.
#[must_use = "this returns a Result with the count of defined EMA values"]
pub fn ema_into<T: SeriesElement>(
    data: &[T],
    period: usize,
    output: &mut [Option<T>],
) -> Result<usize> {
    validate_period(period, "period", "ema")?;
    let alpha = standard_alpha::<T>(period)?;
    ema_alpha_into(data, period, alpha, output, "ema")
}

/// Computes the EMA using Wilder's smoothing, `α = 1 / period`.
///
/// Wilder's EMA with period N tracks a standard EMA with period `2N - 1`.
///
/// # Errors
///
/// Same as [`ema`].
///
/// # Example
///
/// ```
/// use ta_engine::indicators::ema::ema_wilder;
///
/// let data = vec![10.0_f64, 11.0, 12.0, 13.0, 14.0, 15.0];
/// let result = ema_wilder(&data, 3).unwrap();
/// assert_eq!(result[2], Some(11.0));
/// ```
#[must_use = "this returns a Result with the EMA values using Wilder's smoothing"]
pub fn ema_wilder<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<Option<T>>> {
    let mut output = vec![None; data.len()];
    ema_wilder_into(data, period, &mut output)?;
    Ok(output)
}

/// Computes Wilder's EMA into a pre-allocated output buffer.
///
/// # Errors
///
/// As [`ema_wilder`], plus `Error::BufferTooSmall`.
#[must_use = "this returns a Result with the count of defined Wilder EMA values"]
pub fn ema_wilder_into<T: SeriesElement>(
    data: &[T],
    period: usize,
    output: &mut [Option<T>],
) -> Result<usize> {
    validate_period(period, "period", "ema_wilder")?;
    let alpha = T::one() / T::from_usize(period)?;
    ema_alpha_into(data, period, alpha, output, "ema_wilder")
}

/// Computes the EMA with a custom smoothing factor.
///
/// `period` only sizes the SMA seed; `alpha` drives the recurrence.
///
/// # Errors
///
/// - `Error::InvalidParameter` if `period` is zero or `alpha` is outside `(0, 1]`
/// - `Error::InvalidInput` / `Error::InsufficientData` as for [`ema`]
///
/// # Example
///
/// ```
/// use ta_engine::indicators::ema::ema_with_alpha;
///
/// let data = vec![1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0];
/// let result = ema_with_alpha(&data, 3, 0.5).unwrap();
/// assert_eq!(result[3], Some(3.0));
///
/// assert!(ema_with_alpha(&data, 3, 1.5).is_err());
/// ```
#[must_use = "this returns a Result with the EMA values, which should be used"]
pub fn ema_with_alpha<T: SeriesElement>(
    data: &[T],
    period: usize,
    alpha: T,
) -> Result<Vec<Option<T>>> {
    let mut output = vec![None; data.len()];
    ema_with_alpha_into(data, period, alpha, &mut output)?;
    Ok(output)
}

/// Computes the EMA with a custom smoothing factor into a pre-allocated buffer.
///
/// # Errors
///
/// As [`ema_with_alpha`], plus `Error::BufferTooSmall`.
#[must_use = "this returns a Result with the count of defined EMA values"]
pub fn ema_with_alpha_into<T: SeriesElement>(
    data: &[T],
    period: usize,
    alpha: T,
    output: &mut [Option<T>],
) -> Result<usize> {
    validate_period(period, "period", "ema")?;
    if !(alpha > T::zero() && alpha <= T::one()) {
        return Err(reject(Error::InvalidParameter {
            indicator: "ema",
            parameter: "alpha",
            reason: "alpha must be in (0, 1]",
        }));
    }
    ema_alpha_into(data, period, alpha, output, "ema")
}

fn ema_alpha_into<T: SeriesElement>(
    data: &[T],
    period: usize,
    alpha: T,
    output: &mut [Option<T>],
    indicator: &'static str,
) -> Result<usize> {
    validate_indicator_input(data, period, "period", ema_min_len(period), indicator)?;
    validate_output_buffer(output, data.len(), indicator)?;

    for slot in output.iter_mut().take(ema_lookback(period)) {
        *slot = None;
    }
    let values = ema_values(data, period, alpha)?;
    for (slot, value) in output[ema_lookback(period)..data.len()].iter_mut().zip(values) {
        *slot = Some(value);
    }

    Ok(data.len() - ema_lookback(period))
}

/// Standard EMA smoothing factor: `α = 2 / (period + 1)`.
pub(crate) fn standard_alpha<T: SeriesElement>(period: usize) -> Result<T> {
    Ok(T::two() / (T::from_usize(period)? + T::one()))
}

/// Dense EMA over a validated series: only the defined values, in order.
///
/// Returns `data.len() - (period - 1)` values, the first being the SMA seed.
/// Chained averages (DEMA, TEMA, T3, MACD signal) run this over the defined
/// region of a previous average.
pub(crate) fn ema_values<T: SeriesElement>(data: &[T], period: usize, alpha: T) -> Result<Vec<T>> {
    let period_t = T::from_usize(period)?;
    let one_minus_alpha = T::one() - alpha;

    let mut window = RollingWindow::new();
    for &value in &data[..period] {
        window.push(value);
    }

    let mut values = Vec::with_capacity(data.len() - period + 1);
    let mut prev = window.mean(period_t);
    values.push(prev);
    for &value in &data[period..] {
        prev = alpha * value + one_minus_alpha * prev;
        values.push(prev);
    }
    Ok(values)
}

// ==================== Configuration Type ====================

/// Exponential Moving Average configuration with fluent builder API.
///
/// # Example
///
/// ```
/// use ta_engine::indicators::ema::Ema;
///
/// let prices: Vec<f64> = (0..40).map(f64::from).collect();
///
/// // Default period is 30
/// let result = Ema::default().compute(&prices).unwrap();
/// assert!(result[28].is_none());
/// assert!(result[29].is_some());
///
/// let result = Ema::new().period(10).compute(&prices).unwrap();
/// assert!(result[9].is_some());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Ema {
    period: usize,
}

impl Default for Ema {
    /// Period 30.
    fn default() -> Self {
        Self { period: 30 }
    }
}

impl Ema {
    /// Creates a configuration with the default period (30).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the smoothing period.
    ///
    /// Legal range: ≥ 1. Default: 30
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
        validate_period(self.period, "period", "ema")
    }

    /// Computes the standard EMA using the configured period.
    ///
    /// # Errors
    ///
    /// See [`ema`].
    pub fn compute<T: SeriesElement>(&self, data: &[T]) -> Result<Vec<Option<T>>> {
        ema(data, self.period)
    }

    /// Computes the EMA into a pre-allocated buffer.
    ///
    /// # Errors
    ///
    /// See [`ema_into`].
    pub fn compute_into<T: SeriesElement>(
        &self,
        data: &[T],
        output: &mut [Option<T>],
    ) -> Result<usize> {
        ema_into(data, self.period, output)
    }

    /// Returns the period.
    #[must_use]
    pub const fn get_period(&self) -> usize {
        self.period
    }

    /// Returns the lookback for this configuration.
    #[must_use]
    pub const fn lookback(&self) -> usize {
        ema_lookback(self.period)
    }

    /// Returns the minimum input length for this configuration.
    #[must_use]
    pub const fn min_len(&self) -> usize {
        ema_min_len(self.period)
    }
}
