//! Relative Strength Index (RSI) indicator.
//!
//! The Relative Strength Index is a momentum oscillator that measures the speed
//! and magnitude of price movements. It oscillates between 0 and 100, where
//! traditionally readings above 70 indicate overbought conditions and readings
//! below 30 indicate oversold conditions.
//!
//! # Algorithm
//!
//! O(n) with Wilder's smoothing (see [`Wilder`](crate::kernels::Wilder)):
//!
//! 1. Calculate price changes (current - previous)
//! 2. Separate changes into gains (positive) and losses (negative, stored as positive)
//! 3. Seed both averages with the simple mean of the first `period` changes
//! 4. Apply Wilder's recurrence to both averages
//! 5. RSI = 100 - (100 / (1 + Average Gain / Average Loss))
//!
//! # Formula
//!
//! ```text
//! Change[i] = Price[i] - Price[i-1]
//! Gain[i]   = max(Change[i], 0)
//! Loss[i]   = max(-Change[i], 0)
//!
//! Avg Gain[period] = mean(Gain[1..=period])
//! Avg Gain[i]      = (Avg Gain[i-1] × (period-1) + Gain[i]) / period
//! ```
//!
//! # Boundary Conditions
//!
//! - **No losses, some gains**: RSI = 100
//! - **No gains, some losses**: RSI = 0
//! - **No movement at all**: RSI = 50
//!
//! A NaN change makes both averages NaN from that point on.
//!
//! # Alignment
//!
//! The first defined value sits at index `period`, so `period + 1` samples are
//! the minimum input.
//!
//! # Example
//!
//! ```
//! use ta_engine::indicators::rsi::rsi;
//!
//! let data = vec![44.0, 44.25, 44.5, 43.75, 44.5, 44.25, 44.0, 43.5, 43.25, 43.0];
//! let result = rsi(&data, 5).unwrap();
//!
//! assert!(result[..5].iter().all(Option::is_none));
//! let first = result[5].unwrap();
//! assert!((0.0..=100.0).contains(&first));
//! ```

use crate::error::Result;
use crate::kernels::Wilder;
use crate::traits::{
    validate_indicator_input, validate_output_buffer, validate_period, SeriesElement,
};

/// Returns the lookback period for RSI: `period`.
///
/// # Example
///
/// ```
/// use ta_engine::indicators::rsi::rsi_lookback;
///
/// assert_eq!(rsi_lookback(14), 14);
/// ```
#[inline]
#[must_use]
pub const fn rsi_lookback(period: usize) -> usize {
    period
}

/// Returns the minimum input length required for RSI: `period + 1`.
#[inline]
#[must_use]
pub const fn rsi_min_len(period: usize) -> usize {
    period.saturating_add(1)
}

/// Computes the Relative Strength Index using Wilder's smoothing.
///
/// # Errors
///
/// - `Error::InvalidParameter` if `period` is zero
/// - `Error::InvalidInput` if `data` is empty
/// - `Error::InsufficientData` if `data.len() <= period`
#[must_use = "this returns a Result with the RSI values, which should be used"]
pub fn rsi<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<Option<T>>> {
    let mut output = vec![None; data.len()];
    rsi_into(data, period, &mut output)?;
    Ok(output)
}

/// Computes RSI into a pre-allocated output buffer.
///
/// Returns the number of defined samples, `data.len() - period`.
///
/// # Errors
///
/// As [`rsi`], plus `Error::BufferTooSmall`.
///
/// # Example
///
/// ```
/// use ta_engine::indicators::rsi::rsi_into;
///
/// let data: Vec<f64> = (0..20).map(f64::from).collect();
/// let mut output = vec![None; 20];
/// assert_eq!(rsi_into(&data, 14, &mut output).unwrap(), 6);
/// assert_eq!(output[14], Some(100.0));
/// ```
#[must_use = "this returns a Result with the count of defined RSI values"]
pub fn rsi_into<T: SeriesElement>(
    data: &[T],
    period: usize,
    output: &mut [Option<T>],
) -> Result<usize> {
    validate_indicator_input(data, period, "period", rsi_min_len(period), "rsi")?;
    validate_output_buffer(output, data.len(), "rsi")?;

    for slot in output.iter_mut().take(period) {
        *slot = None;
    }

    let mut avg_gain = Wilder::new(period)?;
    let mut avg_loss = Wilder::new(period)?;

    let (mut gain_sum, mut loss_sum) = (T::zero(), T::zero());
    for i in 1..=period {
        let (gain, loss) = split_change(data[i] - data[i - 1]);
        gain_sum = gain_sum + gain;
        loss_sum = loss_sum + loss;
    }
    let g = avg_gain.seed_sum(gain_sum);
    let l = avg_loss.seed_sum(loss_sum);
    output[period] = Some(compute_rsi_value(g, l));

    for i in (period + 1)..data.len() {
        let (gain, loss) = split_change(data[i] - data[i - 1]);
        let g = avg_gain.update(gain);
        let l = avg_loss.update(loss);
        output[i] = Some(compute_rsi_value(g, l));
    }

    Ok(data.len() - rsi_lookback(period))
}

/// Splits a price change into `(gain, loss)`; NaN goes to both sides.
#[inline]
fn split_change<T: SeriesElement>(change: T) -> (T, T) {
    if change.is_nan() {
        (change, change)
    } else if change > T::zero() {
        (change, T::zero())
    } else {
        (T::zero(), -change)
    }
}

/// Maps the smoothed averages to the 0..=100 scale.
#[inline]
fn compute_rsi_value<T: SeriesElement>(avg_gain: T, avg_loss: T) -> T {
    if avg_gain.is_nan() || avg_loss.is_nan() {
        T::nan()
    } else if avg_loss == T::zero() {
        if avg_gain == T::zero() {
            T::fifty()
        } else {
            T::hundred()
        }
    } else if avg_gain == T::zero() {
        T::zero()
    } else {
        let hundred = T::hundred();
        hundred - hundred / (T::one() + avg_gain / avg_loss)
    }
}

// ==================== Configuration Type ====================

/// RSI configuration with fluent builder API.
///
/// # Example
///
/// ```
/// use ta_engine::indicators::rsi::Rsi;
///
/// let prices: Vec<f64> = (0..30).map(|i| 100.0 + f64::from(i % 4)).collect();
///
/// // Default period is 14
/// let result = Rsi::default().compute(&prices).unwrap();
/// assert!(result[13].is_none());
/// assert!(result[14].is_some());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Rsi {
    period: usize,
}

impl Default for Rsi {
    /// Period 14.
    fn default() -> Self {
        Self { period: 14 }
    }
}

impl Rsi {
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
        validate_period(self.period, "period", "rsi")
    }

    /// Computes RSI using the configured period.
    ///
    /// # Errors
    ///
    /// See [`rsi`].
    pub fn compute<T: SeriesElement>(&self, data: &[T]) -> Result<Vec<Option<T>>> {
        rsi(data, self.period)
    }

    /// Computes RSI into a pre-allocated buffer.
    ///
    /// # Errors
    ///
    /// See [`rsi_into`].
    pub fn compute_into<T: SeriesElement>(
        &self,
        data: &[T],
        output: &mut [Option<T>],
    ) -> Result<usize> {
        rsi_into(data, self.period, output)
    }

    /// Returns the period.
    #[must_use]
    pub const fn get_period(&self) -> usize {
        self.period
    }

    /// Returns the lookback for this configuration.
    #[must_use]
    pub const fn lookback(&self) -> usize {
        rsi_lookback(self.period)
    }

    /// Returns the minimum input length for this configuration.
    #[must_use]
    pub const fn min_len(&self) -> usize {
        rsi_min_len(self.period)
    }
}
