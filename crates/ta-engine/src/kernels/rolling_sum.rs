//! Rolling window sum with non-finite bookkeeping.
//!
//! This kernel backs every windowed indicator (SMA, TRIMA, rolling standard
//! deviation, Bollinger Bands). It keeps an incremental sum of the finite
//! samples in the window, a Welford mean and sum of squared deviations for the
//! variance, and counts of NaN, `+∞` and `-∞` samples, so each step is O(1).
//!
//! # Variance
//!
//! Samples enter and leave through the Welford update and its inverse:
//!
//! ```text
//! push x:  n += 1;  d = x - mean;  mean += d / n;      m2 += d * (x - mean)
//! pop x:   n -= 1;  d = x - mean;  mean -= d / n;      m2 -= d * (x - mean)
//! ```
//!
//! and the variance is read as `m2 / n`. It is never formed as
//! `Σx²/n - mean²`.
//!
//! # Non-finite samples
//!
//! Non-finite samples are never added to the running sums. Instead the window
//! reports the value IEEE-754 summation would have produced while they are in
//! it:
//!
//! ```text
//! any NaN, or both +∞ and -∞   => NaN
//! only +∞ (one or more)        => +∞
//! only -∞ (one or more)        => -∞
//! otherwise                    => finite sum
//! ```
//!
//! Once the offending sample leaves the window the finite sum is reported
//! again, untouched by the earlier NaN or infinity. A finite sample large
//! enough to overflow an accumulator is handled by [`RollingWindow::advance`],
//! which rebuilds the accumulators from the window's samples whenever one of
//! them stops being finite.
//!
//! # Example
//!
//! ```
//! use ta_engine::kernels::rolling_sum::{rolling_sum, RollingWindow};
//!
//! let mut window: RollingWindow<f64> = RollingWindow::new();
//! window.push(1.0);
//! window.push(f64::NAN);
//! assert!(window.sum().is_nan());
//! window.pop(f64::NAN);
//! assert_eq!(window.sum(), 1.0);
//!
//! let sums = rolling_sum(&[1.0_f64, 2.0, 3.0, 4.0], 2).unwrap();
//! assert_eq!(sums, vec![None, Some(3.0), Some(5.0), Some(7.0)]);
//! ```

use crate::error::Result;
use crate::traits::{validate_indicator_input, validate_output_buffer, SeriesElement};

/// Incremental accumulator for the samples currently inside a window.
///
/// The caller owns the window boundaries: [`push`](Self::push) every sample
/// that enters and [`pop`](Self::pop) every sample that leaves, or let
/// [`advance`](Self::advance) do both for a slice.
#[derive(Debug, Clone, Copy)]
pub struct RollingWindow<T> {
    sum: T,
    // Welford state over the finite samples
    count: T,
    mean: T,
    m2: T,
    nan: usize,
    pos_inf: usize,
    neg_inf: usize,
}

impl<T: SeriesElement> Default for RollingWindow<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: SeriesElement> RollingWindow<T> {
    /// Creates an empty window.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sum: T::zero(),
            count: T::zero(),
            mean: T::zero(),
            m2: T::zero(),
            nan: 0,
            pos_inf: 0,
            neg_inf: 0,
        }
    }

    /// Adds a sample entering the window.
    #[inline]
    pub fn push(&mut self, value: T) {
        if value.is_nan() {
            self.nan += 1;
        } else if value == T::infinity() {
            self.pos_inf += 1;
        } else if value == T::neg_infinity() {
            self.neg_inf += 1;
        } else {
            self.sum = self.sum + value;
            self.count = self.count + T::one();
            let delta = value - self.mean;
            self.mean = self.mean + delta / self.count;
            self.m2 = self.m2 + delta * (value - self.mean);
        }
    }

    /// Removes a sample leaving the window.
    ///
    /// `value` must be a sample previously passed to [`push`](Self::push).
    #[inline]
    pub fn pop(&mut self, value: T) {
        if value.is_nan() {
            self.nan = self.nan.saturating_sub(1);
        } else if value == T::infinity() {
            self.pos_inf = self.pos_inf.saturating_sub(1);
        } else if value == T::neg_infinity() {
            self.neg_inf = self.neg_inf.saturating_sub(1);
        } else if self.count <= T::one() {
            self.sum = T::zero();
            self.count = T::zero();
            self.mean = T::zero();
            self.m2 = T::zero();
        } else {
            self.sum = self.sum - value;
            self.count = self.count - T::one();
            let delta = value - self.mean;
            self.mean = self.mean - delta / self.count;
            self.m2 = self.m2 - delta * (value - self.mean);
        }
    }

    /// Slides a `period`-sample window over `data` so that it ends at `index`.
    ///
    /// Pops `data[index - period]` once the window is full, pushes
    /// `data[index]`, and rebuilds the accumulators from the window's samples
    /// if any of them overflowed. Calling it for `index = 0, 1, 2, ...` keeps
    /// the window equal to `data[index + 1 - period..=index]`.
    ///
    /// Returns true if the accumulators were rebuilt.
    #[inline]
    pub fn advance(&mut self, data: &[T], index: usize, period: usize) -> bool {
        if index >= period {
            self.pop(data[index - period]);
        }
        self.push(data[index]);
        if self.is_overflowed() {
            self.rebuild(&data[(index + 1).saturating_sub(period)..=index]);
            true
        } else {
            false
        }
    }

    /// Resets the window to exactly `samples`.
    pub fn rebuild(&mut self, samples: &[T]) {
        *self = Self::new();
        for &value in samples {
            self.push(value);
        }
    }

    /// Returns true if an accumulator left the finite range.
    ///
    /// Only finite samples feed the accumulators, so this means their
    /// magnitudes overflowed, not that a NaN or infinity is in the window.
    #[inline]
    #[must_use]
    pub fn is_overflowed(&self) -> bool {
        !(self.sum.is_finite() && self.mean.is_finite() && self.m2.is_finite())
    }

    /// Returns true if any non-finite sample is inside the window.
    #[inline]
    #[must_use]
    pub const fn has_non_finite(&self) -> bool {
        self.nan > 0 || self.pos_inf > 0 || self.neg_inf > 0
    }

    /// Returns the IEEE-754 sum of the window.
    #[inline]
    #[must_use]
    pub fn sum(&self) -> T {
        if self.nan > 0 || (self.pos_inf > 0 && self.neg_inf > 0) {
            T::nan()
        } else if self.pos_inf > 0 {
            T::infinity()
        } else if self.neg_inf > 0 {
            T::neg_infinity()
        } else {
            self.sum
        }
    }

    /// Returns the sum of the finite samples only.
    #[inline]
    #[must_use]
    pub fn finite_sum(&self) -> T {
        self.sum
    }

    /// Returns the mean of a window holding `count` samples.
    #[inline]
    #[must_use]
    pub fn mean(&self, count: T) -> T {
        self.sum() / count
    }

    /// Returns the population variance of a window holding `count` samples.
    ///
    /// NaN whenever a non-finite sample is inside the window. Rounding
    /// residue below zero is clamped to zero.
    #[inline]
    #[must_use]
    pub fn variance(&self, count: T) -> T {
        if self.has_non_finite() {
            return T::nan();
        }
        let variance = self.m2 / count;
        if variance < T::zero() {
            T::zero()
        } else {
            variance
        }
    }
}

/// Returns the lookback period for the rolling sum: `period - 1`.
#[inline]
#[must_use]
pub const fn rolling_sum_lookback(period: usize) -> usize {
    if period == 0 {
        0
    } else {
        period - 1
    }
}

/// Returns the minimum input length for the rolling sum: `period`.
#[inline]
#[must_use]
pub const fn rolling_sum_min_len(period: usize) -> usize {
    period
}

/// Computes the trailing `period`-sample sum at every index.
///
/// # Errors
///
/// - `Error::InvalidParameter` if `period` is zero
/// - `Error::InvalidInput` if `data` is empty
/// - `Error::InsufficientData` if `data` is shorter than `period`
#[must_use = "this returns a Result with the rolling sums, which should be used"]
pub fn rolling_sum<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<Option<T>>> {
    let mut output = vec![None; data.len()];
    rolling_sum_into(data, period, &mut output)?;
    Ok(output)
}

/// Computes the rolling sum into a pre-allocated output buffer.
///
/// Returns the number of defined samples written.
///
/// # Errors
///
/// As [`rolling_sum`], plus `Error::BufferTooSmall` if `output` is shorter
/// than `data`.
#[must_use = "this returns a Result with the count of defined values"]
pub fn rolling_sum_into<T: SeriesElement>(
    data: &[T],
    period: usize,
    output: &mut [Option<T>],
) -> Result<usize> {
    validate_indicator_input(data, period, "period", rolling_sum_min_len(period), "rolling_sum")?;
    validate_output_buffer(output, data.len(), "rolling_sum")?;

    let mut window = RollingWindow::new();
    for i in 0..data.len() {
        window.advance(data, i, period);
        output[i] = if i + 1 >= period {
            Some(window.sum())
        } else {
            None
        };
    }

    Ok(data.len() - rolling_sum_lookback(period))
}
