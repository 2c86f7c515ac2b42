//! Core traits for ta-engine numeric operations.
//!
//! This module defines the element trait shared by every kernel together with
//! the validation helpers that run at the boundary of each indicator call.
//!
//! # Overview
//!
//! [`SeriesElement`] abstracts over `f32` and `f64`. [`ValidatedInput`] adds
//! length checks to slices, and the free functions [`validate_period`],
//! [`validate_indicator_input`], [`validate_same_length`] and
//! [`validate_output_buffer`] implement the fixed validation order:
//! parameters, emptiness, parallel lengths, minimum length, output buffers.
//!
//! Every failure is logged with `tracing::debug!` before it is returned.
//!
//! # Example
//!
//! ```
//! use ta_engine::traits::{SeriesElement, validate_indicator_input};
//!
//! fn first_window_mean<T: SeriesElement>(data: &[T], period: usize) -> ta_engine::Result<T> {
//!     validate_indicator_input(data, period, "period", period, "first_window_mean")?;
//!
//!     let period_t = T::from_usize(period)?;
//!     let sum: T = data.iter().take(period).fold(T::zero(), |acc, &x| acc + x);
//!     Ok(sum / period_t)
//! }
//!
//! let data = vec![1.0_f64, 2.0, 3.0, 4.0, 5.0];
//! let result = first_window_mean(&data, 3).unwrap();
//! assert!((result - 2.0).abs() < 1e-10);
//! ```

use num_traits::{Float, NumCast};

use crate::error::{Error, Result};

/// A trait for types that can be used as elements in a data series.
///
/// The trait requires:
/// - `Float`: IEEE-754 arithmetic, including NaN and infinities
/// - `NumCast`: checked conversion from integer periods and literal constants
/// - `Copy + Default`: cheap values with a zero default
/// - `Send + Sync + 'static`: series can be shared across batch workers
///
/// # Example
///
/// ```
/// use ta_engine::traits::SeriesElement;
///
/// fn alpha<T: SeriesElement>(period: usize) -> ta_engine::Result<T> {
///     Ok(T::two() / (T::from_usize(period)? + T::one()))
/// }
///
/// let a: f64 = alpha(3).unwrap();
/// assert!((a - 0.5).abs() < 1e-12);
/// ```
pub trait SeriesElement: Float + NumCast + Copy + Default + Send + Sync + 'static {
    /// Creates a series element from a `usize` value.
    ///
    /// Used for converting period parameters to the series element type.
    ///
    /// # Errors
    ///
    /// Returns `Error::NumericConversion` if the value cannot be represented in this type.
    #[inline]
    fn from_usize(value: usize) -> Result<Self> {
        <Self as NumCast>::from(value).ok_or(Error::NumericConversion {
            context: "usize to series element",
        })
    }

    /// Creates a series element from an `f64` value.
    ///
    /// # Errors
    ///
    /// Returns `Error::NumericConversion` if the value cannot be represented in this type.
    #[inline]
    fn from_f64(value: f64) -> Result<Self> {
        <Self as NumCast>::from(value).ok_or(Error::NumericConversion {
            context: "f64 to series element",
        })
    }

    /// Returns the constant 2 as this type.
    ///
    /// Used in EMA smoothing: `alpha = 2 / (period + 1)`.
    #[inline]
    #[must_use]
    fn two() -> Self {
        Self::one() + Self::one()
    }

    /// Returns the constant 3 as this type.
    #[inline]
    #[must_use]
    fn three() -> Self {
        Self::two() + Self::one()
    }

    /// Returns the constant 100 as this type.
    ///
    /// Upper bound of the RSI scale.
    #[inline]
    #[must_use]
    fn hundred() -> Self {
        let ten = Self::three() * Self::three() + Self::one();
        ten * ten
    }

    /// Returns the constant 50 as this type.
    ///
    /// RSI value reported for a perfectly flat window.
    #[inline]
    #[must_use]
    fn fifty() -> Self {
        Self::hundred() / Self::two()
    }
}

// Blanket implementation for all types that satisfy the bounds
impl<T: Float + NumCast + Copy + Default + Send + Sync + 'static> SeriesElement for T {}

/// Trait for validating input data before indicator computation.
pub trait ValidatedInput {
    /// The element type of the series.
    type Element: SeriesElement;

    /// Returns the length of the series.
    fn len(&self) -> usize;

    /// Returns true if the series is empty.
    #[inline]
    #[must_use]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Validates that the series has at least `min_length` elements.
    ///
    /// # Errors
    ///
    /// Returns `Error::InsufficientData` if the series is shorter than `min_length`.
    #[inline]
    fn validate_min_length(&self, min_length: usize, indicator: &'static str) -> Result<()> {
        if self.len() < min_length {
            Err(reject(Error::InsufficientData {
                required: min_length,
                actual: self.len(),
                indicator,
            }))
        } else {
            Ok(())
        }
    }

    /// Validates that the series is not empty.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` if the series is empty.
    #[inline]
    fn validate_not_empty(&self, indicator: &'static str) -> Result<()> {
        if self.is_empty() {
            Err(reject(Error::empty_input(indicator)))
        } else {
            Ok(())
        }
    }
}

impl<T: SeriesElement> ValidatedInput for [T] {
    type Element = T;

    #[inline]
    fn len(&self) -> usize {
        self.len()
    }
}

impl<T: SeriesElement> ValidatedInput for Vec<T> {
    type Element = T;

    #[inline]
    fn len(&self) -> usize {
        self.len()
    }
}

/// Logs a rejected call at the validation boundary and hands the error back.
#[inline]
pub(crate) fn reject(err: Error) -> Error {
    tracing::debug!(error = %err, "indicator input rejected");
    err
}

/// Validates that a period is at least 1.
///
/// # Errors
///
/// Returns `Error::InvalidParameter` naming `parameter` if the period is zero.
#[inline]
pub fn validate_period(
    period: usize,
    parameter: &'static str,
    indicator: &'static str,
) -> Result<()> {
    if period == 0 {
        Err(reject(Error::zero_period(indicator, parameter)))
    } else {
        Ok(())
    }
}

/// Validates a single-series indicator call.
///
/// This function performs the following checks, in order:
/// 1. The period is non-zero
/// 2. The data is not empty
/// 3. The data has at least `min_len` elements
///
/// # Errors
///
/// - `Error::InvalidParameter` if the period is zero
/// - `Error::InvalidInput` if the data is empty
/// - `Error::InsufficientData` if data length is less than `min_len`
#[inline]
pub fn validate_indicator_input<T: SeriesElement>(
    data: &[T],
    period: usize,
    parameter: &'static str,
    min_len: usize,
    indicator: &'static str,
) -> Result<()> {
    validate_period(period, parameter, indicator)?;
    data.validate_not_empty(indicator)?;
    data.validate_min_length(min_len, indicator)?;
    Ok(())
}

/// Validates that every parallel series has the length of the first one.
///
/// Each entry pairs a series name with its length, e.g.
/// `[("high", high.len()), ("low", low.len())]`.
///
/// # Errors
///
/// Returns `Error::DimensionMismatch` describing the first offending series.
pub fn validate_same_length(series: &[(&'static str, usize)]) -> Result<()> {
    let Some(&(first_name, first_len)) = series.first() else {
        return Ok(());
    };
    for &(name, len) in &series[1..] {
        if len != first_len {
            return Err(reject(Error::DimensionMismatch {
                description: format!(
                    "{first_name} has {first_len} elements, {name} has {len} elements"
                ),
            }));
        }
    }
    Ok(())
}

/// Validates that an output buffer can hold `required` samples.
///
/// # Errors
///
/// Returns `Error::BufferTooSmall` if the buffer is shorter than `required`.
#[inline]
pub fn validate_output_buffer<O>(
    output: &[O],
    required: usize,
    indicator: &'static str,
) -> Result<()> {
    if output.len() < required {
        Err(reject(Error::BufferTooSmall {
            required,
            actual: output.len(),
            indicator,
        }))
    } else {
        Ok(())
    }
}

/// Validates a band or deviation multiplier: finite and non-negative.
///
/// # Errors
///
/// Returns `Error::InvalidParameter` for negative, NaN or infinite values.
#[inline]
pub fn validate_multiplier(
    value: f64,
    parameter: &'static str,
    indicator: &'static str,
) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(reject(Error::InvalidParameter {
            indicator,
            parameter,
            reason: "multiplier must be finite and non-negative",
        }))
    }
}
