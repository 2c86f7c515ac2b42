//! Wilder smoothing state shared by RSI and ATR.
//!
//! # Formula
//!
//! ```text
//! seed    = mean(x[0..period])
//! avg[i]  = (avg[i-1] × (period - 1) + x[i]) / period
//! ```
//!
//! The recurrence is kept in this `(period - 1)` form rather than the
//! algebraically equal `α = 1 / period` EMA so that results match the
//! published Wilder definitions to the last bit.

use crate::error::Result;
use crate::traits::SeriesElement;

/// Running Wilder average.
///
/// # Example
///
/// ```
/// use ta_engine::kernels::wilder::Wilder;
///
/// let mut avg: Wilder<f64> = Wilder::new(3).unwrap();
/// assert!((avg.seed(&[1.0, 2.0, 3.0]) - 2.0).abs() < 1e-12);
/// // (2 * 2 + 5) / 3
/// assert!((avg.update(5.0) - 3.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Wilder<T> {
    period: T,
    period_minus_one: T,
    value: T,
}

impl<T: SeriesElement> Wilder<T> {
    /// Creates a smoother for `period` (≥ 1, validated by the caller).
    ///
    /// # Errors
    ///
    /// Returns `Error::NumericConversion` if `period` is not representable in `T`.
    pub fn new(period: usize) -> Result<Self> {
        let period_t = T::from_usize(period)?;
        Ok(Self {
            period: period_t,
            period_minus_one: period_t - T::one(),
            value: T::nan(),
        })
    }

    /// Seeds the average with the simple mean of `values` and returns it.
    pub fn seed(&mut self, values: &[T]) -> T {
        let sum = values.iter().fold(T::zero(), |acc, &x| acc + x);
        self.value = sum / self.period;
        self.value
    }

    /// Seeds the average with a precomputed sum of `period` values.
    pub fn seed_sum(&mut self, sum: T) -> T {
        self.value = sum / self.period;
        self.value
    }

    /// Folds the next sample into the average and returns the new value.
    #[inline]
    pub fn update(&mut self, x: T) -> T {
        self.value = (self.value * self.period_minus_one + x) / self.period;
        self.value
    }

    /// Returns the current average.
    #[inline]
    #[must_use]
    pub fn value(&self) -> T {
        self.value
    }
}
