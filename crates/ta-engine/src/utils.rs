//! Utility functions for ta-engine.
//!
//! Shared helpers for comparing floating-point results and inspecting
//! indicator outputs, where `None` marks the warm-up region.
//!
//! # Example
//!
//! ```
//! use ta_engine::utils::{approx_eq, EPSILON};
//!
//! let a = 1.0 / 3.0;
//! let b = 0.333333333333333;
//! assert!(approx_eq(a, b, EPSILON));
//! ```

use crate::traits::SeriesElement;

/// Standard epsilon for high-precision floating-point comparisons.
pub const EPSILON: f64 = 1e-10;

/// Looser epsilon for results that accumulate many operations.
pub const LOOSE_EPSILON: f64 = 1e-6;

/// Approximate equality check for floating-point values.
///
/// Returns `true` if `a` and `b` are within `tolerance` of each other,
/// if both are NaN, or if both are the same infinity.
///
/// # Example
///
/// ```
/// use ta_engine::utils::{approx_eq, EPSILON};
///
/// assert!(approx_eq(1.0, 1.0 + 1e-11, EPSILON));
/// assert!(!approx_eq(1.0, 2.0, EPSILON));
/// assert!(approx_eq(f64::NAN, f64::NAN, EPSILON));
/// assert!(!approx_eq(f64::NAN, 1.0, EPSILON));
/// ```
#[inline]
#[must_use]
pub fn approx_eq<T: SeriesElement>(a: T, b: T, tolerance: T) -> bool {
    if a.is_nan() || b.is_nan() {
        return a.is_nan() && b.is_nan();
    }
    if a.is_infinite() || b.is_infinite() {
        return a == b;
    }
    (a - b).abs() < tolerance
}

/// Approximate equality for optional indicator samples.
///
/// Two `None`s are equal; a `None` never equals a value.
///
/// ```
/// use ta_engine::utils::{approx_eq_opt, EPSILON};
///
/// assert!(approx_eq_opt(None::<f64>, None, EPSILON));
/// assert!(approx_eq_opt(Some(1.0), Some(1.0), EPSILON));
/// assert!(!approx_eq_opt(None, Some(0.0), EPSILON));
/// ```
#[inline]
#[must_use]
pub fn approx_eq_opt<T: SeriesElement>(a: Option<T>, b: Option<T>, tolerance: T) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(x), Some(y)) => approx_eq(x, y, tolerance),
        _ => false,
    }
}

/// Counts the unavailable samples at the start of an indicator output.
///
/// For a successful call this equals the indicator's lookback.
///
/// ```
/// use ta_engine::utils::count_unavailable_prefix;
///
/// let out = [None, None, Some(1.0_f64), None];
/// assert_eq!(count_unavailable_prefix(&out), 2);
/// ```
#[inline]
#[must_use]
pub fn count_unavailable_prefix<T>(data: &[Option<T>]) -> usize {
    data.iter().take_while(|x| x.is_none()).count()
}
