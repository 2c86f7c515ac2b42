//! On-Balance Volume (OBV) indicator.
//!
//! OBV is a momentum indicator that uses volume flow to predict changes in stock price.
//! It was developed by Joseph Granville and introduced in his 1963 book "Granville's New
//! Key to Stock Market Profits."
//!
//! # Algorithm
//!
//! OBV is a cumulative indicator:
//!
//! ```text
//! OBV[0] = volume[0]
//!
//! If close[i] > close[i-1]: OBV[i] = OBV[i-1] + volume[i]
//! If close[i] < close[i-1]: OBV[i] = OBV[i-1] - volume[i]
//! If close[i] == close[i-1]: OBV[i] = OBV[i-1]
//! ```
//!
//! # Non-finite values
//!
//! A NaN close leaves the direction undefined, so the line becomes NaN from
//! that bar on. A NaN volume reaches the line only on an up or down bar.
//!
//! # Example
//!
//! ```
//! use ta_engine::indicators::obv::obv;
//!
//! let close = vec![10.0_f64, 10.5, 10.2, 10.8, 10.5];
//! let volume = vec![1000.0, 1500.0, 1200.0, 1800.0, 1100.0];
//!
//! let result = obv(&close, &volume).unwrap();
//!
//! // 1000, +1500, -1200, +1800, -1100
//! let expected = [1000.0, 2500.0, 1300.0, 3100.0, 2000.0];
//! for (value, e) in result.iter().zip(expected) {
//!     assert_eq!(*value, Some(e));
//! }
//! ```

use crate::error::Result;
use crate::traits::{validate_output_buffer, validate_same_length, SeriesElement, ValidatedInput};

/// Returns the lookback period for OBV: 0.
///
/// # Example
///
/// ```
/// use ta_engine::indicators::obv::obv_lookback;
///
/// assert_eq!(obv_lookback(), 0);
/// ```
#[inline]
#[must_use]
pub const fn obv_lookback() -> usize {
    0
}

/// Returns the minimum input length required for OBV: 1.
#[inline]
#[must_use]
pub const fn obv_min_len() -> usize {
    1
}

/// Computes On-Balance Volume.
///
/// # Errors
///
/// - `Error::InvalidInput` if the series are empty
/// - `Error::DimensionMismatch` if `close` and `volume` differ in length
#[must_use = "this returns a Result with the OBV values, which should be used"]
pub fn obv<T: SeriesElement>(close: &[T], volume: &[T]) -> Result<Vec<Option<T>>> {
    let mut output = vec![None; close.len()];
    obv_into(close, volume, &mut output)?;
    Ok(output)
}

/// Computes On-Balance Volume into a pre-allocated buffer.
///
/// Returns the number of defined samples, which is the input length.
///
/// # Errors
///
/// As [`obv`], plus `Error::BufferTooSmall`.
#[must_use = "this returns a Result with the count of defined OBV values"]
pub fn obv_into<T: SeriesElement>(
    close: &[T],
    volume: &[T],
    output: &mut [Option<T>],
) -> Result<usize> {
    close.validate_not_empty("obv")?;
    validate_same_length(&[("close", close.len()), ("volume", volume.len())])?;
    let len = close.len();
    validate_output_buffer(output, len, "obv")?;

    let mut obv_value = volume[0];
    output[0] = Some(obv_value);
    for i in 1..len {
        let (current, previous) = (close[i], close[i - 1]);
        if current.is_nan() || previous.is_nan() {
            obv_value = T::nan();
        } else if current > previous {
            obv_value = obv_value + volume[i];
        } else if current < previous {
            obv_value = obv_value - volume[i];
        }
        output[i] = Some(obv_value);
    }

    Ok(len)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::all, clippy::pedantic, clippy::nursery)]
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_obv_lookback() {
        assert_eq!(obv_lookback(), 0);
        assert_eq!(obv_min_len(), 1);
    }

    #[test]
    fn test_obv_single_value() {
        let result = obv(&[10.0_f64], &[750.0]).unwrap();
        assert_eq!(result, vec![Some(750.0)]);
    }

    #[test]
    fn test_obv_close_unchanged() {
        let close = [10.0_f64, 10.0, 10.0];
        let volume = [100.0_f64, 200.0, 300.0];
        let result = obv(&close, &volume).unwrap();
        assert!(result.iter().all(|v| *v == Some(100.0)));
    }

    #[test]
    fn test_obv_f32() {
        let close = [1.0_f32, 2.0, 1.5];
        let volume = [10.0_f32, 20.0, 5.0];
        let result = obv(&close, &volume).unwrap();
        assert_eq!(result, vec![Some(10.0), Some(30.0), Some(25.0)]);
    }

    #[test]
    fn test_obv_monotonic_up_market() {
        let close: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
        let volume: Vec<f64> = (0..20).map(|i| 1000.0 + (i * 37 % 11) as f64).collect();
        let result = obv(&close, &volume).unwrap();
        for pair in result.windows(2) {
            assert!(pair[1].unwrap() > pair[0].unwrap());
        }
    }

    #[test]
    fn test_obv_monotonic_down_market() {
        let close: Vec<f64> = (0..20).map(|i| 100.0 - i as f64).collect();
        let volume = vec![500.0_f64; 20];
        let result = obv(&close, &volume).unwrap();
        for pair in result.windows(2) {
            assert!(pair[1].unwrap() < pair[0].unwrap());
        }
        assert_eq!(result[19], Some(500.0 - 19.0 * 500.0));
    }

    #[test]
    fn test_obv_zero_volume() {
        let close = [1.0_f64, 2.0, 3.0];
        let volume = [0.0_f64; 3];
        let result = obv(&close, &volume).unwrap();
        assert!(result.iter().all(|v| *v == Some(0.0)));
    }

    #[test]
    fn test_obv_nan_close_is_sticky() {
        let close = [1.0_f64, 2.0, f64::NAN, 3.0, 4.0];
        let volume = [10.0_f64; 5];
        let result = obv(&close, &volume).unwrap();
        assert_eq!(result[1], Some(20.0));
        assert!(result[2..].iter().all(|v| v.unwrap().is_nan()));
    }

    #[test]
    fn test_obv_nan_volume_on_flat_bar_is_ignored() {
        let close = [1.0_f64, 1.0, 2.0];
        let volume = [10.0_f64, f64::NAN, 5.0];
        let result = obv(&close, &volume).unwrap();
        assert_eq!(result, vec![Some(10.0), Some(10.0), Some(15.0)]);
    }

    #[test]
    fn test_obv_errors() {
        let empty: [f64; 0] = [];
        assert!(matches!(obv(&empty, &empty), Err(Error::InvalidInput { .. })));
        assert!(matches!(
            obv(&[1.0_f64, 2.0], &[1.0]),
            Err(Error::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_obv_into_matches_obv() {
        let close = [10.0_f64, 10.5, 10.2, 10.8, 10.5];
        let volume = [1000.0_f64, 1500.0, 1200.0, 1800.0, 1100.0];
        let expected = obv(&close, &volume).unwrap();
        let mut output = vec![None; 5];
        assert_eq!(obv_into(&close, &volume, &mut output).unwrap(), 5);
        assert_eq!(output, expected);

        let mut short = vec![None; 4];
        assert!(matches!(
            obv_into(&close, &volume, &mut short),
            Err(Error::BufferTooSmall { .. })
        ));
    }
}
