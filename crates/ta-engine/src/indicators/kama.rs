//! KAMA (Kaufman Adaptive Moving Average) indicator.
//!
//! KAMA is an adaptive moving average that adjusts its smoothing based on
//! market efficiency. It responds quickly during trending markets and slowly
//! during sideways markets.
//!
//! # Formula
//!
//! 1. Efficiency Ratio (ER) = |Price - Price\[n ago\]| / Sum(|Price\[j\] - Price\[j-1\]|)
//!    over the last `n` changes
//! 2. Smoothing Constant (SC) = \[ER × (`fast_sc` - `slow_sc`) + `slow_sc`\]²
//!    where `fast_sc` = `2/(fast_period+1)`, `slow_sc` = `2/(slow_period+1)`
//! 3. KAMA = KAMA\[prev\] + SC × (Price - KAMA\[prev\])
//!
//! The state is seeded with `Price[n-1]`; the first reported value at index `n`
//! already applies one smoothing step. A window without any movement has
//! ER = 0 and uses the slow constant.
//!
//! The volatility sum is maintained incrementally, so the cost is O(n)
//! regardless of the period.
//!
//! # Default Parameters
//!
//! - `fast_period`: 2
//! - `slow_period`: 30
//!
//! # Lookback
//!
//! The lookback period is `period`; at least `period + 1` samples are needed.

use crate::error::Result;
use crate::traits::{
    validate_indicator_input, validate_output_buffer, validate_period, SeriesElement,
};

/// Default fast smoothing period.
pub const KAMA_FAST_PERIOD: usize = 2;

/// Default slow smoothing period.
pub const KAMA_SLOW_PERIOD: usize = 30;

/// Computes the lookback period for KAMA: `period`.
#[inline]
#[must_use]
pub const fn kama_lookback(period: usize) -> usize {
    period
}

/// Returns the minimum input length required for KAMA: `period + 1`.
#[inline]
#[must_use]
pub const fn kama_min_len(period: usize) -> usize {
    period.saturating_add(1)
}

/// Computes KAMA with the default fast (2) and slow (30) periods.
///
/// # Errors
///
/// - `Error::InvalidParameter` if `period` is zero
/// - `Error::InvalidInput` if `data` is empty
/// - `Error::InsufficientData` if `data` has fewer than `period + 1` samples
///
/// # Example
///
/// ```
/// use ta_engine::indicators::kama::kama;
///
/// let data: Vec<f64> = (1..=15).map(f64::from).collect();
/// let result = kama(&data, 10).unwrap();
///
/// assert!(result[9].is_none());
/// // Perfectly efficient move: ER = 1, SC = (2/3)²
/// let expected = 10.0 + (4.0 / 9.0) * (11.0 - 10.0);
/// assert!((result[10].unwrap() - expected).abs() < 1e-12);
/// ```
#[must_use = "this returns a Result with the KAMA values, which should be used"]
pub fn kama<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<Option<T>>> {
    kama_full(data, period, KAMA_FAST_PERIOD, KAMA_SLOW_PERIOD)
}

/// Computes KAMA with the default periods into a pre-allocated buffer.
///
/// # Errors
///
/// As [`kama`], plus `Error::BufferTooSmall`.
#[must_use = "this returns a Result with the count of defined KAMA values"]
pub fn kama_into<T: SeriesElement>(
    data: &[T],
    period: usize,
    output: &mut [Option<T>],
) -> Result<usize> {
    kama_full_into(data, period, KAMA_FAST_PERIOD, KAMA_SLOW_PERIOD, output)
}

/// Computes KAMA with custom fast and slow smoothing periods.
///
/// # Errors
///
/// As [`kama`], plus `Error::InvalidParameter` if either smoothing period is zero.
#[must_use = "this returns a Result with the KAMA values, which should be used"]
pub fn kama_full<T: SeriesElement>(
    data: &[T],
    period: usize,
    fast_period: usize,
    slow_period: usize,
) -> Result<Vec<Option<T>>> {
    let mut output = vec![None; data.len()];
    kama_full_into(data, period, fast_period, slow_period, &mut output)?;
    Ok(output)
}

/// Computes KAMA with custom smoothing periods into a pre-allocated buffer.
///
/// # Errors
///
/// As [`kama_full`], plus `Error::BufferTooSmall`.
#[must_use = "this returns a Result with the count of defined KAMA values"]
pub fn kama_full_into<T: SeriesElement>(
    data: &[T],
    period: usize,
    fast_period: usize,
    slow_period: usize,
    output: &mut [Option<T>],
) -> Result<usize> {
    validate_period(fast_period, "fast_period", "kama")?;
    validate_period(slow_period, "slow_period", "kama")?;
    validate_indicator_input(data, period, "period", kama_min_len(period), "kama")?;
    validate_output_buffer(output, data.len(), "kama")?;

    let two = T::two();
    let fast_sc = two / (T::from_usize(fast_period)? + T::one());
    let slow_sc = two / (T::from_usize(slow_period)? + T::one());
    let sc_diff = fast_sc - slow_sc;

    for slot in output.iter_mut().take(period) {
        *slot = None;
    }

    let mut volatility = data[1..=period]
        .iter()
        .zip(&data[..period])
        .fold(T::zero(), |acc, (&cur, &prev)| acc + (cur - prev).abs());
    let mut kama_prev = data[period - 1];

    for i in period..data.len() {
        if i > period {
            volatility = volatility + (data[i] - data[i - 1]).abs()
                - (data[i - period] - data[i - period - 1]).abs();
        }

        let change = (data[i] - data[i - period]).abs();
        let er = if volatility > T::zero() {
            // Rolling subtraction can leave the sum a hair below the change
            (change / volatility).min(T::one())
        } else if volatility.is_nan() || change.is_nan() {
            T::nan()
        } else {
            T::zero()
        };

        let sc_raw = er * sc_diff + slow_sc;
        let sc = sc_raw * sc_raw;
        kama_prev = kama_prev + sc * (data[i] - kama_prev);
        output[i] = Some(kama_prev);
    }

    Ok(data.len() - kama_lookback(period))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::all, clippy::pedantic, clippy::nursery)]
    use super::*;
    use crate::error::Error;

    const EPSILON: f64 = 1e-10;

    fn naive_kama(data: &[f64], period: usize) -> Vec<Option<f64>> {
        let fast = 2.0 / 3.0;
        let slow = 2.0 / 31.0;
        let mut out = vec![None; data.len()];
        let mut prev = data[period - 1];
        for i in period..data.len() {
            let change = (data[i] - data[i - period]).abs();
            let vol: f64 = (i - period + 1..=i).map(|j| (data[j] - data[j - 1]).abs()).sum();
            let er = if vol > 0.0 { change / vol } else { 0.0 };
            let sc = (er * (fast - slow) + slow).powi(2);
            prev += sc * (data[i] - prev);
            out[i] = Some(prev);
        }
        out
    }

    #[test]
    fn test_kama_lookback() {
        assert_eq!(kama_lookback(10), 10);
        assert_eq!(kama_min_len(10), 11);
        assert_eq!(kama_min_len(1), 2);
    }

    #[test]
    fn test_kama_matches_naive() {
        let data: Vec<f64> = (0..80)
            .map(|i| ((i as f64) * 0.27).sin() * 6.0 + (i as f64) * 0.1 + 40.0)
            .collect();
        for period in [1, 3, 10] {
            let expected = naive_kama(&data, period);
            let result = kama(&data, period).unwrap();
            for (i, (r, e)) in result.iter().zip(&expected).enumerate() {
                match (r, e) {
                    (None, None) => {}
                    (Some(r), Some(e)) => assert!((r - e).abs() < 1e-9, "period {period} index {i}"),
                    _ => panic!("availability differs at {i}"),
                }
            }
        }
    }

    #[test]
    fn test_kama_warmup() {
        let data: Vec<f64> = (0..20).map(f64::from).collect();
        let result = kama(&data, 5).unwrap();
        assert!(result[..5].iter().all(Option::is_none));
        assert!(result[5..].iter().all(Option::is_some));
    }

    #[test]
    fn test_kama_flat_series_stays_flat() {
        let data = vec![5.0_f64; 20];
        let result = kama(&data, 4).unwrap();
        for value in result.iter().skip(4) {
            assert!((value.unwrap() - 5.0).abs() < EPSILON);
        }
    }

    #[test]
    fn test_kama_follows_trend_faster_than_chop() {
        let trend: Vec<f64> = (0..30).map(f64::from).collect();
        let chop: Vec<f64> = (0..30).map(|i| if i % 2 == 0 { 0.0 } else { 1.0 }).collect();
        let t = kama(&trend, 10).unwrap();
        let c = kama(&chop, 10).unwrap();
        // Step size relative to the move at index 11
        let trend_step = t[11].unwrap() - t[10].unwrap();
        let chop_step = (c[11].unwrap() - c[10].unwrap()).abs();
        assert!(trend_step > chop_step);
    }

    #[test]
    fn test_kama_custom_periods() {
        let data: Vec<f64> = (0..30).map(|i| ((i as f64) * 0.5).cos() * 3.0).collect();
        let default = kama(&data, 5).unwrap();
        let custom = kama_full(&data, 5, 2, 30).unwrap();
        assert_eq!(default, custom);

        let faster = kama_full(&data, 5, 2, 10).unwrap();
        assert_ne!(default, faster);
    }

    #[test]
    fn test_kama_nan_is_sticky() {
        let mut data: Vec<f64> = (0..20).map(f64::from).collect();
        data[8] = f64::NAN;
        let result = kama(&data, 3).unwrap();
        assert!(result[7].unwrap().is_finite());
        for value in &result[8..] {
            assert!(value.unwrap().is_nan());
        }
    }

    #[test]
    fn test_kama_errors() {
        let empty: Vec<f64> = vec![];
        assert!(matches!(kama(&empty, 3), Err(Error::InvalidInput { .. })));
        assert!(matches!(
            kama(&[1.0_f64, 2.0], 0),
            Err(Error::InvalidParameter { .. })
        ));
        // period samples are not enough
        assert!(matches!(
            kama(&[1.0_f64, 2.0, 3.0], 3),
            Err(Error::InsufficientData { required: 4, actual: 3, .. })
        ));
        assert!(matches!(
            kama_full(&[1.0_f64, 2.0, 3.0], 1, 0, 30),
            Err(Error::InvalidParameter {
                parameter: "fast_period",
                ..
            })
        ));
    }

    #[test]
    fn test_kama_into_matches_kama() {
        let data: Vec<f64> = (0..25).map(|i| (i as f64).sqrt()).collect();
        let expected = kama(&data, 6).unwrap();
        let mut output = vec![Some(0.0); 25];
        assert_eq!(kama_into(&data, 6, &mut output).unwrap(), 19);
        assert_eq!(output, expected);
    }
}
