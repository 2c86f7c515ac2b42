//! Moving Average Convergence Divergence (MACD) indicator.
//!
//! The MACD is a trend-following momentum indicator that shows the relationship
//! between two moving averages of a price series. It consists of three
//! components:
//!
//! - **MACD Line**: The difference between the fast and the slow average
//! - **Signal Line**: An average of the MACD line (typically 9-period)
//! - **Histogram**: The difference between the MACD line and signal line
//!
//! [`macd`] uses SMA-seeded EMAs for all three averages. [`macd_ext`] takes a
//! [`MaType`] per line; with every kind set to [`MaType::Ema`] it produces
//! exactly the output of [`macd`].
//!
//! # Formula
//!
//! ```text
//! MACD Line[i]   = MA(fast)[i] - MA(slow)[i]
//! Signal Line    = MA(signal) over the defined region of the MACD line
//! Histogram[i]   = MACD Line[i] - Signal Line[i]
//! ```
//!
//! # Alignment
//!
//! For [`macd`]:
//! - MACD Line: first `slow_period - 1` values are unavailable
//! - Signal Line and Histogram: first `slow_period + signal_period - 2` values
//!   are unavailable
//!
//! # Example
//!
//! ```
//! use ta_engine::indicators::macd::macd;
//!
//! let data: Vec<f64> = (0..40).map(|i| 100.0 + (i as f64 * 0.3).sin() * 5.0).collect();
//!
//! let result = macd(&data, 12, 26, 9).unwrap();
//!
//! assert!(result.macd_line[24].is_none());
//! assert!(result.macd_line[25].is_some());
//! assert!(result.signal_line[32].is_none());
//! assert!(result.histogram[33].is_some());
//! ```

use crate::error::{Error, Result};
use crate::indicators::ma_type::{ensure_implemented, ma_lookback, ma_min_len, ma_values, MaType};
use crate::traits::{reject, validate_output_buffer, validate_period, SeriesElement, ValidatedInput};

/// Default fast period.
pub const MACD_FAST_PERIOD: usize = 12;

/// Default slow period.
pub const MACD_SLOW_PERIOD: usize = 26;

/// Default signal period.
pub const MACD_SIGNAL_PERIOD: usize = 9;

/// The output of a MACD calculation containing all three components.
#[derive(Debug, Clone, PartialEq)]
pub struct MacdOutput<T> {
    /// The MACD line (fast average - slow average).
    pub macd_line: Vec<Option<T>>,

    /// The signal line (average of the MACD line).
    pub signal_line: Vec<Option<T>>,

    /// The histogram (MACD line - signal line).
    pub histogram: Vec<Option<T>>,
}

impl<T> MacdOutput<T> {
    /// Returns the length of the output vectors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.macd_line.len()
    }

    /// Returns true if the output vectors are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.macd_line.is_empty()
    }
}

/// Returns the lookback of the MACD line: `slow_period - 1`.
#[inline]
#[must_use]
pub const fn macd_line_lookback(slow_period: usize) -> usize {
    ma_lookback(slow_period, MaType::Ema)
}

/// Returns the lookback of the signal line and histogram:
/// `slow_period + signal_period - 2`.
///
/// # Example
///
/// ```
/// use ta_engine::indicators::macd::macd_lookback;
///
/// assert_eq!(macd_lookback(12, 26, 9), 33);
/// ```
#[inline]
#[must_use]
pub const fn macd_lookback(fast_period: usize, slow_period: usize, signal_period: usize) -> usize {
    macd_ext_lookback(
        fast_period,
        MaType::Ema,
        slow_period,
        MaType::Ema,
        signal_period,
        MaType::Ema,
    )
}

/// Returns the minimum input length for MACD: `slow_period + signal_period - 1`.
#[inline]
#[must_use]
pub const fn macd_min_len(fast_period: usize, slow_period: usize, signal_period: usize) -> usize {
    macd_ext_min_len(
        fast_period,
        MaType::Ema,
        slow_period,
        MaType::Ema,
        signal_period,
        MaType::Ema,
    )
}

/// Returns the lookback of the MACDEXT line: the larger of the two component
/// lookbacks.
#[inline]
#[must_use]
pub const fn macd_ext_line_lookback(
    fast_period: usize,
    fast_kind: MaType,
    slow_period: usize,
    slow_kind: MaType,
) -> usize {
    let fast = ma_lookback(fast_period, fast_kind);
    let slow = ma_lookback(slow_period, slow_kind);
    if fast > slow {
        fast
    } else {
        slow
    }
}

/// Returns the lookback of the MACDEXT signal line and histogram.
#[inline]
#[must_use]
pub const fn macd_ext_lookback(
    fast_period: usize,
    fast_kind: MaType,
    slow_period: usize,
    slow_kind: MaType,
    signal_period: usize,
    signal_kind: MaType,
) -> usize {
    macd_ext_line_lookback(fast_period, fast_kind, slow_period, slow_kind)
        .saturating_add(ma_lookback(signal_period, signal_kind))
}

/// Returns the minimum input length for MACDEXT.
#[inline]
#[must_use]
pub const fn macd_ext_min_len(
    fast_period: usize,
    fast_kind: MaType,
    slow_period: usize,
    slow_kind: MaType,
    signal_period: usize,
    signal_kind: MaType,
) -> usize {
    macd_ext_line_lookback(fast_period, fast_kind, slow_period, slow_kind)
        .saturating_add(ma_min_len(signal_period, signal_kind))
}

/// Computes the Moving Average Convergence Divergence (MACD) indicator.
///
/// # Errors
///
/// - `Error::InvalidParameter` if any period is zero or `fast_period >= slow_period`
/// - `Error::InvalidInput` if `data` is empty
/// - `Error::InsufficientData` if `data` is shorter than `slow_period + signal_period - 1`
#[must_use = "this returns a Result with the MACD output, which should be used"]
pub fn macd<T: SeriesElement>(
    data: &[T],
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
) -> Result<MacdOutput<T>> {
    let n = data.len();
    let mut output = MacdOutput {
        macd_line: vec![None; n],
        signal_line: vec![None; n],
        histogram: vec![None; n],
    };
    macd_core(
        data,
        (fast_period, MaType::Ema),
        (slow_period, MaType::Ema),
        (signal_period, MaType::Ema),
        [
            &mut output.macd_line,
            &mut output.signal_line,
            &mut output.histogram,
        ],
        "macd",
    )?;
    Ok(output)
}

/// Computes MACD into pre-allocated output buffers.
///
/// Returns `(defined_macd_count, defined_signal_count)`; the histogram shares
/// the signal count.
///
/// # Errors
///
/// As [`macd`], plus `Error::BufferTooSmall` if any buffer is shorter than `data`.
///
/// # Example
///
/// ```
/// use ta_engine::indicators::macd::macd_into;
///
/// let data: Vec<f64> = (0..50).map(|i| 100.0 + (i as f64) * 0.5).collect();
/// let mut macd_line = vec![None; 50];
/// let mut signal_line = vec![None; 50];
/// let mut histogram = vec![None; 50];
///
/// let (defined_macd, defined_signal) = macd_into(
///     &data, 12, 26, 9,
///     &mut macd_line, &mut signal_line, &mut histogram,
/// ).unwrap();
/// assert_eq!(defined_macd, 25);
/// assert_eq!(defined_signal, 17);
/// ```
#[must_use = "this returns a Result with the defined MACD counts"]
pub fn macd_into<T: SeriesElement>(
    data: &[T],
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
    macd_output: &mut [Option<T>],
    signal_output: &mut [Option<T>],
    histogram_output: &mut [Option<T>],
) -> Result<(usize, usize)> {
    macd_core(
        data,
        (fast_period, MaType::Ema),
        (slow_period, MaType::Ema),
        (signal_period, MaType::Ema),
        [macd_output, signal_output, histogram_output],
        "macd",
    )
}

/// Computes MACD with a selectable moving-average kind per line.
///
/// # Errors
///
/// - `Error::InvalidParameter` if any period is zero or `fast_period >= slow_period`
/// - `Error::NotImplemented` if any kind is [`MaType::Mama`]
/// - `Error::InvalidInput` if `data` is empty
/// - `Error::InsufficientData` if `data` is shorter than [`macd_ext_min_len`]
///
/// # Example
///
/// ```
/// use ta_engine::indicators::ma_type::MaType;
/// use ta_engine::indicators::macd::{macd, macd_ext};
///
/// let data: Vec<f64> = (0..60).map(|i| (i as f64 * 0.2).cos() * 3.0 + 20.0).collect();
///
/// let ext = macd_ext(&data, 12, MaType::Ema, 26, MaType::Ema, 9, MaType::Ema).unwrap();
/// assert_eq!(ext, macd(&data, 12, 26, 9).unwrap());
///
/// let sma_based = macd_ext(&data, 5, MaType::Sma, 10, MaType::Sma, 3, MaType::Wma).unwrap();
/// assert!(sma_based.histogram[10].is_none());
/// assert!(sma_based.histogram[11].is_some());
/// ```
#[allow(clippy::too_many_arguments)]
#[must_use = "this returns a Result with the MACDEXT output, which should be used"]
pub fn macd_ext<T: SeriesElement>(
    data: &[T],
    fast_period: usize,
    fast_kind: MaType,
    slow_period: usize,
    slow_kind: MaType,
    signal_period: usize,
    signal_kind: MaType,
) -> Result<MacdOutput<T>> {
    let n = data.len();
    let mut output = MacdOutput {
        macd_line: vec![None; n],
        signal_line: vec![None; n],
        histogram: vec![None; n],
    };
    macd_core(
        data,
        (fast_period, fast_kind),
        (slow_period, slow_kind),
        (signal_period, signal_kind),
        [
            &mut output.macd_line,
            &mut output.signal_line,
            &mut output.histogram,
        ],
        "macdext",
    )?;
    Ok(output)
}

/// Computes MACDEXT into pre-allocated output buffers.
///
/// # Errors
///
/// As [`macd_ext`], plus `Error::BufferTooSmall`.
#[allow(clippy::too_many_arguments)]
#[must_use = "this returns a Result with the defined MACDEXT counts"]
pub fn macd_ext_into<T: SeriesElement>(
    data: &[T],
    fast_period: usize,
    fast_kind: MaType,
    slow_period: usize,
    slow_kind: MaType,
    signal_period: usize,
    signal_kind: MaType,
    macd_output: &mut [Option<T>],
    signal_output: &mut [Option<T>],
    histogram_output: &mut [Option<T>],
) -> Result<(usize, usize)> {
    macd_core(
        data,
        (fast_period, fast_kind),
        (slow_period, slow_kind),
        (signal_period, signal_kind),
        [macd_output, signal_output, histogram_output],
        "macdext",
    )
}

fn validate_macd_params(
    fast: (usize, MaType),
    slow: (usize, MaType),
    signal: (usize, MaType),
    indicator: &'static str,
) -> Result<()> {
    validate_period(fast.0, "fast_period", indicator)?;
    validate_period(slow.0, "slow_period", indicator)?;
    validate_period(signal.0, "signal_period", indicator)?;
    if fast.0 >= slow.0 {
        return Err(reject(Error::InvalidParameter {
            indicator,
            parameter: "fast_period",
            reason: "fast period must be less than slow period",
        }));
    }
    ensure_implemented(fast.1)?;
    ensure_implemented(slow.1)?;
    ensure_implemented(signal.1)?;
    Ok(())
}

fn macd_core<T: SeriesElement>(
    data: &[T],
    fast: (usize, MaType),
    slow: (usize, MaType),
    signal: (usize, MaType),
    outputs: [&mut [Option<T>]; 3],
    indicator: &'static str,
) -> Result<(usize, usize)> {
    validate_macd_params(fast, slow, signal, indicator)?;
    data.validate_not_empty(indicator)?;
    data.validate_min_length(
        macd_ext_min_len(fast.0, fast.1, slow.0, slow.1, signal.0, signal.1),
        indicator,
    )?;
    let n = data.len();
    let [macd_output, signal_output, histogram_output] = outputs;
    validate_output_buffer(macd_output, n, indicator)?;
    validate_output_buffer(signal_output, n, indicator)?;
    validate_output_buffer(histogram_output, n, indicator)?;

    let fast_lookback = ma_lookback(fast.0, fast.1);
    let slow_lookback = ma_lookback(slow.0, slow.1);
    let line_lookback = macd_ext_line_lookback(fast.0, fast.1, slow.0, slow.1);

    let fast_values = ma_values(data, fast.0, fast.1)?;
    let slow_values = ma_values(data, slow.0, slow.1)?;

    let line: Vec<T> = (line_lookback..n)
        .map(|i| fast_values[i - fast_lookback] - slow_values[i - slow_lookback])
        .collect();
    let signal_values = ma_values(&line, signal.0, signal.1)?;
    let signal_lookback = line_lookback + ma_lookback(signal.0, signal.1);

    for slot in macd_output.iter_mut().take(line_lookback) {
        *slot = None;
    }
    for (slot, &value) in macd_output[line_lookback..n].iter_mut().zip(&line) {
        *slot = Some(value);
    }

    for slot in signal_output.iter_mut().take(signal_lookback) {
        *slot = None;
    }
    for slot in histogram_output.iter_mut().take(signal_lookback) {
        *slot = None;
    }
    for (k, &sig) in signal_values.iter().enumerate() {
        let i = signal_lookback + k;
        signal_output[i] = Some(sig);
        histogram_output[i] = Some(line[i - line_lookback] - sig);
    }

    Ok((n - line_lookback, n - signal_lookback))
}

// ==================== Configuration Types ====================

/// MACD configuration with fluent builder API.
///
/// # Example
///
/// ```
/// use ta_engine::indicators::macd::Macd;
///
/// let prices: Vec<f64> = (0..60).map(|i| 50.0 + f64::from(i % 7)).collect();
///
/// // Defaults: 12 / 26 / 9
/// let result = Macd::default().compute(&prices).unwrap();
/// assert!(result.signal_line[33].is_some());
///
/// let fast = Macd::new().fast_period(3).slow_period(6).signal_period(2);
/// assert_eq!(fast.lookback(), 6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Macd {
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
}

impl Default for Macd {
    /// 12 / 26 / 9.
    fn default() -> Self {
        Self {
            fast_period: MACD_FAST_PERIOD,
            slow_period: MACD_SLOW_PERIOD,
            signal_period: MACD_SIGNAL_PERIOD,
        }
    }
}

impl Macd {
    /// Creates a configuration with the default periods.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the fast EMA period.
    ///
    /// Legal range: ≥ 1 and below the slow period. Default: 12
    #[must_use]
    pub const fn fast_period(mut self, period: usize) -> Self {
        self.fast_period = period;
        self
    }

    /// Sets the slow EMA period.
    ///
    /// Legal range: above the fast period. Default: 26
    #[must_use]
    pub const fn slow_period(mut self, period: usize) -> Self {
        self.slow_period = period;
        self
    }

    /// Sets the signal EMA period.
    ///
    /// Legal range: ≥ 1. Default: 9
    #[must_use]
    pub const fn signal_period(mut self, period: usize) -> Self {
        self.signal_period = period;
        self
    }

    /// Checks the parameters without touching any data.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidParameter` for a zero period or `fast >= slow`.
    pub fn validate(&self) -> Result<()> {
        validate_macd_params(
            (self.fast_period, MaType::Ema),
            (self.slow_period, MaType::Ema),
            (self.signal_period, MaType::Ema),
            "macd",
        )
    }

    /// Computes MACD using the configured periods.
    ///
    /// # Errors
    ///
    /// See [`macd`].
    pub fn compute<T: SeriesElement>(&self, data: &[T]) -> Result<MacdOutput<T>> {
        macd(data, self.fast_period, self.slow_period, self.signal_period)
    }

    /// Computes MACD into pre-allocated buffers.
    ///
    /// # Errors
    ///
    /// See [`macd_into`].
    pub fn compute_into<T: SeriesElement>(
        &self,
        data: &[T],
        macd_output: &mut [Option<T>],
        signal_output: &mut [Option<T>],
        histogram_output: &mut [Option<T>],
    ) -> Result<(usize, usize)> {
        macd_into(
            data,
            self.fast_period,
            self.slow_period,
            self.signal_period,
            macd_output,
            signal_output,
            histogram_output,
        )
    }

    /// Returns the fast period.
    #[must_use]
    pub const fn get_fast_period(&self) -> usize {
        self.fast_period
    }

    /// Returns the slow period.
    #[must_use]
    pub const fn get_slow_period(&self) -> usize {
        self.slow_period
    }

    /// Returns the signal period.
    #[must_use]
    pub const fn get_signal_period(&self) -> usize {
        self.signal_period
    }

    /// Returns the signal line lookback for this configuration.
    #[must_use]
    pub const fn lookback(&self) -> usize {
        macd_lookback(self.fast_period, self.slow_period, self.signal_period)
    }

    /// Returns the minimum input length for this configuration.
    #[must_use]
    pub const fn min_len(&self) -> usize {
        macd_min_len(self.fast_period, self.slow_period, self.signal_period)
    }
}

/// MACDEXT configuration: MACD with a moving-average kind per line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct MacdExt {
    fast_period: usize,
    fast_kind: MaType,
    slow_period: usize,
    slow_kind: MaType,
    signal_period: usize,
    signal_kind: MaType,
}

impl Default for MacdExt {
    /// 12 / 26 / 9, all EMA.
    fn default() -> Self {
        Self {
            fast_period: MACD_FAST_PERIOD,
            fast_kind: MaType::Ema,
            slow_period: MACD_SLOW_PERIOD,
            slow_kind: MaType::Ema,
            signal_period: MACD_SIGNAL_PERIOD,
            signal_kind: MaType::Ema,
        }
    }
}

impl MacdExt {
    /// Creates a configuration equivalent to the default [`Macd`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the fast period and moving-average kind.
    #[must_use]
    pub const fn fast(mut self, period: usize, kind: MaType) -> Self {
        self.fast_period = period;
        self.fast_kind = kind;
        self
    }

    /// Sets the slow period and moving-average kind.
    #[must_use]
    pub const fn slow(mut self, period: usize, kind: MaType) -> Self {
        self.slow_period = period;
        self.slow_kind = kind;
        self
    }

    /// Sets the signal period and moving-average kind.
    #[must_use]
    pub const fn signal(mut self, period: usize, kind: MaType) -> Self {
        self.signal_period = period;
        self.signal_kind = kind;
        self
    }

    /// Checks the parameters without touching any data.
    ///
    /// # Errors
    ///
    /// `Error::InvalidParameter` for a zero period or `fast >= slow`;
    /// `Error::NotImplemented` for [`MaType::Mama`].
    pub fn validate(&self) -> Result<()> {
        validate_macd_params(
            (self.fast_period, self.fast_kind),
            (self.slow_period, self.slow_kind),
            (self.signal_period, self.signal_kind),
            "macdext",
        )
    }

    /// Computes MACDEXT using the configured periods and kinds.
    ///
    /// # Errors
    ///
    /// See [`macd_ext`].
    pub fn compute<T: SeriesElement>(&self, data: &[T]) -> Result<MacdOutput<T>> {
        macd_ext(
            data,
            self.fast_period,
            self.fast_kind,
            self.slow_period,
            self.slow_kind,
            self.signal_period,
            self.signal_kind,
        )
    }

    /// Computes MACDEXT into pre-allocated buffers.
    ///
    /// # Errors
    ///
    /// See [`macd_ext_into`].
    pub fn compute_into<T: SeriesElement>(
        &self,
        data: &[T],
        macd_output: &mut [Option<T>],
        signal_output: &mut [Option<T>],
        histogram_output: &mut [Option<T>],
    ) -> Result<(usize, usize)> {
        macd_ext_into(
            data,
            self.fast_period,
            self.fast_kind,
            self.slow_period,
            self.slow_kind,
            self.signal_period,
            self.signal_kind,
            macd_output,
            signal_output,
            histogram_output,
        )
    }

    /// Returns the fast period and kind.
    #[must_use]
    pub const fn get_fast(&self) -> (usize, MaType) {
        (self.fast_period, self.fast_kind)
    }

    /// Returns the slow period and kind.
    #[must_use]
    pub const fn get_slow(&self) -> (usize, MaType) {
        (self.slow_period, self.slow_kind)
    }

    /// Returns the signal period and kind.
    #[must_use]
    pub const fn get_signal(&self) -> (usize, MaType) {
        (self.signal_period, self.signal_kind)
    }

    /// Returns the signal line lookback for this configuration.
    #[must_use]
    pub const fn lookback(&self) -> usize {
        macd_ext_lookback(
            self.fast_period,
            self.fast_kind,
            self.slow_period,
            self.slow_kind,
            self.signal_period,
            self.signal_kind,
        )
    }

    /// Returns the minimum input length for this configuration.
    #[must_use]
    pub const fn min_len(&self) -> usize {
        macd_ext_min_len(
            self.fast_period,
            self.fast_kind,
            self.slow_period,
            self.slow_kind,
            self.signal_period,
            self.signal_kind,
        )
    }
}
