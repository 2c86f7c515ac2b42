//! Bollinger Bands and rolling standard deviation.
//!
//! Bollinger Bands are a volatility indicator consisting of three bands:
//! - **Middle Band**: A moving average of the selected kind (SMA by default)
//! - **Upper Band**: Middle band + (`nb_dev_up` × standard deviation)
//! - **Lower Band**: Middle band - (`nb_dev_dn` × standard deviation)
//!
//! # Algorithm
//!
//! The standard deviation is the population (÷n) deviation of the trailing
//! `period` window, maintained with Welford's add/remove update of the mean
//! and the sum of squared deviations `M2`
//! (see [`RollingWindow`](crate::kernels::RollingWindow)), so the cost is
//! O(n) for any period.
//!
//! ```text
//! Variance = M2 / n
//! StdDev   = √Variance
//! ```
//!
//! Rounding can push the variance a hair below zero for flat windows; it is
//! clamped to zero.
//!
//! # Alignment
//!
//! Every band is unavailable wherever the middle band is, and the standard
//! deviation needs `period` samples, so the lookback is
//! `max(ma_lookback(period, kind), period - 1)`.
//!
//! # Example
//!
//! ```
//! use ta_engine::indicators::bollinger::bbands;
//! use ta_engine::indicators::ma_type::MaType;
//!
//! let data: Vec<f64> = (0..50).map(|x| 100.0 + (x as f64 * 0.1)).collect();
//! let result = bbands(&data, 20, 2.0, 2.0, MaType::Sma).unwrap();
//!
//! assert!(result.middle[18].is_none());
//! let (upper, middle, lower) = (
//!     result.upper[19].unwrap(),
//!     result.middle[19].unwrap(),
//!     result.lower[19].unwrap(),
//! );
//! assert!(lower < middle && middle < upper);
//! ```

use crate::error::Result;
use crate::indicators::ma_type::{ensure_implemented, ma_into, ma_lookback, ma_min_len, MaType};
use crate::kernels::RollingWindow;
use crate::traits::{
    validate_indicator_input, validate_multiplier, validate_output_buffer, validate_period,
    SeriesElement, ValidatedInput,
};

/// Returns the lookback for the rolling standard deviation: `period - 1`.
#[inline]
#[must_use]
pub const fn rolling_stddev_lookback(period: usize) -> usize {
    if period == 0 {
        0
    } else {
        period - 1
    }
}

/// Returns the minimum input length for the rolling standard deviation: `period`.
#[inline]
#[must_use]
pub const fn rolling_stddev_min_len(period: usize) -> usize {
    period
}

/// Computes the rolling population standard deviation scaled by `nb_dev`.
///
/// # Errors
///
/// - `Error::InvalidParameter` if `period` is zero or `nb_dev` is negative or non-finite
/// - `Error::InvalidInput` if `data` is empty
/// - `Error::InsufficientData` if `data` is shorter than `period`
///
/// # Example
///
/// ```
/// use ta_engine::indicators::bollinger::rolling_stddev;
///
/// let data = vec![2.0_f64, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
/// let result = rolling_stddev(&data, 8, 1.0).unwrap();
///
/// assert!((result[7].unwrap() - 2.0).abs() < 1e-12);
/// ```
#[must_use = "this returns a Result with the standard deviation values, which should be used"]
pub fn rolling_stddev<T: SeriesElement>(
    data: &[T],
    period: usize,
    nb_dev: f64,
) -> Result<Vec<Option<T>>> {
    let mut output = vec![None; data.len()];
    rolling_stddev_into(data, period, nb_dev, &mut output)?;
    Ok(output)
}

/// Computes the scaled rolling standard deviation into a pre-allocated buffer.
///
/// # Errors
///
/// As [`rolling_stddev`], plus `Error::BufferTooSmall`.
#[must_use = "this returns a Result with the count of defined values"]
pub fn rolling_stddev_into<T: SeriesElement>(
    data: &[T],
    period: usize,
    nb_dev: f64,
    output: &mut [Option<T>],
) -> Result<usize> {
    validate_period(period, "period", "stddev")?;
    validate_multiplier(nb_dev, "nb_dev", "stddev")?;
    validate_indicator_input(data, period, "period", rolling_stddev_min_len(period), "stddev")?;
    validate_output_buffer(output, data.len(), "stddev")?;

    let nb_dev = T::from_f64(nb_dev)?;
    let lookback = rolling_stddev_lookback(period);
    for slot in output.iter_mut().take(lookback) {
        *slot = None;
    }
    stddev_windows(data, period, |i, sd| output[i] = Some(sd * nb_dev))?;

    Ok(data.len() - lookback)
}

/// Walks every full window and hands `(index, population stddev)` to `emit`.
fn stddev_windows<T: SeriesElement>(
    data: &[T],
    period: usize,
    mut emit: impl FnMut(usize, T),
) -> Result<()> {
    let period_t = T::from_usize(period)?;
    let mut window = RollingWindow::new();
    for i in 0..data.len() {
        window.advance(data, i, period);
        if i + 1 >= period {
            emit(i, window.variance(period_t).sqrt());
        }
    }
    Ok(())
}

/// Returns the lookback for Bollinger Bands.
///
/// # Example
///
/// ```
/// use ta_engine::indicators::bollinger::bbands_lookback;
/// use ta_engine::indicators::ma_type::MaType;
///
/// assert_eq!(bbands_lookback(20, MaType::Sma), 19);
/// assert_eq!(bbands_lookback(5, MaType::Dema), 8);
/// ```
#[inline]
#[must_use]
pub const fn bbands_lookback(period: usize, kind: MaType) -> usize {
    let ma = ma_lookback(period, kind);
    let sd = rolling_stddev_lookback(period);
    if ma > sd {
        ma
    } else {
        sd
    }
}

/// Returns the minimum input length for Bollinger Bands.
#[inline]
#[must_use]
pub const fn bbands_min_len(period: usize, kind: MaType) -> usize {
    let ma = ma_min_len(period, kind);
    let sd = rolling_stddev_min_len(period);
    if ma > sd {
        ma
    } else {
        sd
    }
}

/// Output structure containing all three Bollinger Bands.
///
/// Each vector has the same length as the input data.
#[derive(Debug, Clone, PartialEq)]
pub struct BbandsOutput<T> {
    /// The upper band (middle + `nb_dev_up` × stddev).
    pub upper: Vec<Option<T>>,
    /// The middle band (moving average).
    pub middle: Vec<Option<T>>,
    /// The lower band (middle - `nb_dev_dn` × stddev).
    pub lower: Vec<Option<T>>,
}

impl<T> BbandsOutput<T> {
    /// Creates an output with all three bands unavailable.
    #[must_use]
    pub fn with_len(len: usize) -> Self {
        Self {
            upper: std::iter::repeat_with(|| None).take(len).collect(),
            middle: std::iter::repeat_with(|| None).take(len).collect(),
            lower: std::iter::repeat_with(|| None).take(len).collect(),
        }
    }

    /// Returns the length of the output vectors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.middle.len()
    }

    /// Returns true if the output vectors are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.middle.is_empty()
    }
}

/// Computes Bollinger Bands.
///
/// # Errors
///
/// - `Error::InvalidParameter` if `period` is zero or a multiplier is negative or non-finite
/// - `Error::NotImplemented` for [`MaType::Mama`]
/// - `Error::InvalidInput` if `data` is empty
/// - `Error::InsufficientData` if `data` is shorter than [`bbands_min_len`]
#[must_use = "this returns a Result with Bollinger Bands values, which should be used"]
pub fn bbands<T: SeriesElement>(
    data: &[T],
    period: usize,
    nb_dev_up: f64,
    nb_dev_dn: f64,
    kind: MaType,
) -> Result<BbandsOutput<T>> {
    let mut output = BbandsOutput::with_len(data.len());
    bbands_into(data, period, nb_dev_up, nb_dev_dn, kind, &mut output)?;
    Ok(output)
}

/// Computes Bollinger Bands into a pre-allocated output structure.
///
/// Returns the number of defined samples per band.
///
/// # Errors
///
/// As [`bbands`], plus `Error::BufferTooSmall` if any band is shorter than `data`.
///
/// # Example
///
/// ```
/// use ta_engine::indicators::bollinger::{bbands_into, BbandsOutput};
/// use ta_engine::indicators::ma_type::MaType;
///
/// let data = vec![20.0_f64, 21.0, 22.0, 21.5, 22.5];
/// let mut output = BbandsOutput::with_len(5);
/// let defined = bbands_into(&data, 3, 2.0, 2.0, MaType::Sma, &mut output).unwrap();
///
/// assert_eq!(defined, 3);
/// assert_eq!(output.middle[2], Some(21.0));
/// ```
#[must_use = "this returns a Result with the count of defined values"]
pub fn bbands_into<T: SeriesElement>(
    data: &[T],
    period: usize,
    nb_dev_up: f64,
    nb_dev_dn: f64,
    kind: MaType,
    output: &mut BbandsOutput<T>,
) -> Result<usize> {
    validate_bbands_params(period, nb_dev_up, nb_dev_dn, kind)?;
    data.validate_not_empty("bbands")?;
    data.validate_min_length(bbands_min_len(period, kind), "bbands")?;
    let n = data.len();
    validate_output_buffer(&output.upper, n, "bbands")?;
    validate_output_buffer(&output.middle, n, "bbands")?;
    validate_output_buffer(&output.lower, n, "bbands")?;

    let up = T::from_f64(nb_dev_up)?;
    let dn = T::from_f64(nb_dev_dn)?;

    ma_into(data, period, kind, &mut output.middle)?;

    let lookback = bbands_lookback(period, kind);
    let BbandsOutput {
        upper,
        middle,
        lower,
    } = output;
    for band in [&mut *upper, &mut *middle, &mut *lower] {
        for slot in band.iter_mut().take(lookback) {
            *slot = None;
        }
    }

    stddev_windows(data, period, |i, sd| {
        if i < lookback {
            return;
        }
        if let Some(mid) = middle[i] {
            upper[i] = Some(mid + up * sd);
            lower[i] = Some(mid - dn * sd);
        }
    })?;

    Ok(n - lookback)
}

fn validate_bbands_params(
    period: usize,
    nb_dev_up: f64,
    nb_dev_dn: f64,
    kind: MaType,
) -> Result<()> {
    validate_period(period, "period", "bbands")?;
    validate_multiplier(nb_dev_up, "nb_dev_up", "bbands")?;
    validate_multiplier(nb_dev_dn, "nb_dev_dn", "bbands")?;
    ensure_implemented(kind)
}

// ==================== Configuration Type ====================

/// Bollinger Bands configuration with fluent builder API.
///
/// # Example
///
/// ```
/// use ta_engine::indicators::bollinger::Bbands;
/// use ta_engine::indicators::ma_type::MaType;
///
/// let prices: Vec<f64> = (0..30).map(|i| 50.0 + f64::from(i % 5)).collect();
///
/// // Defaults: period 5, 2.0 / 2.0, SMA
/// let result = Bbands::default().compute(&prices).unwrap();
/// assert!(result.upper[4].is_some());
///
/// let ema_bands = Bbands::new().period(10).nb_dev_up(1.5).kind(MaType::Ema);
/// assert_eq!(ema_bands.lookback(), 9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Bbands {
    period: usize,
    nb_dev_up: f64,
    nb_dev_dn: f64,
    kind: MaType,
}

impl Default for Bbands {
    /// Period 5, 2.0 deviations on each side, SMA middle band.
    fn default() -> Self {
        Self {
            period: 5,
            nb_dev_up: 2.0,
            nb_dev_dn: 2.0,
            kind: MaType::Sma,
        }
    }
}

impl Bbands {
    /// Creates a configuration with the default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the window period.
    ///
    /// Legal range: ≥ 1. Default: 5
    #[must_use]
    pub const fn period(mut self, period: usize) -> Self {
        self.period = period;
        self
    }

    /// Sets the upper band multiplier.
    ///
    /// Legal range: finite, ≥ 0. Default: 2.0
    #[must_use]
    pub const fn nb_dev_up(mut self, nb_dev: f64) -> Self {
        self.nb_dev_up = nb_dev;
        self
    }

    /// Sets the lower band multiplier.
    ///
    /// Legal range: finite, ≥ 0. Default: 2.0
    #[must_use]
    pub const fn nb_dev_dn(mut self, nb_dev: f64) -> Self {
        self.nb_dev_dn = nb_dev;
        self
    }

    /// Sets the middle band moving-average kind.
    ///
    /// Default: [`MaType::Sma`]
    #[must_use]
    pub const fn kind(mut self, kind: MaType) -> Self {
        self.kind = kind;
        self
    }

    /// Checks the parameters without touching any data.
    ///
    /// # Errors
    ///
    /// `Error::InvalidParameter` for a zero period or a bad multiplier;
    /// `Error::NotImplemented` for [`MaType::Mama`].
    pub fn validate(&self) -> Result<()> {
        validate_bbands_params(self.period, self.nb_dev_up, self.nb_dev_dn, self.kind)
    }

    /// Computes Bollinger Bands using the configured parameters.
    ///
    /// # Errors
    ///
    /// See [`bbands`].
    pub fn compute<T: SeriesElement>(&self, data: &[T]) -> Result<BbandsOutput<T>> {
        bbands(data, self.period, self.nb_dev_up, self.nb_dev_dn, self.kind)
    }

    /// Computes Bollinger Bands into a pre-allocated output structure.
    ///
    /// # Errors
    ///
    /// See [`bbands_into`].
    pub fn compute_into<T: SeriesElement>(
        &self,
        data: &[T],
        output: &mut BbandsOutput<T>,
    ) -> Result<usize> {
        bbands_into(
            data,
            self.period,
            self.nb_dev_up,
            self.nb_dev_dn,
            self.kind,
            output,
        )
    }

    /// Returns the period.
    #[must_use]
    pub const fn get_period(&self) -> usize {
        self.period
    }

    /// Returns the upper band multiplier.
    #[must_use]
    pub const fn get_nb_dev_up(&self) -> f64 {
        self.nb_dev_up
    }

    /// Returns the lower band multiplier.
    #[must_use]
    pub const fn get_nb_dev_dn(&self) -> f64 {
        self.nb_dev_dn
    }

    /// Returns the middle band kind.
    #[must_use]
    pub const fn get_kind(&self) -> MaType {
        self.kind
    }

    /// Returns the lookback for this configuration.
    #[must_use]
    pub const fn lookback(&self) -> usize {
        bbands_lookback(self.period, self.kind)
    }

    /// Returns the minimum input length for this configuration.
    #[must_use]
    pub const fn min_len(&self) -> usize {
        bbands_min_len(self.period, self.kind)
    }
}
