//! Moving-average kind selector and the shared `ma` dispatch.
//!
//! Composite indicators (Bollinger Bands, MACDEXT) never call a specific
//! average directly; they go through [`ma`] with a [`MaType`], so any kind
//! can be substituted.
//!
//! # Kinds
//!
//! | kind    | code | lookback          |
//! |---------|------|-------------------|
//! | `Sma`   | 0    | `p - 1`           |
//! | `Ema`   | 1    | `p - 1`           |
//! | `Wma`   | 2    | `p - 1`           |
//! | `Dema`  | 3    | `2 × (p - 1)`     |
//! | `Tema`  | 4    | `3 × (p - 1)`     |
//! | `Trima` | 5    | `p - 1`           |
//! | `Kama`  | 6    | `p`               |
//! | `Mama`  | 7    | not implemented   |
//! | `T3`    | 8    | `6 × (p - 1)`     |
//!
//! # Example
//!
//! ```
//! use ta_engine::indicators::ma_type::{ma, MaType};
//!
//! let data: Vec<f64> = (1..=10).map(f64::from).collect();
//! let sma = ma(&data, 5, MaType::Sma).unwrap();
//! assert_eq!(sma[4], Some(3.0));
//!
//! let kind: MaType = "ema".parse().unwrap();
//! assert_eq!(kind.code(), 1);
//! assert!(ma(&data, 5, MaType::Mama).is_err());
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::indicators::{dema, ema, kama, sma, t3, tema, trima, wma};
use crate::traits::{reject, validate_period, SeriesElement};

/// Moving-average kind, with stable integer codes 0..=8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "UPPERCASE")
)]
pub enum MaType {
    /// Simple moving average.
    #[default]
    Sma,
    /// Exponential moving average, SMA-seeded.
    Ema,
    /// Linearly weighted moving average.
    Wma,
    /// Double exponential moving average.
    Dema,
    /// Triple exponential moving average.
    Tema,
    /// Triangular moving average.
    Trima,
    /// Kaufman adaptive moving average.
    Kama,
    /// MESA adaptive moving average. Selectable, but has no kernel.
    Mama,
    /// Tillson T3 moving average.
    T3,
}

impl MaType {
    /// Every kind, in code order.
    pub const ALL: [Self; 9] = [
        Self::Sma,
        Self::Ema,
        Self::Wma,
        Self::Dema,
        Self::Tema,
        Self::Trima,
        Self::Kama,
        Self::Mama,
        Self::T3,
    ];

    /// Returns the stable integer code (`Sma` = 0 … `T3` = 8).
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Sma => 0,
            Self::Ema => 1,
            Self::Wma => 2,
            Self::Dema => 3,
            Self::Tema => 4,
            Self::Trima => 5,
            Self::Kama => 6,
            Self::Mama => 7,
            Self::T3 => 8,
        }
    }

    /// Returns the short upper-case name, e.g. `"TRIMA"`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sma => "SMA",
            Self::Ema => "EMA",
            Self::Wma => "WMA",
            Self::Dema => "DEMA",
            Self::Tema => "TEMA",
            Self::Trima => "TRIMA",
            Self::Kama => "KAMA",
            Self::Mama => "MAMA",
            Self::T3 => "T3",
        }
    }

    /// Returns true if [`ma`] has a kernel for this kind.
    #[must_use]
    pub const fn is_implemented(self) -> bool {
        !matches!(self, Self::Mama)
    }
}

impl fmt::Display for MaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<i32> for MaType {
    type Error = Error;

    fn try_from(code: i32) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.code() == code)
            .ok_or_else(|| {
                reject(Error::InvalidParameter {
                    indicator: "ma",
                    parameter: "ma_type",
                    reason: "moving average code must be in 0..=8",
                })
            })
    }
}

impl FromStr for MaType {
    type Err = Error;

    /// Parses a short name, case-insensitively.
    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                reject(Error::InvalidParameter {
                    indicator: "ma",
                    parameter: "ma_type",
                    reason: "unknown moving average name",
                })
            })
    }
}

/// Returns the lookback of `kind` for `period`.
///
/// `Mama` has no kernel and reports 0.
#[inline]
#[must_use]
pub const fn ma_lookback(period: usize, kind: MaType) -> usize {
    match kind {
        MaType::Sma => sma::sma_lookback(period),
        MaType::Ema => ema::ema_lookback(period),
        MaType::Wma => wma::wma_lookback(period),
        MaType::Dema => dema::dema_lookback(period),
        MaType::Tema => tema::tema_lookback(period),
        MaType::Trima => trima::trima_lookback(period),
        MaType::Kama => kama::kama_lookback(period),
        MaType::T3 => t3::t3_lookback(period),
        MaType::Mama => 0,
    }
}

/// Returns the minimum input length of `kind` for `period`.
#[inline]
#[must_use]
pub const fn ma_min_len(period: usize, kind: MaType) -> usize {
    match kind {
        MaType::Sma => sma::sma_min_len(period),
        MaType::Ema => ema::ema_min_len(period),
        MaType::Wma => wma::wma_min_len(period),
        MaType::Dema => dema::dema_min_len(period),
        MaType::Tema => tema::tema_min_len(period),
        MaType::Trima => trima::trima_min_len(period),
        MaType::Kama => kama::kama_min_len(period),
        MaType::T3 => t3::t3_min_len(period),
        MaType::Mama => 1,
    }
}

/// Rejects kinds without a kernel.
///
/// # Errors
///
/// Returns `Error::NotImplemented` for [`MaType::Mama`].
pub fn ensure_implemented(kind: MaType) -> Result<()> {
    if kind.is_implemented() {
        Ok(())
    } else {
        Err(reject(Error::NotImplemented {
            feature: "MESA adaptive moving average (MAMA)",
        }))
    }
}

/// Computes the moving average of `kind` over `data`.
///
/// # Errors
///
/// - `Error::InvalidParameter` if `period` is zero
/// - `Error::NotImplemented` for [`MaType::Mama`]
/// - `Error::InvalidInput` if `data` is empty
/// - `Error::InsufficientData` if `data` is shorter than [`ma_min_len`]
#[must_use = "this returns a Result with the moving average values, which should be used"]
pub fn ma<T: SeriesElement>(data: &[T], period: usize, kind: MaType) -> Result<Vec<Option<T>>> {
    let mut output = vec![None; data.len()];
    ma_into(data, period, kind, &mut output)?;
    Ok(output)
}

/// Computes the moving average of `kind` into a pre-allocated buffer.
///
/// # Errors
///
/// As [`ma`], plus `Error::BufferTooSmall`.
#[must_use = "this returns a Result with the count of defined values"]
pub fn ma_into<T: SeriesElement>(
    data: &[T],
    period: usize,
    kind: MaType,
    output: &mut [Option<T>],
) -> Result<usize> {
    validate_period(period, "period", "ma")?;
    ensure_implemented(kind)?;
    tracing::trace!(%kind, period, len = data.len(), "moving average dispatch");

    match kind {
        MaType::Sma => sma::sma_into(data, period, output),
        MaType::Ema => ema::ema_into(data, period, output),
        MaType::Wma => wma::wma_into(data, period, output),
        MaType::Dema => dema::dema_into(data, period, output),
        MaType::Tema => tema::tema_into(data, period, output),
        MaType::Trima => trima::trima_into(data, period, output),
        MaType::Kama => kama::kama_into(data, period, output),
        MaType::T3 => t3::t3_into(data, period, output),
        MaType::Mama => Err(Error::NotImplemented {
            feature: "MESA adaptive moving average (MAMA)",
        }),
    }
}

/// Dense moving average: only the defined values, in order.
///
/// Used to chain an average over the defined region of another series.
pub(crate) fn ma_values<T: SeriesElement>(
    data: &[T],
    period: usize,
    kind: MaType,
) -> Result<Vec<T>> {
    Ok(ma(data, period, kind)?.into_iter().flatten().collect())
}

// ==================== Configuration Type ====================

/// Generic moving average configuration.
///
/// # Example
///
/// ```
/// use ta_engine::indicators::ma_type::{Ma, MaType};
///
/// let prices: Vec<f64> = (0..40).map(f64::from).collect();
///
/// // Defaults: period 30, SMA
/// let result = Ma::default().compute(&prices).unwrap();
/// assert_eq!(result[29], Some(14.5));
///
/// let result = Ma::new().period(3).kind(MaType::Wma).compute(&prices).unwrap();
/// assert!(result[2].is_some());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Ma {
    period: usize,
    kind: MaType,
}

impl Default for Ma {
    /// Period 30, [`MaType::Sma`].
    fn default() -> Self {
        Self {
            period: 30,
            kind: MaType::Sma,
        }
    }
}

impl Ma {
    /// Creates a configuration with the defaults (30, `Sma`).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the averaging period.
    ///
    /// Legal range: ≥ 1. Default: 30
    #[must_use]
    pub const fn period(mut self, period: usize) -> Self {
        self.period = period;
        self
    }

    /// Sets the moving-average kind.
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
    /// `Error::InvalidParameter` for a zero period, `Error::NotImplemented`
    /// for [`MaType::Mama`].
    pub fn validate(&self) -> Result<()> {
        validate_period(self.period, "period", "ma")?;
        ensure_implemented(self.kind)
    }

    /// Computes the configured moving average.
    ///
    /// # Errors
    ///
    /// See [`ma`].
    pub fn compute<T: SeriesElement>(&self, data: &[T]) -> Result<Vec<Option<T>>> {
        ma(data, self.period, self.kind)
    }

    /// Computes the configured moving average into a pre-allocated buffer.
    ///
    /// # Errors
    ///
    /// See [`ma_into`].
    pub fn compute_into<T: SeriesElement>(
        &self,
        data: &[T],
        output: &mut [Option<T>],
    ) -> Result<usize> {
        ma_into(data, self.period, self.kind, output)
    }

    /// Returns the period.
    #[must_use]
    pub const fn get_period(&self) -> usize {
        self.period
    }

    /// Returns the moving-average kind.
    #[must_use]
    pub const fn get_kind(&self) -> MaType {
        self.kind
    }

    /// Returns the lookback for this configuration.
    #[must_use]
    pub const fn lookback(&self) -> usize {
        ma_lookback(self.period, self.kind)
    }

    /// Returns the minimum input length for this configuration.
    #[must_use]
    pub const fn min_len(&self) -> usize {
        ma_min_len(self.period, self.kind)
    }
}
