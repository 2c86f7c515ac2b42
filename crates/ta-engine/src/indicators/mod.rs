//! Technical analysis indicators.
//!
//! # Overview
//!
//! All indicators in this module share the following properties:
//!
//! - **Generic**: Work with both `f32` and `f64` types via the
//!   [`SeriesElement`](crate::traits::SeriesElement) trait
//! - **Efficient**: O(n) time complexity using rolling sums and O(1) recurrences
//! - **Aligned**: Every output has the input's length; the warm-up region is
//!   `None`, distinct from `Some(0.0)` and `Some(NaN)`
//! - **Error-safe**: Return typed errors for empty input, bad parameters,
//!   mismatched parallel series and short input
//!
//! Every kernel comes as `name` (allocating) and `name_into` (pre-allocated
//! buffer, returns the number of defined samples), together with
//! `name_lookback` and `name_min_len`.
//!
//! # Indicator Categories
//!
//! ## Moving Averages
//!
//! - [`sma`], [`ema`], [`wma`], [`dema`], [`tema`], [`trima`], [`kama`], [`t3`]
//! - [`ma`] - dispatch over [`MaType`]
//!
//! ## Momentum Indicators
//!
//! - [`rsi`] - Relative Strength Index
//! - [`macd`] - MACD on EMAs
//! - [`macd_ext`] - MACD with a moving-average kind per line
//!
//! ## Volatility Indicators
//!
//! - [`true_range`], [`atr`] - True Range and its Wilder average
//! - [`rolling_stddev`] - population standard deviation of a trailing window
//! - [`bbands`] - Bollinger Bands
//!
//! ## Volume Indicators
//!
//! - [`ad`] - Chaikin Accumulation/Distribution Line
//! - [`obv`] - On-Balance Volume
//!
//! # Example
//!
//! ```
//! use ta_engine::indicators::{ema, rsi, sma};
//!
//! let prices = vec![44.0_f64, 44.5, 43.5, 44.5, 44.0, 43.0, 42.5, 43.5, 44.5, 45.0];
//!
//! let sma_result = sma(&prices, 5).unwrap();
//! let ema_result = ema(&prices, 5).unwrap();
//! let rsi_result = rsi(&prices, 5).unwrap();
//!
//! assert_eq!(sma_result[4], ema_result[4]);
//! assert!(rsi_result[4].is_none());
//! ```

pub mod ad;
pub mod atr;
pub mod bollinger;
pub mod dema;
pub mod ema;
pub mod kama;
pub mod ma_type;
pub mod macd;
pub mod obv;
pub mod rsi;
pub mod sma;
pub mod t3;
pub mod tema;
pub mod trima;
pub mod wma;

// Re-export indicator functions for convenient access, e.g.
// `use ta_engine::indicators::sma;`

pub use ad::{ad, ad_into, ad_lookback, ad_min_len};
pub use atr::{
    atr, atr_into, atr_lookback, atr_min_len, true_range, true_range_into, true_range_lookback,
    true_range_min_len, Atr,
};
pub use bollinger::{
    bbands, bbands_into, bbands_lookback, bbands_min_len, rolling_stddev, rolling_stddev_into,
    rolling_stddev_lookback, rolling_stddev_min_len, Bbands, BbandsOutput,
};
pub use dema::{dema, dema_into, dema_lookback, dema_min_len};
pub use ema::{
    ema, ema_into, ema_lookback, ema_min_len, ema_wilder, ema_wilder_into, ema_with_alpha,
    ema_with_alpha_into, Ema,
};
pub use kama::{kama, kama_full, kama_full_into, kama_into, kama_lookback, kama_min_len};
pub use ma_type::{ma, ma_into, ma_lookback, ma_min_len, Ma, MaType};
pub use macd::{
    macd, macd_ext, macd_ext_into, macd_ext_line_lookback, macd_ext_lookback, macd_ext_min_len,
    macd_into, macd_line_lookback, macd_lookback, macd_min_len, Macd, MacdExt, MacdOutput,
};
pub use obv::{obv, obv_into, obv_lookback, obv_min_len};
pub use rsi::{rsi, rsi_into, rsi_lookback, rsi_min_len, Rsi};
pub use sma::{sma, sma_into, sma_lookback, sma_min_len, Sma};
pub use t3::{t3, t3_full, t3_full_into, t3_into, t3_lookback, t3_min_len};
pub use tema::{tema, tema_into, tema_lookback, tema_min_len};
pub use trima::{trima, trima_into, trima_lookback, trima_min_len};
pub use wma::{wma, wma_into, wma_lookback, wma_min_len};
