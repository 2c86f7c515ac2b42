//! Commonly used types and traits for convenient importing.
//!
//! # Usage
//!
//! ```
//! use ta_engine::prelude::*;
//!
//! let prices = vec![1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
//!
//! let sma_result = sma(&prices, 3).unwrap();
//! let ema_result = ema(&prices, 3).unwrap();
//! let rsi_result = rsi(&prices, 5).unwrap();
//! let bands = Bbands::new().period(4).kind(MaType::Wma).compute(&prices).unwrap();
//!
//! assert_eq!(sma_result[2], ema_result[2]);
//! assert_eq!(rsi_result[5], Some(100.0));
//! assert!(bands.middle[3].is_some());
//! ```
//!
//! # Contents
//!
//! - [`Error`] and [`Result`]
//! - [`SeriesElement`] and [`ValidatedInput`]
//! - every indicator function with its `_into` variant
//! - the multi-output types [`MacdOutput`] and [`BbandsOutput`]
//! - the parameter structs and [`MaType`]
//! - every `*_lookback()` and `*_min_len()` function
//! - [`BatchProcessor`]

// Error types
pub use crate::error::{Error, Result};

// Traits
pub use crate::traits::{SeriesElement, ValidatedInput};

// Indicator functions (simple API)
pub use crate::indicators::{
    ad, atr, bbands, dema, ema, ema_wilder, ema_with_alpha, kama, kama_full, ma, macd, macd_ext,
    obv, rolling_stddev, rsi, sma, t3, t3_full, tema, trima, true_range, wma,
};

// Indicator functions (_into API for pre-allocated buffers)
pub use crate::indicators::{
    ad_into, atr_into, bbands_into, dema_into, ema_into, ema_wilder_into, ema_with_alpha_into,
    kama_full_into, kama_into, ma_into, macd_ext_into, macd_into, obv_into, rolling_stddev_into,
    rsi_into, sma_into, t3_full_into, t3_into, tema_into, trima_into, true_range_into, wma_into,
};

// Multi-output types
pub use crate::indicators::{BbandsOutput, MacdOutput};

// Configuration types
pub use crate::indicators::{Atr, Bbands, Ema, Ma, MaType, Macd, MacdExt, Rsi, Sma};

// Lookback functions
pub use crate::indicators::{
    ad_lookback, ad_min_len, atr_lookback, atr_min_len, bbands_lookback, bbands_min_len,
    dema_lookback, dema_min_len, ema_lookback, ema_min_len, kama_lookback, kama_min_len,
    ma_lookback, ma_min_len, macd_ext_lookback, macd_ext_min_len, macd_line_lookback,
    macd_lookback, macd_min_len, obv_lookback, obv_min_len, rolling_stddev_lookback,
    rolling_stddev_min_len, rsi_lookback, rsi_min_len, sma_lookback, sma_min_len, t3_lookback,
    t3_min_len, tema_lookback, tema_min_len, trima_lookback, trima_min_len, true_range_lookback,
    true_range_min_len, wma_lookback, wma_min_len,
};

// Batch processing
pub use crate::batch::BatchProcessor;
