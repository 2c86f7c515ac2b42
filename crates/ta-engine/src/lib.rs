//! ta-engine: technical analysis indicator engine
//!
//! This crate maps numeric price series plus a small parameter set to output
//! series of identical length, marking the warm-up region explicitly as
//! unavailable (`None`).
//!
//! # Features
//!
//! - **Performance**: O(n) algorithms built on rolling sums and O(1) recurrences
//! - **Generics**: Works with both `f32` and `f64` data types
//! - **Safety**: Typed errors for every malformed call, validated before computing
//! - **Batching**: Apply any kernel to many series, in parallel with the
//!   `parallel` feature
//!
//! # Quick Start
//!
//! ```
//! use ta_engine::prelude::*;
//!
//! let data: Vec<f64> = (1..=10).map(f64::from).collect();
//! let result = sma(&data, 5).unwrap();
//!
//! // First 4 values are unavailable (lookback period)
//! assert!(result[..4].iter().all(Option::is_none));
//! assert_eq!(result[4], Some(3.0));
//! assert_eq!(result[9], Some(8.0));
//! ```
//!
//! # Available Indicators
//!
//! ## Moving Averages
//! - [`indicators::sma()`], [`indicators::ema()`], [`indicators::wma()`],
//!   [`indicators::dema()`], [`indicators::tema()`], [`indicators::trima()`],
//!   [`indicators::kama()`], [`indicators::t3()`]
//! - [`indicators::ma()`]: dispatch over [`MaType`]
//!
//! ## Momentum
//! - [`indicators::rsi()`]: Relative Strength Index
//! - [`indicators::macd()`], [`indicators::macd_ext()`]: Moving Average
//!   Convergence Divergence
//!
//! ## Volatility
//! - [`indicators::true_range()`], [`indicators::atr()`]: True Range and ATR
//! - [`indicators::rolling_stddev()`], [`indicators::bbands()`]: standard
//!   deviation and Bollinger Bands
//!
//! ## Volume
//! - [`indicators::ad()`]: Chaikin A/D Line
//! - [`indicators::obv()`]: On-Balance Volume
//!
//! # Error Handling
//!
//! All indicator functions return [`Result<T, Error>`]:
//!
//! ```
//! use ta_engine::prelude::*;
//!
//! // Period too long for data
//! let short_data = vec![1.0_f64, 2.0];
//! assert!(matches!(sma(&short_data, 10), Err(Error::InsufficientData { .. })));
//!
//! // Empty data
//! let empty: Vec<f64> = vec![];
//! assert!(matches!(sma(&empty, 5), Err(Error::InvalidInput { .. })));
//! ```
//!
//! # Logging
//!
//! Rejected calls are reported through [`tracing`] at `debug` level, and
//! moving-average dispatch and batch scheduling at `trace` level. The crate
//! never installs a subscriber.

#![deny(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::perf)]
#![warn(clippy::nursery)]
#![warn(clippy::needless_collect)]
#![warn(clippy::or_fun_call)]
#![warn(clippy::inefficient_to_string)]
#![warn(clippy::useless_conversion)]
#![allow(clippy::module_name_repetitions)]

pub mod batch;
pub mod error;
pub mod indicators;
pub mod kernels;
pub mod prelude;
pub mod traits;
pub mod utils;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use indicators::{ma, sma, MaType};
pub use traits::{SeriesElement, ValidatedInput};
pub use utils::{approx_eq, approx_eq_opt, count_unavailable_prefix, EPSILON, LOOSE_EPSILON};
