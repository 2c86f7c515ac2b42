//! Shared kernels reused by several indicators.
//!
//! # Kernels
//!
//! - [`rolling_sum`]: O(1)-per-step window sum and variance with IEEE-style
//!   handling of NaN and infinities, backing SMA, TRIMA, rolling standard
//!   deviation and Bollinger Bands
//! - [`wilder`]: Wilder's `(avg × (n - 1) + x) / n` smoother, backing RSI and ATR

pub mod rolling_sum;
pub mod wilder;

pub use rolling_sum::{
    rolling_sum, rolling_sum_into, rolling_sum_lookback, rolling_sum_min_len, RollingWindow,
};
pub use wilder::Wilder;
