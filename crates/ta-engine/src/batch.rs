//! Batch processing utilities for indicator computation over many series.
//!
//! [`BatchProcessor`] applies one kernel closure to many independent series
//! and returns the results in input order. The first failing series aborts the
//! batch with its error.
//!
//! # Feature Flag
//!
//! With the `parallel` feature the work is spread over Rayon's thread pool
//! once the batch holds at least [`min_parallel_threshold`] series; smaller
//! batches, and every batch without the feature, run sequentially.
//!
//! ```toml
//! [dependencies]
//! ta-engine = { version = "0.1", features = ["parallel"] }
//! ```
//!
//! [`min_parallel_threshold`]: BatchProcessor::min_parallel_threshold
//!
//! # Example
//!
//! ```
//! use ta_engine::batch::BatchProcessor;
//! use ta_engine::indicators::sma;
//!
//! let series = vec![
//!     vec![1.0_f64, 2.0, 3.0, 4.0, 5.0],
//!     vec![5.0, 4.0, 3.0, 2.0, 1.0],
//!     vec![2.0, 4.0, 6.0, 8.0, 10.0],
//! ];
//!
//! let results = BatchProcessor::new().process(&series, |s| sma(s, 3)).unwrap();
//!
//! assert_eq!(results[0][2], Some(2.0));
//! assert_eq!(results[1][2], Some(4.0));
//! assert_eq!(results[2][4], Some(8.0));
//! ```

use crate::error::Result;
use crate::traits::SeriesElement;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Default number of series from which a batch goes parallel.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1000;

/// Batch processor for indicator computation over many series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchProcessor {
    /// Minimum number of series required to use parallel processing.
    min_parallel_threshold: usize,
}

impl Default for BatchProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl BatchProcessor {
    /// Creates a new batch processor with the default threshold (1000 series).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            min_parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }

    /// Sets the minimum number of series required to use parallel processing.
    ///
    /// Has no effect without the `parallel` feature.
    #[must_use]
    pub const fn min_parallel_threshold(mut self, threshold: usize) -> Self {
        self.min_parallel_threshold = threshold;
        self
    }

    /// Returns the configured parallel threshold.
    #[must_use]
    pub const fn get_min_parallel_threshold(&self) -> usize {
        self.min_parallel_threshold
    }

    /// Returns true if a batch of `count` series would run in parallel.
    #[must_use]
    pub const fn runs_parallel(&self, count: usize) -> bool {
        cfg!(feature = "parallel") && count >= self.min_parallel_threshold
    }

    /// Applies `indicator_fn` to every owned series.
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing series.
    pub fn process<T, F, R>(&self, series: &[Vec<T>], indicator_fn: F) -> Result<Vec<R>>
    where
        T: SeriesElement,
        F: Fn(&[T]) -> Result<R> + Send + Sync,
        R: Send,
    {
        self.run(series, |s| indicator_fn(s))
    }

    /// Applies `indicator_fn` to every borrowed series.
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing series.
    ///
    /// # Example
    ///
    /// ```
    /// use ta_engine::batch::BatchProcessor;
    /// use ta_engine::indicators::ema;
    ///
    /// let a = vec![1.0_f64, 2.0, 3.0, 4.0];
    /// let b = vec![4.0_f64, 3.0, 2.0, 1.0];
    /// let series: Vec<&[f64]> = vec![&a, &b];
    ///
    /// let results = BatchProcessor::new().process_refs(&series, |s| ema(s, 2)).unwrap();
    /// assert_eq!(results.len(), 2);
    /// ```
    pub fn process_refs<T, F, R>(&self, series: &[&[T]], indicator_fn: F) -> Result<Vec<R>>
    where
        T: SeriesElement,
        F: Fn(&[T]) -> Result<R> + Send + Sync,
        R: Send,
    {
        self.run(series, |s| indicator_fn(s))
    }

    /// Applies `indicator_fn` to every `(high, low, close)` dataset.
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing dataset.
    ///
    /// # Example
    ///
    /// ```
    /// use ta_engine::batch::BatchProcessor;
    /// use ta_engine::indicators::atr;
    ///
    /// let datasets: Vec<(Vec<f64>, Vec<f64>, Vec<f64>)> = vec![
    ///     (vec![10.0, 11.0, 12.0], vec![9.0, 10.0, 11.0], vec![9.5, 10.5, 11.5]),
    ///     (vec![20.0, 21.0, 22.0], vec![19.0, 20.0, 21.0], vec![19.5, 20.5, 21.5]),
    /// ];
    ///
    /// let results = BatchProcessor::new()
    ///     .process_ohlc(&datasets, |h, l, c| atr(h, l, c, 2))
    ///     .unwrap();
    /// assert!(results[1][0].is_none());
    /// assert!(results[1][1].is_some());
    /// ```
    pub fn process_ohlc<T, F, R>(
        &self,
        datasets: &[(Vec<T>, Vec<T>, Vec<T>)],
        indicator_fn: F,
    ) -> Result<Vec<R>>
    where
        T: SeriesElement,
        F: Fn(&[T], &[T], &[T]) -> Result<R> + Send + Sync,
        R: Send,
    {
        self.run(datasets, |(h, l, c)| indicator_fn(h, l, c))
    }

    #[cfg(feature = "parallel")]
    fn run<I, F, R>(&self, items: &[I], f: F) -> Result<Vec<R>>
    where
        I: Sync,
        F: Fn(&I) -> Result<R> + Send + Sync,
        R: Send,
    {
        if self.runs_parallel(items.len()) {
            tracing::trace!(count = items.len(), "batch running in parallel");
            items.par_iter().map(f).collect()
        } else {
            tracing::trace!(count = items.len(), "batch running sequentially");
            items.iter().map(f).collect()
        }
    }

    #[cfg(not(feature = "parallel"))]
    #[allow(clippy::unused_self)]
    fn run<I, F, R>(&self, items: &[I], f: F) -> Result<Vec<R>>
    where
        F: Fn(&I) -> Result<R>,
    {
        tracing::trace!(count = items.len(), "batch running sequentially");
        items.iter().map(f).collect()
    }
}

/// Shorthand for [`BatchProcessor::new().process(..)`](BatchProcessor::process).
///
/// # Errors
///
/// Returns the error of the first failing series.
pub fn process_batch<T, F, R>(series: &[Vec<T>], indicator_fn: F) -> Result<Vec<R>>
where
    T: SeriesElement,
    F: Fn(&[T]) -> Result<R> + Send + Sync,
    R: Send,
{
    BatchProcessor::new().process(series, indicator_fn)
}
