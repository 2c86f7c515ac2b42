//! Error types for ta-engine.
//!
//! Every kernel validates its inputs before computing and reports failures
//! through the single [`Error`] enum. All errors are deterministic functions of
//! the call's inputs; nothing is retried and no partial state is kept.

use thiserror::Error;

/// The main error type for indicator computation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The input is not a well-formed numeric series.
    ///
    /// Raised at the boundary before any computation starts, e.g. for an
    /// empty series.
    #[error("invalid input for {indicator}: {reason}")]
    InvalidInput {
        /// Name of the indicator that rejected the input.
        indicator: &'static str,
        /// Description of what is wrong with the input.
        reason: &'static str,
    },

    /// Parallel input series (high/low/close/volume) differ in length.
    #[error("dimension mismatch: {description}")]
    DimensionMismatch {
        /// Lengths of the offending series.
        description: String,
    },

    /// A parameter is outside its legal range.
    #[error("invalid parameter `{parameter}` for {indicator}: {reason}")]
    InvalidParameter {
        /// Name of the indicator the parameter belongs to.
        indicator: &'static str,
        /// Name of the parameter.
        parameter: &'static str,
        /// Description of the legal range.
        reason: &'static str,
    },

    /// The input series is too short to produce any defined output.
    #[error("insufficient data for {indicator}: required {required} elements, got {actual}")]
    InsufficientData {
        /// The number of data points required.
        required: usize,
        /// The number of data points provided.
        actual: usize,
        /// Name of the indicator.
        indicator: &'static str,
    },

    /// The requested functionality exists as a selector but has no kernel.
    #[error("not implemented: {feature}")]
    NotImplemented {
        /// The feature that was requested.
        feature: &'static str,
    },

    /// A pre-allocated output buffer is shorter than the input.
    #[error("buffer too small for {indicator}: required {required} elements, got {actual}")]
    BufferTooSmall {
        /// The number of elements required.
        required: usize,
        /// The number of elements available.
        actual: usize,
        /// Name of the indicator.
        indicator: &'static str,
    },

    /// Failed to convert a numeric value to the series element type.
    #[error("numeric conversion failed: {context}")]
    NumericConversion {
        /// Description of the conversion that failed.
        context: &'static str,
    },
}

impl Error {
    /// Shorthand for the `period must be at least 1` parameter error.
    #[must_use]
    pub const fn zero_period(indicator: &'static str, parameter: &'static str) -> Self {
        Self::InvalidParameter {
            indicator,
            parameter,
            reason: "period must be at least 1",
        }
    }

    /// Shorthand for the empty series error.
    #[must_use]
    pub const fn empty_input(indicator: &'static str) -> Self {
        Self::InvalidInput {
            indicator,
            reason: "series is empty",
        }
    }
}

/// Convenience type alias for Results using the ta-engine Error type.
pub type Result<T> = std::result::Result<T, Error>;
