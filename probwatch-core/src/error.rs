//! Error types for configuration validation.

use thiserror::Error;

/// Errors raised when a sampler or buffer is configured with invalid values.
///
/// Sampling, pushing and projecting are total; these are the only failures
/// the core can report.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A range bound or step is NaN or infinite.
    #[error("{field} must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f64 },

    /// The lower bound is above the upper bound.
    #[error("invalid range: min {min} is greater than max {max}")]
    InvertedRange { min: f64, max: f64 },

    /// The random-walk step is negative.
    #[error("step must not be negative, got {0}")]
    NegativeStep(f64),

    /// A history buffer cannot hold zero observations.
    #[error("capacity must be at least 1")]
    ZeroCapacity,
}
