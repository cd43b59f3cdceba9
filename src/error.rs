//! Error types for the GA engine.

use thiserror::Error;

/// Errors raised by configuration checks and the evolutionary loop.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GaError {
    /// A parameter is out of range. Reported before any generation runs.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The population's total fitness is not strictly positive, so no
    /// selection distribution can be formed.
    #[error("degenerate fitness: total fitness {total} must be > 0")]
    DegenerateFitness { total: f64 },

    /// The evaluator returned a negative or non-finite score.
    #[error("invalid fitness {value} for individual {index}: must be finite and >= 0")]
    InvalidFitness { index: usize, value: f64 },

    /// Two genes (or a gene and the configured length) disagree in length.
    #[error("gene length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GaError>;
