//! Advisory engine error types

use thiserror::Error;

/// Errors surfaced by the advisory engine and its data loader
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AdvisoryError {
    /// Nearest-point search was given no observations
    #[error("Nearest-point search requires at least one observation")]
    EmptyInput,

    /// Nearest-point search was given a reference with a NaN or infinite coordinate
    #[error("Reference point ({latitude}, {longitude}) is not a finite coordinate")]
    NonFiniteReference { latitude: f64, longitude: f64 },

    /// Dataset lacks one or more required columns
    #[error("Dataset is missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// A single row carried a value that cannot be coerced
    #[error("Invalid value for '{field}' in row {row}: {reason}")]
    InvalidField {
        row: usize,
        field: &'static str,
        reason: String,
    },

    /// File extension is neither CSV nor Parquet
    #[error("Unsupported dataset format: {0} (use .csv or .parquet)")]
    UnsupportedFormat(String),
}

/// Result type for advisory operations
pub type AdvisoryResult<T> = Result<T, AdvisoryError>;
