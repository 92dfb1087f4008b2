//! Error handling for GRIM checking operations.
//!
//! Provides error types with context for decimal parsing, sample-size
//! validation, and column resolution failures.

use crate::models::ErrorKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GrimError {
    #[error("value '{value}' is not a decimal number: {reason}")]
    NotNumeric { value: String, reason: String },

    #[error("invalid sample size '{value}': {reason}")]
    InvalidSampleSize { value: String, reason: String },

    #[error("column '{column}' not found in table")]
    MissingColumn { column: String },

    #[error(
        "decimal-place override {requested} drops significant digits of '{value}' ({significant} fractional digits present)"
    )]
    PrecisionMismatch {
        value: String,
        requested: u32,
        significant: u32,
    },

    #[error("mean column and sample-size column both resolve to '{name}'")]
    ColumnConflict { name: String },

    #[error("table error: {0}")]
    Table(#[from] polars::error::PolarsError),

    #[error("configuration error: {message}")]
    Configuration { message: String },
}

pub type Result<T> = std::result::Result<T, GrimError>;

impl GrimError {
    /// Create a not-numeric error with context
    pub fn not_numeric(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::NotNumeric {
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid-sample-size error with context
    pub fn invalid_sample_size(value: impl ToString, reason: impl Into<String>) -> Self {
        Self::InvalidSampleSize {
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// Create a missing-column error
    pub fn missing_column(column: impl Into<String>) -> Self {
        Self::MissingColumn {
            column: column.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Map this error onto the row-diagnostic taxonomy, if it belongs there.
    ///
    /// Whole-call failures (column conflicts, table-level errors) have no
    /// row-level kind and return `None`.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::NotNumeric { .. } => Some(ErrorKind::NotNumeric),
            Self::InvalidSampleSize { .. } => Some(ErrorKind::InvalidSampleSize),
            Self::MissingColumn { .. } => Some(ErrorKind::MissingColumn),
            Self::PrecisionMismatch { .. } => Some(ErrorKind::PrecisionMismatch),
            Self::ColumnConflict { .. } | Self::Table(_) | Self::Configuration { .. } => None,
        }
    }
}
