//! Custom error types for billcover
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for billcover operations
#[derive(Error, Debug)]
pub enum BillcoverError {
    /// Import target does not exist
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// A data row is missing a field required by its declared kind
    #[error("Malformed row {row}: {reason}")]
    MalformedRow { row: usize, reason: String },

    /// No accepted date format matched the token
    #[error("Unable to parse date '{0}'. Please use format YYYY-MM-DD, M/D/YYYY, or similar.")]
    InvalidDate(String),

    /// Currency text that is not a number
    #[error("Invalid amount: '{0}'")]
    InvalidAmount(String),

    /// Out-of-range or non-numeric menu/index choice
    #[error("Invalid selection: '{0}'")]
    InvalidSelection(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// CSV reading/writing errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl BillcoverError {
    /// Create a "file not found" error for an import path
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a "malformed row" error
    pub fn malformed_row(row: usize, reason: impl Into<String>) -> Self {
        Self::MalformedRow {
            row,
            reason: reason.into(),
        }
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for BillcoverError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for BillcoverError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for BillcoverError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

/// Result type alias for billcover operations
pub type BillcoverResult<T> = Result<T, BillcoverError>;
