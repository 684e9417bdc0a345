//! Custom error types for the profiling engine.
//!
//! This module provides the error hierarchy using `thiserror`. Only
//! malformed input (and the I/O around ingestion) aborts a profiling call;
//! degenerate statistics are resolved to defaults by the components
//! themselves and never reach this enum.
//!
//! Errors are serializable so a presentation layer can display them as
//! `{ code, message }` pairs.

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// The main error type for the profiling engine.
#[derive(Error, Debug)]
pub enum ProfilingError {
    /// The schema declares the same column name twice.
    #[error("Duplicate column '{0}' in schema")]
    DuplicateColumn(String),

    /// A row does not carry a column declared in the schema.
    #[error("Row {row} is missing declared column '{column}'")]
    MissingField { row: usize, column: String },

    /// A row carries a column the schema does not declare.
    #[error("Row {row} has undeclared column '{column}'")]
    UnexpectedField { row: usize, column: String },

    /// A positional row has the wrong number of cells.
    #[error("Row {row} has {actual} cells, schema declares {expected}")]
    RowWidthMismatch {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// Column was not found in the dataset.
    #[error("Column '{0}' not found in dataset")]
    ColumnNotFound(String),

    /// The ingested source produced no rows or no columns.
    #[error("Dataset is empty")]
    EmptyDataset,

    /// The input file format is not handled by the ingestion layer.
    #[error("Unsupported input format: {0}")]
    UnsupportedFormat(String),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<ProfilingError>,
    },
}

impl ProfilingError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        ProfilingError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Get error code for frontend handling.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateColumn(_) => "DUPLICATE_COLUMN",
            Self::MissingField { .. } => "MISSING_FIELD",
            Self::UnexpectedField { .. } => "UNEXPECTED_FIELD",
            Self::RowWidthMismatch { .. } => "ROW_WIDTH_MISMATCH",
            Self::ColumnNotFound(_) => "COLUMN_NOT_FOUND",
            Self::EmptyDataset => "EMPTY_DATASET",
            Self::UnsupportedFormat(_) => "UNSUPPORTED_FORMAT",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Check if this error means the dataset violates its schema.
    ///
    /// These are reported back to the ingestion side and never repaired here.
    pub fn is_malformed_input(&self) -> bool {
        match self {
            Self::DuplicateColumn(_)
            | Self::MissingField { .. }
            | Self::UnexpectedField { .. }
            | Self::RowWidthMismatch { .. } => true,
            Self::WithContext { source, .. } => source.is_malformed_input(),
            _ => false,
        }
    }
}

/// Errors are serialized as a struct with `code` and `message` fields.
impl Serialize for ProfilingError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("ProfilingError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for profiling operations.
pub type Result<T> = std::result::Result<T, ProfilingError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| ProfilingError::Polars(e).with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        assert_eq!(ProfilingError::EmptyDataset.error_code(), "EMPTY_DATASET");
        assert_eq!(
            ProfilingError::ColumnNotFound("age".to_string()).error_code(),
            "COLUMN_NOT_FOUND"
        );
    }

    #[test]
    fn test_is_malformed_input() {
        let missing = ProfilingError::MissingField {
            row: 3,
            column: "city".to_string(),
        };
        assert!(missing.is_malformed_input());
        assert!(ProfilingError::DuplicateColumn("a".to_string()).is_malformed_input());
        assert!(!ProfilingError::ColumnNotFound("a".to_string()).is_malformed_input());
        assert!(!ProfilingError::EmptyDataset.is_malformed_input());
    }

    #[test]
    fn test_error_serialization() {
        let error = ProfilingError::ColumnNotFound("Age".to_string());
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("COLUMN_NOT_FOUND"));
        assert!(json.contains("Age"));
    }

    #[test]
    fn test_with_context() {
        let error = ProfilingError::RowWidthMismatch {
            row: 1,
            expected: 3,
            actual: 2,
        }
        .with_context("While loading dataset");
        assert!(error.to_string().contains("While loading dataset"));
        assert_eq!(error.error_code(), "ROW_WIDTH_MISMATCH");
        assert!(error.is_malformed_input());
    }
}
