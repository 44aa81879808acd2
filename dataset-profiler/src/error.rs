//! Error types for the dataset profiler.
//!
//! Profiling itself never fails on malformed cell values: unparsable numbers are
//! simply left out of numeric computations. Errors only arise at the edges of the
//! crate, when a dataset is assembled from records or CSV, when a caller selects a
//! column that does not exist, or when a report is serialized.

use thiserror::Error;

/// The main error type for the dataset profiler.
#[derive(Error, Debug)]
pub enum ProfileError {
    /// A row carried a key that is not part of the dataset schema.
    #[error("Row {row} has column '{column}' which is not in the dataset schema")]
    UnknownColumn {
        /// Zero-based index of the offending row
        row: usize,
        /// The unexpected column name
        column: String,
    },

    /// The same column name appeared twice in a header.
    #[error("Duplicate column name '{column}' in header")]
    DuplicateColumn { column: String },

    /// A row did not fit the schema established by the header.
    #[error("Schema mismatch at row {row}: expected {expected} fields, found {found}")]
    SchemaMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A selected column does not exist in the current dataset.
    #[error("Column '{column}' not found in dataset")]
    ColumnNotFound { column: String },

    /// Error decoding or encoding CSV.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Error from I/O operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from serialization/deserialization operations.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Invalid configuration or parameters.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// A type alias for `Result<T, ProfileError>`.
///
/// ```rust
/// use dataset_profiler::error::Result;
///
/// fn load() -> Result<()> {
///     Ok(())
/// }
/// ```
pub type Result<T> = std::result::Result<T, ProfileError>;

impl ProfileError {
    /// Creates a column-not-found error.
    pub fn column_not_found(column: impl Into<String>) -> Self {
        Self::ColumnNotFound {
            column: column.into(),
        }
    }

    /// Creates an invalid configuration error with the given message.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }
}

impl From<serde_json::Error> for ProfileError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_unknown_column_message() {
        let err = ProfileError::UnknownColumn {
            row: 3,
            column: "zip".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Row 3 has column 'zip' which is not in the dataset schema"
        );
    }

    #[test]
    fn test_column_not_found() {
        let err = ProfileError::column_not_found("user_id");
        assert_eq!(err.to_string(), "Column 'user_id' not found in dataset");
    }

    #[test]
    fn test_schema_mismatch() {
        let err = ProfileError::SchemaMismatch {
            row: 2,
            expected: 3,
            found: 5,
        };
        assert_eq!(
            err.to_string(),
            "Schema mismatch at row 2: expected 3 fields, found 5"
        );
    }

    #[test]
    fn test_io_error_preserves_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.csv");
        let err = ProfileError::from(io);
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("IO error"));
    }

    #[test]
    fn test_serde_json_conversion() {
        let bad = serde_json::from_str::<serde_json::Value>("{not json");
        let err: ProfileError = bad.unwrap_err().into();
        assert!(matches!(err, ProfileError::Serialization(_)));
    }
}
