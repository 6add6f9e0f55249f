//! Table error types
//!
//! Defines all errors that can occur while building, reading or reshaping tables.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur in the table layer
#[derive(Error, Debug)]
pub enum TableError {
    /// Operation needs at least one column
    #[error("Table has no columns")]
    NoColumns,

    /// Two columns share a name
    #[error("Duplicate column name: {0}")]
    DuplicateColumn(String),

    /// A column or index does not match the table's row count
    #[error("Length mismatch for {name}: expected {expected} rows, got {actual}")]
    LengthMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    /// Named column does not exist
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    /// CSV reading or writing failed
    #[error("CSV error in {path:?}: {error}")]
    Csv { path: PathBuf, error: String },

    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for table operations
pub type TableResult<T> = Result<T, TableError>;
