//! Error types for loading, validating and writing licence collections.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised at the ingestion and serialization boundaries.
#[derive(Debug, Error)]
pub enum WtrError {
    // === File System Errors ===
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === CSV Errors ===
    /// Malformed record, ragged row, or a field that does not deserialize.
    #[error("CSV error at line {line}: {source}")]
    Csv {
        line: u64,
        #[source]
        source: csv::Error,
    },

    #[error("CSV write failed: {0}")]
    CsvWrite(#[source] csv::Error),

    /// Input has no header line at all.
    #[error("input is empty")]
    EmptyInput,

    // === Schema Errors ===
    #[error("expected {expected} columns, header has {found}")]
    ColumnCount { expected: usize, found: usize },

    #[error("column {index}: expected '{expected}', found '{found}'")]
    SchemaMismatch {
        index: usize,
        expected: String,
        found: String,
    },

    #[error("column '{column}' is not part of the register schema")]
    UnknownColumn { column: String },

    // === Data Integrity ===
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Data-integrity failures found in an otherwise well-formed collection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("row {row}: unknown product code '{code}'")]
    UnknownProductCode { row: usize, code: String },

    #[error("row {row}: product code '{code}' is not {expected} characters")]
    ProductCodeLength {
        row: usize,
        code: String,
        expected: usize,
    },

    #[error("row {row}: missing product description")]
    MissingProductDescription { row: usize },

    #[error("known product code '{code}' does not appear in the data")]
    UnusedProductCode { code: String },
}

/// Result type for register operations.
pub type Result<T> = std::result::Result<T, WtrError>;
