//! Error types for the scenario workbook
//!
//! Comprehensive error taxonomy using thiserror. Invalid numeric cell input
//! is deliberately absent: it is coerced, never reported.

use thiserror::Error;

/// Top-level workbook error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WorkbookError {
    #[error("Identity error: {0}")]
    Identity(#[from] IdentityError),

    #[error("Table error: {0}")]
    Table(#[from] TableError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),
}

/// Identity gate errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    #[error("Student name is required")]
    MissingName,

    #[error("Roll number is required")]
    MissingRollNumber,

    #[error("Student identity has not been captured for this session")]
    NotCaptured,
}

/// Table-shape errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("Row not found: serial {serial} (valid range 1..={rows})")]
    RowNotFound { serial: u32, rows: usize },

    #[error("Unknown column: {name}")]
    UnknownField { name: String },

    #[error("Column is read-only: {name}")]
    ReadOnlyField { name: String },

    #[error("Invalid row count: expected {expected}, got {got}")]
    RowCount { expected: usize, got: usize },

    #[error("Serial out of order at position {position}: expected {expected}, got {got}")]
    SerialOutOfOrder {
        position: usize,
        expected: u32,
        got: u32,
    },
}

/// Spreadsheet export errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExportError {
    #[error("Spreadsheet encoding failed: {reason}")]
    Encoding { reason: String },

    #[error("Failed to write {path}: {reason}")]
    Io { path: String, reason: String },
}
