//! Custom error types for the roster application
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for roster operations
#[derive(Error, Debug)]
pub enum RosterError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// A field value failed a validation rule
    #[error("Validation error for '{field}': {reason}")]
    Validation { field: String, reason: String },

    /// Student lookup failed
    #[error("Student not found: {id}")]
    NotFound { id: String },

    /// A student with this id already exists
    #[error("Student already exists: {id}")]
    Duplicate { id: String },

    /// File read/write/parse failure, with the path and operation that failed
    #[error("I/O error during {operation} of {}: {detail}", path.display())]
    Io {
        path: PathBuf,
        operation: &'static str,
        detail: String,
    },

    /// An operation required a non-empty source file that was absent or empty
    #[error("No data available: {0}")]
    EmptyData(String),

    /// Backup or restore failed after passing its preconditions
    #[error("{operation} failed: {detail}")]
    BackupRestore {
        operation: &'static str,
        detail: String,
    },

    /// A structurally forbidden request (e.g. an unsupported export format)
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Catch-all for unexpected internal failures at an operation boundary
    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

impl RosterError {
    /// Create a validation error for a named field
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a "student not found" error
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Create a "student already exists" error
    pub fn duplicate(id: impl Into<String>) -> Self {
        Self::Duplicate { id: id.into() }
    }

    /// Create an I/O error naming the path and operation
    pub fn io(path: impl Into<PathBuf>, operation: &'static str, detail: impl Into<String>) -> Self {
        Self::Io {
            path: path.into(),
            operation,
            detail: detail.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Check if this is an I/O error
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }
}

/// Result type alias for roster operations
pub type RosterResult<T> = Result<T, RosterError>;
