//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod data;
pub mod student;

pub use data::{handle_data_command, DataCommands};
pub use student::{handle_student_command, StudentCommands};

use crate::error::RosterError;

/// Render an error as the message shown to the user
///
/// Each error kind gets its own phrasing; the raw `Display` output is kept
/// for kinds that already read well on a terminal.
pub fn render_error(err: &RosterError) -> String {
    match err {
        RosterError::Validation { field, reason } => {
            format!("Invalid {}: {}", field, reason)
        }
        RosterError::NotFound { id } => {
            format!("No student with id '{}'", id)
        }
        RosterError::Duplicate { id } => {
            format!("A student with id '{}' already exists", id)
        }
        RosterError::Io {
            path,
            operation,
            detail,
        } => {
            format!("Failed to {} {}: {}", operation, path.display(), detail)
        }
        RosterError::EmptyData(detail) => {
            format!("Nothing to work with: {}", detail)
        }
        RosterError::BackupRestore { operation, detail } => {
            format!("Backup {} failed: {}", operation, detail)
        }
        RosterError::InvalidOperation(detail) => detail.clone(),
        RosterError::OperationFailed(detail) => {
            format!("Operation failed: {}", detail)
        }
        RosterError::Config(detail) => {
            format!("Configuration problem: {}", detail)
        }
    }
}
