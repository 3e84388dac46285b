//! Core data models for the roster
//!
//! The `Student` record is the only entity; it can exist solely in a
//! validated state. `StudentRecord` is its raw on-disk shape and
//! `StudentUpdate` describes a partial update.

pub mod student;

pub use student::{Gender, Student, StudentRecord, StudentUpdate};
