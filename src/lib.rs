//! Roster CLI - Terminal-based student roster manager
//!
//! This library provides the core functionality for the roster application:
//! a validated student record store backed by a single JSON file, with
//! backup/restore, import/export and retention cleanup of the dataset.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `validation`: Pure field validation rules
//! - `models`: The `Student` record and partial-update types
//! - `storage`: JSON file persistence layer (`DataStore`)
//! - `services`: Business logic layer (`StudentService`)
//! - `display`: Terminal output formatting
//! - `cli`: Command handlers for the `roster` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use roster::config::paths::RosterPaths;
//! use roster::services::StudentService;
//! use roster::storage::DataStore;
//!
//! let paths = RosterPaths::new()?;
//! let store = DataStore::new(&paths)?;
//! let mut service = StudentService::new(store)?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;
pub mod validation;

pub use error::{RosterError, RosterResult};
