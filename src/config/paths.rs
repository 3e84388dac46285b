//! Path management for the roster application
//!
//! Provides XDG-compliant path resolution for configuration, data, and
//! backups.
//!
//! ## Path Resolution Order
//!
//! 1. `ROSTER_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/roster-cli` or `~/.config/roster-cli`
//! 3. Windows: `%APPDATA%\roster-cli`

use std::path::PathBuf;

use crate::error::RosterError;

/// Manages all paths used by the roster application
#[derive(Debug, Clone)]
pub struct RosterPaths {
    /// Base directory for all roster data
    base_dir: PathBuf,
}

impl RosterPaths {
    /// Create a new RosterPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, RosterError> {
        let base_dir = if let Ok(custom) = std::env::var("ROSTER_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create RosterPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/roster-cli/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (~/.config/roster-cli/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the backup directory (~/.config/roster-cli/backups/)
    pub fn backup_dir(&self) -> PathBuf {
        self.base_dir.join("backups")
    }

    /// Get the path to the dataset file
    pub fn data_file(&self) -> PathBuf {
        self.data_dir().join("students.json")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<(), RosterError> {
        std::fs::create_dir_all(&self.base_dir).map_err(|e| {
            RosterError::io(self.base_dir.clone(), "create directory", e.to_string())
        })?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| RosterError::io(self.data_dir(), "create directory", e.to_string()))?;

        std::fs::create_dir_all(self.backup_dir())
            .map_err(|e| RosterError::io(self.backup_dir(), "create directory", e.to_string()))?;

        Ok(())
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, RosterError> {
    // Unix (Linux/macOS): Use XDG_CONFIG_HOME if set, otherwise ~/.config
    let config_base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| {
            std::env::var("HOME")
                .map(|home| PathBuf::from(home).join(".config"))
                .map_err(|_| RosterError::Config("Could not determine home directory".into()))
        })?;
    Ok(config_base.join("roster-cli"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, RosterError> {
    // Windows: Use APPDATA
    let appdata = std::env::var("APPDATA")
        .map_err(|_| RosterError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("roster-cli"))
}
