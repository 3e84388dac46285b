//! User settings for the roster application
//!
//! A small JSON config file; every field is defaulted so older files keep
//! loading as new settings are added.

use serde::{Deserialize, Serialize};

use super::paths::RosterPaths;
use crate::error::RosterError;

/// User settings for the roster application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// How many days of backups `cleanup` keeps
    #[serde(default = "default_backup_retention_days")]
    pub backup_retention_days: u32,

    /// Date format used when displaying file timestamps (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_backup_retention_days() -> u32 {
    30
}

fn default_date_format() -> String {
    "%Y-%m-%d %H:%M:%S".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backup_retention_days: default_backup_retention_days(),
            date_format: default_date_format(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if the file
    /// doesn't exist
    pub fn load_or_create(paths: &RosterPaths) -> Result<Self, RosterError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| RosterError::io(settings_path.clone(), "read", e.to_string()))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                RosterError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let the caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &RosterPaths) -> Result<(), RosterError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| RosterError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(&settings_path, contents)
            .map_err(|e| RosterError::io(settings_path, "write", e.to_string()))?;

        Ok(())
    }
}
