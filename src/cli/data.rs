//! Data file CLI commands
//!
//! Implements CLI commands for the dataset file itself: backups, restore,
//! import and export, and housekeeping.

use std::path::PathBuf;
use std::time::Duration;

use clap::Subcommand;

use crate::config::Settings;
use crate::display::format_file_info;
use crate::error::{RosterError, RosterResult};
use crate::services::StudentService;

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// Data file subcommands
#[derive(Subcommand)]
pub enum DataCommands {
    /// Back up the data file
    Backup,
    /// Restore the data file from a backup
    Restore {
        /// Path to the backup file
        file: PathBuf,
    },
    /// Import students from a JSON file
    Import {
        /// Path to the file to import
        file: PathBuf,
        /// Replace the current dataset instead of merging
        #[arg(long)]
        overwrite: bool,
    },
    /// Export the dataset to a file
    Export {
        /// Destination path
        file: PathBuf,
        /// Export format
        #[arg(short, long, default_value = "json")]
        format: String,
    },
    /// Show data file information
    Info,
    /// Delete backups older than the retention window
    Cleanup {
        /// Retention in days (defaults to the configured value)
        #[arg(short, long)]
        days: Option<u32>,
    },
    /// Delete the entire dataset
    Clear {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

/// Handle a data command
pub fn handle_data_command(
    service: &mut StudentService,
    settings: &Settings,
    cmd: DataCommands,
) -> RosterResult<()> {
    match cmd {
        DataCommands::Backup => {
            let path = service.backup()?;
            println!("Backup created: {}", path.display());
        }

        DataCommands::Restore { file } => {
            service.restore_from(&file)?;
            println!(
                "Restored from {} ({} students)",
                file.display(),
                service.count()
            );
        }

        DataCommands::Import { file, overwrite } => {
            let imported = service.import_from(&file, overwrite)?;
            let mode = if overwrite { "overwrote with" } else { "merged" };
            println!(
                "Imported {} records from {} ({}); {} students total",
                imported.len(),
                file.display(),
                mode,
                service.count()
            );
        }

        DataCommands::Export { file, format } => {
            service.export_to(&file, &format)?;
            println!("Exported to {}", file.display());
        }

        DataCommands::Info => {
            print!("{}", format_file_info(&service.file_info(), settings));
            println!("Students: {}", service.count());
        }

        DataCommands::Cleanup { days } => {
            let days = days.unwrap_or(settings.backup_retention_days);
            let deleted =
                service.cleanup_backups(Duration::from_secs(u64::from(days) * SECONDS_PER_DAY));
            println!("Deleted {} backups older than {} days", deleted, days);
        }

        DataCommands::Clear { yes } => {
            if !yes {
                return Err(RosterError::InvalidOperation(
                    "this deletes every student; pass --yes to confirm".into(),
                ));
            }
            service.clear_all()?;
            println!("Dataset cleared (a backup was taken first when possible)");
        }
    }

    Ok(())
}
