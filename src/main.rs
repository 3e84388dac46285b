use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use roster::cli::{handle_data_command, handle_student_command, render_error};
use roster::config::{RosterPaths, Settings};
use roster::services::StudentService;
use roster::storage::DataStore;

#[derive(Parser)]
#[command(
    name = "roster",
    version,
    about = "Student roster management from the command line",
    long_about = "roster keeps a validated student record file and lets you \
                  add, search, update and delete students, with backups and \
                  import/export of the underlying JSON dataset."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Student record commands
    #[command(subcommand, alias = "s")]
    Student(roster::cli::StudentCommands),

    /// Data file commands
    #[command(subcommand, alias = "d")]
    Data(roster::cli::DataCommands),

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    // RUST_LOG controls verbosity; silent by default
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let paths = RosterPaths::new().context("failed to resolve application directories")?;
    let settings = match Settings::load_or_create(&paths) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{}", render_error(&e));
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Some(Commands::Student(cmd)) => {
            DataStore::new(&paths)
                .and_then(StudentService::new)
                .and_then(|mut service| handle_student_command(&mut service, cmd))
        }
        Some(Commands::Data(cmd)) => {
            DataStore::new(&paths)
                .and_then(StudentService::new)
                .and_then(|mut service| handle_data_command(&mut service, &settings, cmd))
        }
        Some(Commands::Config) => {
            println!("roster configuration");
            println!("====================");
            println!("Data file:        {}", paths.data_file().display());
            println!("Backup directory: {}", paths.backup_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Backup retention: {} days", settings.backup_retention_days);
            println!("  Date format:      {}", settings.date_format);
            Ok(())
        }
        None => {
            println!("roster - student record management");
            println!();
            println!("Run 'roster --help' for usage information.");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}", render_error(&e));
        std::process::exit(1);
    }

    Ok(())
}
