use anyhow::Result;
use clap::{Parser, Subcommand};

use timesheet::cli::{
    handle_backup_command, handle_check_command, handle_config_command, handle_export_command,
    handle_reset_command, handle_seed_command, handle_serve_command,
};
use timesheet::config::{Settings, TimesheetPaths};
use timesheet::logging::init_logging;
use timesheet::storage::{Storage, StoreRegistry};

#[derive(Parser)]
#[command(
    name = "timesheet",
    version,
    about = "Backup, export and seeding for the timesheet backend",
    long_about = "Keeps the timesheet tables safe: rotated CSV backups, a \
                  downloadable ZIP export and first-run seeding from CSV files."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed empty tables, then serve the download endpoints
    Serve {
        /// Address to listen on (overrides server.listen_addr)
        #[arg(short, long)]
        listen: Option<String>,
    },

    /// Seed a table from its CSV file
    Seed {
        /// Table name, or "all"
        target: String,
        /// Load even when the table already holds rows
        #[arg(short, long)]
        force: bool,
    },

    /// Back up every table into the backup folder
    Backup,

    /// Build the export archive
    Export,

    /// Seed every empty table
    Check,

    /// Remove every row of every table
    Reset {
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = TimesheetPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    let _log_guard = init_logging(&settings.logging.level, &settings.log_dir(&paths))?;

    if let Commands::Config = cli.command {
        handle_config_command(&paths, &settings)?;
        return Ok(());
    }

    let storage = Storage::new(settings.store_dir(&paths))?;
    storage.load_all()?;
    let registry = StoreRegistry::from_storage(&storage, &settings, &paths);

    match cli.command {
        Commands::Serve { listen } => {
            handle_serve_command(&paths, &settings, registry, listen)?;
        }
        Commands::Seed { target, force } => {
            handle_seed_command(registry, &target, force)?;
        }
        Commands::Backup => {
            handle_backup_command(&paths, &settings, registry)?;
        }
        Commands::Export => {
            handle_export_command(&paths, &settings, registry)?;
        }
        Commands::Check => {
            handle_check_command(registry)?;
        }
        Commands::Reset { force } => {
            handle_reset_command(&registry, force)?;
        }
        Commands::Config => {}
    }

    Ok(())
}
