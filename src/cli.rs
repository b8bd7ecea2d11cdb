//! Command-line interface definitions for badgelog.
//!
//! All arguments, subcommands and options use the clap derive API.
//! Without a subcommand the interactive menu starts.
//!
//! # Example
//!
//! ```bash
//! # Interactive menu
//! badgelog
//!
//! # Register a user and record two scans
//! badgelog add-user abc123 "Ada Lovelace" --role student
//! badgelog scan abc123
//! badgelog scan abc123
//!
//! # Reports
//! badgelog report
//! badgelog export --format csv --output logs.csv
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::validation::Role;

/// Badge-scan attendance tracker.
///
/// Registers users, records IN/OUT scans, keeps everything in a binary
/// store under the data directory, and exports JSON snapshots.
#[derive(Debug, Parser)]
#[command(name = "badgelog")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Output errors as JSON
    #[arg(long, global = true)]
    pub json_errors: bool,

    /// Directory holding the store and exports
    #[arg(long, global = true, value_name = "PATH")]
    pub data_dir: Option<PathBuf>,

    /// Path to a TOML config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute (defaults to the interactive menu)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the interactive menu
    Menu,
    /// Register a new user
    AddUser(AddUserArgs),
    /// Record a badge scan, toggling IN/OUT
    Scan(UserIdArg),
    /// Show scan logs for one user
    Search(UserIdArg),
    /// Show all scan logs sorted by time
    Logs,
    /// Show the current status of every user
    Status,
    /// Show scan counts and last action per user
    Report,
    /// List registered users
    Users,
    /// Show user and scan totals
    Stats,
    /// Write the store to disk
    Save,
    /// Export a snapshot (JSON) or the log history (CSV)
    Export(ExportArgs),
    /// Clear all scan logs and set every user OUT
    ClearLogs(ConfirmArgs),
    /// Delete all users, logs and status
    ClearAll(ConfirmArgs),
    /// Write the effective configuration as a TOML file
    InitConfig(InitConfigArgs),
}

/// Arguments for add-user.
#[derive(Debug, Args)]
pub struct AddUserArgs {
    /// Badge id (3-10 alphanumeric characters)
    #[arg(value_name = "ID")]
    pub id: String,

    /// Full name (2-50 letters, spaces, dots, hyphens, apostrophes)
    #[arg(value_name = "NAME")]
    pub name: String,

    /// User role
    #[arg(short, long, value_enum)]
    pub role: Role,
}

/// A single user id argument.
#[derive(Debug, Args)]
pub struct UserIdArg {
    /// Badge id
    #[arg(value_name = "ID")]
    pub id: String,
}

/// Arguments for export.
#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: ExportFormat,

    /// Destination file (defaults to the configured export file for JSON)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Confirmation for destructive commands.
#[derive(Debug, Args)]
pub struct ConfirmArgs {
    /// Skip the confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,
}

/// Arguments for init-config.
#[derive(Debug, Args)]
pub struct InitConfigArgs {
    /// Destination file (defaults to --config or the platform config path)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Overwrite an existing file
    #[arg(short, long)]
    pub force: bool,
}

/// Export file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// Snapshot of users, logs and summary
    Json,
    /// Log history for spreadsheets
    Csv,
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Csv => write!(f, "csv"),
        }
    }
}
