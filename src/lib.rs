//! badgelog - badge-scan attendance tracker
//!
//! Registers users, toggles their IN/OUT status on every badge scan, keeps
//! all records in a checksummed binary store, and exports JSON snapshots
//! and CSV log histories. Runs as an interactive menu or as one-shot
//! subcommands.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod report;
pub mod shell;
pub mod store;
pub mod validation;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use yansi::Paint;

use crate::cli::{Cli, Commands, ConfirmArgs, ExportArgs, ExportFormat, InitConfigArgs};
use crate::config::Config;
use crate::error::ExitCode;
use crate::output::table;
use crate::shell::Shell;
use crate::store::{StorePaths, Tracker};
use crate::validation::{validate_name, validate_user_id};

/// Run the application on the process's stdin and stdout.
///
/// # Errors
///
/// See [`run_with`].
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_with(cli, stdin.lock(), stdout.lock())
}

/// Run the application for parsed CLI arguments.
///
/// `input` feeds the interactive menu and confirmation prompts; all
/// user-facing output goes to `out`.
///
/// # Errors
///
/// Returns an error for rejected input, unknown users, and failed
/// save or export operations. [`ExitCode::for_error`] maps it to an exit code.
pub fn run_with<R: BufRead, W: Write>(cli: Cli, mut input: R, mut out: W) -> Result<ExitCode> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from_path(path),
        None => Config::load(),
    };
    config.merge_cli(&cli);
    log::debug!("Effective configuration: {:?}", config);

    if !config.color {
        yansi::disable();
    }

    if let Some(Commands::InitConfig(args)) = &cli.command {
        let path = write_config(&config, args, cli.config.clone())?;
        writeln!(out, "Configuration written to {}", path.display())?;
        return Ok(ExitCode::Success);
    }

    let mut tracker = Tracker::open(StorePaths::from_config(&config));

    match cli.command {
        None | Some(Commands::Menu) => {
            Shell::new(&mut tracker, &mut input, &mut out).run()?;
        }
        Some(Commands::AddUser(args)) => {
            let id = validate_user_id(&args.id)?;
            let name = validate_name(&args.name)?;
            tracker.add_user(&id, &name, args.role.as_str())?;
            writeln!(out, "{} User {} ({}) added as {}", "✓".green(), name, id, args.role)?;
        }
        Some(Commands::Scan(arg)) => {
            let entry = tracker.scan(arg.id.trim())?;
            writeln!(
                out,
                "SCAN SUCCESS: {} ({}) - {} at {}",
                entry.user_name,
                entry.user_id,
                entry.action,
                entry.formatted_time()
            )?;
        }
        Some(Commands::Search(arg)) => {
            let id = arg.id.trim();
            table::write_user_logs(&mut out, id, &tracker.search_logs(id))?;
        }
        Some(Commands::Logs) => table::write_all_logs(&mut out, &tracker.all_logs_sorted())?,
        Some(Commands::Status) => table::write_user_status(&mut out, &tracker.user_status_view())?,
        Some(Commands::Report) => {
            table::write_daily_report(&mut out, &tracker.daily_report_view())?;
        }
        Some(Commands::Users) => table::write_users(&mut out, tracker.store().users())?,
        Some(Commands::Stats) => {
            writeln!(out, "Users: {}", tracker.total_users())?;
            writeln!(out, "Scans: {}", tracker.total_scans())?;
            writeln!(out, "Store: {}", tracker.paths().store_file.display())?;
        }
        Some(Commands::Save) => {
            tracker.save()?;
            writeln!(out, "Data saved to {}", tracker.paths().store_file.display())?;
        }
        Some(Commands::Export(args)) => run_export(&tracker, &args, &mut out)?,
        Some(Commands::ClearLogs(args)) => {
            if confirmed(&args, "This will clear all daily logs.", &mut input, &mut out)? {
                tracker.clear_daily_logs();
                writeln!(out, "Daily logs cleared.")?;
            } else {
                writeln!(out, "Operation cancelled.")?;
            }
        }
        Some(Commands::ClearAll(args)) => {
            let warning = "This will delete ALL users, logs and status.";
            if confirmed(&args, warning, &mut input, &mut out)? {
                tracker.clear_all_data();
                writeln!(out, "All data cleared.")?;
            } else {
                writeln!(out, "Operation cancelled.")?;
            }
        }
        // Handled before the tracker is opened.
        Some(Commands::InitConfig(_)) => {}
    }

    if tracker.is_dirty() {
        log::warn!("Some changes could not be saved to {}", tracker.paths().store_file.display());
    }
    Ok(ExitCode::Success)
}

fn write_config(config: &Config, args: &InitConfigArgs, cli_path: Option<PathBuf>) -> Result<PathBuf> {
    let path = match args.output.clone().or(cli_path) {
        Some(path) => path,
        None => Config::default_path()?,
    };
    if path.exists() && !args.force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    config.save_to(&path)?;
    log::info!("Wrote configuration to {}", path.display());
    Ok(path)
}

fn run_export<W: Write>(tracker: &Tracker, args: &ExportArgs, out: &mut W) -> Result<()> {
    let path = match (args.format, &args.output) {
        (ExportFormat::Json, None) => tracker
            .export_snapshot()
            .context("Failed to export JSON snapshot")?,
        (ExportFormat::Json, Some(path)) => {
            tracker
                .export_json_to(path)
                .with_context(|| format!("Failed to export to {}", path.display()))?;
            path.clone()
        }
        (ExportFormat::Csv, output) => {
            let path = output
                .clone()
                .unwrap_or_else(|| tracker.paths().export_file.with_extension("csv"));
            tracker
                .export_csv_to(&path)
                .with_context(|| format!("Failed to export to {}", path.display()))?;
            path
        }
    };
    writeln!(out, "Data exported ({}) to {}", args.format, path.display())?;
    Ok(())
}

fn confirmed<R: BufRead, W: Write>(
    args: &ConfirmArgs,
    warning: &str,
    input: &mut R,
    out: &mut W,
) -> Result<bool> {
    if args.yes {
        return Ok(true);
    }
    writeln!(out, "{} {}", "Warning:".yellow().bold(), warning)?;
    write!(out, "Are you sure? (y/n): ")?;
    out.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}
