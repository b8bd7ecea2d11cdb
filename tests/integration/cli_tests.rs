use badgelog::cli::Cli;
use badgelog::config::Config;
use badgelog::error::ExitCode;
use badgelog::run_with;
use badgelog::store::{Status, StorePaths, Tracker};
use clap::Parser;
use std::fs;
use std::io::Cursor;
use std::path::Path;
use tempfile::tempdir;

/// Run one command against `dir`, with `stdin` as the typed input.
fn run_in(dir: &Path, args: &[&str], stdin: &str) -> (anyhow::Result<ExitCode>, String) {
    let data_dir = dir.join("data");
    let config = dir.join("config.toml");
    let mut argv = vec![
        "badgelog",
        "--no-color",
        "--config",
        config.to_str().unwrap(),
        "--data-dir",
        data_dir.to_str().unwrap(),
    ];
    argv.extend_from_slice(args);

    let cli = Cli::try_parse_from(argv).unwrap();
    let mut out = Vec::new();
    let result = run_with(cli, Cursor::new(stdin.to_string()), &mut out);
    (result, String::from_utf8(out).unwrap())
}

fn seed(dir: &Path) {
    let (result, _) = run_in(dir, &["add-user", "abc123", "Ada Lovelace", "--role", "student"], "");
    assert_eq!(result.unwrap(), ExitCode::Success);
    let (result, out) = run_in(dir, &["scan", "abc123"], "");
    assert_eq!(result.unwrap(), ExitCode::Success);
    assert!(out.contains("SCAN SUCCESS: Ada Lovelace (abc123) - IN"));
}

#[test]
fn test_add_user_and_scan_persist() {
    let dir = tempdir().unwrap();
    seed(dir.path());

    let tracker = Tracker::open(StorePaths::in_dir(dir.path().join("data")));
    assert_eq!(tracker.total_users(), 1);
    assert_eq!(tracker.store().status_of("abc123"), Status::In);
}

#[test]
fn test_invalid_input_maps_to_exit_codes() {
    let dir = tempdir().unwrap();

    let (result, _) = run_in(dir.path(), &["add-user", "a!", "Ada", "--role", "staff"], "");
    assert_eq!(ExitCode::for_error(&result.unwrap_err()), ExitCode::InvalidInput);

    let (result, _) = run_in(dir.path(), &["scan", "ghost"], "");
    assert_eq!(ExitCode::for_error(&result.unwrap_err()), ExitCode::NotFound);
}

#[test]
fn test_export_csv_default_path() {
    let dir = tempdir().unwrap();
    seed(dir.path());

    let (result, out) = run_in(dir.path(), &["export", "--format", "csv"], "");
    assert_eq!(result.unwrap(), ExitCode::Success);

    let csv_path = dir.path().join("data").join("attendance.csv");
    assert!(out.contains("attendance.csv"));
    let content = fs::read_to_string(csv_path).unwrap();
    assert!(content.lines().nth(1).unwrap().starts_with("abc123,Ada Lovelace,IN,"));
}

#[test]
fn test_export_json_default_path() {
    let dir = tempdir().unwrap();
    seed(dir.path());

    let (result, _) = run_in(dir.path(), &["export"], "");
    assert_eq!(result.unwrap(), ExitCode::Success);
    assert!(dir.path().join("data").join("attendance.json").exists());
}

#[test]
fn test_clear_logs_prompt_declined() {
    let dir = tempdir().unwrap();
    seed(dir.path());

    let (result, out) = run_in(dir.path(), &["clear-logs"], "n\n");
    assert_eq!(result.unwrap(), ExitCode::Success);
    assert!(out.contains("Are you sure? (y/n)"));
    assert!(out.contains("Operation cancelled."));

    let tracker = Tracker::open(StorePaths::in_dir(dir.path().join("data")));
    assert_eq!(tracker.total_scans(), 1);
}

#[test]
fn test_clear_logs_prompt_accepted() {
    let dir = tempdir().unwrap();
    seed(dir.path());

    let (result, out) = run_in(dir.path(), &["clear-logs"], "y\n");
    assert_eq!(result.unwrap(), ExitCode::Success);
    assert!(out.contains("Daily logs cleared."));

    let tracker = Tracker::open(StorePaths::in_dir(dir.path().join("data")));
    assert_eq!(tracker.total_scans(), 0);
    assert_eq!(tracker.store().status_of("abc123"), Status::Out);
}

#[test]
fn test_clear_all_with_yes_skips_prompt() {
    let dir = tempdir().unwrap();
    seed(dir.path());

    let (result, out) = run_in(dir.path(), &["clear-all", "--yes"], "");
    assert_eq!(result.unwrap(), ExitCode::Success);
    assert!(!out.contains("Are you sure?"));
    assert!(out.contains("All data cleared."));

    let tracker = Tracker::open(StorePaths::in_dir(dir.path().join("data")));
    assert_eq!(tracker.total_users(), 0);
}

#[test]
fn test_menu_reads_injected_input() {
    let dir = tempdir().unwrap();
    seed(dir.path());

    let (result, out) = run_in(dir.path(), &["menu"], "5\n0\n");
    assert_eq!(result.unwrap(), ExitCode::Success);
    assert!(out.contains("CURRENT USER STATUS"));
    assert!(out.contains("GOODBYE"));
}

#[test]
fn test_init_config_writes_and_refuses_overwrite() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("written.toml");
    let target_str = target.to_str().unwrap();

    let (result, out) = run_in(dir.path(), &["init-config", "--output", target_str], "");
    assert_eq!(result.unwrap(), ExitCode::Success);
    assert!(out.contains("Configuration written to"));

    let written = Config::load_from_path(&target);
    assert_eq!(written.data_dir, dir.path().join("data"));
    assert!(!written.color);
    assert!(!dir.path().join("data").exists());

    let (result, _) = run_in(dir.path(), &["init-config", "--output", target_str], "");
    assert!(result.unwrap_err().to_string().contains("already exists"));

    let (result, _) = run_in(
        dir.path(),
        &["init-config", "--output", target_str, "--force"],
        "",
    );
    assert_eq!(result.unwrap(), ExitCode::Success);
}
