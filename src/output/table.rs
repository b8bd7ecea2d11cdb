//! Fixed-width text reports for the terminal.
//!
//! Headings are styled through `yansi`; call [`yansi::disable`] (done by
//! `--no-color`) to get plain text.

use std::io::{self, Write};

use yansi::Paint;

use crate::report::DailyReportRow;
use crate::store::{ScanLog, Status, User};

fn heading<W: Write>(w: &mut W, title: &str) -> io::Result<()> {
    writeln!(w, "\n{}", format!("=== {title} ===").bold())
}

fn rule<W: Write>(w: &mut W, width: usize) -> io::Result<()> {
    writeln!(w, "{}", "-".repeat(width))
}

/// All scan logs, already sorted by the caller.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_all_logs<W: Write>(w: &mut W, logs: &[ScanLog]) -> io::Result<()> {
    heading(w, "ALL SCAN LOGS (Sorted by Time)")?;
    writeln!(w, "{:<12}{:<20}{:<8}Timestamp", "User ID", "Name", "Action")?;
    rule(w, 60)?;
    for log in logs {
        writeln!(
            w,
            "{:<12}{:<20}{:<8}{}",
            log.user_id,
            log.user_name,
            log.action,
            log.formatted_time()
        )?;
    }
    writeln!(w, "\nTotal scans: {}", logs.len())
}

/// Logs for a single user.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_user_logs<W: Write>(w: &mut W, user_id: &str, logs: &[ScanLog]) -> io::Result<()> {
    if logs.is_empty() {
        return writeln!(w, "No logs found for user: {user_id}");
    }
    heading(w, &format!("LOGS FOR USER: {user_id}"))?;
    writeln!(w, "{:<8}Timestamp", "Action")?;
    rule(w, 38)?;
    for log in logs {
        writeln!(w, "{:<8}{}", log.action, log.formatted_time())?;
    }
    writeln!(w, "Total entries: {}", logs.len())
}

/// Current status of every user.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_user_status<W: Write>(w: &mut W, rows: &[(&User, Status)]) -> io::Result<()> {
    heading(w, "CURRENT USER STATUS")?;
    writeln!(w, "{:<12}{:<20}{:<10}Status", "User ID", "Name", "Role")?;
    rule(w, 50)?;
    for (user, status) in rows {
        let label = status.as_str();
        let label = match status {
            Status::In => label.green(),
            Status::Out => label.red(),
        };
        writeln!(w, "{:<12}{:<20}{:<10}{}", user.id, user.name, user.role, label)?;
    }
    Ok(())
}

/// Per-user scan counts and last action.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_daily_report<W: Write>(w: &mut W, rows: &[DailyReportRow<'_>]) -> io::Result<()> {
    heading(w, "DAILY ATTENDANCE REPORT")?;
    writeln!(
        w,
        "{:<12}{:<20}{:<12}Last Action",
        "User ID", "Name", "Total Scans"
    )?;
    rule(w, 60)?;
    for row in rows {
        writeln!(
            w,
            "{:<12}{:<20}{:<12}{}",
            row.user.id,
            row.user.name,
            row.scan_count,
            row.last_action_label()
        )?;
    }
    Ok(())
}

/// Registered users.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_users<W: Write>(w: &mut W, users: &[User]) -> io::Result<()> {
    heading(w, "REGISTERED USERS")?;
    writeln!(w, "{:<12}{:<20}Role", "User ID", "Name")?;
    rule(w, 40)?;
    for user in users {
        writeln!(w, "{:<12}{:<20}{}", user.id, user.name, user.role)?;
    }
    writeln!(w, "\nTotal users: {}", users.len())
}
