//! JSON snapshot of the record store.
//!
//! The snapshot is write-only: nothing reads it back into a store.
//!
//! # Output Schema
//!
//! ```json
//! {
//!   "users": [
//!     { "id": "abc123", "name": "Ada Lovelace", "role": "student", "status": "IN" }
//!   ],
//!   "daily_logs": [
//!     {
//!       "user_id": "abc123",
//!       "user_name": "Ada Lovelace",
//!       "action": "IN",
//!       "timestamp": "2026-10-18 09:15:02",
//!       "unix_timestamp": 1792314902
//!     }
//!   ],
//!   "summary": {
//!     "total_users": 1,
//!     "total_scans": 1,
//!     "export_time": "2026-10-18 17:00:00"
//!   }
//! }
//! ```
//!
//! `daily_logs` is in ascending timestamp order, not append order.

use std::io::Write;
use std::path::PathBuf;

use serde::Serialize;

use crate::report;
use crate::store::record::current_time_string;
use crate::store::{RecordStore, ScanLog, Status, User};

/// A user in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonUser {
    pub id: String,
    pub name: String,
    pub role: String,
    pub status: Status,
}

impl JsonUser {
    fn from_user(user: &User, status: Status) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            role: user.role.clone(),
            status,
        }
    }
}

/// A scan log in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonScanLog {
    pub user_id: String,
    pub user_name: String,
    pub action: Status,
    /// Local time, `YYYY-MM-DD HH:MM:SS`
    pub timestamp: String,
    /// Seconds since the Unix epoch
    pub unix_timestamp: i64,
}

impl JsonScanLog {
    /// Convert a scan log, formatting its timestamp in local time.
    #[must_use]
    pub fn from_scan_log(log: &ScanLog) -> Self {
        Self {
            user_id: log.user_id.clone(),
            user_name: log.user_name.clone(),
            action: log.action,
            timestamp: log.formatted_time(),
            unix_timestamp: log.timestamp,
        }
    }
}

/// Summary counts in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonSummary {
    /// Number of registered users
    pub total_users: usize,
    /// Number of scan logs
    pub total_scans: usize,
    /// Local wall-clock time of the export
    pub export_time: String,
}

/// Complete JSON snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput {
    /// Users in store order
    pub users: Vec<JsonUser>,
    /// Logs in ascending timestamp order
    pub daily_logs: Vec<JsonScanLog>,
    /// Counts and export time
    pub summary: JsonSummary,
}

impl JsonOutput {
    /// Build a snapshot of the store, stamped with the current time.
    ///
    /// # Example
    ///
    /// ```
    /// use badgelog::output::json::JsonOutput;
    /// use badgelog::store::{RecordStore, User};
    ///
    /// let mut store = RecordStore::new();
    /// store.add_user(User::new("abc123", "Ada Lovelace", "student")).unwrap();
    ///
    /// let output = JsonOutput::new(&store);
    /// assert_eq!(output.users.len(), 1);
    /// assert_eq!(output.summary.total_scans, 0);
    /// ```
    #[must_use]
    pub fn new(store: &RecordStore) -> Self {
        Self {
            users: report::status_view(store)
                .into_iter()
                .map(|(user, status)| JsonUser::from_user(user, status))
                .collect(),
            daily_logs: report::sorted_logs(store.logs())
                .iter()
                .map(JsonScanLog::from_scan_log)
                .collect(),
            summary: JsonSummary {
                total_users: store.total_users(),
                total_scans: store.total_scans(),
                export_time: current_time_string(),
            },
        }
    }

    /// Serialize to compact JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (unlikely for valid data).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize to pretty-printed JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (unlikely for valid data).
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write JSON to a writer, followed by a newline.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W, pretty: bool) -> Result<(), ExportError> {
        let json = if pretty {
            self.to_json_pretty()?
        } else {
            self.to_json()?
        };
        writer.write_all(json.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}

/// Errors that can occur while exporting.
#[derive(thiserror::Error, Debug)]
pub enum ExportError {
    /// The export file could not be created
    #[error("Error opening file for export: {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// CSV serialization error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error during writing
    #[error("I/O error during export: {0}")]
    Io(#[from] std::io::Error),
}
