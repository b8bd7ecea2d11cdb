//! CSV output of the scan-log history.
//!
//! One row per scan, oldest first.
//!
//! # Columns
//!
//! - `user_id`: Badge id of the scanned user
//! - `user_name`: Name recorded at scan time
//! - `action`: `IN` or `OUT`
//! - `timestamp`: Local time, `YYYY-MM-DD HH:MM:SS`
//! - `unix_timestamp`: Seconds since the Unix epoch

use std::io;

use serde::Serialize;

use super::json::ExportError;
use crate::report;
use crate::store::{ScanLog, Status};

/// A single row in the CSV output.
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    user_id: &'a str,
    user_name: &'a str,
    action: Status,
    timestamp: String,
    unix_timestamp: i64,
}

/// CSV output formatter.
pub struct CsvOutput<'a> {
    logs: &'a [ScanLog],
}

impl<'a> CsvOutput<'a> {
    /// Create a new CSV output formatter over logs in any order.
    #[must_use]
    pub fn new(logs: &'a [ScanLog]) -> Self {
        Self { logs }
    }

    /// Write the CSV output to the given writer.
    ///
    /// # Errors
    ///
    /// Returns `ExportError` if writing or serialization fails.
    pub fn write_to<W: io::Write>(&self, writer: W) -> Result<(), ExportError> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        for log in report::sorted_logs(self.logs) {
            csv_writer.serialize(CsvRow {
                user_id: &log.user_id,
                user_name: &log.user_name,
                action: log.action,
                timestamp: log.formatted_time(),
                unix_timestamp: log.timestamp,
            })?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Generate CSV output as a string.
    ///
    /// # Errors
    ///
    /// Returns `ExportError` if serialization fails.
    pub fn to_string(&self) -> Result<String, ExportError> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).to_string())
    }
}
