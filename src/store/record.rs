//! Domain records held by the store.

use std::fmt;
use std::str::FromStr;

use chrono::{Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Display format used for scan timestamps and export times.
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Presence state of a user, and the action recorded by a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Status {
    /// Badged in.
    #[serde(rename = "IN")]
    In,
    /// Badged out, or never scanned.
    #[default]
    #[serde(rename = "OUT")]
    Out,
}

impl Status {
    /// The wire/display tag: `"IN"` or `"OUT"`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::In => "IN",
            Self::Out => "OUT",
        }
    }

    /// The state a scan moves this status to.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Out => Self::In,
            Self::In => Self::Out,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Error returned when a string is not a valid status tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid status tag: '{0}' (expected IN or OUT)")]
pub struct ParseStatusError(pub String);

impl FromStr for Status {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IN" => Ok(Self::In),
            "OUT" => Ok(Self::Out),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

/// A registered badge holder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Short alphanumeric badge id, unique within the store.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Free-form role; the shell restricts it to student/staff/faculty.
    pub role: String,
}

impl User {
    /// Create a new user record.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role: role.into(),
        }
    }
}

/// One badge scan.
///
/// `user_name` is copied from the user at scan time and never updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanLog {
    /// Id of the scanned user. Not checked against the user table.
    pub user_id: String,
    /// Name of the user when the scan happened.
    pub user_name: String,
    /// Status the user moved to.
    pub action: Status,
    /// Seconds since the Unix epoch.
    pub timestamp: i64,
}

impl ScanLog {
    /// Create a log stamped with the current host time.
    #[must_use]
    pub fn new(user_id: impl Into<String>, user_name: impl Into<String>, action: Status) -> Self {
        Self::at(user_id, user_name, action, Utc::now().timestamp())
    }

    /// Create a log with an explicit timestamp.
    #[must_use]
    pub fn at(
        user_id: impl Into<String>,
        user_name: impl Into<String>,
        action: Status,
        timestamp: i64,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            user_name: user_name.into(),
            action,
            timestamp,
        }
    }

    /// Timestamp rendered in local time as `YYYY-MM-DD HH:MM:SS`.
    #[must_use]
    pub fn formatted_time(&self) -> String {
        format_local(self.timestamp)
    }
}

/// Render Unix seconds as local time, falling back to the raw number.
#[must_use]
pub fn format_local(timestamp: i64) -> String {
    match Local.timestamp_opt(timestamp, 0).single() {
        Some(dt) => dt.format(TIME_FORMAT).to_string(),
        None => timestamp.to_string(),
    }
}

/// Current local wall-clock time as `YYYY-MM-DD HH:MM:SS`.
#[must_use]
pub fn current_time_string() -> String {
    Local::now().format(TIME_FORMAT).to_string()
}
