//! Read-only views derived from the record store.
//!
//! Nothing here mutates the store or is persisted.
//!
//! # Example
//!
//! ```
//! use badgelog::report::{daily_report, sorted_logs};
//! use badgelog::store::{RecordStore, Status, User};
//!
//! let mut store = RecordStore::new();
//! store.add_user(User::new("abc123", "Ada Lovelace", "student")).unwrap();
//! store.scan_at("abc123", 20).unwrap();
//! store.scan_at("abc123", 10).unwrap();
//!
//! let logs = sorted_logs(store.logs());
//! assert_eq!(logs[0].timestamp, 10);
//!
//! let report = daily_report(&store);
//! assert_eq!(report[0].scan_count, 2);
//! assert_eq!(report[0].last_action, Some(Status::Out));
//! ```

use std::collections::HashMap;

use crate::store::{RecordStore, ScanLog, Status, User};

/// One row of the daily attendance report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyReportRow<'a> {
    /// The user this row describes.
    pub user: &'a User,
    /// Logs for this user in the current log sequence.
    pub scan_count: usize,
    /// Action of this user's last log in sequence order, `None` if no logs.
    pub last_action: Option<Status>,
}

impl DailyReportRow<'_> {
    /// Last action as a display tag, `"NONE"` when there are no logs.
    #[must_use]
    pub fn last_action_label(&self) -> &'static str {
        self.last_action.map_or("NONE", Status::as_str)
    }
}

/// Logs sorted ascending by timestamp.
///
/// The sort is stable: equal timestamps keep their sequence order.
#[must_use]
pub fn sorted_logs(logs: &[ScanLog]) -> Vec<ScanLog> {
    let mut sorted = logs.to_vec();
    sorted.sort_by_key(|log| log.timestamp);
    sorted
}

/// Logs for one user id (exact match), sorted ascending by timestamp.
#[must_use]
pub fn search_logs(logs: &[ScanLog], user_id: &str) -> Vec<ScanLog> {
    let mut matches: Vec<ScanLog> = logs
        .iter()
        .filter(|log| log.user_id == user_id)
        .cloned()
        .collect();
    matches.sort_by_key(|log| log.timestamp);
    matches
}

/// Every user with their current status, in store order.
#[must_use]
pub fn status_view(store: &RecordStore) -> Vec<(&User, Status)> {
    store
        .users()
        .iter()
        .map(|user| (user, store.status_of(&user.id)))
        .collect()
}

/// Scan count and last action per user, in store order.
#[must_use]
pub fn daily_report(store: &RecordStore) -> Vec<DailyReportRow<'_>> {
    let mut tally: HashMap<&str, (usize, Status)> = HashMap::new();
    for log in store.logs() {
        let entry = tally.entry(log.user_id.as_str()).or_insert((0, log.action));
        entry.0 += 1;
        entry.1 = log.action;
    }

    store
        .users()
        .iter()
        .map(|user| {
            let (scan_count, last_action) = match tally.get(user.id.as_str()) {
                Some(&(count, action)) => (count, Some(action)),
                None => (0, None),
            };
            DailyReportRow {
                user,
                scan_count,
                last_action,
            }
        })
        .collect()
}
