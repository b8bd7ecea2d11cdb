//! In-memory record store.
//!
//! Holds the users, the scan-log sequence and the per-user status map for
//! the lifetime of the process. This is the only mutation surface; all
//! persistence goes through [`crate::store::codec`].
//!
//! Every user in the store has exactly one status entry and the status map
//! has no entries for unknown ids. Each mutator keeps that true.

use std::collections::HashMap;

use thiserror::Error;

use super::record::{ScanLog, Status, User};

/// Errors returned by store mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// User id was empty.
    #[error("user id cannot be empty")]
    EmptyId,

    /// A user with this id is already registered.
    #[error("user id '{0}' already exists")]
    DuplicateUser(String),

    /// No user with this id is registered.
    #[error("user id '{0}' not found")]
    UnknownUser(String),
}

/// Authoritative in-memory holder of users, scan logs and status.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    users: Vec<User>,
    /// id -> position in `users`
    index: HashMap<String, usize>,
    logs: Vec<ScanLog>,
    status: HashMap<String, Status>,
}

impl RecordStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from decoded parts.
    ///
    /// Users keep their order. A repeated id keeps its first occurrence.
    /// Users without a status are reconciled to [`Status::Out`].
    #[must_use]
    pub fn from_parts(users: Vec<(User, Option<Status>)>, logs: Vec<ScanLog>) -> Self {
        let mut store = Self::new();
        for (user, status) in users {
            if store.index.contains_key(&user.id) {
                log::warn!("Skipping duplicate user id in stored data: {}", user.id);
                continue;
            }
            if let Some(status) = status {
                store.status.insert(user.id.clone(), status);
            }
            store.index.insert(user.id.clone(), store.users.len());
            store.users.push(user);
        }
        store.logs = logs;

        let repaired = store.reconcile();
        if repaired > 0 {
            log::debug!("Reconciled {} status entries after load", repaired);
        }
        store
    }

    /// Register a new user with status `OUT`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::EmptyId`] or [`StoreError::DuplicateUser`];
    /// the store is unchanged in both cases.
    pub fn add_user(&mut self, user: User) -> Result<(), StoreError> {
        if user.id.is_empty() {
            return Err(StoreError::EmptyId);
        }
        if self.index.contains_key(&user.id) {
            return Err(StoreError::DuplicateUser(user.id));
        }

        self.status.insert(user.id.clone(), Status::Out);
        self.index.insert(user.id.clone(), self.users.len());
        self.users.push(user);
        Ok(())
    }

    /// Look up a user by exact id.
    #[must_use]
    pub fn find_user(&self, id: &str) -> Option<&User> {
        self.index.get(id).map(|&pos| &self.users[pos])
    }

    /// Record a scan stamped with the current host time.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UnknownUser`] without touching state when the
    /// id is not registered.
    pub fn scan(&mut self, user_id: &str) -> Result<ScanLog, StoreError> {
        let (user_name, next) = self.toggle(user_id)?;
        Ok(self.push_log(ScanLog::new(user_id, user_name, next)))
    }

    /// Record a scan with an explicit timestamp.
    ///
    /// Flips the user's status unconditionally and appends one log whose
    /// action is the new status.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UnknownUser`] without touching state when the
    /// id is not registered.
    pub fn scan_at(&mut self, user_id: &str, timestamp: i64) -> Result<ScanLog, StoreError> {
        let (user_name, next) = self.toggle(user_id)?;
        Ok(self.push_log(ScanLog::at(user_id, user_name, next, timestamp)))
    }

    /// Flip a registered user's status, returning their name and the new status.
    fn toggle(&mut self, user_id: &str) -> Result<(String, Status), StoreError> {
        let user_name = self
            .find_user(user_id)
            .ok_or_else(|| StoreError::UnknownUser(user_id.to_string()))?
            .name
            .clone();

        let next = self.status_of(user_id).toggled();
        self.status.insert(user_id.to_string(), next);
        Ok((user_name, next))
    }

    fn push_log(&mut self, entry: ScanLog) -> ScanLog {
        self.logs.push(entry.clone());
        entry
    }

    /// Current status of a user. Unknown ids read as `OUT`.
    #[must_use]
    pub fn status_of(&self, user_id: &str) -> Status {
        self.status.get(user_id).copied().unwrap_or_default()
    }

    /// Drop all scan logs and set every user `OUT`. Users are kept.
    pub fn clear_daily_logs(&mut self) {
        self.logs.clear();
        for status in self.status.values_mut() {
            *status = Status::Out;
        }
        self.reconcile();
    }

    /// Drop users, logs and status.
    pub fn clear_all_data(&mut self) {
        self.users.clear();
        self.index.clear();
        self.logs.clear();
        self.status.clear();
    }

    /// Give every user exactly one status entry.
    ///
    /// Missing entries become `OUT`; entries for ids with no user are
    /// removed. Returns the number of entries added or removed.
    pub fn reconcile(&mut self) -> usize {
        let mut repaired = 0;
        for user in &self.users {
            if !self.status.contains_key(&user.id) {
                self.status.insert(user.id.clone(), Status::Out);
                repaired += 1;
            }
        }

        let before = self.status.len();
        let index = &self.index;
        self.status.retain(|id, _| index.contains_key(id));
        repaired + (before - self.status.len())
    }

    /// Users in registration order.
    #[must_use]
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Scan logs in append order.
    #[must_use]
    pub fn logs(&self) -> &[ScanLog] {
        &self.logs
    }

    /// Number of registered users.
    #[must_use]
    pub fn total_users(&self) -> usize {
        self.users.len()
    }

    /// Number of scan logs currently held.
    #[must_use]
    pub fn total_scans(&self) -> usize {
        self.logs.len()
    }

    /// Whether the store holds no users and no logs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty() && self.logs.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn status_len(&self) -> usize {
        self.status.len()
    }
}
