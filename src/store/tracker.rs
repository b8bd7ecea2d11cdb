//! Record store bound to its storage directory.
//!
//! [`Tracker`] is what the shell talks to. It loads the binary store on
//! open, writes the full store back after every mutation, and produces
//! exports on demand. A failed auto-save is logged and leaves the tracker
//! dirty; the in-memory state stays authoritative for the rest of the run.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use super::codec::{self, CodecError};
use super::record::{ScanLog, Status, User};
use super::records::{RecordStore, StoreError};
use crate::config::Config;
use crate::output::csv::CsvOutput;
use crate::output::json::{ExportError, JsonOutput};
use crate::report::{self, DailyReportRow};

/// Locations of the files a tracker reads and writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorePaths {
    /// Directory holding both files. Created on open if absent.
    pub data_dir: PathBuf,
    /// Binary store file.
    pub store_file: PathBuf,
    /// JSON export file.
    pub export_file: PathBuf,
}

impl StorePaths {
    /// Paths for the default file names inside `data_dir`.
    #[must_use]
    pub fn in_dir(data_dir: impl Into<PathBuf>) -> Self {
        let config = Config {
            data_dir: data_dir.into(),
            ..Config::default()
        };
        Self::from_config(&config)
    }

    /// Paths described by a loaded configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            data_dir: config.data_dir.clone(),
            store_file: config.data_dir.join(&config.store_file),
            export_file: config.data_dir.join(&config.export_file),
        }
    }
}

/// Attendance tracker with auto-save.
#[derive(Debug)]
pub struct Tracker {
    store: RecordStore,
    paths: StorePaths,
    dirty: bool,
}

impl Tracker {
    /// Open the tracker, loading any previously saved store.
    ///
    /// Never fails: a missing directory is created (failure is logged), a
    /// missing file starts empty, and an unreadable or incompatible file is
    /// logged and ignored.
    #[must_use]
    pub fn open(paths: StorePaths) -> Self {
        if let Err(e) = fs::create_dir_all(&paths.data_dir) {
            log::error!(
                "Error creating data directory {}: {}",
                paths.data_dir.display(),
                e
            );
        }

        let store = match codec::load(&paths.store_file) {
            Ok(Some(store)) => store,
            Ok(None) => {
                log::debug!(
                    "No store at {}, starting empty",
                    paths.store_file.display()
                );
                RecordStore::new()
            }
            Err(e @ CodecError::UnsupportedVersion { .. }) => {
                log::warn!("Ignoring stored data: {}", e);
                RecordStore::new()
            }
            Err(e) => {
                log::error!("Failed to load stored data, starting empty: {}", e);
                RecordStore::new()
            }
        };

        Self {
            store,
            paths,
            dirty: false,
        }
    }

    /// Register a user and persist.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the id is empty or already registered.
    pub fn add_user(&mut self, id: &str, name: &str, role: &str) -> Result<(), StoreError> {
        self.store.add_user(User::new(id, name, role))?;
        log::info!("User added: {} ({}) - {}", name, id, role);
        self.auto_save();
        Ok(())
    }

    /// Look up a user by exact id.
    #[must_use]
    pub fn find_user(&self, id: &str) -> Option<&User> {
        self.store.find_user(id)
    }

    /// Toggle a user's status, log the scan and persist.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UnknownUser`] when the id is not registered;
    /// nothing is logged or saved in that case.
    pub fn scan(&mut self, user_id: &str) -> Result<ScanLog, StoreError> {
        let entry = self.store.scan(user_id).map_err(|e| {
            log::warn!("Scan rejected: {}", e);
            e
        })?;
        log::info!(
            "Scan: {} ({}) - {} at {}",
            entry.user_name,
            entry.user_id,
            entry.action,
            entry.formatted_time()
        );
        self.auto_save();
        Ok(entry)
    }

    /// Logs for one user, oldest first.
    #[must_use]
    pub fn search_logs(&self, user_id: &str) -> Vec<ScanLog> {
        report::search_logs(self.store.logs(), user_id)
    }

    /// All logs, oldest first.
    #[must_use]
    pub fn all_logs_sorted(&self) -> Vec<ScanLog> {
        report::sorted_logs(self.store.logs())
    }

    /// Every user with their current status.
    #[must_use]
    pub fn user_status_view(&self) -> Vec<(&User, Status)> {
        report::status_view(&self.store)
    }

    /// Per-user scan counts and last action.
    #[must_use]
    pub fn daily_report_view(&self) -> Vec<DailyReportRow<'_>> {
        report::daily_report(&self.store)
    }

    /// Write the store to disk.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Io`] if the store file cannot be written.
    pub fn save(&mut self) -> Result<(), CodecError> {
        codec::save(&self.store, &self.paths.store_file)?;
        self.dirty = false;
        Ok(())
    }

    /// Write the JSON snapshot to the configured export file.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError`] if the file cannot be created or written.
    pub fn export_snapshot(&self) -> Result<PathBuf, ExportError> {
        let path = self.paths.export_file.clone();
        self.export_json_to(&path)?;
        Ok(path)
    }

    /// Write the JSON snapshot to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError`] if the file cannot be created or written.
    pub fn export_json_to(&self, path: &Path) -> Result<(), ExportError> {
        let file = File::create(path).map_err(|source| ExportError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        JsonOutput::new(&self.store).write_to(&mut writer, true)?;
        log::info!("Exported snapshot to {}", path.display());
        Ok(())
    }

    /// Write the sorted log history as CSV to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError`] if the file cannot be created or written.
    pub fn export_csv_to(&self, path: &Path) -> Result<(), ExportError> {
        let file = File::create(path).map_err(|source| ExportError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        CsvOutput::new(self.store.logs()).write_to(file)?;
        log::info!("Exported log history to {}", path.display());
        Ok(())
    }

    /// Drop all logs, set every user `OUT`, persist.
    pub fn clear_daily_logs(&mut self) {
        self.store.clear_daily_logs();
        log::info!("Daily logs cleared and all users set to OUT");
        self.auto_save();
    }

    /// Drop all users, logs and status, persist.
    pub fn clear_all_data(&mut self) {
        self.store.clear_all_data();
        log::info!("All data cleared");
        self.auto_save();
    }

    /// Number of registered users.
    #[must_use]
    pub fn total_users(&self) -> usize {
        self.store.total_users()
    }

    /// Number of scan logs held.
    #[must_use]
    pub fn total_scans(&self) -> usize {
        self.store.total_scans()
    }

    /// Read access to the underlying store.
    #[must_use]
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// File locations in use.
    #[must_use]
    pub fn paths(&self) -> &StorePaths {
        &self.paths
    }

    /// Whether in-memory state is ahead of the last successful save.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn auto_save(&mut self) {
        self.dirty = true;
        if let Err(e) = self.save() {
            log::error!("Auto-save failed, continuing in memory: {}", e);
        }
    }
}
