//! Durable record store for users, scan logs and presence status.
//!
//! # Architecture
//!
//! * [`record`]: `User`, `ScanLog` and `Status`.
//! * [`records`]: the in-memory [`RecordStore`] and its mutation rules.
//! * [`codec`]: versioned binary layout with an integrity checksum.
//! * [`tracker`]: a store bound to its storage directory, with auto-save
//!   after every mutation.
//!
//! # Reconciliation
//!
//! Status is derived state that is persisted for fast restarts. On load,
//! any user without a status entry is set to `OUT`, and status entries for
//! unknown ids are dropped.

pub mod codec;
pub mod record;
pub mod records;
pub mod tracker;

pub use codec::{CodecError, STORE_VERSION};
pub use record::{ScanLog, Status, User};
pub use records::{RecordStore, StoreError};
pub use tracker::{StorePaths, Tracker};
