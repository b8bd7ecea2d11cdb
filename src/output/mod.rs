//! Output formatters for attendance data.
//!
//! This module provides different output formats:
//! - JSON snapshot of users, logs and summary counts
//! - CSV log history for spreadsheet import
//! - Fixed-width text tables for the terminal
//!
//! # Example
//!
//! ```
//! use badgelog::output::json::JsonOutput;
//! use badgelog::store::RecordStore;
//!
//! let store = RecordStore::new();
//! let output = JsonOutput::new(&store);
//! println!("{}", output.to_json_pretty().unwrap());
//! ```

pub mod csv;
pub mod json;
pub mod table;

// Re-export main types
pub use csv::CsvOutput;
pub use json::{ExportError, JsonOutput};
