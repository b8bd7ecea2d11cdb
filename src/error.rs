//! Structured error handling and exit codes.

use serde::Serialize;

/// Exit codes for the badgelog application.
///
/// - 0: Success
/// - 1: General error (unexpected failure, I/O)
/// - 2: Not found (unknown user id)
/// - 3: Rejected input (validation failure, duplicate id)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExitCode {
    /// Operation completed.
    Success = 0,
    /// An unexpected error occurred.
    GeneralError = 1,
    /// The referenced user id is not registered.
    NotFound = 2,
    /// Input was rejected before touching the store.
    InvalidInput = 3,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the machine-readable code prefix.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "BL000",
            Self::GeneralError => "BL001",
            Self::NotFound => "BL002",
            Self::InvalidInput => "BL003",
        }
    }

    /// Classify an application error.
    #[must_use]
    pub fn for_error(err: &anyhow::Error) -> Self {
        use crate::store::StoreError;
        use crate::validation::ValidationError;

        if let Some(store_err) = err.downcast_ref::<StoreError>() {
            return match store_err {
                StoreError::UnknownUser(_) => Self::NotFound,
                StoreError::EmptyId | StoreError::DuplicateUser(_) => Self::InvalidInput,
            };
        }
        if err.downcast_ref::<ValidationError>().is_some() {
            return Self::InvalidInput;
        }
        Self::GeneralError
    }
}

/// Structured error information for JSON output.
#[derive(Debug, Serialize)]
pub struct StructuredError {
    /// The error code (e.g., "BL001")
    pub code: String,
    /// The exit code number
    pub exit_code: i32,
    /// Human-readable error message, including its causes
    pub message: String,
}

impl StructuredError {
    /// Create a new structured error from an anyhow error and an exit code.
    #[must_use]
    pub fn new(err: &anyhow::Error, exit_code: ExitCode) -> Self {
        Self {
            code: exit_code.code_prefix().to_string(),
            exit_code: exit_code.as_i32(),
            message: format!("{err:#}"),
        }
    }
}
