//! Input validation for the interactive shell and CLI.
//!
//! The store itself accepts any non-empty id; these rules are applied
//! before calling into it.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use clap::ValueEnum;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Allowed user roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Enrolled student
    Student,
    /// Non-teaching staff
    Staff,
    /// Teaching faculty
    Faculty,
}

impl Role {
    /// All roles in menu order.
    pub const ALL: [Role; 3] = [Role::Student, Role::Staff, Role::Faculty];

    /// Lowercase name stored on the user record.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Staff => "staff",
            Self::Faculty => "faculty",
        }
    }

    /// Role for a 1-based menu choice.
    #[must_use]
    pub fn from_choice(choice: u32) -> Option<Self> {
        match choice {
            1 => Some(Self::Student),
            2 => Some(Self::Staff),
            3 => Some(Self::Faculty),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == s.trim())
            .ok_or_else(|| ValidationError::InvalidRole(s.to_string()))
    }
}

/// Reasons an input value is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("User ID cannot be empty.")]
    EmptyId,

    #[error("Invalid User ID format. Use 3-10 alphanumeric characters only.")]
    InvalidId,

    #[error("Name cannot be empty.")]
    EmptyName,

    #[error("Invalid name format. Use 2-50 letters, spaces, dots, hyphens and apostrophes only.")]
    InvalidName,

    #[error("Invalid role '{0}'. Choose student, staff or faculty.")]
    InvalidRole(String),
}

fn id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z0-9]{3,10}$").expect("valid id regex"))
}

fn name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // Letters plus space, period, hyphen and apostrophe; no edge spaces.
    PATTERN.get_or_init(|| {
        Regex::new(r"^[\p{L}.'\-](?:[\p{L} .'\-]*[\p{L}.'\-])?$").expect("valid name regex")
    })
}

/// Trim surrounding spaces and check a user id.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyId`] or [`ValidationError::InvalidId`].
pub fn validate_user_id(input: &str) -> Result<String, ValidationError> {
    let id = input.trim();
    if id.is_empty() {
        return Err(ValidationError::EmptyId);
    }
    if !id_pattern().is_match(id) {
        return Err(ValidationError::InvalidId);
    }
    Ok(id.to_string())
}

/// Trim surrounding spaces and check a display name.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyName`] or [`ValidationError::InvalidName`].
pub fn validate_name(input: &str) -> Result<String, ValidationError> {
    let name = input.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    let len = name.chars().count();
    if !(2..=50).contains(&len) || !name_pattern().is_match(name) {
        return Err(ValidationError::InvalidName);
    }
    Ok(name.to_string())
}
