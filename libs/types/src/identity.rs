//! Session and student identity types
//!
//! A session is identified by a UUID v7 so log lines from one sitting sort
//! chronologically. The student identity is free text captured once at the
//! start of the session and gates every scenario view.

use crate::errors::IdentityError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Prompt shown while the identity gate is closed.
pub const IDENTITY_PROMPT: &str = "Please enter Student Name and Roll Number to proceed.";

/// Unique identifier for a workbook session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Create a new SessionId with current timestamp
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Student name and roll number
///
/// Invariant: both fields are non-empty after trimming.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawIdentity")]
pub struct StudentIdentity {
    name: String,
    roll_number: String,
}

impl StudentIdentity {
    /// Validate and build an identity. Surrounding whitespace is dropped.
    pub fn new(
        name: impl AsRef<str>,
        roll_number: impl AsRef<str>,
    ) -> Result<Self, IdentityError> {
        let name = name.as_ref().trim();
        let roll_number = roll_number.as_ref().trim();

        if name.is_empty() {
            return Err(IdentityError::MissingName);
        }
        if roll_number.is_empty() {
            return Err(IdentityError::MissingRollNumber);
        }

        Ok(Self {
            name: name.to_owned(),
            roll_number: roll_number.to_owned(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn roll_number(&self) -> &str {
        &self.roll_number
    }

    /// Roll number made safe for use as a file name prefix.
    ///
    /// Path separators and characters rejected by common file systems are
    /// replaced with `_`.
    pub fn file_stem(&self) -> String {
        self.roll_number
            .chars()
            .map(|c| match c {
                '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
                c if c.is_control() => '_',
                c => c,
            })
            .collect()
    }
}

#[derive(Deserialize)]
struct RawIdentity {
    name: String,
    roll_number: String,
}

impl TryFrom<RawIdentity> for StudentIdentity {
    type Error = IdentityError;

    fn try_from(raw: RawIdentity) -> Result<Self, Self::Error> {
        Self::new(raw.name, raw.roll_number)
    }
}

impl fmt::Display for StudentIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.roll_number)
    }
}
