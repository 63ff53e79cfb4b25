//! Secret identifiers and the persisted record type.
//!
//! `SecretId` is the single normalized identifier type used past the
//! boundary.  Any textual UUID form is accepted on input; storage always
//! uses the canonical lowercase hyphenated form.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::errors::{Result, VaultError};

/// Opaque identifier of a stored secret (a random UUID v4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SecretId(Uuid);

impl SecretId {
    /// Generate a fresh random identifier.
    ///
    /// Never derived from the record's content.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse any valid textual form (hyphenated, simple, braced, URN).
    ///
    /// A malformed identifier cannot name a record, so it is reported as
    /// `NotFound` rather than as a distinct parse error.
    pub fn parse(text: &str) -> Result<Self> {
        Uuid::parse_str(text.trim())
            .map(Self)
            .map_err(|_| VaultError::NotFound)
    }

    /// The canonical text used as the storage key.
    pub fn as_key(&self) -> String {
        self.0.hyphenated().to_string()
    }
}

impl fmt::Display for SecretId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for SecretId {
    type Err = VaultError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// A single encrypted secret as stored in the backing database.
#[derive(Debug, Clone)]
pub struct SecretRecord {
    pub id: SecretId,

    /// Base64 envelope produced by the cipher engine.
    pub ciphertext: String,

    /// When this secret was created.  Informational only.
    pub created_at: DateTime<Utc>,
}
