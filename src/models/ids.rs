//! Stable identifier for expense records
//!
//! Records are addressed by id rather than by their position in a sorted or
//! filtered view, so an edit always lands on the record the user saw.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

const DISPLAY_PREFIX: &str = "exp-";

/// Synthetic identifier assigned to an expense when it is created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(Uuid);

impl ExpenseId {
    /// Create a new random ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// The short form shown in tables, e.g. `exp-1a2b3c4d`
    pub fn short(&self) -> String {
        format!("{}{}", DISPLAY_PREFIX, &self.0.simple().to_string()[..8])
    }

    /// Whether `query` names this id, either as a full UUID or as a prefix
    /// of its hex digits (with or without the `exp-` display prefix)
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim();
        let query = query.strip_prefix(DISPLAY_PREFIX).unwrap_or(query);
        if query.is_empty() {
            return false;
        }
        if let Ok(uuid) = Uuid::parse_str(query) {
            return uuid == self.0;
        }
        self.0
            .simple()
            .to_string()
            .starts_with(&query.to_ascii_lowercase())
    }
}

impl Default for ExpenseId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for ExpenseId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl FromStr for ExpenseId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_prefix(DISPLAY_PREFIX).unwrap_or(s);
        Ok(Self(Uuid::parse_str(s)?))
    }
}
