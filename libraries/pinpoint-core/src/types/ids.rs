//! ID types for Pinpoint entities
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Length of a hyphenated UUID (`8-4-4-4-12`)
const HYPHENATED_LEN: usize = 36;

/// User identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Create a user ID from an existing string without validation
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a new random user ID
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Parse a well-formed, hyphenated UUID
    ///
    /// Returns `None` for anything else, including the simple, braced and
    /// URN forms that `Uuid::parse_str` would otherwise accept.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.len() != HYPHENATED_LEN {
            return None;
        }
        Uuid::parse_str(raw).ok().map(|_| Self(raw.to_string()))
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
