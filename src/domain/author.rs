//! Author identity threaded through every mutation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Opaque identity of whoever performs a mutation.
///
/// Recorded as a note's owner at creation and on every revision. The core
/// never invents one; callers must always supply it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AuthorId(String);

/// Error returned for a blank author identity.
#[derive(Debug, Clone, Error)]
#[error("author cannot be empty")]
pub struct ParseAuthorError;

impl AuthorId {
    /// Creates an author id, trimming whitespace.
    pub fn new(s: &str) -> Result<Self, ParseAuthorError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseAuthorError);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AuthorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for AuthorId {
    type Err = ParseAuthorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for AuthorId {
    type Error = ParseAuthorError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(&s)
    }
}

impl From<AuthorId> for String {
    fn from(a: AuthorId) -> Self {
        a.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_whitespace() {
        assert_eq!(AuthorId::new("  alice ").unwrap().as_str(), "alice");
    }

    #[test]
    fn rejects_blank() {
        assert!(AuthorId::new("").is_err());
        assert!(AuthorId::new("   ").is_err());
    }

    #[test]
    fn deserialize_rejects_blank() {
        assert!(serde_json::from_str::<AuthorId>("\"\"").is_err());
        let a: AuthorId = serde_json::from_str("\"bob\"").unwrap();
        assert_eq!(a.as_str(), "bob");
    }
}
