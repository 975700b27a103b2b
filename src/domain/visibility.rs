//! Note visibility levels.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Who a note is meant for.
///
/// Carried through storage and graph export unchanged; nothing in this crate
/// enforces it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    #[default]
    Team,
    Private,
}

/// Error returned when parsing an unknown visibility.
#[derive(Debug, Clone, Error)]
#[error("invalid visibility '{0}': expected public, team or private")]
pub struct ParseVisibilityError(String);

impl Visibility {
    /// Returns the lowercase storage name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Team => "team",
            Visibility::Private => "private",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Visibility {
    type Err = ParseVisibilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "public" => Ok(Visibility::Public),
            "team" => Ok(Visibility::Team),
            "private" => Ok(Visibility::Private),
            _ => Err(ParseVisibilityError(s.to_string())),
        }
    }
}
