//! Tri-state "all parts present" flag.
//!
//! Stored as a nullable `INTEGER` (`1`, `0`, `NULL`). Parsing accepts one
//! token per state; display text is left to the presentation layer.

use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Whether all parts of a set are present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Completeness {
    Complete,
    Incomplete,
    #[default]
    Unknown,
}

/// Tokens accepted for [`Completeness::Unknown`], compared case-insensitively.
/// The empty string is accepted as well.
pub const UNKNOWN_TOKENS: &[&str] = &["n/a", "unknown"];

impl Completeness {
    /// Column value for the `all_parts` column.
    pub fn to_db(self) -> Option<i64> {
        match self {
            Completeness::Complete => Some(1),
            Completeness::Incomplete => Some(0),
            Completeness::Unknown => None,
        }
    }

    /// Decode an `all_parts` column value.
    ///
    /// Anything other than `0` or `1` decodes as `Unknown`.
    pub fn from_db(value: Option<i64>) -> Self {
        match value {
            Some(1) => Completeness::Complete,
            Some(0) => Completeness::Incomplete,
            _ => Completeness::Unknown,
        }
    }

    /// Canonical input token, the inverse of [`FromStr`].
    pub fn as_token(self) -> &'static str {
        match self {
            Completeness::Complete => "1",
            Completeness::Incomplete => "0",
            Completeness::Unknown => "n/a",
        }
    }
}

impl FromStr for Completeness {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        match token {
            "1" => Ok(Completeness::Complete),
            "0" => Ok(Completeness::Incomplete),
            "" => Ok(Completeness::Unknown),
            other if UNKNOWN_TOKENS.iter().any(|t| t.eq_ignore_ascii_case(other)) => {
                Ok(Completeness::Unknown)
            }
            other => Err(CoreError::invalid(
                "completeness",
                format!("expected 1, 0 or n/a, got '{other}'"),
            )),
        }
    }
}

impl fmt::Display for Completeness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}
