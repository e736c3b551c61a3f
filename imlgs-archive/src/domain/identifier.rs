//! Catalog identifier type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an invalid IMLGS identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid IMLGS identifier: {reason}")]
pub struct InvalidImlgs {
    reason: &'static str,
}

/// An IMLGS catalog identifier.
///
/// Identifiers are opaque keys assigned by the catalog service, e.g.
/// `imlgs2455970`. They double as cache filename stems, so this type
/// guarantees ASCII-alphanumeric content by construction.
///
/// # Examples
///
/// ```
/// use imlgs_archive::domain::Imlgs;
///
/// let id = Imlgs::parse("imlgs2455970").unwrap();
/// assert_eq!(id.as_str(), "imlgs2455970");
/// assert_eq!(id.bucket(), "imlgs245");
///
/// assert!(Imlgs::parse("").is_err());
/// assert!(Imlgs::parse("../escape").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Imlgs(String);

impl Imlgs {
    /// Parse an identifier from a string.
    ///
    /// The input must be non-empty ASCII alphanumeric.
    pub fn parse(s: &str) -> Result<Self, InvalidImlgs> {
        if s.is_empty() {
            return Err(InvalidImlgs {
                reason: "must not be empty",
            });
        }

        if !s.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(InvalidImlgs {
                reason: "must be ASCII alphanumeric",
            });
        }

        Ok(Imlgs(s.to_string()))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Cache bucket stem: the first 8 characters of the identifier,
    /// or the whole identifier when shorter.
    pub fn bucket(&self) -> &str {
        &self.0[..self.0.len().min(8)]
    }
}

impl TryFrom<String> for Imlgs {
    type Error = InvalidImlgs;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Imlgs::parse(&value)
    }
}

impl From<Imlgs> for String {
    fn from(id: Imlgs) -> Self {
        id.0
    }
}

impl fmt::Debug for Imlgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Imlgs({})", self.0)
    }
}

impl fmt::Display for Imlgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
