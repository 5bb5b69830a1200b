//! Catalog identifiers.
//!
//! Melon IDs are short string keys taken from the catalog file (e.g.
//! `cren`, `yw-watermelon`). They appear in URL paths and as cart keys in
//! the session, so the accepted alphabet is kept URL-safe.

use core::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Errors that can occur when parsing a [`MelonId`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MelonIdError {
    /// The input string is empty.
    #[error("melon id cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("melon id must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains a character outside `[A-Za-z0-9_-]`.
    #[error("melon id contains invalid character {0:?}")]
    InvalidCharacter(char),
}

/// Identifier of a melon in the catalog.
///
/// ```
/// use ubermelon_core::MelonId;
///
/// let id = MelonId::parse("cren").unwrap();
/// assert_eq!(id.as_str(), "cren");
/// assert!(MelonId::parse("../etc").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct MelonId(String);

impl MelonId {
    /// Maximum length of a melon ID.
    pub const MAX_LENGTH: usize = 64;

    /// Parse a `MelonId`.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, longer than
    /// [`Self::MAX_LENGTH`], or contains characters other than ASCII
    /// alphanumerics, `-` and `_`.
    pub fn parse(s: &str) -> Result<Self, MelonIdError> {
        if s.is_empty() {
            return Err(MelonIdError::Empty);
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(MelonIdError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if let Some(bad) = s
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        {
            return Err(MelonIdError::InvalidCharacter(bad));
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MelonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for MelonId {
    type Err = MelonIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for MelonId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for MelonId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
