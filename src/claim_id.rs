//! Claim id type.

use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use crate::error::ClaimIdError;

/// A validated claim id.
///
/// Claim ids are non-empty hex strings. Input is accepted in either case and
/// stored lowercase, so two ids naming the same claim compare equal. The
/// parser does not require the full 40-character length; short ids act as
/// prefixes for the resolver.
///
/// # Examples
///
/// ```
/// use lbry_uri::ClaimId;
///
/// let id = ClaimId::parse("AbC123").unwrap();
/// assert_eq!(id.as_str(), "abc123");
/// assert!(!id.is_full());
/// assert!(ClaimId::parse("xyz").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClaimId(String);

impl ClaimId {
    /// Parses a claim id.
    ///
    /// # Errors
    ///
    /// Returns `ClaimIdError` if the input is empty or has a non-hex character.
    pub fn parse(input: &str) -> Result<Self, ClaimIdError> {
        if input.is_empty() {
            return Err(ClaimIdError::Empty);
        }

        for (i, c) in input.chars().enumerate() {
            if !c.is_ascii_hexdigit() {
                return Err(ClaimIdError::InvalidChar { char: c, position: i });
            }
        }

        Ok(Self(input.to_ascii_lowercase()))
    }

    /// Parses a claim id, rejecting ids longer than `max` characters.
    ///
    /// # Errors
    ///
    /// Returns `ClaimIdError::TooLong` in addition to the errors of [`ClaimId::parse`].
    pub fn parse_bounded(input: &str, max: usize) -> Result<Self, ClaimIdError> {
        let id = Self::parse(input)?;
        if id.0.len() > max {
            return Err(ClaimIdError::TooLong {
                max,
                actual: id.0.len(),
            });
        }
        Ok(id)
    }

    /// Returns the id as a lowercase hex string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if this is a complete id rather than a prefix.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.0.len() == crate::constants::CLAIM_ID_LENGTH
    }

    /// Returns true if `self` is a prefix of (or equal to) `other`.
    #[must_use]
    pub fn is_prefix_of(&self, other: &Self) -> bool {
        other.0.starts_with(&self.0)
    }
}

impl fmt::Display for ClaimId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ClaimId {
    type Err = ClaimIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for ClaimId {
    type Error = ClaimIdError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl AsRef<str> for ClaimId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Deref for ClaimId {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ClaimId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ClaimId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
