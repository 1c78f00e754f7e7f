use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

const MAX_KEY_LEN: usize = 32;

/// Normalized bibliographic lookup key (an ISBN, OCLC number, LCCN, ...).
///
/// Validation is syntactic only: trimmed, bounded, ASCII alphanumeric plus
/// `-`, uppercased so an ISBN-10 check digit reads `X`. A well-formed key
/// that no record answers to must reach the lookup service and come back as
/// a not-found outcome, so no checksum is enforced here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BibKey(String);

impl BibKey {
    /// Parse and normalize a key.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyKey);
        }

        let normalized = trimmed.to_ascii_uppercase();
        let len = normalized.chars().count();
        if len > MAX_KEY_LEN {
            return Err(ValidationError::KeyTooLong {
                len,
                max: MAX_KEY_LEN,
            });
        }

        for (index, ch) in normalized.chars().enumerate() {
            let valid = ch.is_ascii_alphanumeric() || ch == '-';
            if !valid {
                return Err(ValidationError::KeyInvalidChar { ch, index });
            }
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for BibKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for BibKey {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for BibKey {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<BibKey> for String {
    fn from(value: BibKey) -> Self {
        value.0
    }
}

/// Namespace half of the service's `"<scheme>:<key>"` bibkey pattern.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyScheme {
    #[default]
    Isbn,
    Oclc,
    Lccn,
    Olid,
}

impl KeyScheme {
    pub const ALL: [Self; 4] = [Self::Isbn, Self::Oclc, Self::Lccn, Self::Olid];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Isbn => "ISBN",
            Self::Oclc => "OCLC",
            Self::Lccn => "LCCN",
            Self::Olid => "OLID",
        }
    }

    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "isbn" => Ok(Self::Isbn),
            "oclc" => Ok(Self::Oclc),
            "lccn" => Ok(Self::Lccn),
            "olid" => Ok(Self::Olid),
            other => Err(ValidationError::InvalidScheme {
                value: other.to_string(),
            }),
        }
    }

    /// Full bibkey the service indexes a record under.
    pub fn bibkey(self, key: &BibKey) -> String {
        format!("{}:{}", self.as_str(), key.as_str())
    }
}

impl Display for KeyScheme {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
