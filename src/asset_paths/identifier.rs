use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Deserializer};

/// Numeric image identifier taken from a label such as `IMG_2055`.
///
/// The digits are kept exactly as written so generated paths never re-pad them. Ordering is
/// numeric, which keeps sorted summaries in the same order as the photo numbers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier(String);

/// Identifier as written in configuration: a digit string or a plain JSON number.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawIdentifier {
    Number(u64),
    Text(String),
}

/// Error returned when a string is not a valid identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidIdentifier(pub String);

impl Identifier {
    /// Parse an identifier from a string of ASCII digits.
    pub fn parse(value: &str) -> Result<Self, InvalidIdentifier> {
        if !value.is_empty() && value.bytes().all(|byte| byte.is_ascii_digit()) {
            Ok(Self(value.to_string()))
        } else {
            Err(InvalidIdentifier(value.to_string()))
        }
    }

    /// The identifier digits, verbatim.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn significant_digits(&self) -> &str {
        let trimmed = self.0.trim_start_matches('0');
        if trimmed.is_empty() { "0" } else { trimmed }
    }
}

impl Ord for Identifier {
    fn cmp(&self, other: &Self) -> Ordering {
        let (left, right) = (self.significant_digits(), other.significant_digits());
        left.len()
            .cmp(&right.len())
            .then_with(|| left.cmp(right))
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for Identifier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u32> for Identifier {
    fn from(value: u32) -> Self {
        Self(value.to_string())
    }
}

impl<'de> Deserialize<'de> for Identifier {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match RawIdentifier::deserialize(deserializer)? {
            RawIdentifier::Number(number) => Ok(Self(number.to_string())),
            RawIdentifier::Text(text) => Self::parse(&text).map_err(serde::de::Error::custom),
        }
    }
}

impl fmt::Display for InvalidIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}` is not a numeric image identifier", self.0)
    }
}

impl std::error::Error for InvalidIdentifier {}
