//! Identifier types for guarda.
//!
//! Backend identifiers arrive either as JSON strings or numbers
//! depending on the endpoint. [`PrincipalId`] normalizes both into
//! one string form so that ownership comparisons never depend on
//! which shape the server happened to send.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Identifier of an authenticated principal (or of a record owner).
///
/// The inner value is the string form of the backend id with
/// surrounding whitespace removed. `42` and `"42"` yield equal ids.
///
/// # No Default
///
/// There is no meaningful default identity, so `Default` is not
/// implemented. Always construct from a backend value.
///
/// # Example
///
/// ```
/// use guarda_types::PrincipalId;
///
/// let from_str: PrincipalId = serde_json::from_str("\"42\"").unwrap();
/// let from_num: PrincipalId = serde_json::from_str("42").unwrap();
///
/// assert_eq!(from_str, from_num);
/// assert!(from_num.matches(" 42 "));
/// assert!(!from_num.matches("99"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PrincipalId(String);

impl PrincipalId {
    /// Creates a [`PrincipalId`] from any string-like value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.len() == id.len() {
            Self(id)
        } else {
            Self(trimmed.to_string())
        }
    }

    /// Returns the normalized string form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Compares against a raw id under string normalization.
    #[must_use]
    pub fn matches(&self, raw: &str) -> bool {
        self.0 == raw.trim()
    }
}

impl fmt::Display for PrincipalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PrincipalId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for PrincipalId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<u64> for PrincipalId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl From<i64> for PrincipalId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

struct PrincipalIdVisitor;

impl Visitor<'_> for PrincipalIdVisitor {
    type Value = PrincipalId;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string or integer identifier")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(PrincipalId::new(v))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(PrincipalId::new(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(PrincipalId::from(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(PrincipalId::from(v))
    }
}

impl<'de> Deserialize<'de> for PrincipalId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(PrincipalIdVisitor)
    }
}
