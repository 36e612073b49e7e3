//! Capability strings (`"<resource>.<action>"`).
//!
//! The flat list used by the permission editor and by legacy grants is
//! made of capability strings. Well-formed strings match
//! `^[a-z_]+\.[a-z_]+$`.
//!
//! # Strict vs. Lenient
//!
//! - [`Capability::parse`] is strict and reports why a string is malformed.
//!   Use it where a human typed the value; `guarda unflatten` warns with
//!   its error.
//! - [`split_capability`] only splits at the first `.`. The codec uses it
//!   so that unknown resource and action names pass through untouched.
//!
//! # Example
//!
//! ```
//! use guarda_auth::Capability;
//!
//! let cap = Capability::parse("leads.view").unwrap();
//! assert_eq!(cap.resource(), "leads");
//! assert_eq!(cap.action(), "view");
//! assert_eq!(cap.to_string(), "leads.view");
//!
//! assert!(Capability::parse("leads").is_err());
//! assert!(Capability::parse("Leads.View").is_err());
//! ```

use guarda_types::ErrorCode;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned by [`Capability::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CapabilityParseError {
    /// The string has no `.` separating resource from action.
    #[error("capability '{0}' is not of the form <resource>.<action>")]
    MissingSeparator(String),

    /// One side contains characters outside `[a-z_]` or is empty.
    #[error("capability '{value}' has an invalid {part} name")]
    InvalidName {
        /// The full input.
        value: String,
        /// `"resource"` or `"action"`.
        part: &'static str,
    },
}

impl ErrorCode for CapabilityParseError {
    fn code(&self) -> &'static str {
        match self {
            Self::MissingSeparator(_) => "CAPABILITY_MISSING_SEPARATOR",
            Self::InvalidName { .. } => "CAPABILITY_INVALID_NAME",
        }
    }

    fn is_recoverable(&self) -> bool {
        true
    }
}

/// A validated `resource.action` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Capability {
    resource: String,
    action: String,
}

impl Capability {
    /// Creates a capability from its two halves, validating both.
    ///
    /// # Errors
    ///
    /// Returns [`CapabilityParseError::InvalidName`] if either half is
    /// empty or contains characters outside `[a-z_]`.
    pub fn new(resource: &str, action: &str) -> Result<Self, CapabilityParseError> {
        let value = || format!("{resource}.{action}");
        if !is_valid_name(resource) {
            return Err(CapabilityParseError::InvalidName {
                value: value(),
                part: "resource",
            });
        }
        if !is_valid_name(action) {
            return Err(CapabilityParseError::InvalidName {
                value: value(),
                part: "action",
            });
        }
        Ok(Self {
            resource: resource.to_string(),
            action: action.to_string(),
        })
    }

    /// Parses a strict capability string.
    ///
    /// # Errors
    ///
    /// Returns [`CapabilityParseError`] if `s` does not match
    /// `^[a-z_]+\.[a-z_]+$`.
    pub fn parse(s: &str) -> Result<Self, CapabilityParseError> {
        let (resource, action) =
            s.split_once('.')
                .ok_or_else(|| CapabilityParseError::MissingSeparator(s.to_string()))?;
        Self::new(resource, action)
    }

    /// Returns the resource half.
    #[must_use]
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Returns the action half.
    #[must_use]
    pub fn action(&self) -> &str {
        &self.action
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.resource, self.action)
    }
}

impl FromStr for Capability {
    type Err = CapabilityParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Capability {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Capability {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Returns `true` if `name` is a non-empty run of `[a-z_]`.
#[must_use]
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_lowercase() || b == b'_')
}

/// Splits a capability string at its first `.`.
///
/// Returns `None` if there is no separator or either side is empty.
/// No character validation is applied.
///
/// ```
/// use guarda_auth::capability::split_capability;
///
/// assert_eq!(split_capability("leads.view"), Some(("leads", "view")));
/// assert_eq!(split_capability("Custom.Thing.x"), Some(("Custom", "Thing.x")));
/// assert_eq!(split_capability("all"), None);
/// assert_eq!(split_capability(".view"), None);
/// ```
#[must_use]
pub fn split_capability(s: &str) -> Option<(&str, &str)> {
    let (resource, action) = s.split_once('.')?;
    if resource.is_empty() || action.is_empty() {
        return None;
    }
    Some((resource, action))
}

/// Joins a resource and action into a capability string.
#[must_use]
pub fn join_capability(resource: &str, action: &str) -> String {
    format!("{resource}.{action}")
}
