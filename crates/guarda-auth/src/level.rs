//! Access qualifier for one `(resource, action)` pair.
//!
//! # Wire Format
//!
//! The backend mixes booleans and strings in the same map. [`GrantLevel`]
//! closes that into a sum type:
//!
//! | Wire | Level |
//! |------|-------|
//! | `false` | [`GrantLevel::Denied`] |
//! | `true` | [`GrantLevel::Allowed`] |
//! | `"own"` | [`GrantLevel::OwnedOnly`] |
//! | `"team"` | [`GrantLevel::TeamOnly`] |
//! | anything else | [`GrantLevel::Denied`] |

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Wire string for [`GrantLevel::OwnedOnly`].
pub const OWN: &str = "own";

/// Wire string for [`GrantLevel::TeamOnly`].
pub const TEAM: &str = "team";

/// Access qualifier for a single resource action.
///
/// An action missing from a grant behaves exactly like
/// [`GrantLevel::Denied`], which is also the [`Default`].
///
/// # Example
///
/// ```
/// use guarda_auth::GrantLevel;
///
/// let level: GrantLevel = serde_json::from_str("\"own\"").unwrap();
/// assert_eq!(level, GrantLevel::OwnedOnly);
/// assert!(level.is_granted());
///
/// // Unknown values fail closed
/// let level: GrantLevel = serde_json::from_str("\"maybe\"").unwrap();
/// assert_eq!(level, GrantLevel::Denied);
///
/// assert_eq!(serde_json::to_string(&GrantLevel::Allowed).unwrap(), "true");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum GrantLevel {
    /// Not allowed.
    #[default]
    Denied,
    /// Allowed unconditionally.
    Allowed,
    /// Allowed only on records the principal owns.
    OwnedOnly,
    /// Allowed only on records owned by the principal's team.
    TeamOnly,
}

impl GrantLevel {
    /// Decodes a wire value. Never fails.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Bool(true) => Self::Allowed,
            Value::String(s) if s == OWN => Self::OwnedOnly,
            Value::String(s) if s == TEAM => Self::TeamOnly,
            _ => Self::Denied,
        }
    }

    /// Encodes this level in its wire shape.
    #[must_use]
    pub fn to_value(self) -> Value {
        match self {
            Self::Denied => Value::Bool(false),
            Self::Allowed => Value::Bool(true),
            Self::OwnedOnly => Value::String(OWN.to_string()),
            Self::TeamOnly => Value::String(TEAM.to_string()),
        }
    }

    /// Returns `true` for every level except [`GrantLevel::Denied`].
    #[must_use]
    pub fn is_granted(self) -> bool {
        !matches!(self, Self::Denied)
    }

    /// Returns `true` if the flat capability list can carry this level.
    ///
    /// Only `Allowed` and `OwnedOnly` survive flattening.
    #[must_use]
    pub fn is_flattenable(self) -> bool {
        matches!(self, Self::Allowed | Self::OwnedOnly)
    }

    /// Returns the level name used in logs and CLI output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Denied => "denied",
            Self::Allowed => "allowed",
            Self::OwnedOnly => OWN,
            Self::TeamOnly => TEAM,
        }
    }
}

impl From<bool> for GrantLevel {
    fn from(value: bool) -> Self {
        if value {
            Self::Allowed
        } else {
            Self::Denied
        }
    }
}

impl From<Value> for GrantLevel {
    fn from(value: Value) -> Self {
        Self::from_value(&value)
    }
}

impl From<GrantLevel> for Value {
    fn from(level: GrantLevel) -> Self {
        level.to_value()
    }
}

impl fmt::Display for GrantLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
