//! Permission grants carried by a principal.
//!
//! # Two Shapes
//!
//! ```text
//! Legacy      ["all"]  or  ["leads.view", "tasks.edit"]
//! Structured  {"leads": {"view": "own", "edit": true, "delete": false}}
//! ```
//!
//! Older accounts still send the flat array. The shape is inferred
//! structurally (array vs. object); there is no discriminant on the wire.
//! Anything else is not a grant at all.

use crate::GrantLevel;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};

/// Legacy sentinel granting unconditional access.
pub const LEGACY_ALL: &str = "all";

/// Actions of one resource mapped to their level.
pub type ActionMap = BTreeMap<String, GrantLevel>;

/// Nested `resource → action → level` grant.
///
/// Absent pairs read as [`GrantLevel::Denied`].
///
/// # Example
///
/// ```
/// use guarda_auth::{GrantLevel, StructuredGrant};
///
/// let grant = StructuredGrant::new()
///     .with("leads", "view", GrantLevel::OwnedOnly)
///     .with("leads", "delete", GrantLevel::Denied);
///
/// assert_eq!(grant.level("leads", "view"), GrantLevel::OwnedOnly);
/// assert_eq!(grant.level("leads", "export"), GrantLevel::Denied);
/// assert_eq!(grant.level("tasks", "view"), GrantLevel::Denied);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StructuredGrant(BTreeMap<String, ActionMap>);

impl StructuredGrant {
    /// Creates an empty grant.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the grant with `resource.action` set to `level`.
    #[must_use]
    pub fn with(mut self, resource: impl Into<String>, action: impl Into<String>, level: GrantLevel) -> Self {
        self.set(resource, action, level);
        self
    }

    /// Sets `resource.action` to `level`.
    pub fn set(&mut self, resource: impl Into<String>, action: impl Into<String>, level: GrantLevel) {
        self.0
            .entry(resource.into())
            .or_default()
            .insert(action.into(), level);
    }

    /// Returns the level for `resource.action`, [`GrantLevel::Denied`] if absent.
    #[must_use]
    pub fn level(&self, resource: &str, action: &str) -> GrantLevel {
        self.lookup(resource, action).unwrap_or_default()
    }

    /// Returns the level for `resource.action` only if the pair is present.
    #[must_use]
    pub fn lookup(&self, resource: &str, action: &str) -> Option<GrantLevel> {
        self.0.get(resource)?.get(action).copied()
    }

    /// Returns every action recorded for `resource`.
    #[must_use]
    pub fn actions(&self, resource: &str) -> Option<&ActionMap> {
        self.0.get(resource)
    }

    /// Iterates resource names in order.
    pub fn resources(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Iterates every recorded `(resource, action, level)` triple.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, GrantLevel)> {
        self.0.iter().flat_map(|(resource, actions)| {
            actions
                .iter()
                .map(move |(action, level)| (resource.as_str(), action.as_str(), *level))
        })
    }

    /// Returns `true` if no pair is recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.values().all(BTreeMap::is_empty)
    }

    /// Decodes a structured grant from a JSON object.
    ///
    /// Resource entries that are not objects are skipped, so their
    /// actions read as denied. Returns `None` if `value` is not an object.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        value.as_object().map(Self::from_map)
    }

    fn from_map(map: &Map<String, Value>) -> Self {
        let mut grant = Self::new();
        for (resource, actions) in map {
            let Some(actions) = actions.as_object() else {
                tracing::debug!(resource = %resource, "skipping non-object resource entry");
                continue;
            };
            for (action, level) in actions {
                grant.set(resource.clone(), action.clone(), GrantLevel::from_value(level));
            }
        }
        grant
    }
}

impl<'de> Deserialize<'de> for StructuredGrant {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value).ok_or_else(|| D::Error::custom("expected a permission object"))
    }
}

/// A principal's permission grant in either supported shape.
///
/// # Example
///
/// ```
/// use guarda_auth::PermissionGrant;
///
/// let legacy: PermissionGrant = serde_json::from_str(r#"["all"]"#).unwrap();
/// assert!(legacy.is_legacy());
/// assert!(legacy.grants_all());
///
/// let structured: PermissionGrant =
///     serde_json::from_str(r#"{"leads": {"view": "own"}}"#).unwrap();
/// assert!(structured.as_structured().is_some());
///
/// assert!(serde_json::from_str::<PermissionGrant>("\"all\"").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PermissionGrant {
    /// Flat capability strings; [`LEGACY_ALL`] grants everything.
    Legacy(BTreeSet<String>),
    /// Nested per-resource levels.
    Structured(StructuredGrant),
}

impl PermissionGrant {
    /// Builds a legacy grant from capability strings.
    #[must_use]
    pub fn legacy<I, S>(capabilities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Legacy(capabilities.into_iter().map(Into::into).collect())
    }

    /// Decodes either shape from JSON. Returns `None` for any other value.
    ///
    /// Non-string elements of a legacy array are dropped.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Array(items) => Some(Self::Legacy(
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect(),
            )),
            Value::Object(map) => Some(Self::Structured(StructuredGrant::from_map(map))),
            _ => None,
        }
    }

    /// Returns `true` for the legacy shape.
    #[must_use]
    pub fn is_legacy(&self) -> bool {
        matches!(self, Self::Legacy(_))
    }

    /// Returns `true` if this is a legacy grant holding [`LEGACY_ALL`].
    #[must_use]
    pub fn grants_all(&self) -> bool {
        match self {
            Self::Legacy(caps) => caps.contains(LEGACY_ALL),
            Self::Structured(_) => false,
        }
    }

    /// Returns the structured grant, if that is the shape.
    #[must_use]
    pub fn as_structured(&self) -> Option<&StructuredGrant> {
        match self {
            Self::Structured(grant) => Some(grant),
            Self::Legacy(_) => None,
        }
    }
}

impl From<StructuredGrant> for PermissionGrant {
    fn from(grant: StructuredGrant) -> Self {
        Self::Structured(grant)
    }
}

impl<'de> Deserialize<'de> for PermissionGrant {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value)
            .ok_or_else(|| D::Error::custom("expected a permission array or object"))
    }
}
