//! The authenticated actor.
//!
//! A [`Principal`] is built from the authentication response:
//!
//! ```json
//! { "id": 42, "role": "vendedor", "permissions": { "leads": { "view": "own" } } }
//! ```
//!
//! A `permissions` value of the wrong shape does not fail the whole
//! response. It reads as "no grant", which denies everything, admins
//! included.

use crate::PermissionGrant;
use guarda_types::{PrincipalId, Role};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Identity, role and permission grant of an authenticated account.
///
/// # Example
///
/// ```
/// use guarda_auth::Principal;
/// use guarda_types::Role;
///
/// let principal: Principal = serde_json::from_str(
///     r#"{"id": 42, "role": "vendedor", "permissions": ["leads.view"]}"#,
/// ).unwrap();
///
/// assert_eq!(principal.id().as_str(), "42");
/// assert_eq!(principal.role(), &Role::Salesperson);
/// assert!(principal.grant().is_some());
///
/// let broken: Principal = serde_json::from_str(
///     r#"{"id": "7", "role": "suporte", "permissions": "oops"}"#,
/// ).unwrap();
/// assert!(broken.grant().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    id: PrincipalId,
    role: Role,
    #[serde(
        rename = "permissions",
        default,
        deserialize_with = "lenient_grant",
        skip_serializing_if = "Option::is_none"
    )]
    grant: Option<PermissionGrant>,
}

impl Principal {
    /// Creates a principal without a grant.
    #[must_use]
    pub fn new(id: impl Into<PrincipalId>, role: Role) -> Self {
        Self {
            id: id.into(),
            role,
            grant: None,
        }
    }

    /// Returns the principal with `grant` attached.
    #[must_use]
    pub fn with_grant(mut self, grant: impl Into<PermissionGrant>) -> Self {
        self.grant = Some(grant.into());
        self
    }

    /// Returns the principal's id.
    #[must_use]
    pub fn id(&self) -> &PrincipalId {
        &self.id
    }

    /// Returns the principal's role.
    #[must_use]
    pub fn role(&self) -> &Role {
        &self.role
    }

    /// Returns the grant, if the response carried a usable one.
    #[must_use]
    pub fn grant(&self) -> Option<&PermissionGrant> {
        self.grant.as_ref()
    }

    /// Returns `true` if the principal is an admin.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Returns `true` if `owner_id` names this principal.
    #[must_use]
    pub fn owns(&self, owner_id: &str) -> bool {
        self.id.matches(owner_id)
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.id, self.role)
    }
}

fn lenient_grant<'de, D>(deserializer: D) -> Result<Option<PermissionGrant>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let Some(value) = value else {
        return Ok(None);
    };

    let grant = PermissionGrant::from_value(&value);
    if grant.is_none() && !value.is_null() {
        tracing::warn!(shape = %value_kind(&value), "ignoring malformed permissions value");
    }
    Ok(grant)
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
