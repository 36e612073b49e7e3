//! The client's authentication state.

use crate::policy::{AccessPolicy, AccessRequest};
use crate::{AccessDenied, PermissionEvaluator, Principal};
use std::fmt;
use std::sync::Arc;

/// Who is logged in, if anyone.
///
/// # Immutability
///
/// Sessions are immutable values. [`login`](Self::login) and
/// [`logout`](Self::logout) return new sessions; the principal is shared
/// behind an [`Arc`] so cloning a session is cheap.
///
/// # Example
///
/// ```
/// use guarda_auth::{PermissionGrant, Principal, Session};
/// use guarda_types::Role;
///
/// let anon = Session::anonymous();
/// assert!(!anon.can("leads", "view", None));
///
/// let user = Principal::new("42", Role::Salesperson)
///     .with_grant(PermissionGrant::legacy(["leads.view"]));
/// let session = anon.login(user);
///
/// assert!(session.can("leads", "view", None));
/// assert!(session.require("leads", "edit", None).is_err());
///
/// // Original is unchanged
/// assert!(!anon.is_authenticated());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    principal: Option<Arc<Principal>>,
}

impl Session {
    /// Creates a session with nobody logged in.
    #[must_use]
    pub fn anonymous() -> Self {
        Self { principal: None }
    }

    /// Creates a session for `principal`.
    #[must_use]
    pub fn authenticated(principal: Principal) -> Self {
        Self {
            principal: Some(Arc::new(principal)),
        }
    }

    /// Returns a new session with `principal` logged in.
    #[must_use]
    pub fn login(&self, principal: Principal) -> Self {
        tracing::debug!(principal = %principal, "session login");
        Self::authenticated(principal)
    }

    /// Returns a new anonymous session.
    #[must_use]
    pub fn logout(&self) -> Self {
        if let Some(p) = &self.principal {
            tracing::debug!(principal = %p, "session logout");
        }
        Self::anonymous()
    }

    /// Returns the logged-in principal.
    #[must_use]
    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_deref()
    }

    /// Returns `true` if someone is logged in.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.principal.is_some()
    }

    /// Decides `resource.action` with the default evaluator.
    #[must_use]
    pub fn can(&self, resource: &str, action: &str, owner_id: Option<&str>) -> bool {
        crate::can(self.principal(), resource, action, owner_id)
    }

    /// Decides whether any action on `resource` is reachable.
    #[must_use]
    pub fn can_any(&self, resource: &str) -> bool {
        crate::can_any(self.principal(), resource)
    }

    /// Like [`can`](Self::can), but reports why access was refused.
    ///
    /// # Errors
    ///
    /// Returns [`AccessDenied::Unauthenticated`] for an anonymous session
    /// and [`AccessDenied::Forbidden`] when the grant does not cover the
    /// request.
    pub fn require(
        &self,
        resource: &str,
        action: &str,
        owner_id: Option<&str>,
    ) -> Result<(), AccessDenied> {
        let mut request = AccessRequest::new(resource, action);
        if let Some(owner) = owner_id {
            request = request.owned_by(owner);
        }

        let Some(principal) = self.principal() else {
            return Err(AccessDenied::Unauthenticated {
                request: request.to_string(),
            });
        };

        if PermissionEvaluator::new().can(Some(principal), &request) {
            Ok(())
        } else {
            Err(AccessDenied::Forbidden {
                principal: principal.to_string(),
                request: request.to_string(),
            })
        }
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.principal() {
            Some(p) => write!(f, "{p}"),
            None => f.write_str("anonymous"),
        }
    }
}
