//! Access policy seams.
//!
//! Defines [`AccessPolicy`], the abstract decision interface consumed by
//! [`AccessGate`](crate::AccessGate) and [`Session`](crate::Session), and
//! [`TeamMembership`], the oracle that resolves `TeamOnly` grants.
//!
//! # Architecture
//!
//! ```text
//! AccessPolicy trait (THIS MODULE)
//!          │
//!          └── PermissionEvaluator<T: TeamMembership>   <- concrete impl
//!                       │
//!                       └── AssumeTeamMember (default oracle)
//! ```

use crate::Principal;
use std::fmt;

/// A `(resource, action, optional owner)` access request.
///
/// # Example
///
/// ```
/// use guarda_auth::AccessRequest;
///
/// let list = AccessRequest::new("leads", "view");
/// assert_eq!(list.owner_id(), None);
///
/// let record = AccessRequest::new("leads", "edit").owned_by("42");
/// assert_eq!(record.owner_id(), Some("42"));
/// assert_eq!(record.to_string(), "leads.edit");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AccessRequest {
    resource: String,
    action: String,
    owner_id: Option<String>,
}

impl AccessRequest {
    /// Creates a request with no owner (listing context).
    #[must_use]
    pub fn new(resource: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            action: action.into(),
            owner_id: None,
        }
    }

    /// Returns the request scoped to a record owned by `owner_id`.
    #[must_use]
    pub fn owned_by(mut self, owner_id: impl Into<String>) -> Self {
        self.owner_id = Some(owner_id.into());
        self
    }

    /// Returns the resource name.
    #[must_use]
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Returns the action name.
    #[must_use]
    pub fn action(&self) -> &str {
        &self.action
    }

    /// Returns the record owner, if the request targets one record.
    #[must_use]
    pub fn owner_id(&self) -> Option<&str> {
        self.owner_id.as_deref()
    }
}

impl fmt::Display for AccessRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.resource, self.action)
    }
}

/// Boolean access decisions over an optional principal.
///
/// Implementations must be pure: the same inputs always give the same
/// answer, and nothing is mutated.
///
/// # Example
///
/// ```
/// use guarda_auth::{AccessPolicy, AccessRequest, Principal};
///
/// struct ReadOnly;
///
/// impl AccessPolicy for ReadOnly {
///     fn can(&self, principal: Option<&Principal>, request: &AccessRequest) -> bool {
///         principal.is_some() && request.action() == "view"
///     }
///
///     fn can_any(&self, principal: Option<&Principal>, _resource: &str) -> bool {
///         principal.is_some()
///     }
/// }
///
/// assert!(!ReadOnly.can(None, &AccessRequest::new("leads", "view")));
/// ```
pub trait AccessPolicy: Send + Sync {
    /// Decides a single request.
    fn can(&self, principal: Option<&Principal>, request: &AccessRequest) -> bool;

    /// Decides whether any action on `resource` is reachable.
    ///
    /// Used to show or hide a whole UI section.
    fn can_any(&self, principal: Option<&Principal>, resource: &str) -> bool;
}

/// Resolves whether a principal may act on a `TeamOnly` resource.
///
/// The client has no team model of its own; callers that do can plug
/// one in through [`PermissionEvaluator::with_teams`](crate::PermissionEvaluator::with_teams).
pub trait TeamMembership: Send + Sync {
    /// Returns `true` if `principal` shares a team with the request's owner.
    ///
    /// `request.owner_id()` is `None` in listing contexts.
    fn is_team_member(&self, principal: &Principal, request: &AccessRequest) -> bool;
}

/// Default oracle: every `TeamOnly` grant is treated as allowed.
///
/// Team membership is not resolved client-side; the server filters
/// team-scoped records.
// TODO: replace with a roster-backed oracle once the auth response carries team ids.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeTeamMember;

impl TeamMembership for AssumeTeamMember {
    fn is_team_member(&self, _principal: &Principal, _request: &AccessRequest) -> bool {
        true
    }
}
