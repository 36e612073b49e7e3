//! Permission evaluation.
//!
//! # Precedence
//!
//! Rules are checked in order; the first match decides.
//!
//! | # | Condition | Result |
//! |---|-----------|--------|
//! | 1 | no principal, or principal without grant | deny |
//! | 2 | role is admin | allow |
//! | 3 | legacy grant contains `"all"` | allow |
//! | 3 | legacy grant | allow iff it contains `resource.action` |
//! | 4 | structured pair absent or `Denied` | deny |
//! | 4 | structured pair `Allowed` | allow |
//! | 4 | `OwnedOnly`, no owner given | allow (listing; server filters) |
//! | 4 | `OwnedOnly`, owner given | allow iff owner is the principal |
//! | 4 | `TeamOnly` | ask the [`TeamMembership`] oracle |
//!
//! Every path but `OwnedOnly`-without-owner fails closed.
//!
//! # Audit Logging
//!
//! Allowed decisions are logged at trace level, denials at debug level.

use crate::capability::join_capability;
use crate::policy::{AccessPolicy, AccessRequest, AssumeTeamMember, TeamMembership};
use crate::{GrantLevel, PermissionGrant, Principal};
use std::fmt;

/// Why an evaluation ended the way it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionReason {
    /// No principal in the session.
    NoPrincipal,
    /// The principal carries no usable grant.
    NoGrant,
    /// Admin override.
    Admin,
    /// Legacy grant holds the `"all"` sentinel.
    LegacyAll,
    /// Legacy grant holds the capability string.
    LegacyMatch,
    /// Legacy grant lacks the capability string.
    LegacyMissing,
    /// Structured grant has no entry for the pair.
    Absent,
    /// Structured grant holds `Allowed` or `Denied`.
    Level(GrantLevel),
    /// `OwnedOnly` without an owner: optimistic listing allow.
    OwnerUnspecified,
    /// `OwnedOnly` and the owner is the principal.
    OwnerMatch,
    /// `OwnedOnly` and the owner is someone else.
    OwnerMismatch,
    /// `TeamOnly`, resolved by the oracle.
    Team,
}

impl fmt::Display for DecisionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoPrincipal => f.write_str("no authenticated principal"),
            Self::NoGrant => f.write_str("principal has no permission grant"),
            Self::Admin => f.write_str("admin override"),
            Self::LegacyAll => f.write_str("legacy grant contains 'all'"),
            Self::LegacyMatch => f.write_str("legacy grant contains the capability"),
            Self::LegacyMissing => f.write_str("legacy grant lacks the capability"),
            Self::Absent => f.write_str("no entry in structured grant"),
            Self::Level(level) => write!(f, "structured grant is {level}"),
            Self::OwnerUnspecified => f.write_str("owned-only without owner (listing allow)"),
            Self::OwnerMatch => f.write_str("owned-only and principal is the owner"),
            Self::OwnerMismatch => f.write_str("owned-only and principal is not the owner"),
            Self::Team => f.write_str("team-only resolved by membership oracle"),
        }
    }
}

/// Outcome of a single evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    /// Whether access is allowed.
    pub allowed: bool,
    /// The rule that decided.
    pub reason: DecisionReason,
}

impl Decision {
    fn allow(reason: DecisionReason) -> Self {
        Self {
            allowed: true,
            reason,
        }
    }

    fn deny(reason: DecisionReason) -> Self {
        Self {
            allowed: false,
            reason,
        }
    }

    fn new(allowed: bool, reason: DecisionReason) -> Self {
        Self { allowed, reason }
    }
}

/// The default [`AccessPolicy`].
///
/// Generic over the [`TeamMembership`] oracle used for `TeamOnly`
/// grants; the default oracle allows.
///
/// # Example
///
/// ```
/// use guarda_auth::{AccessPolicy, AccessRequest, PermissionEvaluator, Principal};
///
/// let principal: Principal = serde_json::from_str(
///     r#"{"id": "42", "role": "vendedor", "permissions": {"leads": {"view": "own"}}}"#,
/// ).unwrap();
///
/// let evaluator = PermissionEvaluator::new();
/// let view = AccessRequest::new("leads", "view");
///
/// assert!(evaluator.can(Some(&principal), &view));
/// assert!(evaluator.can(Some(&principal), &view.clone().owned_by("42")));
/// assert!(!evaluator.can(Some(&principal), &view.owned_by("99")));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissionEvaluator<T = AssumeTeamMember> {
    teams: T,
}

impl PermissionEvaluator {
    /// Creates an evaluator with the default team oracle.
    #[must_use]
    pub fn new() -> Self {
        Self {
            teams: AssumeTeamMember,
        }
    }
}

impl<T: TeamMembership> PermissionEvaluator<T> {
    /// Creates an evaluator resolving `TeamOnly` through `teams`.
    #[must_use]
    pub fn with_teams(teams: T) -> Self {
        Self { teams }
    }

    /// Evaluates a request and reports the deciding rule.
    #[must_use]
    pub fn explain(&self, principal: Option<&Principal>, request: &AccessRequest) -> Decision {
        let Some(principal) = principal else {
            return Decision::deny(DecisionReason::NoPrincipal);
        };
        let Some(grant) = principal.grant() else {
            return Decision::deny(DecisionReason::NoGrant);
        };
        if principal.is_admin() {
            return Decision::allow(DecisionReason::Admin);
        }

        match grant {
            PermissionGrant::Legacy(caps) => {
                if grant.grants_all() {
                    Decision::allow(DecisionReason::LegacyAll)
                } else if caps.contains(&join_capability(request.resource(), request.action())) {
                    Decision::allow(DecisionReason::LegacyMatch)
                } else {
                    Decision::deny(DecisionReason::LegacyMissing)
                }
            }
            PermissionGrant::Structured(structured) => {
                match structured.lookup(request.resource(), request.action()) {
                    None => Decision::deny(DecisionReason::Absent),
                    Some(level @ (GrantLevel::Allowed | GrantLevel::Denied)) => {
                        Decision::new(level.is_granted(), DecisionReason::Level(level))
                    }
                    Some(GrantLevel::OwnedOnly) => match request.owner_id() {
                        None => Decision::allow(DecisionReason::OwnerUnspecified),
                        Some(owner) if principal.owns(owner) => {
                            Decision::allow(DecisionReason::OwnerMatch)
                        }
                        Some(_) => Decision::deny(DecisionReason::OwnerMismatch),
                    },
                    Some(GrantLevel::TeamOnly) => Decision::new(
                        self.teams.is_team_member(principal, request),
                        DecisionReason::Team,
                    ),
                }
            }
        }
    }
}

impl<T: TeamMembership> AccessPolicy for PermissionEvaluator<T> {
    fn can(&self, principal: Option<&Principal>, request: &AccessRequest) -> bool {
        let decision = self.explain(principal, request);

        if decision.allowed {
            tracing::trace!(
                principal = ?principal.map(Principal::id),
                request = %request,
                owner = ?request.owner_id(),
                reason = %decision.reason,
                "access allowed"
            );
        } else {
            tracing::debug!(
                principal = ?principal.map(Principal::id),
                request = %request,
                owner = ?request.owner_id(),
                reason = %decision.reason,
                "access denied"
            );
        }

        decision.allowed
    }

    fn can_any(&self, principal: Option<&Principal>, resource: &str) -> bool {
        let Some(principal) = principal else {
            return false;
        };
        let Some(grant) = principal.grant() else {
            return false;
        };
        if principal.is_admin() {
            return true;
        }

        let allowed = match grant {
            PermissionGrant::Legacy(caps) => {
                let prefix = format!("{resource}.");
                grant.grants_all() || caps.iter().any(|cap| cap.starts_with(&prefix))
            }
            PermissionGrant::Structured(structured) => structured
                .actions(resource)
                .is_some_and(|actions| actions.values().any(|level| level.is_granted())),
        };

        tracing::trace!(principal = %principal.id(), resource = resource, allowed, "section check");
        allowed
    }
}

/// Decides `resource.action` for `principal` with the default evaluator.
///
/// ```
/// use guarda_auth::{can, PermissionGrant, Principal};
/// use guarda_types::Role;
///
/// let p = Principal::new("1", Role::Support).with_grant(PermissionGrant::legacy(["leads.view"]));
/// assert!(can(Some(&p), "leads", "view", None));
/// assert!(!can(Some(&p), "leads", "edit", None));
/// assert!(!can(None, "leads", "view", None));
/// ```
#[must_use]
pub fn can(principal: Option<&Principal>, resource: &str, action: &str, owner_id: Option<&str>) -> bool {
    let mut request = AccessRequest::new(resource, action);
    if let Some(owner) = owner_id {
        request = request.owned_by(owner);
    }
    PermissionEvaluator::new().can(principal, &request)
}

/// Decides whether any action on `resource` is reachable, with the default evaluator.
#[must_use]
pub fn can_any(principal: Option<&Principal>, resource: &str) -> bool {
    PermissionEvaluator::new().can_any(principal, resource)
}
