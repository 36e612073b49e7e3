//! Permission engine for the CRM admin client.
//!
//! Decides, for the logged-in principal, whether a `resource.action`
//! request is allowed, and converts grants between the structured form
//! the backend stores and the flat list the permission editor edits.
//!
//! # Model
//!
//! | Type | Role |
//! |------|------|
//! | [`Principal`] | Identity, [`Role`](guarda_types::Role) and optional [`PermissionGrant`] |
//! | [`PermissionGrant`] | Legacy capability list or [`StructuredGrant`] |
//! | [`GrantLevel`] | `Denied`, `Allowed`, `OwnedOnly`, `TeamOnly` |
//! | [`AccessPolicy`] | Decision trait; [`PermissionEvaluator`] is the default impl |
//! | [`Session`] | Who is logged in |
//! | [`AccessGate`] | Policy answer → what the UI renders |
//!
//! # Crate Architecture
//!
//! ```text
//! guarda-types  (PrincipalId, Role, ErrorCode)
//!      ↑
//! guarda-auth   ◄── THIS CRATE
//!      ↑
//! guarda-cli    (guarda binary)
//! ```
//!
//! # Design Principles
//!
//! - **Fail closed**: missing or malformed grants deny. The only
//!   exception is `OwnedOnly` without an owner, which allows listing.
//! - **Pure**: evaluation never mutates and never errors.
//! - **Admin wins**: an admin with any grant is allowed everything.

pub mod capability;
pub mod catalog;
pub mod codec;
pub mod error;
pub mod evaluator;
pub mod gate;
pub mod grant;
pub mod level;
pub mod policy;
pub mod principal;
pub mod session;
pub mod template;

pub use capability::{Capability, CapabilityParseError};
pub use error::AccessDenied;
pub use evaluator::{can, can_any, Decision, DecisionReason, PermissionEvaluator};
pub use gate::{AccessGate, GateOutcome, GuardOptions, DEFAULT_HOME_PATH};
pub use grant::{PermissionGrant, StructuredGrant, LEGACY_ALL};
pub use level::GrantLevel;
pub use policy::{AccessPolicy, AccessRequest, AssumeTeamMember, TeamMembership};
pub use principal::Principal;
pub use session::Session;
pub use template::{defaults_for, defaults_for_name, template_grant};
