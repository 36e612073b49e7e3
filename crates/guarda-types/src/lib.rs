//! Core identity types for guarda.
//!
//! This crate holds the identity plumbing shared by the permission
//! engine and its frontends. It carries no permission logic.
//!
//! # Crate Architecture
//!
//! ```text
//! guarda-types   (PrincipalId, Role, ErrorCode)  ◄── THIS CRATE
//!      ↑
//! guarda-auth    (grants, codec, evaluator, templates, session, gate)
//!      ↑
//! guarda-cli     (inspection / provisioning binary)
//! ```
//!
//! # Example
//!
//! ```
//! use guarda_types::{PrincipalId, Role};
//!
//! let id = PrincipalId::new("42");
//! let role = Role::parse("vendedor");
//!
//! assert!(id.matches("42"));
//! assert_eq!(role, Role::Salesperson);
//! ```

mod error;
mod id;
mod role;

pub use error::{assert_error_code, assert_error_codes, ErrorCode};
pub use id::PrincipalId;
pub use role::Role;
