//! Default capability sets per role.
//!
//! The user editor pre-fills the permission matrix from these tables when
//! a role is picked. They are only a starting point; the grant stored on
//! the backend is what the evaluator reads.

use crate::catalog;
use crate::{codec, PermissionGrant};
use guarda_types::Role;
use std::collections::BTreeSet;

const MANAGER: &[&str] = &[
    "dashboard.view",
    "leads.view",
    "leads.create",
    "leads.edit",
    "leads.delete",
    "leads.export",
    "proposals.view",
    "proposals.create",
    "proposals.edit",
    "proposals.delete",
    "proposals.approve",
    "tasks.view",
    "tasks.create",
    "tasks.edit",
    "tasks.delete",
    "whatsapp.view",
    "whatsapp.send",
    "reports.view",
    "reports.export",
    "users.view",
];

const SALESPERSON: &[&str] = &[
    "dashboard.view",
    "leads.view",
    "leads.create",
    "leads.edit",
    "proposals.view",
    "proposals.create",
    "proposals.edit",
    "tasks.view",
    "tasks.create",
    "tasks.edit",
    "whatsapp.view",
    "whatsapp.send",
];

const SUPPORT: &[&str] = &[
    "dashboard.view",
    "leads.view",
    "tasks.view",
    "tasks.create",
    "tasks.edit",
    "whatsapp.view",
    "whatsapp.send",
];

const COMMERCIAL: &[&str] = &[
    "dashboard.view",
    "leads.view",
    "leads.create",
    "leads.edit",
    "proposals.view",
    "proposals.create",
    "proposals.edit",
    "proposals.approve",
    "reports.view",
];

const FINANCE: &[&str] = &[
    "dashboard.view",
    "leads.view",
    "proposals.view",
    "reports.view",
    "reports.export",
];

/// Returns the default capability set for `role`.
///
/// Admins get the whole catalog. Unknown roles get nothing.
///
/// ```
/// use guarda_auth::defaults_for;
/// use guarda_types::Role;
///
/// let caps = defaults_for(&Role::Salesperson);
/// assert!(caps.contains("leads.create"));
/// assert!(!caps.contains("users.delete"));
///
/// assert!(defaults_for(&Role::Other("estagiario".into())).is_empty());
/// ```
#[must_use]
pub fn defaults_for(role: &Role) -> BTreeSet<String> {
    let table = match role {
        Role::Admin => return catalog::all_capabilities(),
        Role::Manager => MANAGER,
        Role::Salesperson => SALESPERSON,
        Role::Support => SUPPORT,
        Role::Commercial => COMMERCIAL,
        Role::Finance => FINANCE,
        Role::Other(name) => {
            tracing::debug!(role = %name, "no permission template for role");
            return BTreeSet::new();
        }
    };
    table.iter().map(|cap| (*cap).to_string()).collect()
}

/// Same as [`defaults_for`], parsing `role` first.
#[must_use]
pub fn defaults_for_name(role: &str) -> BTreeSet<String> {
    defaults_for(&Role::parse(role))
}

/// Returns the role's defaults as a structured grant, every pair `Allowed`.
#[must_use]
pub fn template_grant(role: &Role) -> PermissionGrant {
    PermissionGrant::from(codec::unflatten(defaults_for(role)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Capability, GrantLevel};

    #[test]
    fn admin_gets_whole_catalog() {
        assert_eq!(defaults_for(&Role::Admin), catalog::all_capabilities());
    }

    #[test]
    fn salesperson_template() {
        let caps = defaults_for(&Role::Salesperson);
        assert!(!caps.is_empty());
        assert!(caps.contains("whatsapp.send"));
        assert!(!caps.contains("users.delete"));
        assert!(!caps.contains("proposals.approve"));
    }

    #[test]
    fn manager_sees_users_but_cannot_edit_them() {
        let caps = defaults_for(&Role::Manager);
        assert!(caps.contains("users.view"));
        assert!(!caps.contains("users.edit"));
        assert!(!caps.contains("config.view"));
    }

    #[test]
    fn unknown_role_is_empty() {
        assert!(defaults_for(&Role::Other("estagiario".into())).is_empty());
        assert!(defaults_for_name("").is_empty());
    }

    #[test]
    fn lookup_by_name_resolves_aliases() {
        assert_eq!(defaults_for_name("Vendedor"), defaults_for(&Role::Salesperson));
        assert_eq!(defaults_for_name("finance"), defaults_for(&Role::Finance));
    }

    #[test]
    fn every_entry_is_in_the_catalog() {
        for role in Role::known() {
            for cap in defaults_for(&role) {
                let parsed = Capability::parse(&cap).unwrap();
                assert!(
                    catalog::contains(parsed.resource(), parsed.action()),
                    "{role}: {cap} not in catalog"
                );
            }
        }
    }

    #[test]
    fn template_grant_is_structured_and_allowed() {
        let grant = template_grant(&Role::Support);
        let structured = grant.as_structured().unwrap();
        assert_eq!(structured.level("tasks", "edit"), GrantLevel::Allowed);
        assert_eq!(structured.level("tasks", "delete"), GrantLevel::Denied);
        assert_eq!(codec::flatten(structured), defaults_for(&Role::Support));
    }
}
