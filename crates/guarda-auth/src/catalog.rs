//! Resource catalog of the CRM.
//!
//! Lists every resource the admin client gates and the actions each
//! supports. The permission editor renders its checkbox matrix from this
//! table and the admin template is derived from it.

use crate::capability::join_capability;
use std::collections::BTreeSet;

/// One action on a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionSpec {
    /// Wire name (`view`, `edit`, ...).
    pub name: &'static str,
    /// Label shown in the editor.
    pub label: &'static str,
}

/// A gated resource and its actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceSpec {
    /// Wire name (`leads`, `proposals`, ...).
    pub name: &'static str,
    /// Label shown in the editor.
    pub label: &'static str,
    /// Supported actions, in display order.
    pub actions: &'static [ActionSpec],
}

impl ResourceSpec {
    /// Returns `true` if this resource supports `action`.
    #[must_use]
    pub fn supports(&self, action: &str) -> bool {
        self.actions.iter().any(|a| a.name == action)
    }

    /// Iterates the capability strings of this resource.
    pub fn capabilities(&self) -> impl Iterator<Item = String> + '_ {
        self.actions
            .iter()
            .map(move |a| join_capability(self.name, a.name))
    }
}

const fn action(name: &'static str, label: &'static str) -> ActionSpec {
    ActionSpec { name, label }
}

const VIEW: ActionSpec = action("view", "Visualizar");
const CREATE: ActionSpec = action("create", "Criar");
const EDIT: ActionSpec = action("edit", "Editar");
const DELETE: ActionSpec = action("delete", "Excluir");
const EXPORT: ActionSpec = action("export", "Exportar");

/// Every resource known to the admin client.
pub const CATALOG: &[ResourceSpec] = &[
    ResourceSpec {
        name: "dashboard",
        label: "Dashboard",
        actions: &[VIEW],
    },
    ResourceSpec {
        name: "leads",
        label: "Leads",
        actions: &[VIEW, CREATE, EDIT, DELETE, EXPORT],
    },
    ResourceSpec {
        name: "proposals",
        label: "Propostas",
        actions: &[VIEW, CREATE, EDIT, DELETE, action("approve", "Aprovar")],
    },
    ResourceSpec {
        name: "tasks",
        label: "Tarefas",
        actions: &[VIEW, CREATE, EDIT, DELETE],
    },
    ResourceSpec {
        name: "whatsapp",
        label: "WhatsApp",
        actions: &[VIEW, action("send", "Enviar"), action("manage", "Gerenciar")],
    },
    ResourceSpec {
        name: "reports",
        label: "Relatórios",
        actions: &[VIEW, EXPORT],
    },
    ResourceSpec {
        name: "users",
        label: "Usuários",
        actions: &[VIEW, CREATE, EDIT, DELETE],
    },
    ResourceSpec {
        name: "config",
        label: "Configurações",
        actions: &[VIEW, EDIT],
    },
];

/// Looks up a resource by wire name.
#[must_use]
pub fn resource(name: &str) -> Option<&'static ResourceSpec> {
    CATALOG.iter().find(|r| r.name == name)
}

/// Returns `true` if the catalog lists `resource.action`.
#[must_use]
pub fn contains(resource_name: &str, action: &str) -> bool {
    resource(resource_name).is_some_and(|r| r.supports(action))
}

/// Every capability string in the catalog.
#[must_use]
pub fn all_capabilities() -> BTreeSet<String> {
    CATALOG.iter().flat_map(ResourceSpec::capabilities).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Capability;

    #[test]
    fn every_entry_is_a_valid_capability() {
        for cap in all_capabilities() {
            assert!(Capability::parse(&cap).is_ok(), "invalid catalog entry: {cap}");
        }
    }

    #[test]
    fn resource_names_are_unique() {
        let names: BTreeSet<_> = CATALOG.iter().map(|r| r.name).collect();
        assert_eq!(names.len(), CATALOG.len());
    }

    #[test]
    fn lookup_and_contains() {
        assert_eq!(resource("leads").map(|r| r.label), Some("Leads"));
        assert!(resource("invoices").is_none());

        assert!(contains("proposals", "approve"));
        assert!(contains("users", "delete"));
        assert!(!contains("dashboard", "edit"));
        assert!(!contains("invoices", "view"));
    }

    #[test]
    fn every_resource_can_be_viewed() {
        for spec in CATALOG {
            assert!(spec.supports("view"), "{} has no view action", spec.name);
        }
    }
}
