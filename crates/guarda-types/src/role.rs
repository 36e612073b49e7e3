//! Account roles.
//!
//! The backend sends role names in Portuguese (`gerente`, `vendedor`, ...)
//! while some older accounts carry English names. [`Role`] accepts both and
//! always writes the backend name back.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Role assigned to an account.
///
/// | Variant | Backend name | Aliases |
/// |---------|--------------|---------|
/// | `Admin` | `admin` | `administrador`, `administrator` |
/// | `Manager` | `gerente` | `manager` |
/// | `Salesperson` | `vendedor` | `salesperson`, `seller`, `sales` |
/// | `Support` | `suporte` | `support` |
/// | `Commercial` | `comercial` | `commercial` |
/// | `Finance` | `financeiro` | `finance` |
///
/// Anything else is kept verbatim (lowercased) in [`Role::Other`].
///
/// # Example
///
/// ```
/// use guarda_types::Role;
///
/// let role: Role = "Manager".parse().unwrap();
/// assert_eq!(role, Role::Manager);
/// assert_eq!(role.as_str(), "gerente");
///
/// assert!(Role::Admin.is_admin());
/// assert_eq!(Role::parse("estagiario"), Role::Other("estagiario".into()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Role {
    /// Full access; short-circuits every permission check.
    Admin,
    /// Team manager (`gerente`).
    Manager,
    /// Salesperson (`vendedor`).
    Salesperson,
    /// Customer support (`suporte`).
    Support,
    /// Commercial back-office (`comercial`).
    Commercial,
    /// Finance (`financeiro`).
    Finance,
    /// A role this build does not know about.
    Other(String),
}

impl Role {
    /// Parses a role name. Never fails; unknown names become [`Role::Other`].
    #[must_use]
    pub fn parse(name: &str) -> Self {
        let name = name.trim().to_lowercase();
        match name.as_str() {
            "admin" | "administrador" | "administrator" => Self::Admin,
            "gerente" | "manager" => Self::Manager,
            "vendedor" | "salesperson" | "seller" | "sales" => Self::Salesperson,
            "suporte" | "support" => Self::Support,
            "comercial" | "commercial" => Self::Commercial,
            "financeiro" | "finance" => Self::Finance,
            _ => Self::Other(name),
        }
    }

    /// Returns the backend name of this role.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "gerente",
            Self::Salesperson => "vendedor",
            Self::Support => "suporte",
            Self::Commercial => "comercial",
            Self::Finance => "financeiro",
            Self::Other(name) => name,
        }
    }

    /// Returns `true` for [`Role::Admin`].
    #[must_use]
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// All roles known to this build, in display order.
    #[must_use]
    pub fn known() -> [Role; 6] {
        [
            Self::Admin,
            Self::Manager,
            Self::Salesperson,
            Self::Support,
            Self::Commercial,
            Self::Finance,
        ]
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::parse(&name))
    }
}
