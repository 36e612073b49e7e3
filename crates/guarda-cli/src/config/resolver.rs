//! Configuration resolver trait for layered overrides.
//!
//! ```text
//! ConfigLoader.load()  →  GuardaConfig (base)
//!                              │
//!                              ▼
//!                     ConfigResolver.apply()
//!                              │
//!                              ▼
//!                     GuardaConfig (final)
//! ```

use super::GuardaConfig;

/// Applies overrides on top of a loaded configuration.
///
/// Only explicitly given values should be applied, preserving existing
/// values for unspecified options.
pub trait ConfigResolver {
    /// Applies overrides to the given configuration.
    fn apply(&self, config: &mut GuardaConfig);
}
