//! Configuration types.
//!
//! [`GuardaConfig`] is the merged result and implements [`Default`] for
//! compile-time fallback values. [`ConfigLayer`] is one file as written:
//! a key that is absent stays `None` and leaves the lower layer alone.

use guarda_auth::DEFAULT_HOME_PATH;
use serde::{Deserialize, Serialize};

/// Message shown by the built-in access denied view.
pub const DEFAULT_DENIED_MESSAGE: &str = "Access denied";

/// Main configuration structure, after merging all layers.
///
/// # Example
///
/// ```ignore
/// let mut config = GuardaConfig::default();
/// config.merge(&ConfigLayer::from_toml("[gate]\nhome_path = \"/painel\"")?);
/// assert_eq!(config.gate.home_path, "/painel");
/// assert!(!config.debug);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GuardaConfig {
    /// Enable debug logging.
    pub debug: bool,

    /// Access gate configuration.
    pub gate: GateConfig,
}

impl GuardaConfig {
    /// Serializes to TOML string.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Applies a layer on top of this config.
    ///
    /// Every key present in `layer` overrides, including keys set back
    /// to their default value.
    pub fn merge(&mut self, layer: &ConfigLayer) {
        if let Some(debug) = layer.debug {
            self.debug = debug;
        }

        self.gate.merge(&layer.gate);
    }
}

/// One config file, keeping track of which keys it sets.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ConfigLayer {
    /// `debug`, if present.
    pub debug: Option<bool>,

    /// `[gate]` keys, if present.
    #[serde(default)]
    pub gate: GateLayer,
}

impl ConfigLayer {
    /// Deserializes one layer from TOML.
    ///
    /// # Errors
    ///
    /// Returns error if deserialization fails.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }
}

/// The `[gate]` table of a single layer.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct GateLayer {
    pub home_path: Option<String>,
    pub denied_message: Option<String>,
}

/// Access gate configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GateConfig {
    /// Redirect target for `redirect_home`.
    pub home_path: String,

    /// Text of the built-in access denied view.
    pub denied_message: String,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            home_path: DEFAULT_HOME_PATH.to_string(),
            denied_message: DEFAULT_DENIED_MESSAGE.to_string(),
        }
    }
}

impl GateConfig {
    fn merge(&mut self, layer: &GateLayer) {
        if let Some(ref path) = layer.home_path {
            self.home_path.clone_from(path);
        }
        if let Some(ref message) = layer.denied_message {
            self.denied_message.clone_from(message);
        }
    }
}
