//! Configuration management with hierarchical layering.
//!
//! # Architecture
//!
//! ```text
//! Priority (highest to lowest):
//!
//! ┌───────────────────────────────────────────┐
//! │  1. CLI flags                             │  Per invocation
//! ├───────────────────────────────────────────┤
//! │  2. Environment Variables (GUARDA_*)      │  Runtime override
//! ├───────────────────────────────────────────┤
//! │  3. Project Config (.guarda/config.toml)  │  Project-specific
//! ├───────────────────────────────────────────┤
//! │  4. Global Config (~/.guarda/config.toml) │  User defaults
//! ├───────────────────────────────────────────┤
//! │  5. Default Values (compile-time)         │  Fallback
//! └───────────────────────────────────────────┘
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Config Field | Type |
//! |----------|--------------|------|
//! | `GUARDA_DEBUG` | `debug` | bool |
//! | `GUARDA_HOME_PATH` | `gate.home_path` | String |
//! | `GUARDA_DENIED_MESSAGE` | `gate.denied_message` | String |
//!
//! # Example Configuration
//!
//! ```toml
//! # ~/.guarda/config.toml
//! debug = false
//!
//! [gate]
//! home_path = "/"
//! denied_message = "Access denied"
//! ```

mod error;
mod loader;
mod resolver;
mod types;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use resolver::ConfigResolver;
pub use types::{ConfigLayer, GuardaConfig};

/// Default global config directory.
pub fn default_config_dir() -> std::path::PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join(PROJECT_CONFIG_DIR)
}

/// Default global config file path.
pub fn default_config_path() -> std::path::PathBuf {
    default_config_dir().join(PROJECT_CONFIG_FILE)
}

/// Project config directory name.
pub const PROJECT_CONFIG_DIR: &str = ".guarda";

/// Project config file name.
pub const PROJECT_CONFIG_FILE: &str = "config.toml";
