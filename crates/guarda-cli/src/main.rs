//! guarda CLI - inspect and provision CRM permissions
//!
//! # Configuration
//!
//! Configuration is loaded from multiple sources with priority:
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`GUARDA_*`)
//! 3. Project config (`.guarda/config.toml` in the project root)
//! 4. Global config (`~/.guarda/config.toml`)
//! 5. Default values (lowest priority)
//!
//! # Environment Variables
//!
//! - `GUARDA_DEBUG`: Enable debug logging (`true`/`false`)
//! - `GUARDA_HOME_PATH`: Redirect target for `guard --home`
//! - `GUARDA_DENIED_MESSAGE`: Text of the access denied view
//!
//! Logs always go to stderr; stdout carries only command output.

mod commands;
mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use config::{ConfigLoader, ConfigResolver, GuardaConfig};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// guarda - permission checks for the CRM admin client
#[derive(Parser, Debug)]
#[command(name = "guarda")]
#[command(version, about, long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Project root directory (defaults to current directory)
    #[arg(short = 'C', long, global = true)]
    project: Option<PathBuf>,

    /// Redirect target for `guard --home` (also: GUARDA_HOME_PATH)
    #[arg(long, global = true, value_name = "PATH")]
    home_path: Option<String>,

    /// Use this file instead of ~/.guarda/config.toml
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Ignore config files and GUARDA_* variables; only CLI flags apply
    #[arg(long, global = true, conflicts_with = "config")]
    isolated: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decide a single resource.action request
    Check {
        /// Principal JSON file (`-` for stdin)
        principal: String,
        resource: String,
        action: String,
        /// Id of the record owner
        #[arg(long)]
        owner: Option<String>,
        /// Exit with status 1 when denied
        #[arg(long)]
        strict: bool,
        /// Print the rule that decided
        #[arg(long)]
        explain: bool,
    },

    /// Decide whether any action on a resource is reachable
    Any {
        /// Principal JSON file (`-` for stdin)
        principal: String,
        resource: String,
    },

    /// Show what a guarded route renders
    Guard {
        /// Principal JSON file (`-` for stdin)
        principal: String,
        resource: String,
        action: String,
        /// Id of the record owner
        #[arg(long)]
        owner: Option<String>,
        /// Fallback text rendered on denial
        #[arg(long)]
        fallback: Option<String>,
        /// Redirect to this path on denial
        #[arg(long, conflicts_with = "home")]
        redirect: Option<String>,
        /// Redirect to the configured home path on denial
        #[arg(long)]
        home: bool,
    },

    /// Print the default capability set of a role
    Defaults {
        role: String,
        /// Print a JSON array instead of one capability per line
        #[arg(long)]
        json: bool,
    },

    /// Flatten a grant into the editor's capability list
    Flatten {
        /// Grant JSON file (`-` for stdin)
        grant: String,
    },

    /// Rebuild a structured grant from a capability list
    Unflatten {
        /// JSON array file (`-` for stdin)
        list: String,
    },

    /// List every resource and action in the catalog
    Catalog,

    /// Print the effective configuration as TOML
    Config,
}

/// CLI-based configuration resolver.
///
/// Merges file/env config via [`ConfigLoader`] and applies CLI argument
/// overrides as the highest-priority layer.
struct CliConfigResolver {
    project_root: PathBuf,
    global_config: Option<PathBuf>,
    isolated: bool,
    debug: bool,
    home_path: Option<String>,
}

impl CliConfigResolver {
    fn from_args(args: &Args) -> Self {
        let project_root = args.project.clone().unwrap_or_else(|| {
            std::env::current_dir().unwrap_or_else(|e| {
                eprintln!("Warning: cannot read current directory ({e}), using '.'");
                PathBuf::from(".")
            })
        });

        Self {
            project_root,
            global_config: args.config.clone(),
            isolated: args.isolated,
            debug: args.debug,
            home_path: args.home_path.clone(),
        }
    }

    fn resolve(&self) -> Result<GuardaConfig, config::ConfigError> {
        let mut loader = ConfigLoader::new().with_project_root(&self.project_root);
        if let Some(ref path) = self.global_config {
            loader = loader.with_global_config(path);
        }
        if self.isolated {
            loader = loader
                .skip_global_config()
                .skip_project_config()
                .skip_env_vars();
        }

        let mut config = loader.load()?;
        self.apply(&mut config);
        Ok(config)
    }
}

impl ConfigResolver for CliConfigResolver {
    fn apply(&self, config: &mut GuardaConfig) {
        if self.debug {
            config.debug = true;
        }
        if let Some(ref path) = self.home_path {
            config.gate.home_path.clone_from(path);
        }
    }
}

fn init_tracing(debug: bool, verbose: bool) {
    // --debug > --verbose > RUST_LOG env > default "warn"
    let filter = if debug {
        EnvFilter::new("debug")
    } else if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(filter);

    tracing_subscriber::registry().with(layer).init();
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let resolver = CliConfigResolver::from_args(&args);
    let config = resolver.resolve().context("Config error")?;

    init_tracing(config.debug, args.verbose);

    info!(path = %resolver.project_root.display(), "Project root");

    let mut out = std::io::stdout().lock();
    commands::run(args.command, &config, &mut out).map(ExitCode::from)
}
