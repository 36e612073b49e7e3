//! Subcommand implementations.
//!
//! Every command writes its result to `out` and returns the process exit
//! code; diagnostics go through `tracing` to stderr.

use crate::config::GuardaConfig;
use crate::Command;
use anyhow::{Context, Result};
use guarda_auth::capability::split_capability;
use guarda_auth::{
    catalog, codec, defaults_for, AccessGate, AccessPolicy, AccessRequest, Capability,
    GateOutcome, GuardOptions, PermissionEvaluator, PermissionGrant, Principal,
};
use guarda_types::Role;
use std::io::{Read, Write};
use std::process::ExitCode;

/// Source name meaning "read from stdin".
const STDIN: &str = "-";

/// How a command ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Status {
    Success,
    /// `check --strict` on a denied request.
    Denied,
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        match status {
            Status::Success => ExitCode::SUCCESS,
            Status::Denied => ExitCode::FAILURE,
        }
    }
}

pub(crate) fn run(command: Command, config: &GuardaConfig, out: &mut impl Write) -> Result<Status> {
    match command {
        Command::Check {
            principal,
            resource,
            action,
            owner,
            strict,
            explain,
        } => {
            let principal = load_principal(&principal)?;
            let request = request(&resource, &action, owner);
            check(&principal, &request, strict, explain, out)
        }
        Command::Any {
            principal,
            resource,
        } => {
            let principal = load_principal(&principal)?;
            let allowed = PermissionEvaluator::new().can_any(Some(&principal), &resource);
            writeln!(out, "{}", verdict(allowed))?;
            Ok(Status::Success)
        }
        Command::Guard {
            principal,
            resource,
            action,
            owner,
            fallback,
            redirect,
            home,
        } => {
            let principal = load_principal(&principal)?;
            let request = request(&resource, &action, owner);
            let mut options = match (redirect, home) {
                (Some(path), _) => GuardOptions::redirect_to(path),
                (None, true) => GuardOptions::redirect_home(),
                (None, false) => GuardOptions::none(),
            };
            if let Some(text) = fallback {
                options = options.with_fallback(text);
            }
            guard(&principal, &request, options, config, out)
        }
        Command::Defaults { role, json } => defaults(&role, json, out),
        Command::Flatten { grant } => flatten(&grant, out),
        Command::Unflatten { list } => unflatten(&list, out),
        Command::Catalog => print_catalog(out),
        Command::Config => print_config(config, out),
    }
}

fn request(resource: &str, action: &str, owner: Option<String>) -> AccessRequest {
    let request = AccessRequest::new(resource, action);
    match owner {
        Some(owner) => request.owned_by(owner),
        None => request,
    }
}

fn verdict(allowed: bool) -> &'static str {
    if allowed {
        "allowed"
    } else {
        "denied"
    }
}

fn check(
    principal: &Principal,
    request: &AccessRequest,
    strict: bool,
    explain: bool,
    out: &mut impl Write,
) -> Result<Status> {
    let evaluator = PermissionEvaluator::new();
    let allowed = evaluator.can(Some(principal), request);

    if explain {
        let decision = evaluator.explain(Some(principal), request);
        writeln!(out, "{} ({})", verdict(allowed), decision.reason)?;
    } else {
        writeln!(out, "{}", verdict(allowed))?;
    }

    if strict && !allowed {
        return Ok(Status::Denied);
    }
    Ok(Status::Success)
}

fn guard(
    principal: &Principal,
    request: &AccessRequest,
    options: GuardOptions<String>,
    config: &GuardaConfig,
    out: &mut impl Write,
) -> Result<Status> {
    let gate = AccessGate::new(config.gate.home_path.as_str());
    match gate.guard(Some(principal), request, options) {
        GateOutcome::Allow => writeln!(out, "allow")?,
        GateOutcome::Redirect(path) => writeln!(out, "redirect {path}")?,
        GateOutcome::RenderFallback(text) => writeln!(out, "fallback {text}")?,
        GateOutcome::AccessDenied => {
            writeln!(out, "access-denied: {}", config.gate.denied_message)?;
        }
    }
    Ok(Status::Success)
}

fn defaults(role: &str, json: bool, out: &mut impl Write) -> Result<Status> {
    let role = Role::parse(role);
    if let Role::Other(ref name) = role {
        tracing::warn!(role = %name, "unknown role, template is empty");
    }

    let caps = defaults_for(&role);
    if json {
        writeln!(out, "{}", serde_json::to_string(&caps)?)?;
    } else {
        for cap in &caps {
            writeln!(out, "{cap}")?;
        }
    }
    Ok(Status::Success)
}

fn flatten(source: &str, out: &mut impl Write) -> Result<Status> {
    let text = read_input(source)?;
    let grant: PermissionGrant = serde_json::from_str(&text)
        .with_context(|| format!("'{source}' is not a permission array or object"))?;

    if let PermissionGrant::Structured(ref structured) = grant {
        for lost in codec::lost_on_round_trip(structured) {
            tracing::warn!(
                resource = %lost.resource,
                action = %lost.action,
                level = %lost.before,
                "level does not survive the editor round trip"
            );
        }
    }

    let flat = codec::flatten_grant(&grant);
    writeln!(out, "{}", serde_json::to_string(&flat)?)?;
    Ok(Status::Success)
}

fn unflatten(source: &str, out: &mut impl Write) -> Result<Status> {
    let text = read_input(source)?;
    let list: Vec<String> = serde_json::from_str(&text)
        .with_context(|| format!("'{source}' is not a JSON array of strings"))?;

    for entry in &list {
        match Capability::parse(entry) {
            Ok(cap) if !catalog::contains(cap.resource(), cap.action()) => {
                tracing::info!(entry = %entry, "entry is not in the catalog");
            }
            Ok(_) => {}
            Err(e) if split_capability(entry).is_some() => {
                tracing::warn!(entry = %entry, error = %e, "keeping malformed capability as a custom pair");
            }
            Err(_) => tracing::warn!(entry = %entry, "dropping entry without resource.action"),
        }
    }

    let grant = codec::unflatten(&list);
    writeln!(out, "{}", serde_json::to_string_pretty(&grant)?)?;
    Ok(Status::Success)
}

fn print_catalog(out: &mut impl Write) -> Result<Status> {
    for spec in catalog::CATALOG {
        let actions: Vec<&str> = spec.actions.iter().map(|a| a.name).collect();
        writeln!(out, "{}: {}", spec.name, actions.join(" "))?;
    }
    Ok(Status::Success)
}

fn print_config(config: &GuardaConfig, out: &mut impl Write) -> Result<Status> {
    write!(out, "{}", config.to_toml().context("failed to serialize config")?)?;
    Ok(Status::Success)
}

fn load_principal(source: &str) -> Result<Principal> {
    let text = read_input(source)?;
    serde_json::from_str(&text).with_context(|| format!("'{source}' is not a valid principal"))
}

fn read_input(source: &str) -> Result<String> {
    if source == STDIN {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(source).with_context(|| format!("failed to read '{source}'"))
}
