//! Route and element gating.
//!
//! [`AccessGate`] wraps an [`AccessPolicy`] and turns its boolean answer
//! into what the UI should do: show the content, redirect, render a
//! fallback element, or show the built-in "access denied" view.
//!
//! # Denial precedence
//!
//! ```text
//! allowed?  ── yes ──► Allow
//!    │
//!    no
//!    ├── fallback given? ──► RenderFallback(node)
//!    ├── redirect given? ──► Redirect(path)
//!    └──────────────────────► AccessDenied
//! ```
//!
//! The gate has no decision logic of its own.

use crate::policy::{AccessPolicy, AccessRequest};
use crate::{PermissionEvaluator, Principal};

/// Home path used when none is configured.
pub const DEFAULT_HOME_PATH: &str = "/";

/// What to render for a guarded route or element.
///
/// `N` is the caller's UI node type.
///
/// # Example
///
/// ```
/// use guarda_auth::GateOutcome;
///
/// let outcome: GateOutcome<&str> = GateOutcome::Redirect("/".to_string());
/// assert!(!outcome.is_allowed());
/// assert_eq!(outcome.status_str(), "redirect");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome<N> {
    /// Render the protected content.
    Allow,
    /// Navigate to the given path.
    Redirect(String),
    /// Render the caller's fallback instead of the content.
    RenderFallback(N),
    /// Render the built-in "access denied" view.
    AccessDenied,
}

impl<N> GateOutcome<N> {
    /// Returns `true` if the protected content should render.
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }

    /// Returns the status as a string ("allow", "redirect", "fallback", "access-denied").
    #[must_use]
    pub fn status_str(&self) -> &'static str {
        match self {
            Self::Allow => "allow",
            Self::Redirect(_) => "redirect",
            Self::RenderFallback(_) => "fallback",
            Self::AccessDenied => "access-denied",
        }
    }

    /// Maps the fallback node, leaving other outcomes as they are.
    pub fn map_fallback<M>(self, f: impl FnOnce(N) -> M) -> GateOutcome<M> {
        match self {
            Self::Allow => GateOutcome::Allow,
            Self::Redirect(path) => GateOutcome::Redirect(path),
            Self::RenderFallback(node) => GateOutcome::RenderFallback(f(node)),
            Self::AccessDenied => GateOutcome::AccessDenied,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Redirect {
    Home,
    To(String),
}

/// What the gate does on denial.
///
/// The default has neither fallback nor redirect and yields
/// [`GateOutcome::AccessDenied`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardOptions<N> {
    fallback: Option<N>,
    redirect: Option<Redirect>,
}

impl<N> Default for GuardOptions<N> {
    fn default() -> Self {
        Self {
            fallback: None,
            redirect: None,
        }
    }
}

impl<N> GuardOptions<N> {
    /// Options with no fallback and no redirect.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Redirect to the gate's home path on denial.
    #[must_use]
    pub fn redirect_home() -> Self {
        Self {
            fallback: None,
            redirect: Some(Redirect::Home),
        }
    }

    /// Redirect to `path` on denial.
    #[must_use]
    pub fn redirect_to(path: impl Into<String>) -> Self {
        Self {
            fallback: None,
            redirect: Some(Redirect::To(path.into())),
        }
    }

    /// Render `node` on denial.
    #[must_use]
    pub fn fallback(node: N) -> Self {
        Self {
            fallback: Some(node),
            redirect: None,
        }
    }

    /// Adds a fallback node. It takes precedence over any redirect.
    #[must_use]
    pub fn with_fallback(mut self, node: N) -> Self {
        self.fallback = Some(node);
        self
    }
}

/// Decides what a guarded route or element renders.
///
/// # Example
///
/// ```
/// use guarda_auth::{AccessGate, AccessRequest, GateOutcome, GuardOptions};
///
/// let gate = AccessGate::new("/inicio");
/// let req = AccessRequest::new("users", "view");
///
/// let outcome = gate.guard(None, &req, GuardOptions::<()>::redirect_home());
/// assert_eq!(outcome, GateOutcome::Redirect("/inicio".to_string()));
///
/// let outcome = gate.guard(None, &req, GuardOptions::fallback("hidden"));
/// assert_eq!(outcome, GateOutcome::RenderFallback("hidden"));
/// ```
#[derive(Debug, Clone)]
pub struct AccessGate<P = PermissionEvaluator> {
    policy: P,
    home_path: String,
}

impl AccessGate {
    /// Creates a gate over the default evaluator.
    #[must_use]
    pub fn new(home_path: impl Into<String>) -> Self {
        Self {
            policy: PermissionEvaluator::new(),
            home_path: home_path.into(),
        }
    }
}

impl Default for AccessGate {
    fn default() -> Self {
        Self::new(DEFAULT_HOME_PATH)
    }
}

impl<P: AccessPolicy> AccessGate<P> {
    /// Returns the gate with `policy` in place of the current one.
    #[must_use]
    pub fn with_policy<Q: AccessPolicy>(self, policy: Q) -> AccessGate<Q> {
        AccessGate {
            policy,
            home_path: self.home_path,
        }
    }

    /// Returns the configured home path.
    #[must_use]
    pub fn home_path(&self) -> &str {
        &self.home_path
    }

    /// Returns the underlying policy.
    #[must_use]
    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Guards a single `resource.action` request.
    pub fn guard<N>(
        &self,
        principal: Option<&Principal>,
        request: &AccessRequest,
        options: GuardOptions<N>,
    ) -> GateOutcome<N> {
        if self.policy.can(principal, request) {
            return GateOutcome::Allow;
        }
        let outcome = self.on_denied(options);
        tracing::debug!(request = %request, outcome = outcome.status_str(), "gate denied");
        outcome
    }

    /// Guards a whole section: allowed if any action on `resource` is.
    pub fn guard_section<N>(
        &self,
        principal: Option<&Principal>,
        resource: &str,
        options: GuardOptions<N>,
    ) -> GateOutcome<N> {
        if self.policy.can_any(principal, resource) {
            return GateOutcome::Allow;
        }
        let outcome = self.on_denied(options);
        tracing::debug!(resource = resource, outcome = outcome.status_str(), "gate denied section");
        outcome
    }

    fn on_denied<N>(&self, options: GuardOptions<N>) -> GateOutcome<N> {
        if let Some(node) = options.fallback {
            return GateOutcome::RenderFallback(node);
        }
        match options.redirect {
            Some(Redirect::Home) => GateOutcome::Redirect(self.home_path.clone()),
            Some(Redirect::To(path)) => GateOutcome::Redirect(path),
            None => GateOutcome::AccessDenied,
        }
    }
}
