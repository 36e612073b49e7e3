//! Access denied error type.
//!
//! [`AccessDenied`] is what [`Session::require`](crate::Session::require)
//! returns when a request is refused. It separates "nobody is logged in"
//! from "the logged-in principal may not do this", so callers can send
//! the first case to the login screen.

use guarda_types::ErrorCode;
use thiserror::Error;

/// A refused access request.
///
/// # Example
///
/// ```
/// use guarda_auth::AccessDenied;
/// use guarda_types::ErrorCode;
///
/// let err = AccessDenied::Forbidden {
///     principal: "42@vendedor".to_string(),
///     request: "users.delete".to_string(),
/// };
///
/// assert!(err.to_string().contains("users.delete"));
/// assert_eq!(err.code(), "AUTH_FORBIDDEN");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessDenied {
    /// No principal in the session.
    #[error("access denied: '{request}' requires an authenticated session")]
    Unauthenticated {
        /// The request that was attempted (`resource.action`).
        request: String,
    },

    /// The principal's grant does not cover the request.
    #[error("access denied: {principal} may not '{request}'")]
    Forbidden {
        /// The principal that was refused (`id@role`).
        principal: String,
        /// The request that was attempted (`resource.action`).
        request: String,
    },
}

impl AccessDenied {
    /// Returns the attempted request.
    #[must_use]
    pub fn request(&self) -> &str {
        match self {
            Self::Unauthenticated { request } | Self::Forbidden { request, .. } => request,
        }
    }

    /// Returns `true` if re-authenticating could resolve the denial.
    #[must_use]
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::Unauthenticated { .. })
    }
}

impl ErrorCode for AccessDenied {
    fn code(&self) -> &'static str {
        match self {
            Self::Unauthenticated { .. } => "AUTH_UNAUTHENTICATED",
            Self::Forbidden { .. } => "AUTH_FORBIDDEN",
        }
    }

    fn is_recoverable(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use guarda_types::assert_error_codes;

    #[test]
    fn unauthenticated_display() {
        let err = AccessDenied::Unauthenticated {
            request: "leads.view".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("leads.view"), "got: {msg}");
        assert!(msg.contains("authenticated"), "got: {msg}");
        assert!(err.is_unauthenticated());
        assert_eq!(err.request(), "leads.view");
    }

    #[test]
    fn forbidden_display() {
        let err = AccessDenied::Forbidden {
            principal: "7@suporte".to_string(),
            request: "config.edit".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("7@suporte"), "got: {msg}");
        assert!(msg.contains("config.edit"), "got: {msg}");
        assert!(!err.is_unauthenticated());
    }

    #[test]
    fn error_codes() {
        let all = [
            AccessDenied::Unauthenticated {
                request: "a.b".into(),
            },
            AccessDenied::Forbidden {
                principal: "1@admin".into(),
                request: "a.b".into(),
            },
        ];
        assert_error_codes(&all, "AUTH_");
        assert!(all.iter().all(|e| !e.is_recoverable()));
    }
}
