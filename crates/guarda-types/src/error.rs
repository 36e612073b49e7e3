//! Machine-readable error codes.
//!
//! Every guarda error type implements [`ErrorCode`] so that frontends can
//! branch on a stable code instead of matching display strings.
//!
//! # Example
//!
//! ```
//! use guarda_types::ErrorCode;
//!
//! #[derive(Debug)]
//! enum LookupError {
//!     Missing,
//!     Offline,
//! }
//!
//! impl ErrorCode for LookupError {
//!     fn code(&self) -> &'static str {
//!         match self {
//!             Self::Missing => "LOOKUP_MISSING",
//!             Self::Offline => "LOOKUP_OFFLINE",
//!         }
//!     }
//!
//!     fn is_recoverable(&self) -> bool {
//!         matches!(self, Self::Offline)
//!     }
//! }
//!
//! assert_eq!(LookupError::Missing.code(), "LOOKUP_MISSING");
//! assert!(LookupError::Offline.is_recoverable());
//! ```

/// Stable error code interface.
///
/// Codes are UPPER_SNAKE_CASE and prefixed by their domain
/// (`AUTH_`, `CAPABILITY_`, `CONFIG_`). Once published a code
/// does not change.
pub trait ErrorCode {
    /// Returns a machine-readable error code.
    fn code(&self) -> &'static str;

    /// Returns whether the user can fix the condition and retry.
    ///
    /// A denied permission is not recoverable: retrying the same
    /// request with the same grant yields the same answer.
    fn is_recoverable(&self) -> bool;
}

/// Asserts that an error code is non-empty, UPPER_SNAKE_CASE and
/// carries the expected prefix.
///
/// Intended for tests of error enums.
///
/// # Panics
///
/// Panics with a descriptive message if any check fails.
///
/// ```
/// use guarda_types::{assert_error_code, ErrorCode};
///
/// struct Timeout;
///
/// impl ErrorCode for Timeout {
///     fn code(&self) -> &'static str { "NET_TIMEOUT" }
///     fn is_recoverable(&self) -> bool { true }
/// }
///
/// assert_error_code(&Timeout, "NET_");
/// ```
pub fn assert_error_code<E: ErrorCode>(err: &E, expected_prefix: &str) {
    let code = err.code();

    assert!(!code.is_empty(), "Error code must not be empty");
    assert!(
        code.starts_with(expected_prefix),
        "Error code '{code}' must start with prefix '{expected_prefix}'"
    );
    assert!(
        is_upper_snake_case(code),
        "Error code '{code}' must be UPPER_SNAKE_CASE"
    );
}

/// Runs [`assert_error_code`] over every given error.
pub fn assert_error_codes<E: ErrorCode>(errors: &[E], expected_prefix: &str) {
    for err in errors {
        assert_error_code(err, expected_prefix);
    }
}

fn is_upper_snake_case(s: &str) -> bool {
    if s.is_empty() || s.starts_with('_') || s.ends_with('_') || s.contains("__") {
        return false;
    }

    s.chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}
