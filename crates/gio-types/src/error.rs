//! Unified error code interface.
//!
//! Every error enum in the bridge implements [`ErrorCode`] so the
//! container (and logs) can react to a stable, machine-readable code
//! instead of matching on display strings.
//!
//! # Code Namespaces
//!
//! | Crate | Prefix | Example |
//! |-------|--------|---------|
//! | `gio-auth` | `PERMISSION_` | `PERMISSION_UNKNOWN_RESPONSE` |
//! | `gio-surface` | `SURFACE_` | `SURFACE_OPERATION_FAILED` |
//! | `gio-runtime` | `FORWARD_` | `FORWARD_ILLEGAL_TRANSITION` |
//!
//! # Example
//!
//! ```
//! use gio_types::ErrorCode;
//!
//! #[derive(Debug)]
//! enum HostError {
//!     Busy,
//!     Rejected(String),
//! }
//!
//! impl ErrorCode for HostError {
//!     fn code(&self) -> &'static str {
//!         match self {
//!             Self::Busy => "HOST_BUSY",
//!             Self::Rejected(_) => "HOST_REJECTED",
//!         }
//!     }
//!
//!     fn is_recoverable(&self) -> bool {
//!         matches!(self, Self::Busy)
//!     }
//! }
//!
//! assert_eq!(HostError::Busy.code(), "HOST_BUSY");
//! assert!(!HostError::Rejected("no".into()).is_recoverable());
//! ```

/// Machine-readable error classification.
///
/// # Code Format
///
/// - **UPPER_SNAKE_CASE**
/// - **Namespace-prefixed** (`PERMISSION_`, `SURFACE_`, `FORWARD_`)
/// - **Stable**: once published a code never changes meaning
///
/// # Recoverability
///
/// "Recoverable" means the bridge handles the condition locally
/// (drop, skip, treat as denial) and keeps running. Non-recoverable
/// errors are handed to the container unchanged.
pub trait ErrorCode {
    /// Returns the stable error code.
    fn code(&self) -> &'static str;

    /// Returns `true` if the condition is handled without involving the container.
    fn is_recoverable(&self) -> bool;
}

/// Validates that an error code follows the naming convention.
///
/// # Panics
///
/// Panics if the code is empty, lacks `expected_prefix`, or is not
/// UPPER_SNAKE_CASE.
///
/// # Example
///
/// ```
/// use gio_types::{assert_error_code, ErrorCode};
///
/// struct Stale;
///
/// impl ErrorCode for Stale {
///     fn code(&self) -> &'static str { "PERMISSION_STALE" }
///     fn is_recoverable(&self) -> bool { true }
/// }
///
/// assert_error_code(&Stale, "PERMISSION_");
/// ```
pub fn assert_error_code<E: ErrorCode>(err: &E, expected_prefix: &str) {
    let code = err.code();

    assert!(!code.is_empty(), "Error code must not be empty");
    assert!(
        code.starts_with(expected_prefix),
        "Error code '{}' must start with prefix '{}'",
        code,
        expected_prefix
    );
    assert!(
        is_upper_snake_case(code),
        "Error code '{}' must be UPPER_SNAKE_CASE",
        code
    );
}

/// Validates every variant in `errors` with [`assert_error_code`].
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

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    enum SampleError {
        Dropped,
        Escalated,
    }

    impl ErrorCode for SampleError {
        fn code(&self) -> &'static str {
            match self {
                Self::Dropped => "SAMPLE_DROPPED",
                Self::Escalated => "SAMPLE_ESCALATED",
            }
        }

        fn is_recoverable(&self) -> bool {
            matches!(self, Self::Dropped)
        }
    }

    #[test]
    fn codes_and_recoverability() {
        assert_eq!(SampleError::Dropped.code(), "SAMPLE_DROPPED");
        assert!(SampleError::Dropped.is_recoverable());
        assert!(!SampleError::Escalated.is_recoverable());
    }

    #[test]
    fn all_variants_pass_validation() {
        assert_error_codes(&[SampleError::Dropped, SampleError::Escalated], "SAMPLE_");
    }

    #[test]
    #[should_panic(expected = "must start with prefix")]
    fn wrong_prefix_panics() {
        assert_error_code(&SampleError::Dropped, "SURFACE_");
    }

    #[test]
    fn snake_case_detection() {
        assert!(is_upper_snake_case("PERMISSION_UNKNOWN_RESPONSE"));
        assert!(is_upper_snake_case("API_31"));
        assert!(!is_upper_snake_case(""));
        assert!(!is_upper_snake_case("Permission"));
        assert!(!is_upper_snake_case("_LEADING"));
        assert!(!is_upper_snake_case("TRAILING_"));
        assert!(!is_upper_snake_case("DOUBLE__UNDERSCORE"));
    }
}
