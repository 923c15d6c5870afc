//! Surface errors.
//!
//! The surface owns its own recovery policy. Whatever it raises while
//! handling a forwarded lifecycle event is handed to the container
//! unchanged.

use crate::SurfaceOp;
use gio_types::ErrorCode;
use thiserror::Error;

/// Error raised by a [`Surface`](crate::Surface) implementation.
///
/// | Variant | Code | Recoverable |
/// |---------|------|-------------|
/// | `OperationFailed` | `SURFACE_OPERATION_FAILED` | No |
/// | `ResourceUnavailable` | `SURFACE_RESOURCE_UNAVAILABLE` | Yes |
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
    /// The surface could not complete the operation.
    #[error("surface {op} failed: {message}")]
    OperationFailed {
        /// The operation that failed.
        op: SurfaceOp,
        /// Surface-provided detail.
        message: String,
    },

    /// A resource the surface needs (window, GPU context) is gone for now.
    #[error("surface resource unavailable during {op}: {resource}")]
    ResourceUnavailable {
        /// The operation that hit the missing resource.
        op: SurfaceOp,
        /// Which resource.
        resource: String,
    },
}

impl SurfaceError {
    /// Creates an [`OperationFailed`](Self::OperationFailed) error.
    pub fn failed(op: SurfaceOp, message: impl Into<String>) -> Self {
        Self::OperationFailed {
            op,
            message: message.into(),
        }
    }

    /// Creates a [`ResourceUnavailable`](Self::ResourceUnavailable) error.
    pub fn unavailable(op: SurfaceOp, resource: impl Into<String>) -> Self {
        Self::ResourceUnavailable {
            op,
            resource: resource.into(),
        }
    }

    /// The operation that raised the error.
    #[must_use]
    pub fn op(&self) -> SurfaceOp {
        match self {
            Self::OperationFailed { op, .. } | Self::ResourceUnavailable { op, .. } => *op,
        }
    }
}

impl ErrorCode for SurfaceError {
    fn code(&self) -> &'static str {
        match self {
            Self::OperationFailed { .. } => "SURFACE_OPERATION_FAILED",
            Self::ResourceUnavailable { .. } => "SURFACE_RESOURCE_UNAVAILABLE",
        }
    }

    fn is_recoverable(&self) -> bool {
        matches!(self, Self::ResourceUnavailable { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gio_types::assert_error_codes;

    #[test]
    fn all_error_codes_valid() {
        assert_error_codes(
            &[
                SurfaceError::failed(SurfaceOp::Start, "x"),
                SurfaceError::unavailable(SurfaceOp::Create, "window"),
            ],
            "SURFACE_",
        );
    }

    #[test]
    fn display_names_the_operation() {
        let err = SurfaceError::failed(SurfaceOp::Destroy, "context lost");
        assert_eq!(err.to_string(), "surface destroy failed: context lost");
        assert_eq!(err.op(), SurfaceOp::Destroy);
        assert!(!err.is_recoverable());
    }

    #[test]
    fn unavailable_is_recoverable() {
        let err = SurfaceError::unavailable(SurfaceOp::Start, "gpu");
        assert!(err.is_recoverable());
        assert!(err.to_string().contains("gpu"));
    }
}
