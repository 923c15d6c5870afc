//! Lifecycle forwarding errors.

use gio_surface::{SurfaceError, SurfacePhase};
use gio_types::ErrorCode;
use thiserror::Error;

/// Error returned by [`LifecycleForwarder`](super::LifecycleForwarder).
///
/// | Variant | Code | Recoverable |
/// |---------|------|-------------|
/// | `IllegalTransition` | `FORWARD_ILLEGAL_TRANSITION` | Yes (nothing was forwarded) |
/// | `Surface` | the surface's own code | the surface's own verdict |
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ForwardError {
    /// The event is not legal in the current phase.
    #[error("{event} is not legal while the surface is {phase}")]
    IllegalTransition {
        /// Phase the forwarder was in.
        phase: SurfacePhase,
        /// Name of the rejected event.
        event: &'static str,
    },

    /// The surface failed while handling a forwarded event.
    #[error(transparent)]
    Surface(#[from] SurfaceError),
}

impl ForwardError {
    /// The surface error, if this is one.
    #[must_use]
    pub fn as_surface(&self) -> Option<&SurfaceError> {
        match self {
            Self::Surface(err) => Some(err),
            Self::IllegalTransition { .. } => None,
        }
    }
}

impl ErrorCode for ForwardError {
    fn code(&self) -> &'static str {
        match self {
            Self::IllegalTransition { .. } => "FORWARD_ILLEGAL_TRANSITION",
            Self::Surface(err) => err.code(),
        }
    }

    fn is_recoverable(&self) -> bool {
        match self {
            Self::IllegalTransition { .. } => true,
            Self::Surface(err) => err.is_recoverable(),
        }
    }
}
