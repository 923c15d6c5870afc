//! Permission correlation errors.
//!
//! None of these ever reach the user as a failure. Each one names a
//! condition the coordinator resolves locally:
//!
//! | Error | Code | Local resolution |
//! |-------|------|------------------|
//! | [`UnknownResponse`](PermissionError::UnknownResponse) | `PERMISSION_UNKNOWN_RESPONSE` | Dropped silently |
//! | [`UnsupportedCapability`](PermissionError::UnsupportedCapability) | `PERMISSION_UNSUPPORTED_CAPABILITY` | Capability skipped |
//! | [`MalformedResponse`](PermissionError::MalformedResponse) | `PERMISSION_MALFORMED_RESPONSE` | Treated as denial |
//! | [`IdsExhausted`](PermissionError::IdsExhausted) | `PERMISSION_IDS_EXHAUSTED` | Request not issued |

use crate::Capability;
use gio_types::{ErrorCode, RequestId};
use thiserror::Error;

/// Conditions raised while issuing or resolving permission requests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PermissionError {
    /// A response carried a request code with no open request
    /// (duplicate delivery, expired request, foreign code).
    #[error("no open request for {request_id}")]
    UnknownResponse {
        /// The unmatched request code.
        request_id: RequestId,
    },

    /// The host cannot evaluate the capability's grant status.
    #[error("host cannot evaluate {capability}: {reason}")]
    UnsupportedCapability {
        /// The skipped capability.
        capability: Capability,
        /// Why it was skipped.
        reason: String,
    },

    /// The grant-result payload was empty, short, or about another capability.
    #[error("malformed response for {request_id}: {reason}")]
    MalformedResponse {
        /// The request the payload answered.
        request_id: RequestId,
        /// What was wrong with it.
        reason: String,
    },

    /// The coordinator has spent its request code space.
    #[error("request codes exhausted; {capability} not requested")]
    IdsExhausted {
        /// The capability that could not be requested.
        capability: Capability,
    },
}

impl PermissionError {
    /// Creates an [`UnsupportedCapability`](Self::UnsupportedCapability) error.
    pub fn unsupported(capability: Capability, reason: impl Into<String>) -> Self {
        Self::UnsupportedCapability {
            capability,
            reason: reason.into(),
        }
    }

    /// Creates a [`MalformedResponse`](Self::MalformedResponse) error.
    pub fn malformed(request_id: RequestId, reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            request_id,
            reason: reason.into(),
        }
    }
}

impl ErrorCode for PermissionError {
    fn code(&self) -> &'static str {
        match self {
            Self::UnknownResponse { .. } => "PERMISSION_UNKNOWN_RESPONSE",
            Self::UnsupportedCapability { .. } => "PERMISSION_UNSUPPORTED_CAPABILITY",
            Self::MalformedResponse { .. } => "PERMISSION_MALFORMED_RESPONSE",
            Self::IdsExhausted { .. } => "PERMISSION_IDS_EXHAUSTED",
        }
    }

    fn is_recoverable(&self) -> bool {
        !matches!(self, Self::IdsExhausted { .. })
    }
}
