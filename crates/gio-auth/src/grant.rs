//! Grant status as reported by the host.
//!
//! Two separate types for two separate questions:
//!
//! | Type | Question | Values |
//! |------|----------|--------|
//! | [`GrantStatus`] | "Is this capability already granted?" (pre-request check) | Granted, Denied, Unsupported |
//! | [`GrantResult`] | "What did the user answer?" (response payload) | Granted, Denied |

use serde::{Deserialize, Serialize};

/// Current grant status of a capability, queried before requesting it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantStatus {
    /// Already granted; no request is needed.
    Granted,
    /// Not granted; a request should be issued.
    Denied,
    /// The host cannot evaluate this capability (older host, missing
    /// concept). The capability is skipped entirely.
    Unsupported,
}

impl GrantStatus {
    /// Returns `true` if the coordinator should issue a request.
    #[must_use]
    pub fn needs_request(self) -> bool {
        matches!(self, Self::Denied)
    }
}

impl std::fmt::Display for GrantStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Granted => write!(f, "granted"),
            Self::Denied => write!(f, "denied"),
            Self::Unsupported => write!(f, "unsupported"),
        }
    }
}

/// One entry of a host response's grant-result list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantResult {
    /// The user granted the capability.
    Granted,
    /// The user denied the capability (or dismissed the prompt).
    Denied,
}

impl GrantResult {
    /// Returns `true` for [`GrantResult::Granted`].
    #[must_use]
    pub fn is_granted(self) -> bool {
        matches!(self, Self::Granted)
    }
}

impl From<bool> for GrantResult {
    fn from(granted: bool) -> Self {
        if granted {
            Self::Granted
        } else {
            Self::Denied
        }
    }
}

impl std::fmt::Display for GrantResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Granted => write!(f, "granted"),
            Self::Denied => write!(f, "denied"),
        }
    }
}
