//! Host platform version.
//!
//! Some capabilities only exist from a given host API level onward
//! (Bluetooth scan/connect since API 31, runtime location prompts since
//! API 23). Rules compare against [`HostVersion`] before asking the host
//! anything.

use serde::{Deserialize, Serialize};

/// Host API level.
///
/// # Example
///
/// ```
/// use gio_types::HostVersion;
///
/// let host = HostVersion::new(30);
/// assert!(host.at_least(HostVersion::M));
/// assert!(!host.at_least(HostVersion::S));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HostVersion(u32);

impl HostVersion {
    /// Lowest possible level; every rule applies at or above it.
    pub const BASE: Self = Self(1);
    /// API 23, runtime permission prompts.
    pub const M: Self = Self(23);
    /// API 31, split Bluetooth permissions.
    pub const S: Self = Self(31);
    /// API 33.
    pub const TIRAMISU: Self = Self(33);

    /// Creates a version from a raw API level.
    #[must_use]
    pub const fn new(level: u32) -> Self {
        Self(level)
    }

    /// Returns the raw API level.
    #[must_use]
    pub const fn level(self) -> u32 {
        self.0
    }

    /// Returns `true` if this host is at `min` or newer.
    #[must_use]
    pub fn at_least(self, min: Self) -> bool {
        self >= min
    }
}

impl Default for HostVersion {
    fn default() -> Self {
        Self::TIRAMISU
    }
}

impl std::fmt::Display for HostVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "api-{}", self.0)
    }
}
