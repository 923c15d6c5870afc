//! Configuration types.
//!
//! Every section implements [`Default`], and every field is optional in
//! TOML (`#[serde(default)]`).

use gio_auth::{Capability, CapabilitySet, CapabilityTable};
use gio_types::HostVersion;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Merged bridge configuration.
///
/// # Example
///
/// ```
/// use gio_auth::Capability;
/// use gio_runtime::config::BridgeConfig;
///
/// let config = BridgeConfig::from_toml(
///     r#"
/// [permissions]
/// request = ["bluetooth_scan", "fine_location"]
/// "#,
/// )
/// .expect("valid toml");
///
/// let requested = config.permissions.requested();
/// assert!(requested.has(Capability::BluetoothScan));
/// assert!(!requested.has(Capability::Bluetooth));
/// assert_eq!(config.logging.level, "warn");
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BridgeConfig {
    /// Debug mode (debug-level logging).
    pub debug: bool,

    /// Host settings.
    pub host: HostConfig,

    /// Permission policy.
    pub permissions: PermissionsConfig,

    /// Logging settings.
    pub logging: LoggingConfig,
}

impl BridgeConfig {
    /// Serializes to a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Parses a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid TOML or unknown capability names.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Overlays `other` on `self`.
    ///
    /// A field is taken from `other` only when it differs from the
    /// default, so a layer that leaves a setting out never resets it.
    pub fn merge(&mut self, other: &Self) {
        let default = Self::default();

        if other.debug != default.debug {
            self.debug = other.debug;
        }

        self.host.merge(&other.host);
        self.permissions.merge(&other.permissions);
        self.logging.merge(&other.logging);
    }
}

/// Host settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HostConfig {
    /// Host API level to report instead of the built-in default.
    pub version: Option<HostVersion>,
}

impl HostConfig {
    fn merge(&mut self, other: &Self) {
        if other.version.is_some() {
            self.version = other.version;
        }
    }

    /// The configured version, or [`HostVersion::default`].
    #[must_use]
    pub fn version_or_default(&self) -> HostVersion {
        self.version.unwrap_or_default()
    }
}

/// Permission policy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PermissionsConfig {
    /// Capabilities to request at container creation.
    pub request: Vec<Capability>,

    /// Version gates and required flags, in request order.
    pub rules: CapabilityTable,
}

impl Default for PermissionsConfig {
    fn default() -> Self {
        let rules = CapabilityTable::default();
        Self {
            request: rules.iter().map(|r| r.capability).collect(),
            rules,
        }
    }
}

impl PermissionsConfig {
    fn merge(&mut self, other: &Self) {
        let default = Self::default();

        if other.request != default.request {
            self.request = other.request.clone();
        }
        if other.rules != default.rules {
            self.rules = other.rules.clone();
        }
    }

    /// The `request` list as a set.
    #[must_use]
    pub fn requested(&self) -> CapabilitySet {
        self.request.iter().copied().collect()
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter used when neither flags nor `RUST_LOG` choose one.
    pub level: String,

    /// Also write logs to a file.
    pub file: bool,

    /// Directory for the log file. Defaults to the current directory.
    pub file_path: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".into(),
            file: false,
            file_path: None,
        }
    }
}

impl LoggingConfig {
    fn merge(&mut self, other: &Self) {
        let default = Self::default();

        if other.level != default.level {
            self.level = other.level.clone();
        }
        if other.file != default.file {
            self.file = other.file;
        }
        if other.file_path.is_some() {
            self.file_path = other.file_path.clone();
        }
    }
}
