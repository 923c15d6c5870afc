//! Layered configuration.
//!
//! # Architecture
//!
//! ```text
//! Priority (highest to lowest):
//!
//! ┌─────────────────────────────────────────┐
//! │  1. ConfigResolver (CLI flags)          │
//! ├─────────────────────────────────────────┤
//! │  2. Environment Variables (GIO_*)       │
//! ├─────────────────────────────────────────┤
//! │  3. Project Config (.gio/config.toml)   │
//! ├─────────────────────────────────────────┤
//! │  4. Global Config (~/.gio/config.toml)  │
//! ├─────────────────────────────────────────┤
//! │  5. Default Values                      │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Config Field | Type |
//! |----------|--------------|------|
//! | `GIO_DEBUG` | `debug` | bool |
//! | `GIO_HOST_VERSION` | `host.version` | u32 |
//! | `GIO_LOG_LEVEL` | `logging.level` | String |
//!
//! # Example Configuration
//!
//! ```toml
//! # ~/.gio/config.toml
//! debug = false
//!
//! [host]
//! version = 33
//!
//! [permissions]
//! request = ["bluetooth", "bluetooth_scan", "bluetooth_connect", "fine_location"]
//!
//! [[permissions.rules]]
//! capability = "bluetooth"
//!
//! [[permissions.rules]]
//! capability = "bluetooth_scan"
//! min_host_version = 31
//!
//! [[permissions.rules]]
//! capability = "bluetooth_connect"
//! min_host_version = 31
//!
//! [[permissions.rules]]
//! capability = "fine_location"
//! min_host_version = 23
//! required = true
//!
//! [logging]
//! level = "warn"
//! file = false
//! ```

mod error;
mod loader;
mod resolver;
mod types;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use resolver::ConfigResolver;
pub use types::{BridgeConfig, HostConfig, LoggingConfig, PermissionsConfig};

use std::path::PathBuf;

/// Project config directory name.
pub const PROJECT_CONFIG_DIR: &str = ".gio";

/// Config file name, in both the global and the project directory.
pub const PROJECT_CONFIG_FILE: &str = "config.toml";

/// Global config directory (`~/.gio`).
#[must_use]
pub fn default_config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(PROJECT_CONFIG_DIR)
}

/// Global config file (`~/.gio/config.toml`).
#[must_use]
pub fn default_config_path() -> PathBuf {
    default_config_dir().join(PROJECT_CONFIG_FILE)
}
