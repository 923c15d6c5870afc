//! Layered configuration loading.
//!
//! # Load Order
//!
//! 1. Defaults
//! 2. Global config (`~/.gio/config.toml`)
//! 3. Project config (`<root>/.gio/config.toml`)
//! 4. Environment variables (`GIO_*`)
//!
//! Each layer overrides the previous one.

use super::{
    default_config_path, BridgeConfig, ConfigError, PROJECT_CONFIG_DIR, PROJECT_CONFIG_FILE,
};
use gio_types::HostVersion;
use std::path::{Path, PathBuf};
use tracing::debug;

macro_rules! parse_env_bool {
    ($lookup:expr, $field:expr, $var:literal) => {
        if let Some(val) = $lookup($var) {
            $field = parse_bool(&val)
                .ok_or_else(|| ConfigError::invalid_env_var($var, "expected bool"))?;
        }
    };
}

/// Builder that loads a [`BridgeConfig`] from every layer.
///
/// # Example
///
/// ```
/// use gio_runtime::config::{BridgeConfig, ConfigLoader};
///
/// let config = ConfigLoader::new()
///     .skip_global_config()
///     .skip_project_config()
///     .skip_env_vars()
///     .load()
///     .expect("defaults always load");
///
/// assert_eq!(config, BridgeConfig::default());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    global_config_path: Option<PathBuf>,
    project_root: Option<PathBuf>,
    skip_env: bool,
    skip_global: bool,
    skip_project: bool,
}

impl ConfigLoader {
    /// Creates a loader that reads every layer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the global layer from `path` instead of `~/.gio/config.toml`.
    #[must_use]
    pub fn with_global_config(mut self, path: impl Into<PathBuf>) -> Self {
        self.global_config_path = Some(path.into());
        self
    }

    /// Reads the project layer from `<path>/.gio/config.toml`.
    #[must_use]
    pub fn with_project_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.project_root = Some(path.into());
        self
    }

    /// Ignores `GIO_*` variables.
    #[must_use]
    pub fn skip_env_vars(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Ignores the global layer.
    #[must_use]
    pub fn skip_global_config(mut self) -> Self {
        self.skip_global = true;
        self
    }

    /// Ignores the project layer.
    #[must_use]
    pub fn skip_project_config(mut self) -> Self {
        self.skip_project = true;
        self
    }

    /// Loads and merges every enabled layer.
    ///
    /// Missing files are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a file exists but cannot be read or
    /// parsed, or if a `GIO_*` variable is invalid.
    pub fn load(&self) -> Result<BridgeConfig, ConfigError> {
        let mut config = BridgeConfig::default();

        if !self.skip_global {
            let path = self
                .global_config_path
                .clone()
                .unwrap_or_else(default_config_path);
            if let Some(global) = load_file(&path)? {
                debug!(path = %path.display(), "loaded global config");
                config.merge(&global);
            }
        }

        if !self.skip_project {
            if let Some(root) = &self.project_root {
                let path = root.join(PROJECT_CONFIG_DIR).join(PROJECT_CONFIG_FILE);
                if let Some(project) = load_file(&path)? {
                    debug!(path = %path.display(), "loaded project config");
                    config.merge(&project);
                }
            }
        }

        if !self.skip_env {
            apply_env(&mut config, |name| std::env::var(name).ok())?;
        }

        Ok(config)
    }
}

/// Reads one layer. `Ok(None)` if the file does not exist.
fn load_file(path: &Path) -> Result<Option<BridgeConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
    let config =
        BridgeConfig::from_toml(&content).map_err(|e| ConfigError::parse_toml(path, e))?;
    Ok(Some(config))
}

/// Applies `GIO_*` overrides, reading variables through `lookup`.
fn apply_env<F>(config: &mut BridgeConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    parse_env_bool!(lookup, config.debug, "GIO_DEBUG");

    if let Some(val) = lookup("GIO_HOST_VERSION") {
        let level: u32 = val.trim().parse().map_err(|_| {
            ConfigError::invalid_env_var("GIO_HOST_VERSION", "expected API level")
        })?;
        config.host.version = Some(HostVersion::new(level));
    }

    if let Some(val) = lookup("GIO_LOG_LEVEL") {
        config.logging.level = val;
    }

    Ok(())
}

/// Accepts true/false, 1/0, yes/no, on/off (any case).
fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
