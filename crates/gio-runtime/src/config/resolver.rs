//! Final override layer.
//!
//! ```text
//! ConfigLoader::load()  →  BridgeConfig (files + env)
//!                               │
//!                               ▼
//!                      ConfigResolver::apply()   (e.g. CLI flags)
//!                               │
//!                               ▼
//!                          BridgeConfig (final)
//! ```

use super::BridgeConfig;

/// Applies overrides on top of a loaded [`BridgeConfig`].
///
/// Implementations should only touch settings they were given, so
/// unspecified options keep their loaded values.
///
/// # Example
///
/// ```
/// use gio_runtime::config::{BridgeConfig, ConfigResolver};
///
/// struct Verbose;
///
/// impl ConfigResolver for Verbose {
///     fn apply(&self, config: &mut BridgeConfig) {
///         config.logging.level = "info".into();
///     }
/// }
///
/// let mut config = BridgeConfig::default();
/// Verbose.apply(&mut config);
/// assert_eq!(config.logging.level, "info");
/// ```
pub trait ConfigResolver {
    /// Applies this layer's overrides.
    fn apply(&self, config: &mut BridgeConfig);
}
