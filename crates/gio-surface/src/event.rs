//! Lifecycle events and container configuration.
//!
//! A [`LifecycleEvent`] is a fact about a container transition, not a
//! command. The forwarder turns each fact into at most one surface call.

use serde::{Deserialize, Serialize};

/// Screen orientation reported by the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Not reported.
    #[default]
    Undefined,
    /// Taller than wide.
    Portrait,
    /// Wider than tall.
    Landscape,
}

impl std::str::FromStr for Orientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "portrait" => Ok(Self::Portrait),
            "landscape" => Ok(Self::Landscape),
            "undefined" => Ok(Self::Undefined),
            other => Err(format!("unknown orientation '{other}'")),
        }
    }
}

/// Snapshot of the container configuration handed to the surface on
/// [`LifecycleEvent::ConfigurationChanged`].
///
/// The bridge never interprets these values.
///
/// # Example
///
/// ```
/// use gio_surface::{Configuration, Orientation};
///
/// let config = Configuration::default()
///     .with_orientation(Orientation::Landscape)
///     .with_night_mode(true);
/// assert_eq!(config.orientation, Orientation::Landscape);
/// assert!(config.night_mode);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    /// Screen orientation.
    pub orientation: Orientation,
    /// Dark theme active.
    pub night_mode: bool,
    /// User font scaling factor.
    pub font_scale: f32,
    /// Screen density in dots per inch.
    pub density_dpi: u32,
    /// BCP 47 locale tag, if reported.
    pub locale: Option<String>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            orientation: Orientation::Undefined,
            night_mode: false,
            font_scale: 1.0,
            density_dpi: 160,
            locale: None,
        }
    }
}

impl Configuration {
    /// Sets the orientation.
    #[must_use]
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Sets night mode.
    #[must_use]
    pub fn with_night_mode(mut self, night_mode: bool) -> Self {
        self.night_mode = night_mode;
        self
    }

    /// Sets the font scale.
    #[must_use]
    pub fn with_font_scale(mut self, font_scale: f32) -> Self {
        self.font_scale = font_scale;
        self
    }

    /// Sets the density.
    #[must_use]
    pub fn with_density_dpi(mut self, density_dpi: u32) -> Self {
        self.density_dpi = density_dpi;
        self
    }

    /// Sets the locale.
    #[must_use]
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }
}

/// A container lifecycle transition.
///
/// # Legal Occurrence
///
/// | Event | When |
/// |-------|------|
/// | `Created` | Once, first |
/// | `Started` / `Stopped` | Alternating, any number of times |
/// | `Destroyed` | Once, last |
/// | `ConfigurationChanged` | While the surface is alive |
/// | `LowMemory` | Any time (process-wide) |
/// | `BackRequested` | While started |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "config", rename_all = "snake_case")]
pub enum LifecycleEvent {
    /// The container was created.
    Created,
    /// The container became visible.
    Started,
    /// The container is no longer visible.
    Stopped,
    /// The container is being torn down.
    Destroyed,
    /// The container configuration changed.
    ConfigurationChanged(Configuration),
    /// The process is running low on memory.
    LowMemory,
    /// The user asked to navigate back.
    BackRequested,
}

impl LifecycleEvent {
    /// Short name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Started => "started",
            Self::Stopped => "stopped",
            Self::Destroyed => "destroyed",
            Self::ConfigurationChanged(_) => "configuration_changed",
            Self::LowMemory => "low_memory",
            Self::BackRequested => "back_requested",
        }
    }
}

impl std::fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
