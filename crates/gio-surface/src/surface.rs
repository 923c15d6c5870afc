//! The embedded surface contract.
//!
//! The bridge never inspects surface state. It only calls these
//! operations and reads the boolean from [`Surface::back_pressed`].
//! Low-memory hints are process-wide and go through
//! [`LowMemoryRegistry`](crate::LowMemoryRegistry) instead.

use crate::{Configuration, SurfaceError};
use serde::{Deserialize, Serialize};

/// Identifies one surface operation (for errors, logs and test records).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceOp {
    /// [`Surface::create`]
    Create,
    /// [`Surface::start`]
    Start,
    /// [`Surface::stop`]
    Stop,
    /// [`Surface::destroy`]
    Destroy,
    /// [`Surface::configuration_changed`]
    ConfigurationChanged,
    /// [`Surface::back_pressed`]
    BackPressed,
}

impl SurfaceOp {
    /// Short name for logs.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Destroy => "destroy",
            Self::ConfigurationChanged => "configuration_changed",
            Self::BackPressed => "back_pressed",
        }
    }
}

impl std::fmt::Display for SurfaceOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// An embedded rendering surface driven by container lifecycle events.
///
/// Every operation may fail; failures belong to the surface and are
/// propagated to the container untouched.
///
/// # Example
///
/// ```
/// use gio_surface::{Configuration, Surface, SurfaceError};
///
/// #[derive(Default)]
/// struct Blank {
///     visible: bool,
/// }
///
/// impl Surface for Blank {
///     fn create(&mut self) -> Result<(), SurfaceError> { Ok(()) }
///     fn start(&mut self) -> Result<(), SurfaceError> {
///         self.visible = true;
///         Ok(())
///     }
///     fn stop(&mut self) -> Result<(), SurfaceError> {
///         self.visible = false;
///         Ok(())
///     }
///     fn destroy(&mut self) -> Result<(), SurfaceError> { Ok(()) }
///     fn configuration_changed(&mut self, _c: &Configuration) -> Result<(), SurfaceError> {
///         Ok(())
///     }
///     fn back_pressed(&mut self) -> Result<bool, SurfaceError> { Ok(false) }
/// }
///
/// let mut surface = Blank::default();
/// surface.start().expect("start");
/// assert!(surface.visible);
/// ```
pub trait Surface {
    /// Allocates the surface. Called once, before anything else.
    fn create(&mut self) -> Result<(), SurfaceError>;

    /// The container became visible.
    fn start(&mut self) -> Result<(), SurfaceError>;

    /// The container is no longer visible.
    fn stop(&mut self) -> Result<(), SurfaceError>;

    /// Releases all resources. Called once, last.
    fn destroy(&mut self) -> Result<(), SurfaceError>;

    /// The container configuration changed.
    fn configuration_changed(&mut self, config: &Configuration) -> Result<(), SurfaceError>;

    /// Offers a back-navigation request.
    ///
    /// Returns `true` if the surface consumed it.
    fn back_pressed(&mut self) -> Result<bool, SurfaceError>;
}

impl<S: Surface + ?Sized> Surface for Box<S> {
    fn create(&mut self) -> Result<(), SurfaceError> {
        (**self).create()
    }

    fn start(&mut self) -> Result<(), SurfaceError> {
        (**self).start()
    }

    fn stop(&mut self) -> Result<(), SurfaceError> {
        (**self).stop()
    }

    fn destroy(&mut self) -> Result<(), SurfaceError> {
        (**self).destroy()
    }

    fn configuration_changed(&mut self, config: &Configuration) -> Result<(), SurfaceError> {
        (**self).configuration_changed(config)
    }

    fn back_pressed(&mut self) -> Result<bool, SurfaceError> {
        (**self).back_pressed()
    }
}
