//! The activity container.
//!
//! [`Container`] composes the two halves of the bridge: it owns a
//! [`PermissionCoordinator`] and a [`LifecycleForwarder`] as plain
//! fields and calls them from whatever callback mechanism the platform
//! offers. The two halves never talk to each other.
//!
//! # Callback Mapping
//!
//! | Host callback | Container method | Effect |
//! |---------------|------------------|--------|
//! | onCreate | [`on_create`](Container::on_create) | request missing permissions, then `create` |
//! | onStart | [`on_start`](Container::on_start) | `start` |
//! | onStop | [`on_stop`](Container::on_stop) | `stop` |
//! | onConfigurationChanged | [`on_configuration_changed`](Container::on_configuration_changed) | `configuration_changed` |
//! | onLowMemory | [`on_low_memory`](Container::on_low_memory) | registry dispatch |
//! | onBackPressed | [`on_back_pressed`](Container::on_back_pressed) | `back_pressed`, finish if not consumed |
//! | onDestroy | [`on_destroy`](Container::on_destroy) | `destroy`, then drop open requests |
//! | onRequestPermissionsResult | [`on_request_permissions_result`](Container::on_request_permissions_result) | resolve one request |

use crate::auth::PermissionCoordinator;
use crate::lifecycle::{ForwardError, Forwarded, LifecycleForwarder};
use crate::notify::Notifier;
use gio_auth::{
    Capability, CapabilitySet, GrantResult, PermissionHost, PermissionOutcome, PermissionRequest,
    PermissionResponse,
};
use gio_surface::{Configuration, LifecycleEvent, Surface, SurfacePhase};
use gio_types::RequestId;

/// What the host should do after a back press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackAction {
    /// The surface handled it; the host does nothing.
    Consumed,
    /// Default back navigation: the container finishes.
    Finish,
}

/// A host container bridging permissions and lifecycle to a surface.
///
/// # Example
///
/// ```
/// use gio_runtime::container::{BackAction, Container};
/// use gio_runtime::host::SimulatedHost;
/// use gio_runtime::notify::RecordingNotifier;
/// use gio_surface::testing::RecordingSurface;
///
/// let (surface, log) = RecordingSurface::new();
/// let host = SimulatedHost::default();
/// let mut container = Container::new(host.clone(), surface, RecordingNotifier::new());
///
/// let issued = container.on_create().expect("create");
/// assert_eq!(issued.len(), 4);
/// container.on_start().expect("start");
/// assert_eq!(container.on_back_pressed().expect("back"), BackAction::Finish);
/// assert!(container.is_finishing());
///
/// container.on_destroy().expect("destroy");
/// assert_eq!(log.names(), vec!["create", "start", "back_pressed", "stop", "destroy"]);
/// ```
#[derive(Debug)]
pub struct Container<H, S, N> {
    coordinator: PermissionCoordinator<H, N>,
    forwarder: LifecycleForwarder,
    surface: S,
    requested: CapabilitySet,
    finishing: bool,
}

impl<H, S, N> Container<H, S, N>
where
    H: PermissionHost,
    S: Surface,
    N: Notifier,
{
    /// Creates a container with the default capability table, requesting
    /// every capability in it.
    #[must_use]
    pub fn new(host: H, surface: S, notifier: N) -> Self {
        Self::from_parts(
            PermissionCoordinator::new(host, notifier),
            LifecycleForwarder::new(),
            surface,
        )
    }

    /// Assembles a container from prepared parts.
    #[must_use]
    pub fn from_parts(
        coordinator: PermissionCoordinator<H, N>,
        forwarder: LifecycleForwarder,
        surface: S,
    ) -> Self {
        let requested = coordinator.table().capabilities();
        Self {
            coordinator,
            forwarder,
            surface,
            requested,
            finishing: false,
        }
    }

    /// Restricts which capabilities `on_create` asks for.
    #[must_use]
    pub fn with_requested(mut self, requested: CapabilitySet) -> Self {
        self.requested = requested;
        self
    }

    /// Requests missing permissions, then creates the surface.
    ///
    /// Returns the permission requests issued.
    ///
    /// # Errors
    ///
    /// Returns [`ForwardError::IllegalTransition`] without asking the host
    /// anything if the container was already created or destroyed.
    /// Returns [`ForwardError::Surface`] if the surface cannot be created;
    /// requests issued before that failure stay open.
    pub fn on_create(&mut self) -> Result<Vec<PermissionRequest>, ForwardError> {
        let phase = self.forwarder.phase();
        let event = LifecycleEvent::Created;
        if phase.next(&event).is_none() {
            tracing::warn!(
                %phase,
                event = event.name(),
                "create rejected, no permissions requested"
            );
            return Err(ForwardError::IllegalTransition {
                phase,
                event: event.name(),
            });
        }

        let issued = self.coordinator.evaluate_and_request(self.requested);
        self.forward(event)?;
        Ok(issued)
    }

    /// The container became visible.
    ///
    /// # Errors
    ///
    /// See [`LifecycleForwarder::forward`].
    pub fn on_start(&mut self) -> Result<(), ForwardError> {
        self.forward(LifecycleEvent::Started)
    }

    /// The container is no longer visible.
    ///
    /// # Errors
    ///
    /// See [`LifecycleForwarder::forward`].
    pub fn on_stop(&mut self) -> Result<(), ForwardError> {
        self.forward(LifecycleEvent::Stopped)
    }

    /// The container configuration changed.
    ///
    /// # Errors
    ///
    /// See [`LifecycleForwarder::forward`].
    pub fn on_configuration_changed(&mut self, config: Configuration) -> Result<(), ForwardError> {
        self.forward(LifecycleEvent::ConfigurationChanged(config))
    }

    /// Passes a low-memory hint to the process-wide registry.
    ///
    /// Returns how many hooks were called.
    pub fn on_low_memory(&mut self) -> usize {
        match self
            .forwarder
            .forward(&LifecycleEvent::LowMemory, &mut self.surface)
        {
            Ok(Forwarded::LowMemory { hooks }) => hooks,
            Ok(_) => 0,
            Err(err) => {
                tracing::warn!(error = %err, "low-memory hint not delivered");
                0
            }
        }
    }

    /// Offers a back press to the surface.
    ///
    /// # Errors
    ///
    /// See [`LifecycleForwarder::on_back_requested`].
    pub fn on_back_pressed(&mut self) -> Result<BackAction, ForwardError> {
        if self.forwarder.on_back_requested(&mut self.surface)? {
            Ok(BackAction::Consumed)
        } else {
            tracing::debug!("back not consumed, finishing");
            self.finishing = true;
            Ok(BackAction::Finish)
        }
    }

    /// Destroys the surface, then tears the container down.
    ///
    /// Teardown abandons every open permission request; their late
    /// responses are dropped as stale. Teardown runs even when the
    /// surface fails, and the surface error is returned afterwards.
    ///
    /// # Errors
    ///
    /// See [`LifecycleForwarder::forward`].
    pub fn on_destroy(&mut self) -> Result<Vec<PermissionRequest>, ForwardError> {
        match self.forward(LifecycleEvent::Destroyed) {
            Err(err @ ForwardError::IllegalTransition { .. }) => Err(err),
            forwarded => {
                let abandoned = self.coordinator.abandon_all();
                forwarded.map(|()| abandoned)
            }
        }
    }

    /// Delivers the host's permission callback.
    pub fn on_request_permissions_result(
        &mut self,
        request_id: RequestId,
        capabilities: Vec<Capability>,
        results: Vec<GrantResult>,
    ) -> Option<PermissionOutcome> {
        self.coordinator
            .on_response(PermissionResponse::new(request_id, capabilities, results))
    }

    /// Current surface phase.
    #[must_use]
    pub fn phase(&self) -> SurfacePhase {
        self.forwarder.phase()
    }

    /// Returns `true` once a back press was not consumed.
    #[must_use]
    pub fn is_finishing(&self) -> bool {
        self.finishing
    }

    /// Capabilities `on_create` asks for.
    #[must_use]
    pub fn requested(&self) -> CapabilitySet {
        self.requested
    }

    /// The permission coordinator.
    #[must_use]
    pub fn coordinator(&self) -> &PermissionCoordinator<H, N> {
        &self.coordinator
    }

    /// Mutable access to the permission coordinator.
    pub fn coordinator_mut(&mut self) -> &mut PermissionCoordinator<H, N> {
        &mut self.coordinator
    }

    /// The embedded surface.
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    fn forward(&mut self, event: LifecycleEvent) -> Result<(), ForwardError> {
        self.forwarder.forward(&event, &mut self.surface).map(|_| ())
    }
}
