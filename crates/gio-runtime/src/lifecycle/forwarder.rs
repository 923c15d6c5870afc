//! Lifecycle event forwarding.

use super::ForwardError;
use gio_surface::{LifecycleEvent, LowMemoryRegistry, Surface, SurfaceOp, SurfacePhase};
use std::sync::Arc;

/// What a successful [`LifecycleForwarder::forward`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Forwarded {
    /// One surface operation was delivered.
    Delivered(SurfaceOp),
    /// A stop was inserted ahead of the destroy.
    StopThenDestroy,
    /// The back request was offered to the surface.
    Back {
        /// Whether the surface consumed it.
        consumed: bool,
    },
    /// The low-memory hint went to the process-wide registry.
    LowMemory {
        /// Number of hooks called.
        hooks: usize,
    },
}

/// Translates container lifecycle callbacks into surface calls.
///
/// Each legal event produces exactly one surface call, in arrival
/// order. The single exception is a destroy arriving while the surface
/// is started and has never been stopped: the forwarder delivers a stop
/// first. The check uses the stop history, not the current phase. A
/// surface that was stopped once and then restarted receives `destroy`
/// alone while still started, the way the host activity forwards it.
///
/// The phase only advances when the surface call succeeds. Events that
/// are illegal in the current phase are rejected with
/// [`ForwardError::IllegalTransition`] and reach nobody.
///
/// # Example
///
/// ```
/// use gio_runtime::lifecycle::{Forwarded, LifecycleForwarder};
/// use gio_surface::testing::RecordingSurface;
/// use gio_surface::{LifecycleEvent, SurfaceOp, SurfacePhase};
///
/// let (mut surface, log) = RecordingSurface::new();
/// let mut forwarder = LifecycleForwarder::new();
///
/// forwarder.forward(&LifecycleEvent::Created, &mut surface).expect("create");
/// forwarder.forward(&LifecycleEvent::Started, &mut surface).expect("start");
/// let done = forwarder
///     .forward(&LifecycleEvent::Destroyed, &mut surface)
///     .expect("destroy");
///
/// assert_eq!(done, Forwarded::StopThenDestroy);
/// assert_eq!(log.names(), vec!["create", "start", "stop", "destroy"]);
/// assert_eq!(forwarder.phase(), SurfacePhase::Destroyed);
/// ```
#[derive(Debug)]
pub struct LifecycleForwarder {
    phase: SurfacePhase,
    ever_stopped: bool,
    low_memory: Arc<LowMemoryRegistry>,
}

impl LifecycleForwarder {
    /// Creates a forwarder that sends low-memory hints to
    /// [`LowMemoryRegistry::global`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_registry(LowMemoryRegistry::global())
    }

    /// Creates a forwarder using a specific low-memory registry.
    #[must_use]
    pub fn with_registry(low_memory: Arc<LowMemoryRegistry>) -> Self {
        Self {
            phase: SurfacePhase::Initial,
            ever_stopped: false,
            low_memory,
        }
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> SurfacePhase {
        self.phase
    }

    /// The registry low-memory hints go to.
    #[must_use]
    pub fn low_memory_registry(&self) -> &Arc<LowMemoryRegistry> {
        &self.low_memory
    }

    /// Forwards one lifecycle event to `surface`.
    ///
    /// # Errors
    ///
    /// - [`ForwardError::IllegalTransition`] if `event` is not legal in
    ///   the current phase. Nothing is forwarded.
    /// - [`ForwardError::Surface`] with the surface's error, unchanged.
    pub fn forward<S>(
        &mut self,
        event: &LifecycleEvent,
        surface: &mut S,
    ) -> Result<Forwarded, ForwardError>
    where
        S: Surface + ?Sized,
    {
        let Some(next) = self.phase.next(event) else {
            tracing::warn!(phase = %self.phase, event = %event, "illegal lifecycle transition");
            return Err(ForwardError::IllegalTransition {
                phase: self.phase,
                event: event.name(),
            });
        };

        tracing::debug!(phase = %self.phase, event = %event, "forwarding");

        let forwarded = match event {
            LifecycleEvent::Created => {
                surface.create()?;
                Forwarded::Delivered(SurfaceOp::Create)
            }
            LifecycleEvent::Started => {
                surface.start()?;
                Forwarded::Delivered(SurfaceOp::Start)
            }
            LifecycleEvent::Stopped => {
                surface.stop()?;
                self.ever_stopped = true;
                Forwarded::Delivered(SurfaceOp::Stop)
            }
            LifecycleEvent::Destroyed => {
                if self.phase == SurfacePhase::Started && !self.ever_stopped {
                    surface.stop()?;
                    self.ever_stopped = true;
                    self.phase = SurfacePhase::Stopped;
                    surface.destroy()?;
                    Forwarded::StopThenDestroy
                } else {
                    surface.destroy()?;
                    Forwarded::Delivered(SurfaceOp::Destroy)
                }
            }
            LifecycleEvent::ConfigurationChanged(config) => {
                surface.configuration_changed(config)?;
                Forwarded::Delivered(SurfaceOp::ConfigurationChanged)
            }
            LifecycleEvent::BackRequested => Forwarded::Back {
                consumed: surface.back_pressed()?,
            },
            LifecycleEvent::LowMemory => Forwarded::LowMemory {
                hooks: self.low_memory.dispatch(),
            },
        };

        self.phase = next;
        Ok(forwarded)
    }

    /// Offers a back request to `surface`.
    ///
    /// Returns `true` if the surface consumed it. `false` means the
    /// container should fall back to default back navigation.
    ///
    /// # Errors
    ///
    /// Same as [`forward`](Self::forward); back requests are only legal
    /// while started.
    pub fn on_back_requested<S>(&mut self, surface: &mut S) -> Result<bool, ForwardError>
    where
        S: Surface + ?Sized,
    {
        match self.forward(&LifecycleEvent::BackRequested, surface)? {
            Forwarded::Back { consumed } => Ok(consumed),
            // BackRequested always yields Back.
            _ => Ok(false),
        }
    }
}

impl Default for LifecycleForwarder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gio_surface::testing::RecordingSurface;
    use gio_surface::{Configuration, Orientation, SurfaceError};
    use gio_types::ErrorCode;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn forwarder() -> LifecycleForwarder {
        LifecycleForwarder::with_registry(Arc::new(LowMemoryRegistry::new()))
    }

    fn drive(
        forwarder: &mut LifecycleForwarder,
        surface: &mut RecordingSurface,
        events: &[LifecycleEvent],
    ) {
        for event in events {
            forwarder.forward(event, surface).expect("legal event");
        }
    }

    #[test]
    fn started_before_created_is_rejected() {
        let (mut surface, log) = RecordingSurface::new();
        let mut fwd = forwarder();

        let err = fwd
            .forward(&LifecycleEvent::Started, &mut surface)
            .expect_err("not created yet");

        assert_eq!(err.code(), "FORWARD_ILLEGAL_TRANSITION");
        assert!(log.ops().is_empty());
        assert_eq!(fwd.phase(), SurfacePhase::Initial);
    }

    #[test]
    fn destroy_from_created_skips_stop() {
        let (mut surface, log) = RecordingSurface::new();
        let mut fwd = forwarder();
        drive(
            &mut fwd,
            &mut surface,
            &[LifecycleEvent::Created, LifecycleEvent::Destroyed],
        );
        assert_eq!(log.names(), vec!["create", "destroy"]);
    }

    #[test]
    fn destroy_while_restarted_gets_no_extra_stop() {
        let (mut surface, log) = RecordingSurface::new();
        let mut fwd = forwarder();
        drive(
            &mut fwd,
            &mut surface,
            &[
                LifecycleEvent::Created,
                LifecycleEvent::Started,
                LifecycleEvent::Stopped,
                LifecycleEvent::Started,
            ],
        );

        let done = fwd
            .forward(&LifecycleEvent::Destroyed, &mut surface)
            .expect("destroy");
        assert_eq!(done, Forwarded::Delivered(SurfaceOp::Destroy));
        assert_eq!(log.names(), vec!["create", "start", "stop", "start", "destroy"]);
    }

    #[test]
    fn nothing_after_destroy() {
        let (mut surface, log) = RecordingSurface::new();
        let mut fwd = forwarder();
        drive(
            &mut fwd,
            &mut surface,
            &[LifecycleEvent::Created, LifecycleEvent::Destroyed],
        );
        log.clear();

        for event in [
            LifecycleEvent::Created,
            LifecycleEvent::Started,
            LifecycleEvent::Destroyed,
            LifecycleEvent::ConfigurationChanged(Configuration::default()),
            LifecycleEvent::BackRequested,
        ] {
            assert!(fwd.forward(&event, &mut surface).is_err(), "{event}");
        }
        assert!(log.ops().is_empty());
    }

    #[test]
    fn failed_start_keeps_phase() {
        let (surface, log) = RecordingSurface::new();
        let mut surface = surface.failing_on(SurfaceOp::Start);
        let mut fwd = forwarder();
        drive(&mut fwd, &mut surface, &[LifecycleEvent::Created]);

        let err = fwd
            .forward(&LifecycleEvent::Started, &mut surface)
            .expect_err("scripted");

        assert_eq!(
            err,
            ForwardError::Surface(SurfaceError::failed(SurfaceOp::Start, "scripted failure"))
        );
        assert_eq!(fwd.phase(), SurfacePhase::Created);
        assert_eq!(log.count(SurfaceOp::Start), 1);
    }

    #[test]
    fn failed_destroy_after_inserted_stop_leaves_stopped() {
        let (surface, log) = RecordingSurface::new();
        let mut surface = surface.failing_on(SurfaceOp::Destroy);
        let mut fwd = forwarder();
        drive(
            &mut fwd,
            &mut surface,
            &[LifecycleEvent::Created, LifecycleEvent::Started],
        );

        assert!(fwd.forward(&LifecycleEvent::Destroyed, &mut surface).is_err());
        assert_eq!(fwd.phase(), SurfacePhase::Stopped);
        assert_eq!(log.names(), vec!["create", "start", "stop", "destroy"]);
    }

    #[test]
    fn configuration_reaches_surface_while_alive() {
        let (mut surface, log) = RecordingSurface::new();
        let mut fwd = forwarder();
        let config = Configuration::default().with_orientation(Orientation::Landscape);

        let early = fwd.forward(
            &LifecycleEvent::ConfigurationChanged(config.clone()),
            &mut surface,
        );
        assert!(early.is_err());

        drive(&mut fwd, &mut surface, &[LifecycleEvent::Created]);
        let done = fwd
            .forward(
                &LifecycleEvent::ConfigurationChanged(config.clone()),
                &mut surface,
            )
            .expect("alive");

        assert_eq!(done, Forwarded::Delivered(SurfaceOp::ConfigurationChanged));
        assert_eq!(log.configurations(), vec![config]);
        assert_eq!(fwd.phase(), SurfacePhase::Created);
    }

    #[test]
    fn low_memory_goes_to_registry_in_any_phase() {
        let registry = Arc::new(LowMemoryRegistry::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        registry.register(Arc::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        let (mut surface, log) = RecordingSurface::new();
        let mut fwd = LifecycleForwarder::with_registry(Arc::clone(&registry));

        let before = fwd
            .forward(&LifecycleEvent::LowMemory, &mut surface)
            .expect("initial");
        assert_eq!(before, Forwarded::LowMemory { hooks: 1 });

        drive(
            &mut fwd,
            &mut surface,
            &[LifecycleEvent::Created, LifecycleEvent::Destroyed],
        );
        fwd.forward(&LifecycleEvent::LowMemory, &mut surface)
            .expect("destroyed");

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(log.names(), vec!["create", "destroy"]);
        assert_eq!(fwd.phase(), SurfacePhase::Destroyed);
    }

    #[test]
    fn back_request_reports_consumption() {
        let (surface, log) = RecordingSurface::new();
        let mut surface = surface.consuming_back(true);
        let mut fwd = forwarder();
        drive(
            &mut fwd,
            &mut surface,
            &[LifecycleEvent::Created, LifecycleEvent::Started],
        );

        assert_eq!(fwd.on_back_requested(&mut surface), Ok(true));
        surface.set_consume_back(false);
        assert_eq!(fwd.on_back_requested(&mut surface), Ok(false));
        assert_eq!(log.count(SurfaceOp::BackPressed), 2);
        assert_eq!(fwd.phase(), SurfacePhase::Started);
    }

    #[test]
    fn back_request_requires_started() {
        let (mut surface, log) = RecordingSurface::new();
        let mut fwd = forwarder();
        drive(&mut fwd, &mut surface, &[LifecycleEvent::Created]);

        assert!(matches!(
            fwd.on_back_requested(&mut surface),
            Err(ForwardError::IllegalTransition { .. })
        ));
        assert_eq!(log.count(SurfaceOp::BackPressed), 0);
    }

    #[test]
    fn works_through_trait_object() {
        let (surface, log) = RecordingSurface::new();
        let mut boxed: Box<dyn Surface> = Box::new(surface);
        let mut fwd = forwarder();

        fwd.forward(&LifecycleEvent::Created, boxed.as_mut())
            .expect("create");
        assert_eq!(log.names(), vec!["create"]);
    }
}
