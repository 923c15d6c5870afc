//! Test doubles for [`Surface`].
//!
//! [`RecordingSurface`] records every call into a shared
//! [`SurfaceLog`], so a test can hand the surface to a container and
//! still inspect what reached it afterwards.
//!
//! # Example
//!
//! ```
//! use gio_surface::testing::RecordingSurface;
//! use gio_surface::{Surface, SurfaceOp};
//!
//! let (mut surface, log) = RecordingSurface::new();
//! surface.create().expect("create");
//! surface.start().expect("start");
//!
//! assert_eq!(log.ops(), vec![SurfaceOp::Create, SurfaceOp::Start]);
//! assert_eq!(log.names(), vec!["create", "start"]);
//! ```

use crate::{Configuration, Surface, SurfaceError, SurfaceOp};
use parking_lot::Mutex;
use std::sync::Arc;

/// Shared record of calls made on a [`RecordingSurface`].
#[derive(Debug, Clone, Default)]
pub struct SurfaceLog {
    ops: Arc<Mutex<Vec<SurfaceOp>>>,
    configurations: Arc<Mutex<Vec<Configuration>>>,
}

impl SurfaceLog {
    /// Every operation received, in order (including failed ones).
    #[must_use]
    pub fn ops(&self) -> Vec<SurfaceOp> {
        self.ops.lock().clone()
    }

    /// Operation names, in order.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.ops.lock().iter().map(|op| op.name()).collect()
    }

    /// How often `op` was received.
    #[must_use]
    pub fn count(&self, op: SurfaceOp) -> usize {
        self.ops.lock().iter().filter(|o| **o == op).count()
    }

    /// Configurations passed to `configuration_changed`, in order.
    #[must_use]
    pub fn configurations(&self) -> Vec<Configuration> {
        self.configurations.lock().clone()
    }

    /// Forgets everything recorded so far.
    pub fn clear(&self) {
        self.ops.lock().clear();
        self.configurations.lock().clear();
    }

    fn record(&self, op: SurfaceOp) {
        self.ops.lock().push(op);
    }
}

/// A [`Surface`] that records calls and can be scripted to fail.
#[derive(Debug)]
pub struct RecordingSurface {
    log: SurfaceLog,
    consume_back: bool,
    fail_on: Option<SurfaceOp>,
}

impl RecordingSurface {
    /// Creates a surface that succeeds at everything and does not
    /// consume back requests.
    #[must_use]
    pub fn new() -> (Self, SurfaceLog) {
        let log = SurfaceLog::default();
        let surface = Self {
            log: log.clone(),
            consume_back: false,
            fail_on: None,
        };
        (surface, log)
    }

    /// Makes [`back_pressed`](Surface::back_pressed) report `consume`.
    #[must_use]
    pub fn consuming_back(mut self, consume: bool) -> Self {
        self.consume_back = consume;
        self
    }

    /// Makes `op` fail with [`SurfaceError::OperationFailed`].
    #[must_use]
    pub fn failing_on(mut self, op: SurfaceOp) -> Self {
        self.fail_on = Some(op);
        self
    }

    /// Changes the back-consumption answer after construction.
    pub fn set_consume_back(&mut self, consume: bool) {
        self.consume_back = consume;
    }

    fn handle(&self, op: SurfaceOp) -> Result<(), SurfaceError> {
        self.log.record(op);
        if self.fail_on == Some(op) {
            return Err(SurfaceError::failed(op, "scripted failure"));
        }
        Ok(())
    }
}

impl Surface for RecordingSurface {
    fn create(&mut self) -> Result<(), SurfaceError> {
        self.handle(SurfaceOp::Create)
    }

    fn start(&mut self) -> Result<(), SurfaceError> {
        self.handle(SurfaceOp::Start)
    }

    fn stop(&mut self) -> Result<(), SurfaceError> {
        self.handle(SurfaceOp::Stop)
    }

    fn destroy(&mut self) -> Result<(), SurfaceError> {
        self.handle(SurfaceOp::Destroy)
    }

    fn configuration_changed(&mut self, config: &Configuration) -> Result<(), SurfaceError> {
        self.log.configurations.lock().push(config.clone());
        self.handle(SurfaceOp::ConfigurationChanged)
    }

    fn back_pressed(&mut self) -> Result<bool, SurfaceError> {
        self.handle(SurfaceOp::BackPressed)?;
        Ok(self.consume_back)
    }
}
