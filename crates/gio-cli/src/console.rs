//! Console stand-ins for the surface and the notification sink.
//!
//! Both append protocol lines to a shared [`Transcript`]; the session
//! drains it after every command so surface calls and notifications
//! appear on stdout in the order they happened.

use gio_runtime::{Notification, Notifier};
use gio_surface::{Configuration, Surface, SurfaceError, SurfaceOp};
use parking_lot::Mutex;
use std::sync::Arc;

/// Ordered protocol output shared by the console collaborators.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    lines: Arc<Mutex<Vec<String>>>,
}

impl Transcript {
    pub fn push(&self, line: impl Into<String>) {
        self.lines.lock().push(line.into());
    }

    pub fn drain(&self) -> Vec<String> {
        std::mem::take(&mut *self.lines.lock())
    }
}

/// A surface that reports every call as `surface: <op>`.
#[derive(Debug)]
pub struct ConsoleSurface {
    transcript: Transcript,
    consume_back: bool,
}

impl ConsoleSurface {
    pub fn new(transcript: Transcript, consume_back: bool) -> Self {
        Self {
            transcript,
            consume_back,
        }
    }

    fn report(&self, op: SurfaceOp) -> Result<(), SurfaceError> {
        self.transcript.push(format!("surface: {op}"));
        Ok(())
    }
}

impl Surface for ConsoleSurface {
    fn create(&mut self) -> Result<(), SurfaceError> {
        self.report(SurfaceOp::Create)
    }

    fn start(&mut self) -> Result<(), SurfaceError> {
        self.report(SurfaceOp::Start)
    }

    fn stop(&mut self) -> Result<(), SurfaceError> {
        self.report(SurfaceOp::Stop)
    }

    fn destroy(&mut self) -> Result<(), SurfaceError> {
        self.report(SurfaceOp::Destroy)
    }

    fn configuration_changed(&mut self, config: &Configuration) -> Result<(), SurfaceError> {
        tracing::debug!(?config, "configuration delivered");
        self.report(SurfaceOp::ConfigurationChanged)
    }

    fn back_pressed(&mut self) -> Result<bool, SurfaceError> {
        self.report(SurfaceOp::BackPressed)?;
        Ok(self.consume_back)
    }
}

/// Reports notifications as `notify: <message>`.
#[derive(Debug, Clone)]
pub struct ConsoleNotifier {
    transcript: Transcript,
}

impl ConsoleNotifier {
    pub fn new(transcript: Transcript) -> Self {
        Self { transcript }
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&mut self, notification: Notification) {
        self.transcript.push(format!("notify: {notification}"));
    }
}
