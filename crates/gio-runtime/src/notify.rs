//! User-facing permission notifications.
//!
//! Every resolved (non-stale) outcome produces exactly one
//! [`Notification`] naming the capability it belongs to. How it is
//! presented (toast, log line, stdout) is the [`Notifier`]'s business.
//!
//! | Notifier | Use |
//! |----------|-----|
//! | [`TracingNotifier`] | Logs at `info` |
//! | [`RecordingNotifier`] | Keeps notifications for inspection (tests, CLI) |

use gio_auth::{Capability, PermissionOutcome};
use parking_lot::Mutex;
use std::sync::Arc;

/// A grant/deny message for one capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// The capability the outcome belongs to.
    pub capability: Capability,
    /// Whether it was granted.
    pub granted: bool,
    /// Human-readable message, e.g. "Bluetooth scan permission denied".
    pub message: String,
}

impl From<&PermissionOutcome> for Notification {
    fn from(outcome: &PermissionOutcome) -> Self {
        Self {
            capability: outcome.capability,
            granted: outcome.granted,
            message: outcome.message(),
        }
    }
}

impl std::fmt::Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Sink for [`Notification`]s.
pub trait Notifier {
    /// Presents one notification.
    fn notify(&mut self, notification: Notification);
}

impl<N: Notifier + ?Sized> Notifier for Box<N> {
    fn notify(&mut self, notification: Notification) {
        (**self).notify(notification);
    }
}

/// Logs notifications through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&mut self, notification: Notification) {
        tracing::info!(
            capability = %notification.capability,
            granted = notification.granted,
            "{}",
            notification.message
        );
    }
}

/// Keeps every notification in a shared list.
///
/// Clones share the same list, so one clone can be handed to a
/// coordinator while another is kept for inspection.
///
/// # Example
///
/// ```
/// use gio_auth::Capability;
/// use gio_runtime::notify::{Notification, Notifier, RecordingNotifier};
///
/// let notifier = RecordingNotifier::new();
/// let mut sink = notifier.clone();
/// sink.notify(Notification {
///     capability: Capability::Bluetooth,
///     granted: true,
///     message: "Bluetooth permission granted".into(),
/// });
///
/// assert_eq!(notifier.messages(), vec!["Bluetooth permission granted"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    inner: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingNotifier {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All notifications so far.
    #[must_use]
    pub fn notifications(&self) -> Vec<Notification> {
        self.inner.lock().clone()
    }

    /// All messages so far.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.inner
            .lock()
            .iter()
            .map(|n| n.message.clone())
            .collect()
    }

    /// Removes and returns everything recorded so far.
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.inner.lock())
    }

    /// Number of notifications recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Returns `true` if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, notification: Notification) {
        self.inner.lock().push(notification);
    }
}
