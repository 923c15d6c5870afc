//! Surface lifecycle phase.
//!
//! # State Machine
//!
//! ```text
//! Initial ──Created──► Created ──Started──► Started ⇄ Stopped
//!                         │                    │         │
//!                         └──────Destroyed─────┴─────────┴──► Destroyed
//! ```
//!
//! `ConfigurationChanged` keeps the phase and is legal while alive.
//! `BackRequested` keeps the phase and is legal while started.
//! `LowMemory` is process-wide and legal in every phase.
//!
//! `Destroyed` from `Started` is legal. The forwarder inserts a stop
//! only when the surface has never been stopped; a restarted surface is
//! destroyed straight from `Started`.

use crate::LifecycleEvent;
use serde::{Deserialize, Serialize};

/// Where a surface is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfacePhase {
    /// No surface instance has been created yet.
    #[default]
    Initial,
    /// Created, not visible.
    Created,
    /// Visible and receiving input.
    Started,
    /// Not visible, resources retained.
    Stopped,
    /// Resources released. Terminal.
    Destroyed,
}

impl SurfacePhase {
    /// Returns the phase after `event`, or `None` if `event` is not
    /// legal in this phase.
    ///
    /// # Example
    ///
    /// ```
    /// use gio_surface::{LifecycleEvent, SurfacePhase};
    ///
    /// assert_eq!(
    ///     SurfacePhase::Initial.next(&LifecycleEvent::Created),
    ///     Some(SurfacePhase::Created)
    /// );
    /// assert_eq!(SurfacePhase::Initial.next(&LifecycleEvent::Started), None);
    /// assert_eq!(
    ///     SurfacePhase::Stopped.next(&LifecycleEvent::LowMemory),
    ///     Some(SurfacePhase::Stopped)
    /// );
    /// ```
    #[must_use]
    pub fn next(self, event: &LifecycleEvent) -> Option<Self> {
        use LifecycleEvent as E;
        use SurfacePhase as P;

        match (self, event) {
            (P::Initial, E::Created) => Some(P::Created),
            (P::Created | P::Stopped, E::Started) => Some(P::Started),
            (P::Started, E::Stopped) => Some(P::Stopped),
            (P::Created | P::Started | P::Stopped, E::Destroyed) => Some(P::Destroyed),
            (phase, E::ConfigurationChanged(_)) if phase.is_alive() => Some(phase),
            (P::Started, E::BackRequested) => Some(P::Started),
            (phase, E::LowMemory) => Some(phase),
            _ => None,
        }
    }

    /// Returns `true` between creation and destruction.
    #[must_use]
    pub fn is_alive(self) -> bool {
        matches!(self, Self::Created | Self::Started | Self::Stopped)
    }

    /// Returns `true` once destroyed.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Destroyed)
    }
}

impl std::fmt::Display for SurfacePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Initial => write!(f, "initial"),
            Self::Created => write!(f, "created"),
            Self::Started => write!(f, "started"),
            Self::Stopped => write!(f, "stopped"),
            Self::Destroyed => write!(f, "destroyed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Configuration;

    fn config() -> LifecycleEvent {
        LifecycleEvent::ConfigurationChanged(Configuration::default())
    }

    #[test]
    fn start_stop_cycle() {
        let mut phase = SurfacePhase::Initial;
        for (event, expected) in [
            (LifecycleEvent::Created, SurfacePhase::Created),
            (LifecycleEvent::Started, SurfacePhase::Started),
            (LifecycleEvent::Stopped, SurfacePhase::Stopped),
            (LifecycleEvent::Started, SurfacePhase::Started),
            (LifecycleEvent::Stopped, SurfacePhase::Stopped),
            (LifecycleEvent::Destroyed, SurfacePhase::Destroyed),
        ] {
            phase = phase.next(&event).expect("legal transition");
            assert_eq!(phase, expected);
        }
        assert!(phase.is_terminal());
    }

    #[test]
    fn started_requires_created() {
        assert_eq!(SurfacePhase::Initial.next(&LifecycleEvent::Started), None);
        assert_eq!(SurfacePhase::Started.next(&LifecycleEvent::Started), None);
    }

    #[test]
    fn created_only_once() {
        assert_eq!(SurfacePhase::Created.next(&LifecycleEvent::Created), None);
        assert_eq!(SurfacePhase::Destroyed.next(&LifecycleEvent::Created), None);
    }

    #[test]
    fn nothing_after_destroyed_except_low_memory() {
        let dead = SurfacePhase::Destroyed;
        assert_eq!(dead.next(&LifecycleEvent::Started), None);
        assert_eq!(dead.next(&LifecycleEvent::Destroyed), None);
        assert_eq!(dead.next(&config()), None);
        assert_eq!(dead.next(&LifecycleEvent::BackRequested), None);
        assert_eq!(dead.next(&LifecycleEvent::LowMemory), Some(dead));
    }

    #[test]
    fn configuration_only_while_alive() {
        assert_eq!(SurfacePhase::Initial.next(&config()), None);
        for phase in [SurfacePhase::Created, SurfacePhase::Started, SurfacePhase::Stopped] {
            assert_eq!(phase.next(&config()), Some(phase));
        }
    }

    #[test]
    fn back_only_while_started() {
        assert_eq!(
            SurfacePhase::Started.next(&LifecycleEvent::BackRequested),
            Some(SurfacePhase::Started)
        );
        assert_eq!(SurfacePhase::Stopped.next(&LifecycleEvent::BackRequested), None);
        assert_eq!(SurfacePhase::Created.next(&LifecycleEvent::BackRequested), None);
    }

    #[test]
    fn stop_requires_started() {
        assert_eq!(SurfacePhase::Created.next(&LifecycleEvent::Stopped), None);
        assert_eq!(SurfacePhase::Stopped.next(&LifecycleEvent::Stopped), None);
    }
}
