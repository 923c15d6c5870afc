//! Embedded surface contract for the gio activity bridge.
//!
//! The container forwards its lifecycle to an embedded rendering
//! surface. This crate defines what the surface must provide and the
//! vocabulary of events flowing to it; the forwarding logic lives in
//! `gio-runtime`.
//!
//! # Crate Architecture
//!
//! ```text
//! gio-types   (ErrorCode)
//!     ↑
//! gio-surface ◄── THIS CRATE
//! (Surface, SurfaceOp, SurfaceError, LifecycleEvent, Configuration,
//!  SurfacePhase, LowMemoryRegistry)
//!     ↑
//! gio-runtime (LifecycleForwarder, Container)
//! ```
//!
//! # Modules
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`surface`] | [`Surface`] trait, [`SurfaceOp`] |
//! | [`event`] | [`LifecycleEvent`], [`Configuration`] |
//! | [`phase`] | [`SurfacePhase`] state machine |
//! | [`low_memory`] | Process-wide [`LowMemoryRegistry`] |
//! | [`testing`] | [`RecordingSurface`](testing::RecordingSurface) |

pub mod error;
pub mod event;
pub mod low_memory;
pub mod phase;
pub mod surface;
pub mod testing;

pub use error::SurfaceError;
pub use event::{Configuration, LifecycleEvent, Orientation};
pub use low_memory::{HookId, LowMemoryHook, LowMemoryRegistry};
pub use phase::SurfacePhase;
pub use surface::{Surface, SurfaceOp};
