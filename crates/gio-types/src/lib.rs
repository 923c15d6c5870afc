//! Core types for the gio activity bridge.
//!
//! # Crate Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        SDK Layer                             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  gio-types   : RequestId, LogicalClock, HostVersion,        │
//! │                ErrorCode                        ◄── HERE     │
//! │  gio-auth    : Capability, PermissionRequest, Outcome       │
//! │  gio-surface : Surface trait, LifecycleEvent                │
//! └─────────────────────────────────────────────────────────────┘
//!                               ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │  gio-runtime : PermissionCoordinator, LifecycleForwarder,   │
//! │                Container, config                            │
//! └─────────────────────────────────────────────────────────────┘
//!                               ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │  gio-cli     : gio-activity host simulator                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use gio_types::{HostVersion, LogicalClock, RequestIdAllocator};
//!
//! let mut ids = RequestIdAllocator::new();
//! let mut clock = LogicalClock::new();
//!
//! let id = ids.allocate().expect("fresh allocator");
//! let at = clock.tick();
//! assert_eq!(id.get(), 1);
//! assert_eq!(at.ticks(), 1);
//! assert!(HostVersion::default().at_least(HostVersion::S));
//! ```

mod clock;
mod error;
mod id;
mod version;

pub use clock::{LogicalClock, LogicalTime};
pub use error::{assert_error_code, assert_error_codes, ErrorCode};
pub use id::{RequestId, RequestIdAllocator};
pub use version::HostVersion;
