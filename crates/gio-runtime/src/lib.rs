//! Runtime layer of the gio activity bridge.
//!
//! # Crate Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        SDK Layer                             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  gio-types   : RequestId, LogicalClock, HostVersion         │
//! │  gio-auth    : Capability, CapabilityTable, PermissionHost  │
//! │  gio-surface : Surface, LifecycleEvent, LowMemoryRegistry   │
//! └─────────────────────────────────────────────────────────────┘
//!                               ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Runtime Layer (THIS CRATE)                 │
//! ├─────────────────────────────────────────────────────────────┤
//! │  auth/      : PermissionCoordinator                         │
//! │  lifecycle/ : LifecycleForwarder, ForwardError              │
//! │  container  : Container (composes both)                     │
//! │  notify     : Notifier, Notification                        │
//! │  host       : SimulatedHost                                 │
//! │  config/    : BridgeConfig, ConfigLoader                    │
//! └─────────────────────────────────────────────────────────────┘
//!                               ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Frontend Layer                             │
//! │  (gio-cli: gio-activity)                                     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! ## [`auth`] - Permission Correlation
//!
//! - [`PermissionCoordinator`](auth::PermissionCoordinator): issues one
//!   request per missing capability and matches each response to it
//!
//! ## [`lifecycle`] - Surface Forwarding
//!
//! - [`LifecycleForwarder`](lifecycle::LifecycleForwarder): phase-checked
//!   translation of container callbacks into surface calls
//!
//! ## [`container`] - Composition
//!
//! - [`Container`](container::Container): owns both of the above and the
//!   surface
//!
//! ## [`config`] - Configuration
//!
//! - [`ConfigLoader`](config::ConfigLoader): defaults, global, project, env
//!
//! # Threading
//!
//! The coordinator, forwarder and container are driven from the host's
//! single event-dispatch thread and take `&mut self`; none of them lock.
//! The process-wide low-memory registry is the only shared state.
//!
//! # Example
//!
//! ```
//! use gio_runtime::container::Container;
//! use gio_runtime::host::SimulatedHost;
//! use gio_runtime::notify::RecordingNotifier;
//! use gio_surface::testing::RecordingSurface;
//!
//! let host = SimulatedHost::default();
//! let notifier = RecordingNotifier::new();
//! let (surface, log) = RecordingSurface::new();
//! let mut container = Container::new(host.clone(), surface, notifier.clone());
//!
//! let issued = container.on_create().expect("create");
//! for response in host.answer_all(true) {
//!     container.on_request_permissions_result(
//!         response.request_id,
//!         response.capabilities,
//!         response.results,
//!     );
//! }
//!
//! assert_eq!(notifier.len(), issued.len());
//! assert_eq!(log.names(), vec!["create"]);
//! ```

pub mod auth;
pub mod config;
pub mod container;
pub mod host;
pub mod lifecycle;
pub mod notify;

pub use auth::PermissionCoordinator;
pub use config::{BridgeConfig, ConfigError, ConfigLoader};
pub use container::{BackAction, Container};
pub use host::SimulatedHost;
pub use lifecycle::{ForwardError, Forwarded, LifecycleForwarder};
pub use notify::{Notification, Notifier, RecordingNotifier, TracingNotifier};
