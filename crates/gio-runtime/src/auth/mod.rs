//! Runtime permission handling.
//!
//! # Architecture
//!
//! ```text
//! CapabilityTable (gio-auth)          ← policy data
//!          │
//!          ▼
//! PermissionCoordinator (THIS MODULE) ──► PermissionHost::request_permissions
//!          ▲                                        │
//!          │ on_response(PermissionResponse)        │ (async, any order)
//!          └────────────────────────────────────────┘
//!          │
//!          ▼
//!      Notifier  (one notification per resolved request)
//! ```
//!
//! The coordinator is single-threaded by construction: it is driven
//! from the container's event-dispatch thread and owns its
//! open-requests table outright, so it takes `&mut self` everywhere
//! and holds no locks.

mod coordinator;

pub use coordinator::PermissionCoordinator;
