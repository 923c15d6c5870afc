//! Permission primitives for the gio activity bridge.
//!
//! This crate defines the data the permission coordinator works with
//! and the host contract it depends on. The coordinator itself lives in
//! `gio-runtime`.
//!
//! # Crate Architecture
//!
//! ```text
//! gio-types  (RequestId, LogicalTime, HostVersion, ErrorCode)
//!     ↑
//! gio-auth   ◄── THIS CRATE
//! (Capability, CapabilityTable, PermissionRequest/Response/Outcome,
//!  PermissionHost, PermissionError)
//!     ↑
//! gio-runtime (PermissionCoordinator)
//! ```
//!
//! # Design Principles
//!
//! - **Traits here, implementations in consumers**: `gio-runtime` ships
//!   `SimulatedHost`; platform glue supplies the real one.
//! - **Policy is data**: version gating and the required flag live in a
//!   [`CapabilityTable`], not in code paths.
//! - **No failure reaches the user**: every [`PermissionError`] variant is
//!   resolved locally (drop, skip, or deny).

pub mod capability;
pub mod error;
pub mod grant;
pub mod host;
pub mod policy;
pub mod request;

pub use capability::{Capability, CapabilitySet};
pub use error::PermissionError;
pub use grant::{GrantResult, GrantStatus};
pub use host::PermissionHost;
pub use policy::{CapabilityRule, CapabilityTable};
pub use request::{PermissionOutcome, PermissionRequest, PermissionResponse};
