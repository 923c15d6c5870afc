//! Host permission API contract.
//!
//! The coordinator never talks to the OS directly. It needs exactly
//! three things from the host, expressed by [`PermissionHost`]:
//!
//! ```text
//! PermissionCoordinator
//!     │ host_version()             ← version gating
//!     │ check_granted(capability)  ← skip already granted
//!     │ request_permissions(id, [capability])
//!     ▼
//! PermissionHost (platform glue / simulator)
//!     │
//!     └── later: PermissionResponse { id, capabilities, results }
//!                pushed back into the coordinator by the container
//! ```
//!
//! Issuance returns immediately; the prompt and its answer are fully
//! asynchronous and arrive as a message, never by polling.

use crate::{Capability, GrantStatus};
use gio_types::{HostVersion, RequestId};

/// The host operations the permission coordinator depends on.
///
/// # Example
///
/// ```
/// use gio_auth::{Capability, GrantStatus, PermissionHost};
/// use gio_types::{HostVersion, RequestId};
///
/// #[derive(Default)]
/// struct AllGranted;
///
/// impl PermissionHost for AllGranted {
///     fn host_version(&self) -> HostVersion {
///         HostVersion::S
///     }
///
///     fn check_granted(&self, _capability: Capability) -> GrantStatus {
///         GrantStatus::Granted
///     }
///
///     fn request_permissions(&mut self, _id: RequestId, _capabilities: &[Capability]) {}
/// }
///
/// assert_eq!(AllGranted.check_granted(Capability::Bluetooth), GrantStatus::Granted);
/// ```
pub trait PermissionHost {
    /// API level of the running host.
    fn host_version(&self) -> HostVersion;

    /// Current grant status of `capability`.
    ///
    /// Returns [`GrantStatus::Unsupported`] when the host lacks the
    /// concept for this capability.
    fn check_granted(&self, capability: Capability) -> GrantStatus;

    /// Starts an asynchronous request.
    ///
    /// The host must eventually echo `request_id` in its response, or
    /// never answer at all. Batches of one or more capabilities are valid.
    fn request_permissions(&mut self, request_id: RequestId, capabilities: &[Capability]);
}

impl<H: PermissionHost + ?Sized> PermissionHost for Box<H> {
    fn host_version(&self) -> HostVersion {
        (**self).host_version()
    }

    fn check_granted(&self, capability: Capability) -> GrantStatus {
        (**self).check_granted(capability)
    }

    fn request_permissions(&mut self, request_id: RequestId, capabilities: &[Capability]) {
        (**self).request_permissions(request_id, capabilities);
    }
}
