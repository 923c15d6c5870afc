//! In-process permission host.
//!
//! [`SimulatedHost`] plays the host OS: it answers grant-status checks
//! from a table, records issued requests, and builds the responses the
//! real host would deliver. The CLI drives it from stdin; tests drive
//! it directly.
//!
//! Clones share state, so one handle can live inside a coordinator
//! while another answers its requests.

use gio_auth::{Capability, GrantResult, GrantStatus, PermissionHost, PermissionResponse};
use gio_types::{HostVersion, RequestId};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug)]
struct HostState {
    version: HostVersion,
    statuses: HashMap<Capability, GrantStatus>,
    issued: Vec<(RequestId, Vec<Capability>)>,
    answered: Vec<RequestId>,
}

/// A scriptable [`PermissionHost`].
///
/// Capabilities without an explicit status report
/// [`GrantStatus::Denied`].
///
/// # Example
///
/// ```
/// use gio_auth::{Capability, GrantStatus, PermissionHost};
/// use gio_runtime::host::SimulatedHost;
/// use gio_types::RequestId;
///
/// let host = SimulatedHost::default();
/// let mut handle = host.clone();
/// handle.request_permissions(RequestId::new(1), &[Capability::BluetoothScan]);
///
/// let response = host.answer(RequestId::new(1), true).expect("issued");
/// assert_eq!(response.capabilities, vec![Capability::BluetoothScan]);
/// assert_eq!(host.check_granted(Capability::BluetoothScan), GrantStatus::Granted);
/// ```
#[derive(Debug, Clone)]
pub struct SimulatedHost {
    state: Arc<Mutex<HostState>>,
}

impl SimulatedHost {
    /// Creates a host reporting `version`.
    #[must_use]
    pub fn new(version: HostVersion) -> Self {
        Self {
            state: Arc::new(Mutex::new(HostState {
                version,
                statuses: HashMap::new(),
                issued: Vec::new(),
                answered: Vec::new(),
            })),
        }
    }

    /// Sets the status of `capability` (builder form).
    #[must_use]
    pub fn with_status(self, capability: Capability, status: GrantStatus) -> Self {
        self.set_status(capability, status);
        self
    }

    /// Sets the status of `capability`.
    pub fn set_status(&self, capability: Capability, status: GrantStatus) {
        self.state.lock().statuses.insert(capability, status);
    }

    /// Changes the reported host version.
    pub fn set_version(&self, version: HostVersion) {
        self.state.lock().version = version;
    }

    /// Every `request_permissions` call received, in order.
    #[must_use]
    pub fn issued(&self) -> Vec<(RequestId, Vec<Capability>)> {
        self.state.lock().issued.clone()
    }

    /// Issued requests not yet answered, in order.
    #[must_use]
    pub fn unanswered(&self) -> Vec<(RequestId, Vec<Capability>)> {
        let state = self.state.lock();
        state
            .issued
            .iter()
            .filter(|(id, _)| !state.answered.contains(id))
            .cloned()
            .collect()
    }

    /// Answers an issued request the way the user would.
    ///
    /// Granting updates the host's own grant table, so later checks
    /// report [`GrantStatus::Granted`]. Returns `None` if `request_id`
    /// was never issued.
    pub fn answer(&self, request_id: RequestId, granted: bool) -> Option<PermissionResponse> {
        let mut state = self.state.lock();
        let capabilities = state
            .issued
            .iter()
            .find(|(id, _)| *id == request_id)
            .map(|(_, caps)| caps.clone())?;

        if granted {
            for capability in &capabilities {
                state.statuses.insert(*capability, GrantStatus::Granted);
            }
        }
        state.answered.push(request_id);

        let results = vec![GrantResult::from(granted); capabilities.len()];
        Some(PermissionResponse::new(request_id, capabilities, results))
    }

    /// Answers every unanswered request with the same verdict.
    pub fn answer_all(&self, granted: bool) -> Vec<PermissionResponse> {
        self.unanswered()
            .into_iter()
            .filter_map(|(id, _)| self.answer(id, granted))
            .collect()
    }

    /// Builds the empty response a cancelled prompt produces.
    pub fn cancel(&self, request_id: RequestId) -> PermissionResponse {
        self.state.lock().answered.push(request_id);
        PermissionResponse::new(request_id, Vec::new(), Vec::new())
    }
}

impl Default for SimulatedHost {
    fn default() -> Self {
        Self::new(HostVersion::default())
    }
}

impl PermissionHost for SimulatedHost {
    fn host_version(&self) -> HostVersion {
        self.state.lock().version
    }

    fn check_granted(&self, capability: Capability) -> GrantStatus {
        self.state
            .lock()
            .statuses
            .get(&capability)
            .copied()
            .unwrap_or(GrantStatus::Denied)
    }

    fn request_permissions(&mut self, request_id: RequestId, capabilities: &[Capability]) {
        tracing::trace!(request_id = %request_id, count = capabilities.len(), "host prompt");
        self.state
            .lock()
            .issued
            .push((request_id, capabilities.to_vec()));
    }
}
