//! Permission request correlation.

use crate::notify::{Notification, Notifier};
use gio_auth::{
    Capability, CapabilitySet, CapabilityTable, GrantResult, GrantStatus, PermissionError,
    PermissionHost, PermissionOutcome, PermissionRequest, PermissionResponse,
};
use gio_types::{LogicalClock, RequestId, RequestIdAllocator};
use std::collections::BTreeMap;

/// Correlates asynchronous permission responses with the requests
/// that caused them.
///
/// # Open Requests
///
/// | Step | Table |
/// |------|-------|
/// | `evaluate_and_request` issues id 1 for scan | `{1: scan}` |
/// | issues id 2 for location | `{1: scan, 2: location}` |
/// | response for id 2 | `{1: scan}` |
/// | response for id 2 again | `{1: scan}` (dropped) |
/// | response for id 1 | `{}` |
///
/// Ids are allocated from a monotonic counter and never reused, so a
/// response either matches exactly one open request or is stale.
/// At most one request per capability is open at any time.
///
/// # Example
///
/// ```
/// use gio_auth::{Capability, CapabilitySet, GrantStatus};
/// use gio_runtime::auth::PermissionCoordinator;
/// use gio_runtime::host::SimulatedHost;
/// use gio_runtime::notify::RecordingNotifier;
///
/// let host = SimulatedHost::default().with_status(Capability::Bluetooth, GrantStatus::Granted);
/// let notifier = RecordingNotifier::new();
/// let mut coordinator = PermissionCoordinator::new(host, notifier.clone());
///
/// let issued = coordinator.evaluate_and_request(CapabilitySet::all());
/// assert_eq!(issued.len(), 3);
///
/// let scan = issued[0].request_id;
/// coordinator.on_result(scan, false);
/// assert_eq!(notifier.messages(), vec!["Bluetooth scan permission denied"]);
/// assert_eq!(coordinator.pending().len(), 2);
/// ```
#[derive(Debug)]
pub struct PermissionCoordinator<H, N> {
    host: H,
    notifier: N,
    table: CapabilityTable,
    ids: RequestIdAllocator,
    clock: LogicalClock,
    /// Keyed by id, so iteration order is issuance order.
    open: BTreeMap<RequestId, PermissionRequest>,
    denied: CapabilitySet,
}

impl<H: PermissionHost, N: Notifier> PermissionCoordinator<H, N> {
    /// Creates a coordinator using the default capability table.
    #[must_use]
    pub fn new(host: H, notifier: N) -> Self {
        Self::with_table(host, notifier, CapabilityTable::default())
    }

    /// Creates a coordinator with a custom capability table.
    #[must_use]
    pub fn with_table(host: H, notifier: N, table: CapabilityTable) -> Self {
        Self {
            host,
            notifier,
            table,
            ids: RequestIdAllocator::new().with_max(RequestIdAllocator::HOST_CODE_MAX),
            clock: LogicalClock::new(),
            open: BTreeMap::new(),
            denied: CapabilitySet::empty(),
        }
    }

    /// Requests every capability in `set` the host reports as missing.
    ///
    /// Rules are visited in table order. A capability is skipped when
    /// the host is older than the rule allows, when it is already
    /// granted, when the host cannot evaluate it, or when a request for
    /// it is still open. Capabilities without a rule are ignored.
    ///
    /// Returns the newly issued requests in issuance order.
    pub fn evaluate_and_request(&mut self, set: CapabilitySet) -> Vec<PermissionRequest> {
        let version = self.host.host_version();
        let rules: Vec<_> = self
            .table
            .iter()
            .filter(|rule| set.has(rule.capability))
            .copied()
            .collect();

        for capability in set.capabilities() {
            if self.table.rule_for(capability).is_none() {
                tracing::debug!(%capability, "no rule for capability, ignoring");
            }
        }

        let mut issued = Vec::new();
        for rule in rules {
            let capability = rule.capability;

            if !rule.applies_to(version) {
                let err = PermissionError::unsupported(
                    capability,
                    format!("needs {}, host is {version}", rule.min_host_version),
                );
                tracing::debug!(error = %err, "skipping capability");
                continue;
            }

            match self.host.check_granted(capability) {
                GrantStatus::Granted => {
                    tracing::trace!(%capability, "already granted");
                    continue;
                }
                GrantStatus::Unsupported => {
                    let err = PermissionError::unsupported(capability, "host cannot evaluate it");
                    tracing::debug!(error = %err, "skipping capability");
                    continue;
                }
                GrantStatus::Denied => {}
            }

            if self.is_pending(capability) {
                tracing::debug!(%capability, "request already open, not asking again");
                continue;
            }

            let Some(request_id) = self.ids.allocate() else {
                let err = PermissionError::IdsExhausted { capability };
                tracing::warn!(error = %err, "request not issued");
                continue;
            };

            let request = PermissionRequest::new(request_id, capability, self.clock.tick());
            self.open.insert(request_id, request.clone());
            tracing::debug!(
                request_id = %request_id,
                %capability,
                issued_at = %request.issued_at,
                "requesting permission"
            );
            self.host.request_permissions(request_id, &[capability]);
            issued.push(request);
        }

        issued
    }

    /// Resolves a host response.
    ///
    /// Returns `None` for an id with no open request (stale, duplicate,
    /// or foreign); nothing changes and no notification is produced.
    /// Otherwise the request is closed, exactly one notification is
    /// emitted and the outcome is returned. A malformed payload counts
    /// as a denial.
    pub fn on_response(&mut self, response: PermissionResponse) -> Option<PermissionOutcome> {
        let Some(request) = self.open.remove(&response.request_id) else {
            let err = PermissionError::UnknownResponse {
                request_id: response.request_id,
            };
            tracing::debug!(error = %err, "dropping response");
            return None;
        };

        let result = response
            .result_for(request.capability)
            .unwrap_or_else(|err| {
                tracing::warn!(error = %err, "treating malformed response as denial");
                GrantResult::Denied
            });

        let outcome = PermissionOutcome {
            request_id: request.request_id,
            capability: request.capability,
            granted: result.is_granted(),
        };

        self.denied.set(request.capability.into(), !outcome.granted);
        tracing::info!(
            request_id = %outcome.request_id,
            capability = %outcome.capability,
            granted = outcome.granted,
            "permission resolved"
        );
        self.notifier.notify(Notification::from(&outcome));

        Some(outcome)
    }

    /// Resolves a single-result response without a capability list.
    pub fn on_result(&mut self, request_id: RequestId, granted: bool) -> Option<PermissionOutcome> {
        self.on_response(PermissionResponse::new(
            request_id,
            Vec::new(),
            vec![GrantResult::from(granted)],
        ))
    }

    /// Open requests in issuance order.
    #[must_use]
    pub fn pending(&self) -> Vec<&PermissionRequest> {
        self.open.values().collect()
    }

    /// Returns `true` if a request for `capability` is open.
    #[must_use]
    pub fn is_pending(&self, capability: Capability) -> bool {
        self.open.values().any(|r| r.capability == capability)
    }

    /// Required capabilities whose latest outcome was a denial.
    #[must_use]
    pub fn denied_required(&self) -> CapabilitySet {
        self.denied & self.table.required()
    }

    /// Forgets every open request and returns them in issuance order.
    ///
    /// Responses arriving later for these ids are dropped as stale.
    pub fn abandon_all(&mut self) -> Vec<PermissionRequest> {
        let abandoned: Vec<_> = std::mem::take(&mut self.open).into_values().collect();
        if !abandoned.is_empty() {
            tracing::debug!(count = abandoned.len(), "abandoning open permission requests");
        }
        abandoned
    }

    /// The capability table in use.
    #[must_use]
    pub fn table(&self) -> &CapabilityTable {
        &self.table
    }

    /// The permission host.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the permission host.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// The notifier.
    #[must_use]
    pub fn notifier(&self) -> &N {
        &self.notifier
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::SimulatedHost;
    use crate::notify::RecordingNotifier;
    use gio_auth::CapabilityRule;
    use gio_types::HostVersion;

    fn coordinator(
        host: SimulatedHost,
    ) -> (
        PermissionCoordinator<SimulatedHost, RecordingNotifier>,
        RecordingNotifier,
    ) {
        let notifier = RecordingNotifier::new();
        (PermissionCoordinator::new(host, notifier.clone()), notifier)
    }

    #[test]
    fn requests_only_missing_capabilities() {
        let host = SimulatedHost::default()
            .with_status(Capability::BluetoothScan, GrantStatus::Denied)
            .with_status(Capability::BluetoothConnect, GrantStatus::Granted);
        let (mut coord, notifier) = coordinator(host.clone());

        let set = CapabilitySet::BLUETOOTH_SCAN | CapabilitySet::BLUETOOTH_CONNECT;
        let issued = coord.evaluate_and_request(set);

        assert_eq!(issued.len(), 1);
        assert_eq!(issued[0].capability, Capability::BluetoothScan);
        assert_eq!(host.issued(), vec![(issued[0].request_id, vec![Capability::BluetoothScan])]);
        assert!(notifier.is_empty());
    }

    #[test]
    fn unsupported_capability_is_skipped() {
        let host = SimulatedHost::default()
            .with_status(Capability::FineLocation, GrantStatus::Unsupported);
        let (mut coord, _) = coordinator(host);

        let issued = coord.evaluate_and_request(Capability::FineLocation.into());
        assert!(issued.is_empty());
        assert!(coord.pending().is_empty());
    }

    #[test]
    fn version_gate_skips_newer_capabilities() {
        let host = SimulatedHost::new(HostVersion::new(28));
        let (mut coord, _) = coordinator(host.clone());

        let issued = coord.evaluate_and_request(CapabilitySet::all());
        let caps: Vec<_> = issued.iter().map(|r| r.capability).collect();
        assert_eq!(caps, vec![Capability::Bluetooth, Capability::FineLocation]);
        assert_eq!(host.issued().len(), 2);
    }

    #[test]
    fn issuance_follows_table_order() {
        let table = CapabilityTable::new(vec![
            CapabilityRule::new(Capability::FineLocation),
            CapabilityRule::new(Capability::BluetoothScan),
        ]);
        let notifier = RecordingNotifier::new();
        let mut coord =
            PermissionCoordinator::with_table(SimulatedHost::default(), notifier, table);

        let issued = coord.evaluate_and_request(CapabilitySet::all());
        let caps: Vec<_> = issued.iter().map(|r| r.capability).collect();
        assert_eq!(caps, vec![Capability::FineLocation, Capability::BluetoothScan]);
        assert!(issued[0].request_id < issued[1].request_id);
        assert!(issued[0].issued_at < issued[1].issued_at);
    }

    #[test]
    fn second_evaluation_does_not_duplicate_open_requests() {
        let (mut coord, _) = coordinator(SimulatedHost::default());

        let first = coord.evaluate_and_request(Capability::BluetoothScan.into());
        let second = coord.evaluate_and_request(Capability::BluetoothScan.into());

        assert_eq!(first.len(), 1);
        assert!(second.is_empty());
        assert_eq!(coord.pending().len(), 1);
    }

    #[test]
    fn capability_can_be_asked_again_after_resolution() {
        let (mut coord, _) = coordinator(SimulatedHost::default());

        let first = coord.evaluate_and_request(Capability::BluetoothScan.into());
        coord.on_result(first[0].request_id, false);
        let second = coord.evaluate_and_request(Capability::BluetoothScan.into());

        assert_eq!(second.len(), 1);
        assert_ne!(first[0].request_id, second[0].request_id);
    }

    #[test]
    fn unknown_response_changes_nothing() {
        let (mut coord, notifier) = coordinator(SimulatedHost::default());
        coord.evaluate_and_request(Capability::BluetoothScan.into());

        let outcome = coord.on_result(RequestId::new(99), true);

        assert!(outcome.is_none());
        assert!(notifier.is_empty());
        assert_eq!(coord.pending().len(), 1);
    }

    #[test]
    fn duplicate_delivery_notifies_once() {
        let (mut coord, notifier) = coordinator(SimulatedHost::default());
        let issued = coord.evaluate_and_request(Capability::BluetoothConnect.into());
        let id = issued[0].request_id;

        assert!(coord.on_result(id, true).is_some());
        assert!(coord.on_result(id, true).is_none());
        assert_eq!(notifier.messages(), vec!["Bluetooth connect permission granted"]);
    }

    #[test]
    fn empty_result_list_counts_as_denial() {
        let (mut coord, notifier) = coordinator(SimulatedHost::default());
        let issued = coord.evaluate_and_request(Capability::FineLocation.into());
        let id = issued[0].request_id;

        let outcome = coord
            .on_response(PermissionResponse::new(id, vec![], vec![]))
            .expect("open request");

        assert!(!outcome.granted);
        assert!(coord.pending().is_empty());
        assert_eq!(notifier.messages(), vec!["Location permission denied"]);
    }

    #[test]
    fn mismatched_capability_counts_as_denial() {
        let (mut coord, _) = coordinator(SimulatedHost::default());
        let issued = coord.evaluate_and_request(Capability::BluetoothScan.into());

        let outcome = coord
            .on_response(PermissionResponse::single(
                issued[0].request_id,
                Capability::FineLocation,
                true,
            ))
            .expect("open request");
        assert!(!outcome.granted);
        assert_eq!(outcome.capability, Capability::BluetoothScan);
    }

    #[test]
    fn batch_response_picks_matching_entry() {
        let (mut coord, _) = coordinator(SimulatedHost::default());
        let issued = coord.evaluate_and_request(Capability::BluetoothConnect.into());

        let outcome = coord
            .on_response(PermissionResponse::new(
                issued[0].request_id,
                vec![Capability::BluetoothScan, Capability::BluetoothConnect],
                vec![GrantResult::Denied, GrantResult::Granted],
            ))
            .expect("open request");
        assert!(outcome.granted);
    }

    #[test]
    fn denied_required_tracks_latest_outcome() {
        let table = CapabilityTable::new(vec![
            CapabilityRule::new(Capability::BluetoothScan),
            CapabilityRule::new(Capability::FineLocation).optional(),
        ]);
        let notifier = RecordingNotifier::new();
        let mut coord =
            PermissionCoordinator::with_table(SimulatedHost::default(), notifier, table);

        let issued = coord.evaluate_and_request(CapabilitySet::all());
        coord.on_result(issued[0].request_id, false);
        coord.on_result(issued[1].request_id, false);
        assert_eq!(coord.denied_required(), CapabilitySet::BLUETOOTH_SCAN);

        let again = coord.evaluate_and_request(Capability::BluetoothScan.into());
        coord.on_result(again[0].request_id, true);
        assert!(coord.denied_required().is_empty());
    }

    #[test]
    fn abandon_all_drops_open_requests() {
        let (mut coord, notifier) = coordinator(SimulatedHost::default());
        let issued = coord.evaluate_and_request(CapabilitySet::all());

        let abandoned = coord.abandon_all();
        assert_eq!(abandoned, issued);
        assert!(coord.pending().is_empty());

        assert!(coord.on_result(issued[0].request_id, true).is_none());
        assert!(notifier.is_empty());
    }

    #[test]
    fn ids_stop_at_host_code_limit() {
        let (mut coord, _) = coordinator(SimulatedHost::default());
        for _ in 0..RequestIdAllocator::HOST_CODE_MAX {
            let issued = coord.evaluate_and_request(CapabilitySet::BLUETOOTH_SCAN);
            assert_eq!(issued.len(), 1);
            coord.on_result(issued[0].request_id, false);
        }

        assert!(coord
            .evaluate_and_request(CapabilitySet::BLUETOOTH_SCAN)
            .is_empty());
        assert!(coord.pending().is_empty());
    }
}
