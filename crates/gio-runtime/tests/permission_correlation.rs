//! Integration tests for permission request correlation.
//!
//! Drives a `PermissionCoordinator` against a `SimulatedHost` the way
//! a real host would: checks, prompts, and responses arriving in any
//! order.

use gio_auth::{
    Capability, CapabilitySet, GrantResult, GrantStatus, PermissionRequest, PermissionResponse,
};
use gio_runtime::auth::PermissionCoordinator;
use gio_runtime::host::SimulatedHost;
use gio_runtime::notify::RecordingNotifier;
use gio_types::RequestId;

// =============================================================================
// Test Fixtures
// =============================================================================

type Coordinator = PermissionCoordinator<SimulatedHost, RecordingNotifier>;

struct Harness {
    coordinator: Coordinator,
    host: SimulatedHost,
    notifier: RecordingNotifier,
}

impl Harness {
    fn new(host: SimulatedHost) -> Self {
        let notifier = RecordingNotifier::new();
        Self {
            coordinator: PermissionCoordinator::new(host.clone(), notifier.clone()),
            host,
            notifier,
        }
    }

    fn answer(&mut self, id: RequestId, granted: bool) -> bool {
        let response = self.host.answer(id, granted).expect("request was issued");
        self.coordinator.on_response(response).is_some()
    }
}

fn id_for(issued: &[PermissionRequest], capability: Capability) -> RequestId {
    issued
        .iter()
        .find(|r| r.capability == capability)
        .map(|r| r.request_id)
        .expect("capability requested")
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn scan_denied_connect_already_granted() {
    let host = SimulatedHost::default()
        .with_status(Capability::BluetoothScan, GrantStatus::Denied)
        .with_status(Capability::BluetoothConnect, GrantStatus::Granted);
    let mut h = Harness::new(host);

    let issued = h
        .coordinator
        .evaluate_and_request(CapabilitySet::BLUETOOTH_SCAN | CapabilitySet::BLUETOOTH_CONNECT);

    assert_eq!(issued.len(), 1);
    assert_eq!(issued[0].capability, Capability::BluetoothScan);

    let scan_id = issued[0].request_id;
    assert!(h.answer(scan_id, false));

    assert_eq!(h.notifier.messages(), vec!["Bluetooth scan permission denied"]);
    assert!(h.coordinator.pending().is_empty());
    assert_eq!(h.host.issued().len(), 1);
}

#[test]
fn out_of_order_responses_resolve_the_right_capability() {
    let mut h = Harness::new(SimulatedHost::default());

    let issued = h
        .coordinator
        .evaluate_and_request(CapabilitySet::BLUETOOTH_SCAN | CapabilitySet::FINE_LOCATION);
    let scan = id_for(&issued, Capability::BluetoothScan);
    let location = id_for(&issued, Capability::FineLocation);
    assert_eq!(scan, RequestId::new(1));
    assert_eq!(location, RequestId::new(2));

    let outcome = h
        .coordinator
        .on_result(location, true)
        .expect("location open");
    assert_eq!(outcome.capability, Capability::FineLocation);
    assert!(h.coordinator.is_pending(Capability::BluetoothScan));
    assert!(!h.coordinator.is_pending(Capability::FineLocation));

    let outcome = h.coordinator.on_result(scan, false).expect("scan open");
    assert_eq!(outcome.capability, Capability::BluetoothScan);

    assert_eq!(
        h.notifier.messages(),
        vec![
            "Location permission granted",
            "Bluetooth scan permission denied"
        ]
    );
    assert!(h.coordinator.pending().is_empty());
}

#[test]
fn unmatched_response_is_ignored() {
    let mut h = Harness::new(SimulatedHost::default());
    let issued = h.coordinator.evaluate_and_request(CapabilitySet::all());
    let before: Vec<_> = h.coordinator.pending().into_iter().cloned().collect();

    let outcome = h
        .coordinator
        .on_response(PermissionResponse::single(
            RequestId::new(99),
            Capability::BluetoothScan,
            true,
        ));

    assert!(outcome.is_none());
    assert!(h.notifier.is_empty());
    let after: Vec<_> = h.coordinator.pending().into_iter().cloned().collect();
    assert_eq!(before, after);
    assert_eq!(after.len(), issued.len());
}

// =============================================================================
// Properties
// =============================================================================

#[test]
fn one_request_per_missing_capability() {
    let statuses = [
        GrantStatus::Granted,
        GrantStatus::Denied,
        GrantStatus::Unsupported,
    ];

    for bt in statuses {
        for scan in statuses {
            for location in statuses {
                let host = SimulatedHost::default()
                    .with_status(Capability::Bluetooth, bt)
                    .with_status(Capability::BluetoothScan, scan)
                    .with_status(Capability::BluetoothConnect, GrantStatus::Granted)
                    .with_status(Capability::FineLocation, location);
                let mut h = Harness::new(host);

                let issued = h.coordinator.evaluate_and_request(CapabilitySet::all());

                let expected: Vec<_> = [
                    (Capability::Bluetooth, bt),
                    (Capability::BluetoothScan, scan),
                    (Capability::FineLocation, location),
                ]
                .into_iter()
                .filter(|(_, status)| status.needs_request())
                .map(|(cap, _)| cap)
                .collect();
                let actual: Vec<_> = issued.iter().map(|r| r.capability).collect();

                assert_eq!(actual, expected, "{bt:?} {scan:?} {location:?}");
                assert_eq!(h.host.issued().len(), expected.len());
            }
        }
    }
}

#[test]
fn every_response_order_notifies_once_per_request() {
    let orders: [[usize; 3]; 6] = [
        [0, 1, 2],
        [0, 2, 1],
        [1, 0, 2],
        [1, 2, 0],
        [2, 0, 1],
        [2, 1, 0],
    ];

    for order in orders {
        let host = SimulatedHost::default()
            .with_status(Capability::Bluetooth, GrantStatus::Granted);
        let mut h = Harness::new(host);
        let issued = h.coordinator.evaluate_and_request(CapabilitySet::all());
        assert_eq!(issued.len(), 3);

        for &i in &order {
            let request = &issued[i];
            let outcome = h
                .coordinator
                .on_result(request.request_id, i % 2 == 0)
                .expect("open request");
            assert_eq!(outcome.capability, request.capability);
            assert!(!h.coordinator.is_pending(request.capability));
        }

        let notified: Vec<_> = h
            .notifier
            .notifications()
            .into_iter()
            .map(|n| n.capability)
            .collect();
        let expected: Vec<_> = order.iter().map(|&i| issued[i].capability).collect();
        assert_eq!(notified, expected, "{order:?}");
    }
}

#[test]
fn duplicate_delivery_is_idempotent() {
    let mut h = Harness::new(SimulatedHost::default());
    let issued = h
        .coordinator
        .evaluate_and_request(CapabilitySet::BLUETOOTH_CONNECT);
    let id = issued[0].request_id;
    let response = h.host.answer(id, true).expect("issued");

    assert!(h.coordinator.on_response(response.clone()).is_some());
    assert!(h.coordinator.on_response(response).is_none());
    assert_eq!(h.notifier.len(), 1);
}

#[test]
fn ids_are_never_reused() {
    let mut h = Harness::new(SimulatedHost::default());
    let mut seen = Vec::new();

    for _ in 0..5 {
        let issued = h
            .coordinator
            .evaluate_and_request(CapabilitySet::BLUETOOTH_SCAN);
        let id = issued[0].request_id;
        assert!(!seen.contains(&id));
        seen.push(id);
        h.coordinator.on_result(id, false);
    }

    assert!(seen.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn cancelled_prompt_counts_as_denial() {
    let mut h = Harness::new(SimulatedHost::default());
    let issued = h
        .coordinator
        .evaluate_and_request(CapabilitySet::FINE_LOCATION);

    let response = h.host.cancel(issued[0].request_id);
    let outcome = h.coordinator.on_response(response).expect("open");

    assert!(!outcome.granted);
    assert_eq!(h.notifier.messages(), vec!["Location permission denied"]);
    assert_eq!(
        h.coordinator.denied_required(),
        CapabilitySet::FINE_LOCATION
    );
}

#[test]
fn granted_capability_is_not_asked_again() {
    let mut h = Harness::new(SimulatedHost::default());
    let issued = h
        .coordinator
        .evaluate_and_request(CapabilitySet::BLUETOOTH);
    assert!(h.answer(issued[0].request_id, true));

    assert!(h
        .coordinator
        .evaluate_and_request(CapabilitySet::BLUETOOTH)
        .is_empty());
}

#[test]
fn short_batch_result_list_is_denial() {
    let mut h = Harness::new(SimulatedHost::default());
    let issued = h
        .coordinator
        .evaluate_and_request(CapabilitySet::BLUETOOTH_CONNECT);

    let outcome = h
        .coordinator
        .on_response(PermissionResponse::new(
            issued[0].request_id,
            vec![Capability::BluetoothScan, Capability::BluetoothConnect],
            vec![GrantResult::Granted],
        ))
        .expect("open");

    assert!(!outcome.granted);
    assert_eq!(h.notifier.len(), 1);
}
