//! Request, response and outcome records.
//!
//! # Lifecycle
//!
//! ```text
//! missing capability detected
//!          │
//!          ▼
//! PermissionRequest { id, capability, issued_at }   ← owned by the coordinator
//!          │ request_permissions(id, [capability])
//!          ▼
//!        host (async prompt)
//!          │
//!          ▼
//! PermissionResponse { id, capabilities, results }  ← raw host payload
//!          │ matched by id
//!          ▼
//! PermissionOutcome { id, capability, granted }     ← transient, consumed once
//! ```

use crate::{Capability, GrantResult, PermissionError};
use gio_types::{LogicalTime, RequestId};
use serde::{Deserialize, Serialize};

/// An issued, not yet answered request for one capability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionRequest {
    /// Correlation code sent to the host.
    pub request_id: RequestId,
    /// The capability being asked for.
    pub capability: Capability,
    /// Logical time of issuance.
    pub issued_at: LogicalTime,
}

impl PermissionRequest {
    /// Creates a request record.
    #[must_use]
    pub fn new(request_id: RequestId, capability: Capability, issued_at: LogicalTime) -> Self {
        Self {
            request_id,
            capability,
            issued_at,
        }
    }
}

/// A response delivered by the host's permission callback.
///
/// The host echoes the request code and reports parallel lists of
/// capabilities and results. Either list may be empty when the user
/// dismissed the prompt or the interaction was cancelled.
///
/// # Example
///
/// ```
/// use gio_auth::{Capability, GrantResult, PermissionResponse};
/// use gio_types::RequestId;
///
/// let response = PermissionResponse::single(RequestId::new(3), Capability::BluetoothScan, true);
/// assert_eq!(
///     response.result_for(Capability::BluetoothScan).ok(),
///     Some(GrantResult::Granted)
/// );
///
/// let cancelled = PermissionResponse::new(RequestId::new(4), vec![], vec![]);
/// assert!(cancelled.result_for(Capability::BluetoothScan).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionResponse {
    /// Request code echoed by the host.
    pub request_id: RequestId,
    /// Capabilities the host reports on, in host order.
    #[serde(default)]
    pub capabilities: Vec<Capability>,
    /// Results parallel to `capabilities`.
    #[serde(default)]
    pub results: Vec<GrantResult>,
}

impl PermissionResponse {
    /// Creates a response from raw host lists.
    #[must_use]
    pub fn new(
        request_id: RequestId,
        capabilities: Vec<Capability>,
        results: Vec<GrantResult>,
    ) -> Self {
        Self {
            request_id,
            capabilities,
            results,
        }
    }

    /// Creates a single-capability response.
    #[must_use]
    pub fn single(request_id: RequestId, capability: Capability, granted: bool) -> Self {
        Self::new(
            request_id,
            vec![capability],
            vec![GrantResult::from(granted)],
        )
    }

    /// Extracts the result for `expected`.
    ///
    /// When the host names capabilities, the result is taken from the
    /// position of `expected` in that list; otherwise the first result
    /// is used.
    ///
    /// # Errors
    ///
    /// Returns [`PermissionError::MalformedResponse`] when the result
    /// list is empty, shorter than the capability list position, or the
    /// host names capabilities that do not include `expected`.
    pub fn result_for(&self, expected: Capability) -> Result<GrantResult, PermissionError> {
        if self.results.is_empty() {
            return Err(PermissionError::malformed(
                self.request_id,
                "empty grant-result list",
            ));
        }

        let index = if self.capabilities.is_empty() {
            0
        } else {
            self.capabilities
                .iter()
                .position(|c| *c == expected)
                .ok_or_else(|| {
                    PermissionError::malformed(
                        self.request_id,
                        format!("response does not mention {expected}"),
                    )
                })?
        };

        self.results.get(index).copied().ok_or_else(|| {
            PermissionError::malformed(
                self.request_id,
                format!(
                    "{} result(s) for {} capabilities",
                    self.results.len(),
                    self.capabilities.len()
                ),
            )
        })
    }
}

/// The resolved result of one request.
///
/// Constructed when a matching response arrives and consumed
/// immediately to produce one user notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PermissionOutcome {
    /// The request this outcome resolves.
    pub request_id: RequestId,
    /// The capability the request was issued for.
    pub capability: Capability,
    /// Whether the capability was granted.
    pub granted: bool,
}

impl PermissionOutcome {
    /// User-facing message naming the capability.
    ///
    /// ```
    /// use gio_auth::{Capability, PermissionOutcome};
    /// use gio_types::RequestId;
    ///
    /// let outcome = PermissionOutcome {
    ///     request_id: RequestId::new(1),
    ///     capability: Capability::BluetoothConnect,
    ///     granted: false,
    /// };
    /// assert_eq!(outcome.message(), "Bluetooth connect permission denied");
    /// ```
    #[must_use]
    pub fn message(&self) -> String {
        let verdict = if self.granted { "granted" } else { "denied" };
        format!("{} permission {}", self.capability.label(), verdict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gio_types::ErrorCode;

    fn id(raw: u32) -> RequestId {
        RequestId::new(raw)
    }

    #[test]
    fn result_from_batch_uses_matching_position() {
        let response = PermissionResponse::new(
            id(5),
            vec![Capability::BluetoothScan, Capability::FineLocation],
            vec![GrantResult::Denied, GrantResult::Granted],
        );
        assert_eq!(
            response.result_for(Capability::FineLocation).ok(),
            Some(GrantResult::Granted)
        );
        assert_eq!(
            response.result_for(Capability::BluetoothScan).ok(),
            Some(GrantResult::Denied)
        );
    }

    #[test]
    fn result_without_capability_list_uses_first() {
        let response = PermissionResponse::new(id(1), vec![], vec![GrantResult::Granted]);
        assert_eq!(
            response.result_for(Capability::Bluetooth).ok(),
            Some(GrantResult::Granted)
        );
    }

    #[test]
    fn empty_results_are_malformed() {
        let response = PermissionResponse::new(id(2), vec![Capability::Bluetooth], vec![]);
        let err = response
            .result_for(Capability::Bluetooth)
            .expect_err("empty results");
        assert_eq!(err.code(), "PERMISSION_MALFORMED_RESPONSE");
    }

    #[test]
    fn capability_mismatch_is_malformed() {
        let response = PermissionResponse::single(id(2), Capability::Bluetooth, true);
        let err = response
            .result_for(Capability::FineLocation)
            .expect_err("mismatch");
        assert!(err.to_string().contains("fine_location"), "got: {err}");
    }

    #[test]
    fn short_result_list_is_malformed() {
        let response = PermissionResponse::new(
            id(9),
            vec![Capability::Bluetooth, Capability::FineLocation],
            vec![GrantResult::Granted],
        );
        assert!(response.result_for(Capability::FineLocation).is_err());
        assert!(response.result_for(Capability::Bluetooth).is_ok());
    }

    #[test]
    fn outcome_messages() {
        let outcome = PermissionOutcome {
            request_id: id(1),
            capability: Capability::BluetoothScan,
            granted: true,
        };
        assert_eq!(outcome.message(), "Bluetooth scan permission granted");
    }

    #[test]
    fn response_deserializes_with_missing_lists() {
        let response: PermissionResponse =
            serde_json::from_str(r#"{"request_id": 4}"#).expect("deserialize");
        assert!(response.capabilities.is_empty());
        assert!(response.results.is_empty());
    }
}
