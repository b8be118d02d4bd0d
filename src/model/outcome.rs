//! Verification results.

use serde::{Deserialize, Serialize};

use super::endpoint::Endpoint;
use crate::error_handling::FailureKind;

/// What a verifier observed for one address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    pub reachable: bool,
    /// HTTP status code, 0 when not applicable
    pub status_code: u16,
    /// Empty when reachable
    pub error_detail: String,
    pub failure: Option<FailureKind>,
}

impl CheckResult {
    pub fn reachable(status_code: u16) -> Self {
        CheckResult {
            reachable: true,
            status_code,
            error_detail: String::new(),
            failure: None,
        }
    }

    pub fn failed(status_code: u16, kind: FailureKind, detail: impl Into<String>) -> Self {
        CheckResult {
            reachable: false,
            status_code,
            error_detail: detail.into(),
            failure: Some(kind),
        }
    }

    /// Attaches the endpoint this result belongs to.
    pub fn into_outcome(self, endpoint: Endpoint) -> VerificationOutcome {
        VerificationOutcome {
            endpoint,
            reachable: self.reachable,
            status_code: self.status_code,
            error_detail: self.error_detail,
            failure: self.failure,
        }
    }
}

/// The single verification result for one endpoint.
///
/// Holds its endpoint by value so every outcome serializes on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationOutcome {
    pub endpoint: Endpoint,
    pub reachable: bool,
    pub status_code: u16,
    pub error_detail: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureKind>,
}

impl VerificationOutcome {
    pub fn reachable(endpoint: Endpoint, status_code: u16) -> Self {
        CheckResult::reachable(status_code).into_outcome(endpoint)
    }

    pub fn failed(
        endpoint: Endpoint,
        status_code: u16,
        kind: FailureKind,
        detail: impl Into<String>,
    ) -> Self {
        CheckResult::failed(status_code, kind, detail).into_outcome(endpoint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reachable_has_empty_detail() {
        let outcome =
            VerificationOutcome::reachable(Endpoint::from_address("ns", "http://h:80"), 204);
        assert!(outcome.reachable);
        assert_eq!(outcome.status_code, 204);
        assert!(outcome.error_detail.is_empty());
        assert!(outcome.failure.is_none());
    }

    #[test]
    fn test_outcome_serializes_endpoint_by_value() {
        let outcome = VerificationOutcome::failed(
            Endpoint::from_address("ns", "tcp://db:5432"),
            0,
            FailureKind::Connect,
            "connection refused",
        );
        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(value["endpoint"]["address"], "tcp://db:5432");
        assert_eq!(value["endpoint"]["protocol"], "tcp");
        assert_eq!(value["reachable"], false);
        assert_eq!(value["failure"], "connect");

        let back: VerificationOutcome = serde_json::from_value(value).unwrap();
        assert_eq!(back, outcome);
    }
}
