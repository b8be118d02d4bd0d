//! Error type definitions.
//!
//! This module defines the structural error types of a run and the
//! per-endpoint failure categories recorded in verification outcomes.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use serde::{Deserialize, Serialize};
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// Neither in-cluster configuration nor the kubeconfig file was usable.
    #[error("Kubernetes client initialization error: {0}")]
    KubeClientError(String),
}

/// Error types for descriptor enumeration.
#[derive(Error, Debug)]
pub enum DiscoveryError {
    /// The Kubernetes API rejected or failed a list call.
    #[error("Failed to list {kind} in {scope}: {source}")]
    ListFailed {
        /// Object kind being listed (namespaces, pods, services)
        kind: &'static str,
        /// Namespace, or "cluster" for cluster-scoped lists
        scope: String,
        /// Underlying API error
        #[source]
        source: kube::Error,
    },

    /// A list call did not complete in time.
    #[error("Timed out listing {kind} in {scope} after {seconds}s")]
    ListTimeout {
        /// Object kind being listed
        kind: &'static str,
        /// Namespace, or "cluster" for cluster-scoped lists
        scope: String,
        /// Timeout that elapsed
        seconds: u64,
    },

    /// Any other source failure (used by non-Kubernetes sources).
    #[error("Descriptor source error: {0}")]
    Source(String),
}

/// Error types for report and results files.
#[derive(Error, Debug)]
pub enum ReportError {
    /// Filesystem error creating, reading or writing a report.
    #[error("Report I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV encoding error.
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON encoding error.
    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Why a single endpoint was found unreachable.
///
/// Recorded alongside each failed outcome; never a run-level error.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// HTTP response with status >= 400
    HttpStatus,
    /// The check did not finish within its timeout
    Timeout,
    /// Connection refused, reset or otherwise not established
    Connect,
    /// Host name could not be resolved
    Dns,
    /// TLS handshake or certificate failure
    Tls,
    /// Address is not a single host:port pair
    InvalidAddress,
    /// No verifier handles the address scheme
    Unsupported,
    /// Other HTTP request failure (bad URL, protocol error)
    Request,
    /// The worker running the check died before reporting
    TaskAborted,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FailureKind {
    /// Human-readable label used in the end-of-run statistics.
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::HttpStatus => "HTTP error status",
            FailureKind::Timeout => "Timeout",
            FailureKind::Connect => "Connection failed",
            FailureKind::Dns => "DNS resolution failed",
            FailureKind::Tls => "TLS failure",
            FailureKind::InvalidAddress => "Invalid address",
            FailureKind::Unsupported => "Unsupported protocol",
            FailureKind::Request => "HTTP request error",
            FailureKind::TaskAborted => "Verification task aborted",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_failure_kind_labels_are_distinct() {
        let labels: std::collections::HashSet<_> =
            FailureKind::iter().map(|k| k.as_str()).collect();
        assert_eq!(labels.len(), FailureKind::iter().count());
    }

    #[test]
    fn test_failure_kind_serializes_snake_case() {
        let json = serde_json::to_string(&FailureKind::InvalidAddress).unwrap();
        assert_eq!(json, "\"invalid_address\"");
    }

    #[test]
    fn test_report_error_from_io() {
        let err: ReportError =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn test_discovery_timeout_message() {
        let err = DiscoveryError::ListTimeout {
            kind: "pods",
            scope: "apps".to_string(),
            seconds: 30,
        };
        assert_eq!(err.to_string(), "Timed out listing pods in apps after 30s");
    }
}
