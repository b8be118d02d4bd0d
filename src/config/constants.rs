//! Configuration constants.
//!
//! This module defines the constants used throughout the application,
//! including defaults, clamping bounds, annotation keys and timeouts.

use std::time::Duration;

// Concurrency
/// Default number of verification workers
pub const DEFAULT_CONCURRENCY: i64 = 20;
/// Lower bound for the worker count
pub const MIN_CONCURRENCY: i64 = 1;
/// Upper bound for the worker count
pub const MAX_CONCURRENCY: i64 = 100;

// Per-check timeout
/// Default per-check timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: i64 = 5;
/// Lower bound for the per-check timeout in seconds
pub const MIN_TIMEOUT_SECS: i64 = 1;
/// Upper bound for the per-check timeout in seconds
pub const MAX_TIMEOUT_SECS: i64 = 60;
/// Extra time granted to a verifier past its own timeout before the
/// scheduler records it as timed out.
pub const VERIFY_GRACE: Duration = Duration::from_secs(1);

// Progress reporting
/// Log a progress line every this many completed verifications
pub const PROGRESS_LOG_INTERVAL: usize = 50;

// Kubernetes
/// Timeout for a single list call against the Kubernetes API
pub const KUBE_LIST_TIMEOUT: Duration = Duration::from_secs(30);
/// Default cluster DNS domain
pub const DEFAULT_CLUSTER_DOMAIN: &str = "cluster.local";
/// Default kubeconfig location when not running in-cluster
pub const DEFAULT_KUBECONFIG: &str = "/app/config/kubeconfig";
/// Namespaces skipped unless the operator overrides the blacklist
pub const DEFAULT_NAMESPACE_BLACKLIST: &str = "kube-system,kube-public,kube-node-lease";

/// Annotation keys that may carry an operator-supplied health path.
///
/// Tried in order; the first non-empty value wins.
pub const HEALTH_PATH_ANNOTATIONS: &[&str] = &[
    "health.check.path",
    "healthcheck.path",
    "prometheus.io/path",
];

// Service port heuristics
/// Port numbers assumed to serve HTTP(S)
pub const HTTP_LIKE_PORTS: &[i32] = &[80, 443, 8080, 8443];
/// Port number that always implies HTTPS
pub const HTTPS_PORT: i32 = 443;
/// Port-name fragments (lowercase) that mark a port as HTTP-like
pub const HTTP_LIKE_NAME_HINTS: &[&str] = &["http", "web", "api"];
/// Port-name fragments (lowercase) that imply TLS
pub const TLS_NAME_HINTS: &[&str] = &["https", "ssl", "tls"];

// Report files
/// Default path of the text report
pub const DEFAULT_OUTPUT_FILE: &str = "/app/output/health-check-urls";
/// Title line written at the top of the text report
pub const REPORT_TITLE: &str = "K8s Health Check URLs";
/// Suffix appended to the report path for the results file
pub const RESULTS_SUFFIX: &str = ".verification";
/// Prefix of the comment line that opens a namespace group
pub const NAMESPACE_HEADER_PREFIX: &str = "# Namespace: ";
/// Prefix of the comment line carrying the generation timestamp
pub const GENERATED_AT_PREFIX: &str = "# Generated at: ";

/// Detail recorded for addresses whose scheme no verifier handles
pub const UNSUPPORTED_PROTOCOL_DETAIL: &str = "Unsupported protocol";
/// Payload sent by the UDP verifier after opening its socket
pub const UDP_PROBE_PAYLOAD: &[u8] = b"ping";
/// Longest wait for a reply to the UDP probe; the reply is only logged
pub const UDP_REPLY_WAIT: Duration = Duration::from_millis(500);
