//! HTTP client initialization.
//!
//! Clients are built once per run and shared by every HTTP check.

use reqwest::ClientBuilder;

/// Initializes an HTTP client for health checks.
///
/// Redirects are followed (reqwest's default of up to 10 hops) and the
/// rustls backend is used. Timeouts are set per request from the
/// verification policy rather than here.
///
/// # Arguments
///
/// * `insecure_tls` - Accept invalid and self-signed certificates
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_http_client(insecure_tls: bool) -> Result<reqwest::Client, reqwest::Error> {
    ClientBuilder::new()
        .user_agent(concat!("k8s_health_check/", env!("CARGO_PKG_VERSION")))
        .danger_accept_invalid_certs(insecure_tls)
        .build()
}
