//! Service port classification.
//!
//! Pure functions over (port number, port name, transport, health path)
//! deciding what kind of endpoint a service port becomes.

use crate::config::{HTTPS_PORT, HTTP_LIKE_NAME_HINTS, HTTP_LIKE_PORTS, TLS_NAME_HINTS};
use crate::model::ProtocolType;

/// How a service port is checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortClass {
    /// HTTP-like TCP port checked with a GET over this scheme
    Http(ProtocolType),
    /// Opaque TCP port checked with a connect
    Tcp,
    /// UDP port
    Udp,
    /// Any other transport (e.g. SCTP), lowercase; no verifier handles it
    Other(String),
}

/// Classifies one service port.
///
/// The transport defaults to TCP. UDP ports bypass every heuristic. TCP
/// ports become HTTP endpoints when [`is_http_like`] holds.
pub fn classify_service_port(
    port: i32,
    name: &str,
    transport: Option<&str>,
    health_path: &str,
) -> PortClass {
    let transport = transport
        .map(|t| t.trim().to_ascii_lowercase())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| "tcp".to_string());

    match transport.as_str() {
        "udp" => PortClass::Udp,
        "tcp" if is_http_like(port, name, health_path) => PortClass::Http(infer_scheme(port, name)),
        "tcp" => PortClass::Tcp,
        _ => PortClass::Other(transport),
    }
}

/// HTTPS for port 443 or a name mentioning https/ssl/tls, HTTP otherwise.
pub fn infer_scheme(port: i32, name: &str) -> ProtocolType {
    let name = name.to_ascii_lowercase();
    if port == HTTPS_PORT || TLS_NAME_HINTS.iter().any(|hint| name.contains(hint)) {
        ProtocolType::Https
    } else {
        ProtocolType::Http
    }
}

/// Whether a TCP port probably speaks HTTP(S).
///
/// True for the well-known web ports, for names mentioning http/web/api,
/// and whenever an explicit health path was configured.
pub fn is_http_like(port: i32, name: &str, health_path: &str) -> bool {
    let name = name.to_ascii_lowercase();
    HTTP_LIKE_PORTS.contains(&port)
        || HTTP_LIKE_NAME_HINTS.iter().any(|hint| name.contains(hint))
        || !health_path.is_empty()
}
