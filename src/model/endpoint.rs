//! The endpoint record: one verifiable network target.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Protocol of an endpoint; selects the verifier that checks it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProtocolType {
    Http,
    Https,
    Tcp,
    Udp,
}

impl ProtocolType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProtocolType::Http => "http",
            ProtocolType::Https => "https",
            ProtocolType::Tcp => "tcp",
            ProtocolType::Udp => "udp",
        }
    }

    /// Scheme prefix including the `://` separator.
    pub fn prefix(&self) -> &'static str {
        match self {
            ProtocolType::Http => "http://",
            ProtocolType::Https => "https://",
            ProtocolType::Tcp => "tcp://",
            ProtocolType::Udp => "udp://",
        }
    }

    /// Reads the protocol off an address's scheme prefix.
    ///
    /// Matching is exact and case-sensitive, as addresses are always
    /// written with lowercase schemes.
    pub fn from_address(address: &str) -> Option<Self> {
        [
            ProtocolType::Https,
            ProtocolType::Http,
            ProtocolType::Tcp,
            ProtocolType::Udp,
        ]
        .into_iter()
        .find(|p| address.starts_with(p.prefix()))
    }

    /// Maps a probe scheme (`HTTP`, `https`, ...) onto an HTTP protocol.
    pub fn from_http_scheme(scheme: &str) -> Option<Self> {
        match scheme.to_ascii_lowercase().as_str() {
            "http" => Some(ProtocolType::Http),
            "https" => Some(ProtocolType::Https),
            _ => None,
        }
    }

    pub fn is_http(&self) -> bool {
        matches!(self, ProtocolType::Http | ProtocolType::Https)
    }
}

impl fmt::Display for ProtocolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The workload an endpoint was derived from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "lowercase")]
pub enum Owner {
    Pod(String),
    Service(String),
}

/// A normalized, verifiable network target.
///
/// `address` is self-sufficient for verification; `protocol`, `path`,
/// `port_name` and `port_number` repeat parts of it for report columns.
/// Endpoints are never deduplicated: two descriptors yielding the same
/// address produce two endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    /// Grouping key (namespace)
    pub scope: String,
    /// Owning pod or service, when known
    pub owner: Option<Owner>,
    /// `scheme://host:port[path]`
    pub address: String,
    /// Protocol read from the address scheme, `None` if unrecognised
    pub protocol: Option<ProtocolType>,
    /// Health path component (HTTP endpoints only, may be empty)
    pub path: String,
    /// Declared port as written by the workload (name or number)
    pub port_name: String,
    /// Numeric service port; informational only
    pub port_number: Option<i32>,
}

impl Endpoint {
    /// Builds an endpoint known only by its address, as recovered from a
    /// text report.
    pub fn from_address(scope: impl Into<String>, address: impl Into<String>) -> Self {
        let address = address.into();
        Endpoint {
            scope: scope.into(),
            owner: None,
            protocol: ProtocolType::from_address(&address),
            address,
            path: String::new(),
            port_name: String::new(),
            port_number: None,
        }
    }

    /// Owning service name, or `""`.
    pub fn service_name(&self) -> &str {
        match &self.owner {
            Some(Owner::Service(name)) => name,
            _ => "",
        }
    }

    /// Owning pod name, or `""`.
    pub fn pod_name(&self) -> &str {
        match &self.owner {
            Some(Owner::Pod(name)) => name,
            _ => "",
        }
    }

    /// Protocol label for report columns, `""` when unrecognised.
    pub fn protocol_label(&self) -> &'static str {
        self.protocol.map(|p| p.as_str()).unwrap_or("")
    }
}
