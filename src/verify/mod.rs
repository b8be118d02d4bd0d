//! Protocol verifiers.
//!
//! A [`Verifier`] checks one endpoint and reports a [`CheckResult`]. It
//! never fails: every problem, including a malformed address, becomes an
//! unreachable result with a detail message. [`ProtocolDispatcher`] routes
//! each endpoint to the verifier for its protocol.

mod address;
mod http;
mod tcp;
mod udp;

use async_trait::async_trait;

use crate::config::{VerifyPolicy, UNSUPPORTED_PROTOCOL_DETAIL};
use crate::error_handling::FailureKind;
use crate::model::{CheckResult, Endpoint, ProtocolType};

// Re-export public API
pub use address::{join_host_port, split_host_port};
pub use http::HttpVerifier;
pub use tcp::{check_tcp, TcpVerifier};
pub use udp::{check_udp, UdpVerifier};

/// Checks whether an endpoint answers.
///
/// Implementations must honor `policy.timeout` on their own; the scheduler
/// only adds a short grace period on top.
#[async_trait]
pub trait Verifier: Send + Sync {
    async fn verify(&self, endpoint: &Endpoint, policy: &VerifyPolicy) -> CheckResult;
}

/// Routes endpoints to the HTTP, TCP or UDP verifier.
#[derive(Debug, Clone)]
pub struct ProtocolDispatcher {
    http: HttpVerifier,
    tcp: TcpVerifier,
    udp: UdpVerifier,
}

impl ProtocolDispatcher {
    pub fn new(http: HttpVerifier) -> Self {
        Self {
            http,
            tcp: TcpVerifier,
            udp: UdpVerifier,
        }
    }
}

#[async_trait]
impl Verifier for ProtocolDispatcher {
    async fn verify(&self, endpoint: &Endpoint, policy: &VerifyPolicy) -> CheckResult {
        match endpoint.protocol {
            Some(ProtocolType::Http | ProtocolType::Https) => {
                self.http.verify(endpoint, policy).await
            }
            Some(ProtocolType::Tcp) => self.tcp.verify(endpoint, policy).await,
            Some(ProtocolType::Udp) => self.udp.verify(endpoint, policy).await,
            None => CheckResult::failed(0, FailureKind::Unsupported, UNSUPPORTED_PROTOCOL_DETAIL),
        }
    }
}
