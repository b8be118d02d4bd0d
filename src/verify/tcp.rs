//! TCP connect check.

use async_trait::async_trait;
use log::debug;
use tokio::net::TcpStream;

use super::address::{join_host_port, split_host_port};
use super::Verifier;
use crate::config::VerifyPolicy;
use crate::error_handling::{categorize_io_error, FailureKind};
use crate::model::{CheckResult, Endpoint, ProtocolType};

/// Reachable when a TCP connection can be established within the timeout.
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpVerifier;

#[async_trait]
impl Verifier for TcpVerifier {
    async fn verify(&self, endpoint: &Endpoint, policy: &VerifyPolicy) -> CheckResult {
        check_tcp(&endpoint.address, policy).await
    }
}

/// Connects to `tcp://host:port` and closes the connection immediately.
pub async fn check_tcp(address: &str, policy: &VerifyPolicy) -> CheckResult {
    let authority = address
        .strip_prefix(ProtocolType::Tcp.prefix())
        .unwrap_or(address);
    let Some((host, port)) = split_host_port(authority) else {
        return CheckResult::failed(0, FailureKind::InvalidAddress, "Invalid TCP URL format");
    };
    let target = join_host_port(host, port);

    match tokio::time::timeout(policy.timeout, TcpStream::connect(&target)).await {
        Ok(Ok(_stream)) => {
            debug!("TCP connect to {target} succeeded");
            CheckResult::reachable(0)
        }
        Ok(Err(e)) => CheckResult::failed(0, categorize_io_error(&e), format!("dial tcp {target}: {e}")),
        Err(_) => CheckResult::failed(
            0,
            FailureKind::Timeout,
            format!(
                "dial tcp {target}: i/o timeout after {}s",
                policy.timeout.as_secs()
            ),
        ),
    }
}
