//! UDP datagram check.
//!
//! UDP has no handshake, so a silent service and a missing one look the
//! same. The check resolves the target, sends one probe datagram and waits
//! briefly for a reply, but reports the endpoint reachable as soon as a
//! socket could be connected. Only address and resolution problems make a
//! UDP endpoint unreachable.

use async_trait::async_trait;
use log::debug;
use tokio::net::{lookup_host, UdpSocket};
use tokio::time::{timeout_at, Instant};

use super::address::{join_host_port, split_host_port};
use super::Verifier;
use crate::config::{VerifyPolicy, UDP_PROBE_PAYLOAD, UDP_REPLY_WAIT};
use crate::error_handling::{categorize_io_error, FailureKind};
use crate::model::{CheckResult, Endpoint, ProtocolType};

#[derive(Debug, Clone, Copy, Default)]
pub struct UdpVerifier;

#[async_trait]
impl Verifier for UdpVerifier {
    async fn verify(&self, endpoint: &Endpoint, policy: &VerifyPolicy) -> CheckResult {
        check_udp(&endpoint.address, policy).await
    }
}

/// Probes `udp://host:port`. The whole check finishes within the timeout.
pub async fn check_udp(address: &str, policy: &VerifyPolicy) -> CheckResult {
    let authority = address
        .strip_prefix(ProtocolType::Udp.prefix())
        .unwrap_or(address);
    let Some((host, port)) = split_host_port(authority) else {
        return CheckResult::failed(0, FailureKind::InvalidAddress, "Invalid UDP URL format");
    };
    let target = join_host_port(host, port);
    let deadline = Instant::now() + policy.timeout;

    let resolved = match timeout_at(deadline, lookup_host(target.as_str())).await {
        Ok(Ok(mut addrs)) => addrs.next(),
        Ok(Err(e)) => {
            let kind = match categorize_io_error(&e) {
                FailureKind::InvalidAddress => FailureKind::InvalidAddress,
                _ => FailureKind::Dns,
            };
            return CheckResult::failed(0, kind, format!("dial udp {target}: {e}"));
        }
        Err(_) => {
            return CheckResult::failed(
                0,
                FailureKind::Timeout,
                format!("dial udp {target}: lookup timed out"),
            )
        }
    };
    let Some(remote) = resolved else {
        return CheckResult::failed(
            0,
            FailureKind::Dns,
            format!("dial udp {target}: no addresses found"),
        );
    };

    let local = if remote.is_ipv4() { "0.0.0.0:0" } else { "[::]:0" };
    let socket = match UdpSocket::bind(local).await {
        Ok(socket) => socket,
        Err(e) => return CheckResult::failed(0, FailureKind::Connect, format!("dial udp {target}: {e}")),
    };
    if let Err(e) = socket.connect(remote).await {
        return CheckResult::failed(0, categorize_io_error(&e), format!("dial udp {target}: {e}"));
    }

    // Send and receive failures are expected for UDP and do not change
    // the verdict.
    if let Err(e) = socket.send(UDP_PROBE_PAYLOAD).await {
        debug!("UDP probe send to {target} failed: {e}");
        return CheckResult::reachable(0);
    }
    // The reply never changes the verdict.
    let reply_deadline = deadline.min(Instant::now() + UDP_REPLY_WAIT);
    let mut buf = [0u8; 1024];
    match timeout_at(reply_deadline, socket.recv(&mut buf)).await {
        Ok(Ok(n)) => debug!("UDP probe to {target} answered with {n} bytes"),
        Ok(Err(e)) => debug!("UDP probe to {target} read failed: {e}"),
        Err(_) => debug!("UDP probe to {target} got no reply"),
    }
    CheckResult::reachable(0)
}
