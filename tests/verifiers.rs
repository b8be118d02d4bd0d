//! Integration tests for the protocol verifiers against real local
//! servers: wiremock for HTTP, loopback sockets for TCP and UDP.

use std::sync::Arc;
use std::time::{Duration, Instant};

use k8s_health_check::error_handling::FailureKind;
use k8s_health_check::initialization::init_crypto_provider;
use k8s_health_check::scheduler::verify_endpoints;
use k8s_health_check::verify::{HttpVerifier, ProtocolDispatcher, Verifier};
use k8s_health_check::{Endpoint, VerifyPolicy};
use tokio::net::{TcpListener, UdpSocket};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn dispatcher() -> ProtocolDispatcher {
    init_crypto_provider();
    ProtocolDispatcher::new(HttpVerifier::new().expect("Failed to build HTTP verifier"))
}

fn policy(timeout_secs: u64) -> VerifyPolicy {
    VerifyPolicy {
        timeout: Duration::from_secs(timeout_secs),
        insecure_tls: false,
    }
}

async fn closed_tcp_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap().port()
}

#[tokio::test]
async fn test_http_200_is_reachable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/healthz"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let endpoint = Endpoint::from_address("ns", format!("{}/healthz", server.uri()));
    let result = dispatcher().verify(&endpoint, &policy(2)).await;

    assert!(result.reachable);
    assert_eq!(result.status_code, 200);
    assert!(result.error_detail.is_empty());
}

#[tokio::test]
async fn test_http_404_is_unreachable_with_status_detail() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let endpoint = Endpoint::from_address("ns", format!("{}/missing", server.uri()));
    let result = dispatcher().verify(&endpoint, &policy(2)).await;

    assert!(!result.reachable);
    assert_eq!(result.status_code, 404);
    assert_eq!(result.error_detail, "HTTP 404 Not Found");
    assert_eq!(result.failure, Some(FailureKind::HttpStatus));
}

#[tokio::test]
async fn test_http_3xx_below_400_is_reachable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(304))
        .mount(&server)
        .await;

    let endpoint = Endpoint::from_address("ns", server.uri());
    let result = dispatcher().verify(&endpoint, &policy(2)).await;
    assert!(result.reachable);
    assert_eq!(result.status_code, 304);
}

#[tokio::test]
async fn test_http_503_is_unreachable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let endpoint = Endpoint::from_address("ns", server.uri());
    let result = dispatcher().verify(&endpoint, &policy(2)).await;
    assert!(!result.reachable);
    assert_eq!(result.error_detail, "HTTP 503 Service Unavailable");
}

#[tokio::test]
async fn test_http_slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let endpoint = Endpoint::from_address("ns", server.uri());
    let started = Instant::now();
    let result = dispatcher().verify(&endpoint, &policy(1)).await;

    assert!(started.elapsed() < Duration::from_secs(4));
    assert!(!result.reachable);
    assert_eq!(result.status_code, 0);
    assert_eq!(result.failure, Some(FailureKind::Timeout));
    assert!(!result.error_detail.is_empty());
}

#[tokio::test]
async fn test_http_connection_refused() {
    let port = closed_tcp_port().await;
    let endpoint = Endpoint::from_address("ns", format!("http://127.0.0.1:{port}/"));
    let result = dispatcher().verify(&endpoint, &policy(2)).await;

    assert!(!result.reachable);
    assert_eq!(result.status_code, 0);
    assert_eq!(result.failure, Some(FailureKind::Connect));
}

#[tokio::test]
async fn test_tcp_open_and_closed_ports() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let open = listener.local_addr().unwrap().port();
    let closed = closed_tcp_port().await;
    let verifier = dispatcher();

    let ok = verifier
        .verify(&Endpoint::from_address("ns", format!("tcp://127.0.0.1:{open}")), &policy(2))
        .await;
    assert!(ok.reachable);
    assert_eq!(ok.status_code, 0);

    let refused = verifier
        .verify(&Endpoint::from_address("ns", format!("tcp://127.0.0.1:{closed}")), &policy(2))
        .await;
    assert!(!refused.reachable);
    assert!(!refused.error_detail.is_empty());
}

#[tokio::test]
async fn test_malformed_socket_addresses() {
    let verifier = dispatcher();
    let tcp = verifier
        .verify(&Endpoint::from_address("ns", "tcp://a:1:2"), &policy(1))
        .await;
    assert_eq!(tcp.error_detail, "Invalid TCP URL format");

    let udp = verifier
        .verify(&Endpoint::from_address("ns", "udp://nohost"), &policy(1))
        .await;
    assert_eq!(udp.error_detail, "Invalid UDP URL format");
}

#[tokio::test]
async fn test_udp_silent_listener_is_reachable() {
    let listener = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let result = dispatcher()
        .verify(&Endpoint::from_address("ns", format!("udp://127.0.0.1:{port}")), &policy(1))
        .await;
    assert!(result.reachable);
    assert_eq!(result.status_code, 0);
}

#[tokio::test]
async fn test_unsupported_scheme() {
    let result = dispatcher()
        .verify(&Endpoint::from_address("ns", "sctp://svc.ns.svc.cluster.local:3868"), &policy(1))
        .await;
    assert!(!result.reachable);
    assert_eq!(result.status_code, 0);
    assert_eq!(result.error_detail, "Unsupported protocol");
}

/// Mixed endpoints through the scheduler keep their input order.
#[tokio::test]
async fn test_scheduler_with_real_verifiers_keeps_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ok"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(200)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/bad"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let tcp_port = listener.local_addr().unwrap().port();

    let endpoints = vec![
        Endpoint::from_address("a", format!("{}/ok", server.uri())),
        Endpoint::from_address("a", format!("{}/bad", server.uri())),
        Endpoint::from_address("b", format!("tcp://127.0.0.1:{tcp_port}")),
        Endpoint::from_address("b", "ftp://files:21"),
        Endpoint::from_address("b", format!("{}/ok", server.uri())),
    ];

    let outcomes = verify_endpoints(
        &endpoints,
        3,
        Arc::new(dispatcher()),
        policy(2),
        None,
    )
    .await;

    let summary: Vec<(bool, u16)> = outcomes.iter().map(|o| (o.reachable, o.status_code)).collect();
    assert_eq!(
        summary,
        vec![(true, 200), (false, 500), (true, 0), (false, 0), (true, 200)]
    );
    for (outcome, endpoint) in outcomes.iter().zip(&endpoints) {
        assert_eq!(&outcome.endpoint, endpoint);
    }
}
