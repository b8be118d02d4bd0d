//! Endpoint extraction.
//!
//! Turns pod and service descriptors into endpoints. Everything here is
//! pure: no I/O, no errors. A descriptor without usable data simply
//! yields nothing.
//!
//! Pods contribute one endpoint per HTTP or TCP-socket probe (readiness
//! before liveness, container by container) addressed at the pod IP.
//! Services contribute exactly one endpoint per declared port, addressed
//! at the cluster-internal DNS name `name.namespace.svc.<domain>` so the
//! address survives cluster IP changes.

mod classify;

pub use classify::{classify_service_port, infer_scheme, is_http_like, PortClass};

use std::collections::BTreeMap;

use crate::config::HEALTH_PATH_ANNOTATIONS;
use crate::descriptor::{PodDescriptor, ProbeDescriptor, ServiceDescriptor};
use crate::model::{Endpoint, Owner, ProtocolType};

/// Operator-supplied health path from annotations.
///
/// Keys are tried in [`HEALTH_PATH_ANNOTATIONS`] order; empty values are
/// skipped. Returns `""` when none is set.
pub fn health_path_from_annotations(annotations: &BTreeMap<String, String>) -> &str {
    HEALTH_PATH_ANNOTATIONS
        .iter()
        .filter_map(|key| annotations.get(*key))
        .find(|path| !path.is_empty())
        .map(String::as_str)
        .unwrap_or("")
}

/// Endpoints derived from a pod's probes.
///
/// Only running pods with an assigned IP yield endpoints.
pub fn extract_pod_endpoints(pod: &PodDescriptor) -> Vec<Endpoint> {
    if !pod.running {
        return Vec::new();
    }
    let Some(ip) = pod.pod_ip.as_deref().filter(|ip| !ip.is_empty()) else {
        return Vec::new();
    };
    let host = format_host(ip);
    let default_path = health_path_from_annotations(&pod.annotations);

    pod.containers
        .iter()
        .flat_map(|container| container.probes())
        .filter_map(|probe| probe_endpoint(pod, &host, probe, default_path))
        .collect()
}

fn probe_endpoint(
    pod: &PodDescriptor,
    host: &str,
    probe: &ProbeDescriptor,
    default_path: &str,
) -> Option<Endpoint> {
    match probe {
        ProbeDescriptor::Http { scheme, path, port } => {
            let scheme = scheme
                .as_deref()
                .map(str::to_ascii_lowercase)
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "http".to_string());
            let path = match path.as_deref() {
                Some(p) if !p.is_empty() => p,
                _ if !default_path.is_empty() => default_path,
                _ => "/",
            };
            Some(Endpoint {
                scope: pod.namespace.clone(),
                owner: Some(Owner::Pod(pod.name.clone())),
                address: format!("{scheme}://{host}:{port}{path}"),
                protocol: ProtocolType::from_http_scheme(&scheme),
                path: path.to_string(),
                port_name: port.clone(),
                port_number: None,
            })
        }
        ProbeDescriptor::TcpSocket { port } => Some(Endpoint {
            scope: pod.namespace.clone(),
            owner: Some(Owner::Pod(pod.name.clone())),
            address: format!("tcp://{host}:{port}"),
            protocol: Some(ProtocolType::Tcp),
            path: String::new(),
            port_name: port.clone(),
            port_number: None,
        }),
        ProbeDescriptor::Other => None,
    }
}

/// Endpoints derived from a service's ports, one per port.
pub fn extract_service_endpoints(service: &ServiceDescriptor, cluster_domain: &str) -> Vec<Endpoint> {
    let host = service_host(&service.name, &service.namespace, cluster_domain);
    let health_path = health_path_from_annotations(&service.annotations);

    service
        .ports
        .iter()
        .map(|port| {
            let class =
                classify_service_port(port.port, &port.name, port.protocol.as_deref(), health_path);
            let (address, protocol, path) = match class {
                PortClass::Http(scheme) => (
                    format!("{}{}:{}{}", scheme.prefix(), host, port.port, health_path),
                    Some(scheme),
                    health_path.to_string(),
                ),
                PortClass::Tcp => (
                    format!("tcp://{}:{}", host, port.port),
                    Some(ProtocolType::Tcp),
                    String::new(),
                ),
                PortClass::Udp => (
                    format!("udp://{}:{}", host, port.port),
                    Some(ProtocolType::Udp),
                    String::new(),
                ),
                PortClass::Other(transport) => (
                    format!("{}://{}:{}", transport, host, port.port),
                    None,
                    String::new(),
                ),
            };
            Endpoint {
                scope: service.namespace.clone(),
                owner: Some(Owner::Service(service.name.clone())),
                address,
                protocol,
                path,
                port_name: port.name.clone(),
                port_number: Some(port.port),
            }
        })
        .collect()
}

/// All endpoints of one namespace snapshot: pods first, then services,
/// each in input order.
pub fn extract_endpoints(
    pods: &[PodDescriptor],
    services: &[ServiceDescriptor],
    cluster_domain: &str,
) -> Vec<Endpoint> {
    pods.iter()
        .flat_map(extract_pod_endpoints)
        .chain(
            services
                .iter()
                .flat_map(|svc| extract_service_endpoints(svc, cluster_domain)),
        )
        .collect()
}

/// `name.namespace.svc.<domain>`
pub fn service_host(name: &str, namespace: &str, cluster_domain: &str) -> String {
    format!("{name}.{namespace}.svc.{cluster_domain}")
}

/// Brackets IPv6 literals so `host:port` stays unambiguous.
fn format_host(ip: &str) -> String {
    if ip.contains(':') && !ip.starts_with('[') {
        format!("[{ip}]")
    } else {
        ip.to_string()
    }
}
