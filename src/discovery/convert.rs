//! Conversions from Kubernetes API objects into descriptors.

use k8s_openapi::api::core::v1::{Container, Pod, Probe, Service, ServicePort};
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;

use crate::descriptor::{
    ContainerDescriptor, PodDescriptor, ProbeDescriptor, ServiceDescriptor, ServicePortDescriptor,
};

const POD_PHASE_RUNNING: &str = "Running";

impl From<&Pod> for PodDescriptor {
    fn from(pod: &Pod) -> Self {
        let status = pod.status.as_ref();
        PodDescriptor {
            namespace: pod.metadata.namespace.clone().unwrap_or_default(),
            name: pod.metadata.name.clone().unwrap_or_default(),
            running: status.and_then(|s| s.phase.as_deref()) == Some(POD_PHASE_RUNNING),
            pod_ip: status
                .and_then(|s| s.pod_ip.clone())
                .filter(|ip| !ip.is_empty()),
            annotations: pod.metadata.annotations.clone().unwrap_or_default(),
            containers: pod
                .spec
                .as_ref()
                .map(|spec| spec.containers.iter().map(ContainerDescriptor::from).collect())
                .unwrap_or_default(),
        }
    }
}

impl From<&Container> for ContainerDescriptor {
    fn from(container: &Container) -> Self {
        ContainerDescriptor {
            name: container.name.clone(),
            readiness_probe: container.readiness_probe.as_ref().map(ProbeDescriptor::from),
            liveness_probe: container.liveness_probe.as_ref().map(ProbeDescriptor::from),
        }
    }
}

impl From<&Probe> for ProbeDescriptor {
    fn from(probe: &Probe) -> Self {
        if let Some(http) = &probe.http_get {
            ProbeDescriptor::Http {
                scheme: http.scheme.clone(),
                path: http.path.clone(),
                port: port_string(&http.port),
            }
        } else if let Some(tcp) = &probe.tcp_socket {
            ProbeDescriptor::TcpSocket {
                port: port_string(&tcp.port),
            }
        } else {
            ProbeDescriptor::Other
        }
    }
}

impl From<&Service> for ServiceDescriptor {
    fn from(service: &Service) -> Self {
        ServiceDescriptor {
            namespace: service.metadata.namespace.clone().unwrap_or_default(),
            name: service.metadata.name.clone().unwrap_or_default(),
            annotations: service.metadata.annotations.clone().unwrap_or_default(),
            ports: service
                .spec
                .as_ref()
                .and_then(|spec| spec.ports.as_ref())
                .map(|ports| ports.iter().map(ServicePortDescriptor::from).collect())
                .unwrap_or_default(),
        }
    }
}

impl From<&ServicePort> for ServicePortDescriptor {
    fn from(port: &ServicePort) -> Self {
        ServicePortDescriptor {
            name: port.name.clone().unwrap_or_default(),
            port: port.port,
            protocol: port.protocol.clone(),
        }
    }
}

/// Probe ports are either numbers or container port names.
fn port_string(port: &IntOrString) -> String {
    match port {
        IntOrString::Int(n) => n.to_string(),
        IntOrString::String(name) => name.clone(),
    }
}
