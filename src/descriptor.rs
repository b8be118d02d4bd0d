//! Workload descriptors.
//!
//! Snapshots of pods and services as supplied by a descriptor source.
//! They carry only the fields endpoint extraction reads.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A pod snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PodDescriptor {
    pub namespace: String,
    pub name: String,
    /// Whether the pod phase is `Running`
    pub running: bool,
    /// Assigned pod IP, absent until the pod is scheduled
    pub pod_ip: Option<String>,
    #[serde(default)]
    pub annotations: BTreeMap<String, String>,
    #[serde(default)]
    pub containers: Vec<ContainerDescriptor>,
}

/// One container of a pod and its health probes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerDescriptor {
    pub name: String,
    pub readiness_probe: Option<ProbeDescriptor>,
    pub liveness_probe: Option<ProbeDescriptor>,
}

impl ContainerDescriptor {
    /// Declared probes, readiness first.
    pub fn probes(&self) -> impl Iterator<Item = &ProbeDescriptor> {
        self.readiness_probe.iter().chain(self.liveness_probe.iter())
    }
}

/// A readiness or liveness probe.
///
/// Ports are kept as declared: either a number or a named container port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProbeDescriptor {
    Http {
        scheme: Option<String>,
        path: Option<String>,
        port: String,
    },
    TcpSocket {
        port: String,
    },
    /// Exec, gRPC or any other handler; yields no endpoint
    Other,
}

/// A service snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDescriptor {
    pub namespace: String,
    pub name: String,
    #[serde(default)]
    pub annotations: BTreeMap<String, String>,
    #[serde(default)]
    pub ports: Vec<ServicePortDescriptor>,
}

/// One declared service port.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServicePortDescriptor {
    #[serde(default)]
    pub name: String,
    pub port: i32,
    /// Transport protocol (`TCP`, `UDP`, `SCTP`); absent means TCP
    pub protocol: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_probes_order() {
        let container = ContainerDescriptor {
            name: "app".into(),
            readiness_probe: Some(ProbeDescriptor::TcpSocket { port: "1".into() }),
            liveness_probe: Some(ProbeDescriptor::TcpSocket { port: "2".into() }),
        };
        let ports: Vec<_> = container
            .probes()
            .map(|p| match p {
                ProbeDescriptor::TcpSocket { port } => port.as_str(),
                _ => "",
            })
            .collect();
        assert_eq!(ports, vec!["1", "2"]);
    }

    #[test]
    fn test_descriptor_deserializes_with_defaults() {
        let json = r#"{"namespace":"apps","name":"web","ports":[{"port":80,"protocol":null}]}"#;
        let svc: ServiceDescriptor = serde_json::from_str(json).unwrap();
        assert!(svc.annotations.is_empty());
        assert_eq!(svc.ports[0].name, "");
        assert_eq!(svc.ports[0].port, 80);
    }

    #[test]
    fn test_probe_deserializes_tagged() {
        let json = r#"{"type":"http","scheme":null,"path":"/ready","port":"8080"}"#;
        let probe: ProbeDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(
            probe,
            ProbeDescriptor::Http {
                scheme: None,
                path: Some("/ready".into()),
                port: "8080".into()
            }
        );
    }
}
