//! Descriptor source backed by the Kubernetes API.

use std::fmt::Debug;

use async_trait::async_trait;
use k8s_openapi::api::core::v1::{Namespace, Pod, Service};
use kube::api::{Api, ListParams, ObjectList};
use kube::Client;
use log::debug;
use serde::de::DeserializeOwned;

use super::DescriptorSource;
use crate::config::KUBE_LIST_TIMEOUT;
use crate::descriptor::{PodDescriptor, ServiceDescriptor};
use crate::error_handling::DiscoveryError;

/// Lists namespaces, pods and services through a kube client. Every list
/// call is bounded by [`KUBE_LIST_TIMEOUT`].
#[derive(Clone)]
pub struct KubeSource {
    client: Client,
}

impl KubeSource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DescriptorSource for KubeSource {
    async fn list_namespaces(&self) -> Result<Vec<String>, DiscoveryError> {
        let api: Api<Namespace> = Api::all(self.client.clone());
        let list = list_with_timeout(&api, "namespaces", "cluster").await?;
        Ok(list
            .items
            .into_iter()
            .filter_map(|ns| ns.metadata.name)
            .collect())
    }

    async fn list_pods(&self, namespace: &str) -> Result<Vec<PodDescriptor>, DiscoveryError> {
        let api: Api<Pod> = Api::namespaced(self.client.clone(), namespace);
        let list = list_with_timeout(&api, "pods", namespace).await?;
        Ok(list.items.iter().map(PodDescriptor::from).collect())
    }

    async fn list_services(
        &self,
        namespace: &str,
    ) -> Result<Vec<ServiceDescriptor>, DiscoveryError> {
        let api: Api<Service> = Api::namespaced(self.client.clone(), namespace);
        let list = list_with_timeout(&api, "services", namespace).await?;
        Ok(list.items.iter().map(ServiceDescriptor::from).collect())
    }
}

async fn list_with_timeout<K>(
    api: &Api<K>,
    kind: &'static str,
    scope: &str,
) -> Result<ObjectList<K>, DiscoveryError>
where
    K: Clone + DeserializeOwned + Debug,
{
    debug!("Listing {kind} in {scope}");
    match tokio::time::timeout(KUBE_LIST_TIMEOUT, api.list(&ListParams::default())).await {
        Ok(Ok(list)) => Ok(list),
        Ok(Err(source)) => Err(DiscoveryError::ListFailed {
            kind,
            scope: scope.to_string(),
            source,
        }),
        Err(_) => Err(DiscoveryError::ListTimeout {
            kind,
            scope: scope.to_string(),
            seconds: KUBE_LIST_TIMEOUT.as_secs(),
        }),
    }
}
