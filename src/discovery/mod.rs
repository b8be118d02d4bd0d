//! Descriptor discovery.
//!
//! A [`DescriptorSource`] lists namespaces and the pods and services in
//! each. [`collect_endpoints`] walks the selected namespaces and runs the
//! extractor over every snapshot. A namespace whose pods or services
//! cannot be listed is logged and skipped; only failing to list the
//! namespaces themselves aborts discovery.

mod convert;
mod kube_source;

use async_trait::async_trait;
use log::{info, warn};

use crate::catalog::Catalog;
use crate::descriptor::{PodDescriptor, ServiceDescriptor};
use crate::error_handling::DiscoveryError;
use crate::extract::extract_endpoints;

// Re-export public API
pub use kube_source::KubeSource;

/// Read-only access to workload descriptors.
#[async_trait]
pub trait DescriptorSource: Send + Sync {
    /// Names of all namespaces visible to the source.
    async fn list_namespaces(&self) -> Result<Vec<String>, DiscoveryError>;

    /// Pods in one namespace.
    async fn list_pods(&self, namespace: &str) -> Result<Vec<PodDescriptor>, DiscoveryError>;

    /// Services in one namespace.
    async fn list_services(&self, namespace: &str)
        -> Result<Vec<ServiceDescriptor>, DiscoveryError>;
}

/// Applies the whitelist, then the blacklist.
///
/// An empty whitelist admits every namespace. The blacklist wins over the
/// whitelist. Input order is kept.
pub fn filter_namespaces(
    namespaces: Vec<String>,
    whitelist: &[String],
    blacklist: &[String],
) -> Vec<String> {
    namespaces
        .into_iter()
        .filter(|ns| whitelist.is_empty() || whitelist.contains(ns))
        .filter(|ns| !blacklist.contains(ns))
        .collect()
}

/// Builds the endpoint catalog for every selected namespace.
///
/// Per namespace, pod endpoints come before service endpoints; namespaces
/// are visited in the order the source lists them.
///
/// # Errors
///
/// Returns a `DiscoveryError` only if the namespace list itself fails.
pub async fn collect_endpoints(
    source: &dyn DescriptorSource,
    whitelist: &[String],
    blacklist: &[String],
    cluster_domain: &str,
) -> Result<Catalog, DiscoveryError> {
    let namespaces = filter_namespaces(source.list_namespaces().await?, whitelist, blacklist);
    info!("Scanning {} namespaces...", namespaces.len());

    let mut catalog = Catalog::default();
    for namespace in &namespaces {
        info!("Processing namespace: {namespace}");

        let pods = match source.list_pods(namespace).await {
            Ok(pods) => pods,
            Err(e) => {
                warn!("Failed to collect endpoints from namespace {namespace}: {e}");
                continue;
            }
        };
        let services = match source.list_services(namespace).await {
            Ok(services) => services,
            Err(e) => {
                warn!("Failed to collect endpoints from namespace {namespace}: {e}");
                continue;
            }
        };

        let endpoints = extract_endpoints(&pods, &services, cluster_domain);
        log::debug!(
            "Namespace {namespace}: {} pods, {} services, {} endpoints",
            pods.len(),
            services.len(),
            endpoints.len()
        );
        catalog.extend(endpoints);
    }

    info!("Found {} health check endpoints", catalog.len());
    Ok(catalog)
}
