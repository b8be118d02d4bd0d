//! Kubernetes client initialization.

use std::path::Path;

use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config};
use log::{debug, info};

use crate::error_handling::InitializationError;

/// Initializes a Kubernetes client.
///
/// In-cluster service account configuration is tried first; outside a
/// cluster the kubeconfig file at `kubeconfig` is used.
///
/// # Errors
///
/// Returns `InitializationError::KubeClientError` when neither source
/// yields a usable configuration.
pub async fn init_kube_client(kubeconfig: &Path) -> Result<Client, InitializationError> {
    let config = match Config::incluster() {
        Ok(config) => {
            info!("Using in-cluster Kubernetes configuration");
            config
        }
        Err(e) => {
            debug!("In-cluster configuration unavailable: {e}");
            info!("Using kubeconfig {}", kubeconfig.display());
            let file = Kubeconfig::read_from(kubeconfig).map_err(|e| {
                InitializationError::KubeClientError(format!(
                    "failed to read kubeconfig {}: {e}",
                    kubeconfig.display()
                ))
            })?;
            Config::from_custom_kubeconfig(file, &KubeConfigOptions::default())
                .await
                .map_err(|e| {
                    InitializationError::KubeClientError(format!(
                        "invalid kubeconfig {}: {e}",
                        kubeconfig.display()
                    ))
                })?
        }
    };

    Client::try_from(config).map_err(|e| InitializationError::KubeClientError(e.to_string()))
}
