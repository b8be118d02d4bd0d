//! HTTP(S) GET check.

use async_trait::async_trait;
use log::debug;

use super::Verifier;
use crate::config::VerifyPolicy;
use crate::error_handling::{categorize_reqwest_error, error_chain_text, FailureKind};
use crate::initialization::init_http_client;
use crate::model::{CheckResult, Endpoint};

/// Issues a GET and treats any status below 400 as reachable.
///
/// Holds one client that verifies certificates and one that does not;
/// each call picks by `policy.insecure_tls` so the bypass is applied to
/// every HTTPS check of a run alike. Redirects are followed.
#[derive(Debug, Clone)]
pub struct HttpVerifier {
    strict: reqwest::Client,
    insecure: reqwest::Client,
}

impl HttpVerifier {
    /// Builds both clients.
    ///
    /// # Errors
    ///
    /// Returns a `reqwest::Error` if the TLS backend cannot be initialized.
    pub fn new() -> Result<Self, reqwest::Error> {
        Ok(Self {
            strict: init_http_client(false)?,
            insecure: init_http_client(true)?,
        })
    }

    fn client(&self, policy: &VerifyPolicy) -> &reqwest::Client {
        if policy.insecure_tls {
            &self.insecure
        } else {
            &self.strict
        }
    }
}

#[async_trait]
impl Verifier for HttpVerifier {
    async fn verify(&self, endpoint: &Endpoint, policy: &VerifyPolicy) -> CheckResult {
        let response = self
            .client(policy)
            .get(&endpoint.address)
            .timeout(policy.timeout)
            .send()
            .await;

        match response {
            Ok(response) => {
                let status = response.status();
                debug!("GET {} -> {}", endpoint.address, status.as_u16());
                if status.as_u16() < 400 {
                    CheckResult::reachable(status.as_u16())
                } else {
                    let detail = format!(
                        "HTTP {} {}",
                        status.as_u16(),
                        status.canonical_reason().unwrap_or("")
                    );
                    CheckResult::failed(
                        status.as_u16(),
                        FailureKind::HttpStatus,
                        detail.trim_end(),
                    )
                }
            }
            Err(e) => {
                CheckResult::failed(0, categorize_reqwest_error(&e), error_chain_text(&e))
            }
        }
    }
}
