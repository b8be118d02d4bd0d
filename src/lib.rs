//! k8s_health_check library: health endpoint discovery and verification
//!
//! This library collects the network endpoints that indicate whether
//! workloads in a Kubernetes cluster are healthy (pod probes and service
//! ports), writes them to a text report grouped by namespace, and
//! optionally checks every endpoint over HTTP(S), TCP or UDP with bounded
//! concurrency.
//!
//! # Example
//!
//! ```no_run
//! use k8s_health_check::{run_check, Config};
//! use std::path::PathBuf;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     output_file: PathBuf::from("/tmp/health-check-urls"),
//!     verify: true,
//!     concurrency: 50,
//!     ..Default::default()
//! };
//!
//! let report = run_check(config).await?;
//! println!("Verified {} endpoints: {} reachable, {} unreachable",
//!          report.verified, report.reachable, report.unreachable);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

mod app;
pub mod catalog;
pub mod config;
pub mod descriptor;
pub mod discovery;
pub mod error_handling;
pub mod export;
pub mod extract;
pub mod initialization;
pub mod model;
pub mod scheduler;
pub mod verify;

// Re-export public API
pub use catalog::Catalog;
pub use config::{Config, LogFormat, LogLevel, ResultsFormat, VerifyPolicy};
pub use model::{Endpoint, Owner, ProtocolType, VerificationOutcome};
pub use run::{run_check, run_check_with_progress, CheckReport};

// Internal run module (one point-in-time collection and verification)
mod run {
    use anyhow::{Context, Result};
    use log::info;
    use std::path::PathBuf;
    use std::sync::Arc;
    use std::time::Instant;

    use crate::app::{log_verification_rate, print_final_statistics};
    use crate::catalog::{read_report, write_report, Catalog};
    use crate::config::Config;
    use crate::discovery::{collect_endpoints, KubeSource};
    use crate::error_handling::OutcomeStats;
    use crate::export::write_results;
    use crate::initialization::{init_crypto_provider, init_kube_client};
    use crate::scheduler::{verify_endpoints, ProgressCallback};
    use crate::verify::{HttpVerifier, ProtocolDispatcher};

    /// Results of a completed run.
    #[derive(Debug, Clone)]
    pub struct CheckReport {
        /// Endpoints in the catalog
        pub total_endpoints: usize,
        /// Endpoints verified (0 when verification was off)
        pub verified: usize,
        /// Verified endpoints that answered
        pub reachable: usize,
        /// Verified endpoints that did not answer
        pub unreachable: usize,
        /// Text report written by this run, if any
        pub report_path: Option<PathBuf>,
        /// Results file written by this run, if any
        pub results_path: Option<PathBuf>,
        /// Wall-clock duration of the run
        pub elapsed_seconds: f64,
    }

    /// Runs one collection (and optionally verification) pass.
    ///
    /// Without `from_report`, endpoints are discovered from the cluster and
    /// written to `output_file`. With `from_report`, the catalog is loaded
    /// from that report instead and always verified.
    ///
    /// # Errors
    ///
    /// Returns an error if the Kubernetes client cannot be created, the
    /// namespace list fails, or a report or results file cannot be read or
    /// written. Individual unreachable endpoints are never errors.
    pub async fn run_check(config: Config) -> Result<CheckReport> {
        run_check_with_progress(config, None).await
    }

    /// Like [`run_check`], invoking `progress_callback` after each
    /// verification with `(completed, reachable, total)`.
    ///
    /// # Errors
    ///
    /// See [`run_check`].
    pub async fn run_check_with_progress(
        config: Config,
        progress_callback: ProgressCallback,
    ) -> Result<CheckReport> {
        let config = config.clamped();
        let start_time = Instant::now();

        let (catalog, report_path) = match &config.from_report {
            Some(path) => {
                info!("Loading endpoints from report {}", path.display());
                let catalog = read_report(path, &config.cluster_domain)
                    .with_context(|| format!("Failed to read report {}", path.display()))?;
                info!("Loaded {} endpoints", catalog.len());
                (catalog, None)
            }
            None => {
                let catalog = discover(&config).await?;
                write_report(&config.output_file, &catalog).with_context(|| {
                    format!("Failed to write report {}", config.output_file.display())
                })?;
                info!(
                    "Health check URLs written to {}",
                    config.output_file.display()
                );
                (catalog, Some(config.output_file.clone()))
            }
        };

        let mut report = CheckReport {
            total_endpoints: catalog.len(),
            verified: 0,
            reachable: 0,
            unreachable: 0,
            report_path,
            results_path: None,
            elapsed_seconds: 0.0,
        };

        if config.verify || config.from_report.is_some() {
            let stats = verify_and_export(&config, &catalog, progress_callback).await?;
            report.verified = stats.total();
            report.reachable = stats.reachable();
            report.unreachable = stats.unreachable();
            report.results_path = Some(config.results_path());
            print_final_statistics(&stats, start_time.elapsed().as_secs_f64());
        } else {
            info!("Verification disabled (set VERIFY_URLS=true to check endpoints)");
        }

        report.elapsed_seconds = start_time.elapsed().as_secs_f64();
        Ok(report)
    }

    async fn discover(config: &Config) -> Result<Catalog> {
        let client = init_kube_client(&config.kubeconfig)
            .await
            .context("Failed to create Kubernetes client")?;
        let source = KubeSource::new(client);
        collect_endpoints(
            &source,
            &config.namespace_whitelist,
            &config.namespace_blacklist,
            &config.cluster_domain,
        )
        .await
        .context("Failed to collect health check URLs")
    }

    async fn verify_and_export(
        config: &Config,
        catalog: &Catalog,
        progress_callback: ProgressCallback,
    ) -> Result<OutcomeStats> {
        init_crypto_provider();
        let http = HttpVerifier::new().context("Failed to initialize HTTP client")?;
        let verifier = Arc::new(ProtocolDispatcher::new(http));

        info!(
            "Verifying {} endpoints (concurrency {}, timeout {}s{})",
            catalog.len(),
            config.concurrency,
            config.timeout_seconds,
            if config.insecure_tls {
                ", TLS verification disabled"
            } else {
                ""
            }
        );
        let verify_start = Instant::now();
        let outcomes = verify_endpoints(
            catalog.endpoints(),
            config.worker_limit(),
            verifier,
            config.verify_policy(),
            progress_callback,
        )
        .await;
        log_verification_rate(verify_start, outcomes.len());

        let results_path = config.results_path();
        write_results(&results_path, config.results_format, &outcomes).with_context(|| {
            format!("Failed to write results {}", results_path.display())
        })?;

        Ok(OutcomeStats::from_outcomes(&outcomes))
    }
}
