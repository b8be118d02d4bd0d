//! Configuration types and CLI options.
//!
//! This module defines the enums and structs used for command-line and
//! environment parsing, plus the resolved verifier policy derived from them.

use std::path::PathBuf;
use std::time::Duration;

use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser, ValueEnum};

use crate::config::constants::{
    DEFAULT_CLUSTER_DOMAIN, DEFAULT_CONCURRENCY, DEFAULT_KUBECONFIG, DEFAULT_NAMESPACE_BLACKLIST,
    DEFAULT_OUTPUT_FILE, DEFAULT_TIMEOUT_SECS, MAX_CONCURRENCY, MAX_TIMEOUT_SECS, MIN_CONCURRENCY,
    MIN_TIMEOUT_SECS, RESULTS_SUFFIX,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Format of the verification results file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ResultsFormat {
    /// One CSV record per endpoint (default)
    Csv,
    /// One JSON object per line
    Jsonl,
}

/// Run configuration.
///
/// Usable programmatically through `Default`, or parsed from flags and
/// environment variables by the binary. Call [`Config::clamped`] before
/// handing it to [`crate::run_check`]; the run does this itself as well.
///
/// # Examples
///
/// ```no_run
/// use k8s_health_check::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     output_file: PathBuf::from("/tmp/health-check-urls"),
///     verify: true,
///     concurrency: 50,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "k8s_health_check",
    about = "Collects health check endpoints from pods and services and verifies they are reachable."
)]
pub struct Config {
    /// Kubeconfig file, used when not running inside the cluster
    #[arg(long, env = "KUBECONFIG", default_value = DEFAULT_KUBECONFIG)]
    pub kubeconfig: PathBuf,

    /// Text report path; results are written next to it
    #[arg(long, env = "OUTPUT_FILE", default_value = DEFAULT_OUTPUT_FILE)]
    pub output_file: PathBuf,

    /// Verify every collected endpoint after writing the report
    #[arg(long, env = "VERIFY_URLS", action = ArgAction::SetTrue, value_parser = BoolishValueParser::new())]
    pub verify: bool,

    /// Skip TLS certificate validation for HTTPS checks
    #[arg(long, env = "INSECURE_TLS", action = ArgAction::SetTrue, value_parser = BoolishValueParser::new())]
    pub insecure_tls: bool,

    /// Maximum concurrent verifications (clamped to 1-100)
    #[arg(long, env = "CONCURRENCY", default_value_t = DEFAULT_CONCURRENCY, allow_negative_numbers = true)]
    pub concurrency: i64,

    /// Per-check timeout in seconds (clamped to 1-60)
    #[arg(long, env = "TIMEOUT", default_value_t = DEFAULT_TIMEOUT_SECS, allow_negative_numbers = true)]
    pub timeout_seconds: i64,

    /// Only scan these namespaces (comma separated, empty means all)
    #[arg(long, env = "NAMESPACE_WHITELIST", value_delimiter = ',')]
    pub namespace_whitelist: Vec<String>,

    /// Never scan these namespaces (comma separated)
    #[arg(
        long,
        env = "NAMESPACE_BLACKLIST",
        value_delimiter = ',',
        default_value = DEFAULT_NAMESPACE_BLACKLIST
    )]
    pub namespace_blacklist: Vec<String>,

    /// Cluster DNS domain used for service addresses
    #[arg(long, env = "CLUSTER_DOMAIN", default_value = DEFAULT_CLUSTER_DOMAIN)]
    pub cluster_domain: String,

    /// Verify the endpoints listed in an existing text report instead of
    /// querying the cluster
    #[arg(long, env = "FROM_REPORT")]
    pub from_report: Option<PathBuf>,

    /// Results file format: csv|jsonl
    #[arg(long, env = "RESULTS_FORMAT", value_enum, default_value_t = ResultsFormat::Csv)]
    pub results_format: ResultsFormat,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, env = "LOG_LEVEL", value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            kubeconfig: PathBuf::from(DEFAULT_KUBECONFIG),
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
            verify: false,
            insecure_tls: false,
            concurrency: DEFAULT_CONCURRENCY,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            namespace_whitelist: Vec::new(),
            namespace_blacklist: split_list(DEFAULT_NAMESPACE_BLACKLIST),
            cluster_domain: DEFAULT_CLUSTER_DOMAIN.to_string(),
            from_report: None,
            results_format: ResultsFormat::Csv,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}

impl Config {
    /// Pulls concurrency and timeout into their allowed ranges and drops
    /// blank namespace entries.
    pub fn clamped(mut self) -> Self {
        let concurrency = self.concurrency.clamp(MIN_CONCURRENCY, MAX_CONCURRENCY);
        if concurrency != self.concurrency {
            log::warn!(
                "Concurrency {} out of range, using {}",
                self.concurrency,
                concurrency
            );
            self.concurrency = concurrency;
        }

        let timeout = self.timeout_seconds.clamp(MIN_TIMEOUT_SECS, MAX_TIMEOUT_SECS);
        if timeout != self.timeout_seconds {
            log::warn!(
                "Timeout {}s out of range, using {}s",
                self.timeout_seconds,
                timeout
            );
            self.timeout_seconds = timeout;
        }

        self.namespace_whitelist = normalize_list(self.namespace_whitelist);
        self.namespace_blacklist = normalize_list(self.namespace_blacklist);
        self
    }

    /// Worker count, within bounds even if `clamped` was skipped.
    pub fn worker_limit(&self) -> usize {
        self.concurrency.clamp(MIN_CONCURRENCY, MAX_CONCURRENCY) as usize
    }

    /// The verifier-facing subset of this configuration.
    pub fn verify_policy(&self) -> VerifyPolicy {
        let secs = self.timeout_seconds.clamp(MIN_TIMEOUT_SECS, MAX_TIMEOUT_SECS);
        VerifyPolicy {
            timeout: Duration::from_secs(secs as u64),
            insecure_tls: self.insecure_tls,
        }
    }

    /// Path of the verification results file for the configured format.
    pub fn results_path(&self) -> PathBuf {
        let mut name = self.output_file.clone().into_os_string();
        name.push(RESULTS_SUFFIX);
        if self.results_format == ResultsFormat::Jsonl {
            name.push(".jsonl");
        }
        PathBuf::from(name)
    }
}

/// Settings every verifier call receives explicitly.
///
/// The TLS bypass applies uniformly to every HTTPS check of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifyPolicy {
    /// Upper bound for a single verification
    pub timeout: Duration,
    /// Accept invalid TLS certificates
    pub insecure_tls: bool,
}

impl Default for VerifyPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS as u64),
            insecure_tls: false,
        }
    }
}

fn split_list(raw: &str) -> Vec<String> {
    normalize_list(raw.split(',').map(str::to_string).collect())
}

fn normalize_list(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Warn),
            log::LevelFilter::Warn
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Info),
            log::LevelFilter::Info
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.concurrency, 20);
        assert_eq!(config.timeout_seconds, 5);
        assert!(!config.verify);
        assert!(!config.insecure_tls);
        assert!(config.namespace_whitelist.is_empty());
        assert_eq!(
            config.namespace_blacklist,
            vec!["kube-system", "kube-public", "kube-node-lease"]
        );
        assert_eq!(config.cluster_domain, "cluster.local");
        assert_eq!(config.results_format, ResultsFormat::Csv);
    }

    #[test]
    fn test_clamped_pulls_values_into_range() {
        let low = Config {
            concurrency: 0,
            timeout_seconds: 0,
            ..Default::default()
        }
        .clamped();
        assert_eq!(low.concurrency, 1);
        assert_eq!(low.timeout_seconds, 1);

        let high = Config {
            concurrency: 1000,
            timeout_seconds: 600,
            ..Default::default()
        }
        .clamped();
        assert_eq!(high.concurrency, 100);
        assert_eq!(high.timeout_seconds, 60);
    }

    #[test]
    fn test_clamped_pulls_negative_values_up() {
        let config = Config {
            concurrency: -5,
            timeout_seconds: -1,
            ..Default::default()
        }
        .clamped();
        assert_eq!(config.concurrency, 1);
        assert_eq!(config.timeout_seconds, 1);
        assert_eq!(config.worker_limit(), 1);
    }

    #[test]
    fn test_unclamped_config_still_yields_bounded_policy() {
        let config = Config {
            concurrency: 5000,
            timeout_seconds: -3,
            ..Default::default()
        };
        assert_eq!(config.worker_limit(), 100);
        assert_eq!(config.verify_policy().timeout, Duration::from_secs(1));
    }

    #[test]
    fn test_clamped_keeps_in_range_values() {
        let config = Config {
            concurrency: 42,
            timeout_seconds: 7,
            ..Default::default()
        }
        .clamped();
        assert_eq!(config.concurrency, 42);
        assert_eq!(config.timeout_seconds, 7);
    }

    #[test]
    fn test_clamped_drops_blank_namespaces() {
        let config = Config {
            namespace_whitelist: vec![" apps ".into(), "".into(), "web".into()],
            ..Default::default()
        }
        .clamped();
        assert_eq!(config.namespace_whitelist, vec!["apps", "web"]);
    }

    #[test]
    fn test_verify_policy() {
        let config = Config {
            timeout_seconds: 9,
            insecure_tls: true,
            ..Default::default()
        };
        let policy = config.verify_policy();
        assert_eq!(policy.timeout, Duration::from_secs(9));
        assert!(policy.insecure_tls);
    }

    #[test]
    fn test_results_path() {
        let mut config = Config {
            output_file: PathBuf::from("/tmp/out/urls"),
            ..Default::default()
        };
        assert_eq!(
            config.results_path(),
            PathBuf::from("/tmp/out/urls.verification")
        );
        config.results_format = ResultsFormat::Jsonl;
        assert_eq!(
            config.results_path(),
            PathBuf::from("/tmp/out/urls.verification.jsonl")
        );
    }
}
