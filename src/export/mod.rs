//! Verification results export.
//!
//! Writes one record per outcome, in catalog order, as CSV or JSON lines.

mod csv;
mod jsonl;

use std::path::Path;

use log::info;

use crate::config::ResultsFormat;
use crate::error_handling::ReportError;
use crate::model::{Endpoint, VerificationOutcome};

pub use self::csv::{write_results_csv, write_results_csv_to, RESULTS_HEADER};
pub use jsonl::{write_results_jsonl, write_results_jsonl_to};

/// Writes results to `path` in the given format, creating parent
/// directories as needed.
///
/// # Returns
///
/// The number of records written.
///
/// # Errors
///
/// Returns a `ReportError` if the file cannot be created or a record
/// cannot be encoded.
pub fn write_results(
    path: &Path,
    format: ResultsFormat,
    outcomes: &[VerificationOutcome],
) -> Result<usize, ReportError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let written = match format {
        ResultsFormat::Csv => write_results_csv(path, outcomes)?,
        ResultsFormat::Jsonl => write_results_jsonl(path, outcomes)?,
    };
    info!("Wrote {written} verification results to {}", path.display());
    Ok(written)
}

/// Value of the `Type` column: the protocol, or the raw scheme when no
/// verifier handles it.
fn type_label(endpoint: &Endpoint) -> &str {
    match endpoint.protocol {
        Some(protocol) => protocol.as_str(),
        None => endpoint
            .address
            .split_once("://")
            .map(|(scheme, _)| scheme)
            .unwrap_or(""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_label_falls_back_to_scheme() {
        assert_eq!(type_label(&Endpoint::from_address("ns", "https://a:443")), "https");
        assert_eq!(type_label(&Endpoint::from_address("ns", "sctp://a:3868")), "sctp");
        assert_eq!(type_label(&Endpoint::from_address("ns", "a:80")), "");
    }

    #[test]
    fn test_write_results_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/nested/urls.verification");
        let outcomes = vec![VerificationOutcome::reachable(
            Endpoint::from_address("ns", "tcp://a:1"),
            0,
        )];
        assert_eq!(write_results(&path, ResultsFormat::Csv, &outcomes).unwrap(), 1);
        assert!(path.exists());
    }
}
