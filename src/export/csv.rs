//! CSV results export.
//!
//! One row per outcome with the columns of [`RESULTS_HEADER`]. `Accessible`
//! is `true`/`false`, `StatusCode` is `0` when no HTTP status applies.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::Writer;

use super::type_label;
use crate::error_handling::ReportError;
use crate::model::VerificationOutcome;

pub const RESULTS_HEADER: [&str; 8] = [
    "URL",
    "Namespace",
    "ServiceName",
    "PodName",
    "Type",
    "Accessible",
    "StatusCode",
    "Error",
];

/// Writes results as CSV to a new file at `path`.
///
/// # Errors
///
/// Returns a `ReportError` if the file cannot be created or written.
pub fn write_results_csv(path: &Path, outcomes: &[VerificationOutcome]) -> Result<usize, ReportError> {
    let file = File::create(path)?;
    write_results_csv_to(file, outcomes)
}

/// Writes results as CSV to any writer.
///
/// # Errors
///
/// Returns a `ReportError` if a record cannot be written or flushed.
pub fn write_results_csv_to<W: Write>(
    output: W,
    outcomes: &[VerificationOutcome],
) -> Result<usize, ReportError> {
    let mut writer = Writer::from_writer(output);
    writer.write_record(RESULTS_HEADER)?;

    for outcome in outcomes {
        let endpoint = &outcome.endpoint;
        let status = outcome.status_code.to_string();
        writer.write_record([
            endpoint.address.as_str(),
            endpoint.scope.as_str(),
            endpoint.service_name(),
            endpoint.pod_name(),
            type_label(endpoint),
            if outcome.reachable { "true" } else { "false" },
            status.as_str(),
            outcome.error_detail.as_str(),
        ])?;
    }

    writer.flush()?;
    Ok(outcomes.len())
}
