//! JSONL results export.
//!
//! One serialized [`VerificationOutcome`] per line, endpoint embedded, so
//! every line stands on its own.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error_handling::ReportError;
use crate::model::VerificationOutcome;

/// Writes results as JSON lines to a new file at `path`.
///
/// # Errors
///
/// Returns a `ReportError` if the file cannot be created or written.
pub fn write_results_jsonl(path: &Path, outcomes: &[VerificationOutcome]) -> Result<usize, ReportError> {
    let file = File::create(path)?;
    write_results_jsonl_to(BufWriter::new(file), outcomes)
}

/// Writes results as JSON lines to any writer.
///
/// # Errors
///
/// Returns a `ReportError` if a line cannot be encoded or written.
pub fn write_results_jsonl_to<W: Write>(
    mut writer: W,
    outcomes: &[VerificationOutcome],
) -> Result<usize, ReportError> {
    for outcome in outcomes {
        serde_json::to_writer(&mut writer, outcome)?;
        writeln!(writer)?;
    }
    writer.flush()?;
    Ok(outcomes.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_handling::FailureKind;
    use crate::model::{Endpoint, Owner};

    #[test]
    fn test_one_outcome_per_line() {
        let mut svc = Endpoint::from_address("shop", "https://api.shop.svc.cluster.local:443");
        svc.owner = Some(Owner::Service("api".into()));
        let outcomes = vec![
            VerificationOutcome::reachable(svc, 200),
            VerificationOutcome::failed(
                Endpoint::from_address("shop", "ftp://x:21"),
                0,
                FailureKind::Unsupported,
                "Unsupported protocol",
            ),
        ];

        let mut buf = Vec::new();
        assert_eq!(write_results_jsonl_to(&mut buf, &outcomes).unwrap(), 2);
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<serde_json::Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["endpoint"]["address"], "https://api.shop.svc.cluster.local:443");
        assert_eq!(lines[0]["endpoint"]["owner"]["name"], "api");
        assert_eq!(lines[0]["reachable"], true);
        assert_eq!(lines[0]["status_code"], 200);
        assert!(lines[0].get("failure").is_none());

        assert_eq!(lines[1]["reachable"], false);
        assert_eq!(lines[1]["failure"], "unsupported");
        assert_eq!(lines[1]["error_detail"], "Unsupported protocol");

        let back: VerificationOutcome = serde_json::from_str(text.lines().nth(1).unwrap()).unwrap();
        assert_eq!(back, outcomes[1]);
    }

    #[test]
    fn test_empty_outcomes_write_nothing() {
        let mut buf = Vec::new();
        assert_eq!(write_results_jsonl_to(&mut buf, &[]).unwrap(), 0);
        assert!(buf.is_empty());
    }
}
