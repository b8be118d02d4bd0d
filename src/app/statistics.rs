//! Statistics printing.

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{FailureKind, OutcomeStats};

/// Prints the one-line summary followed by the failure breakdown.
pub fn print_final_statistics(stats: &OutcomeStats, elapsed_seconds: f64) {
    print_outcome_statistics(stats);
    print_simple_summary(stats, elapsed_seconds);
}

/// Prints failure counts by kind, skipping kinds that never occurred.
pub fn print_outcome_statistics(stats: &OutcomeStats) {
    if stats.unreachable() == 0 {
        return;
    }
    info!("Failure Counts ({} total):", stats.unreachable());
    for kind in FailureKind::iter() {
        let count = stats.failure_count(kind);
        if count > 0 {
            info!("   {}: {}", kind.as_str(), count);
        }
    }
}

fn print_simple_summary(stats: &OutcomeStats, elapsed_seconds: f64) {
    info!(
        "Verified {} endpoint{} ({} accessible, {} unreachable) in {:.1}s",
        stats.total(),
        if stats.total() == 1 { "" } else { "s" },
        stats.reachable(),
        stats.unreachable(),
        elapsed_seconds
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Endpoint, VerificationOutcome};

    #[test]
    fn test_print_statistics_without_failures() {
        let outcomes = vec![VerificationOutcome::reachable(
            Endpoint::from_address("ns", "http://a:80"),
            200,
        )];
        let stats = OutcomeStats::from_outcomes(&outcomes);
        // Should not panic when nothing failed
        print_final_statistics(&stats, 0.5);
    }

    #[test]
    fn test_print_statistics_with_failures() {
        let outcomes = vec![
            VerificationOutcome::failed(
                Endpoint::from_address("ns", "tcp://a:1"),
                0,
                FailureKind::Timeout,
                "timed out",
            ),
            VerificationOutcome::failed(
                Endpoint::from_address("ns", "ftp://a:1"),
                0,
                FailureKind::Unsupported,
                "Unsupported protocol",
            ),
        ];
        let stats = OutcomeStats::from_outcomes(&outcomes);
        assert_eq!(stats.unreachable(), 2);
        print_final_statistics(&stats, 1.0);
    }

    #[test]
    fn test_print_statistics_empty() {
        print_final_statistics(&OutcomeStats::new(), 0.0);
    }
}
