//! Outcome statistics.
//!
//! Tallies reachable endpoints and failure kinds for the end-of-run summary.

use std::collections::HashMap;
use strum::IntoEnumIterator;

use super::types::FailureKind;
use crate::model::VerificationOutcome;

/// Counts of verification outcomes by category.
///
/// All failure kinds are initialized to zero on creation so callers can
/// iterate them in declaration order.
#[derive(Debug, Clone)]
pub struct OutcomeStats {
    total: usize,
    reachable: usize,
    failures: HashMap<FailureKind, usize>,
}

impl Default for OutcomeStats {
    fn default() -> Self {
        Self::new()
    }
}

impl OutcomeStats {
    pub fn new() -> Self {
        let failures = FailureKind::iter().map(|kind| (kind, 0)).collect();
        OutcomeStats {
            total: 0,
            reachable: 0,
            failures,
        }
    }

    /// Builds statistics over a finished set of outcomes.
    pub fn from_outcomes(outcomes: &[VerificationOutcome]) -> Self {
        let mut stats = Self::new();
        for outcome in outcomes {
            stats.record(outcome);
        }
        stats
    }

    /// Adds one outcome to the tallies.
    pub fn record(&mut self, outcome: &VerificationOutcome) {
        self.total += 1;
        if outcome.reachable {
            self.reachable += 1;
        } else if let Some(kind) = outcome.failure {
            *self.failures.entry(kind).or_insert(0) += 1;
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn reachable(&self) -> usize {
        self.reachable
    }

    pub fn unreachable(&self) -> usize {
        self.total - self.reachable
    }

    /// Count for one failure kind.
    pub fn failure_count(&self, kind: FailureKind) -> usize {
        self.failures.get(&kind).copied().unwrap_or(0)
    }
}
