//! Error handling and outcome statistics.
//!
//! This module provides:
//! - Structural error types (initialization, discovery, report I/O)
//! - Per-endpoint failure categories and their classification
//! - Outcome statistics for the end-of-run summary
//!
//! Structural errors abort a run. Per-endpoint failures never do; they are
//! data carried in the outcome record.

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::{categorize_io_error, categorize_reqwest_error, error_chain_text};
pub use stats::OutcomeStats;
pub use types::{DiscoveryError, FailureKind, InitializationError, ReportError};
