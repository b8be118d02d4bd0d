//! Main application modules.
//!
//! Progress logging and end-of-run statistics used by the run driver.

pub mod logging;
pub mod statistics;

// Re-export public API
pub use logging::{log_progress, log_verification_rate};
pub use statistics::print_final_statistics;
