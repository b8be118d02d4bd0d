//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (defaults, bounds, annotation keys)
//! - The library `Config` and its clamping rules
//! - CLI option types and parsing

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Config, LogFormat, LogLevel, ResultsFormat, VerifyPolicy};
