//! Endpoint and outcome records shared by every stage of a run.

mod endpoint;
mod outcome;

pub use endpoint::{Endpoint, Owner, ProtocolType};
pub use outcome::{CheckResult, VerificationOutcome};
