//! Progress logging utilities.

use log::info;

use crate::config::PROGRESS_LOG_INTERVAL;

/// Logs a progress line every [`PROGRESS_LOG_INTERVAL`] completions and
/// once more when the last endpoint completes.
///
/// Returns whether a line was logged.
pub fn log_progress(completed: usize, total: usize, reachable: usize) -> bool {
    if completed == 0 || (completed % PROGRESS_LOG_INTERVAL != 0 && completed != total) {
        return false;
    }
    info!("Progress: {completed}/{total} verified ({reachable} accessible)");
    true
}

/// Logs throughput of a finished verification pass.
///
/// # Arguments
///
/// * `start_time` - When verification started
/// * `completed` - Number of endpoints verified
pub fn log_verification_rate(start_time: std::time::Instant, completed: usize) {
    let elapsed_secs = start_time.elapsed().as_secs_f64();
    let rate = if elapsed_secs > 0.0 {
        completed as f64 / elapsed_secs
    } else {
        0.0
    };
    info!(
        "Verified {} endpoints in {:.2} seconds (~{:.2} endpoints/sec)",
        completed, elapsed_secs, rate
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_logged_at_interval_and_completion() {
        assert!(!log_progress(0, 120, 0));
        assert!(!log_progress(49, 120, 10));
        assert!(log_progress(50, 120, 10));
        assert!(log_progress(100, 120, 10));
        assert!(!log_progress(119, 120, 10));
        assert!(log_progress(120, 120, 10));
    }

    #[test]
    fn test_small_runs_log_only_at_completion() {
        assert!(!log_progress(1, 3, 1));
        assert!(log_progress(3, 3, 1));
    }
}
