//! Bounded-concurrency verification.
//!
//! Every endpoint is checked exactly once. At most `concurrency` checks run
//! at the same time, and outcomes come back in catalog order no matter in
//! which order the checks finish. Each outcome is stored in the slot of its
//! endpoint's index, so duplicate addresses get separate outcomes.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures::stream::FuturesUnordered;
use futures::StreamExt;
use log::{debug, warn};
use tokio::sync::Semaphore;

use crate::app::log_progress;
use crate::config::{VerifyPolicy, VERIFY_GRACE};
use crate::error_handling::FailureKind;
use crate::model::{CheckResult, Endpoint, VerificationOutcome};
use crate::verify::Verifier;

/// Progress callback invoked after each completed check with
/// `(completed, reachable, total)`.
pub type ProgressCallback = Option<Arc<dyn Fn(usize, usize, usize) + Send + Sync>>;

/// Verifies all endpoints and returns one outcome per endpoint, in order.
///
/// `concurrency` is clamped to at least 1. Each check is bounded by
/// `policy.timeout` plus [`VERIFY_GRACE`]; a verifier that overruns is
/// reported as a timeout. A check whose task panics is reported as
/// [`FailureKind::TaskAborted`]. An empty input returns immediately.
pub async fn verify_endpoints(
    endpoints: &[Endpoint],
    concurrency: usize,
    verifier: Arc<dyn Verifier>,
    policy: VerifyPolicy,
    progress_callback: ProgressCallback,
) -> Vec<VerificationOutcome> {
    let total = endpoints.len();
    if total == 0 {
        return Vec::new();
    }

    let concurrency = concurrency.max(1);
    debug!("Verifying {total} endpoints with concurrency {concurrency}");

    let semaphore = Arc::new(Semaphore::new(concurrency));
    let completed = Arc::new(AtomicUsize::new(0));
    let reachable = Arc::new(AtomicUsize::new(0));
    let mut tasks = FuturesUnordered::new();

    for (index, endpoint) in endpoints.iter().enumerate() {
        // The semaphore is owned here and never closed.
        let permit = Arc::clone(&semaphore).acquire_owned().await.ok();

        let endpoint = endpoint.clone();
        let verifier = Arc::clone(&verifier);
        let completed = Arc::clone(&completed);
        let reachable = Arc::clone(&reachable);
        let progress_callback = progress_callback.clone();

        let handle = tokio::spawn(async move {
            let _permit = permit;
            let result = verify_with_guard(verifier.as_ref(), &endpoint, &policy).await;
            debug!(
                "{} reachable={} status={} {}",
                endpoint.address, result.reachable, result.status_code, result.error_detail
            );
            record_completion(
                result.reachable,
                total,
                &completed,
                &reachable,
                &progress_callback,
            );
            result.into_outcome(endpoint)
        });
        tasks.push(async move { (index, handle.await) });
    }

    let mut slots: Vec<Option<VerificationOutcome>> = vec![None; total];
    while let Some((index, joined)) = tasks.next().await {
        match joined {
            Ok(outcome) => slots[index] = Some(outcome),
            Err(join_error) => {
                warn!("Task panicked: {:?}", join_error);
                record_completion(false, total, &completed, &reachable, &progress_callback);
            }
        }
    }

    slots
        .into_iter()
        .zip(endpoints)
        .map(|(slot, endpoint)| slot.unwrap_or_else(|| aborted(endpoint)))
        .collect()
}

async fn verify_with_guard(
    verifier: &dyn Verifier,
    endpoint: &Endpoint,
    policy: &VerifyPolicy,
) -> CheckResult {
    let limit = policy.timeout + VERIFY_GRACE;
    match tokio::time::timeout(limit, verifier.verify(endpoint, policy)).await {
        Ok(result) => result,
        Err(_) => {
            warn!("Verification of {} exceeded {:?}", endpoint.address, limit);
            CheckResult::failed(
                0,
                FailureKind::Timeout,
                format!("verification timed out after {}", format_duration(limit)),
            )
        }
    }
}

fn record_completion(
    was_reachable: bool,
    total: usize,
    completed: &AtomicUsize,
    reachable: &AtomicUsize,
    progress_callback: &ProgressCallback,
) {
    let ok = if was_reachable {
        reachable.fetch_add(1, Ordering::SeqCst) + 1
    } else {
        reachable.load(Ordering::SeqCst)
    };
    let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
    log_progress(done, total, ok);
    if let Some(callback) = progress_callback {
        callback(done, ok, total);
    }
}

fn aborted(endpoint: &Endpoint) -> VerificationOutcome {
    VerificationOutcome::failed(
        endpoint.clone(),
        0,
        FailureKind::TaskAborted,
        "verification task aborted",
    )
}

fn format_duration(d: Duration) -> String {
    if d.subsec_millis() == 0 {
        format!("{}s", d.as_secs())
    } else {
        format!("{:.1}s", d.as_secs_f64())
    }
}
