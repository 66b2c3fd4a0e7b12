use crate::check::CheckTally;
use loadcheck_core::TransactionLabels;
use metrics_util::AtomicBucket;
use std::{
    future::Future,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::{Duration, Instant},
};

/// Times `func` and records its outcome against the current virtual user.
///
/// `Ok` counts as a successful transaction, `Err` as a failed one. The elapsed
/// wall-clock time is returned alongside the result.
pub async fn transaction_hook<T, R, E>(
    labels: TransactionLabels,
    func: T,
) -> (Result<R, E>, Duration)
where
    T: Future<Output = Result<R, E>>,
{
    let start = Instant::now();
    let res = func.await;
    let elapsed = start.elapsed();

    #[cfg(feature = "metrics")]
    {
        metrics::describe_histogram!(labels.latency, metrics::Unit::Nanoseconds, "");
        metrics::histogram!(labels.latency).record(elapsed.as_nanos() as f64);
        if res.is_ok() {
            metrics::counter!(labels.success).increment(1);
        } else {
            metrics::counter!(labels.error).increment(1);
        }
    }

    let recorded = VU_HOOK.try_with(|hook| {
        hook.latency.push(elapsed);
        if res.is_ok() {
            hook.success.fetch_add(1, Ordering::Relaxed);
        } else {
            hook.error.fetch_add(1, Ordering::Relaxed);
        }
    });

    if recorded.is_err() {
        tracing::error!(
            "No hook available; `{}` was not recorded. Is this running outside of a scenario?",
            labels.latency
        );
    }

    (res, elapsed)
}

/// Shared counters handed to each virtual user.
#[derive(Clone)]
pub(crate) struct VuData {
    pub success: Arc<AtomicU64>,
    pub error: Arc<AtomicU64>,
    pub latency: Arc<AtomicBucket<Duration>>,
    pub checks: Arc<CheckTally>,
}

tokio::task_local! {
    pub(crate) static VU_HOOK: VuData;
}
