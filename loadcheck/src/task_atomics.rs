use crate::check::CheckTally;
use crate::measurement::Measurement;
use crate::transaction::VuData;
use metrics_util::AtomicBucket;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub(crate) struct TaskAtomics {
    iterations: Arc<AtomicU64>,
    success: Arc<AtomicU64>,
    error: Arc<AtomicU64>,
    latency: Arc<AtomicBucket<Duration>>,
    checks: Arc<CheckTally>,
}

impl TaskAtomics {
    pub fn new() -> Self {
        Self {
            iterations: Arc::new(AtomicU64::new(0)),
            success: Arc::new(AtomicU64::new(0)),
            error: Arc::new(AtomicU64::new(0)),
            latency: Arc::new(AtomicBucket::new()),
            checks: Arc::new(CheckTally::default()),
        }
    }

    pub fn iterations(&self) -> Arc<AtomicU64> {
        self.iterations.clone()
    }

    pub fn clone_to_vu_data(&self) -> VuData {
        VuData {
            success: self.success.clone(),
            error: self.error.clone(),
            latency: self.latency.clone(),
            checks: self.checks.clone(),
        }
    }

    pub fn collect(&self) -> Measurement {
        let mut measurement = Measurement::new(
            self.iterations.load(Ordering::Relaxed),
            self.success.load(Ordering::Relaxed),
            self.error.load(Ordering::Relaxed),
            self.checks.snapshot(),
        );
        self.latency
            .clear_with(|dur| measurement.populate_latencies(dur));
        measurement
    }
}
