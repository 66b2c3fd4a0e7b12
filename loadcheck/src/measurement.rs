use loadcheck_core::{CheckSummary, RunSummary};
use pdatastructs::tdigest::{TDigest, K1};
use std::time::Duration;
use tracing::error;

const TDIGEST_BACKLOG_SIZE: usize = 100;

/// Everything the virtual users recorded over a run.
#[derive(Debug, Clone)]
pub(crate) struct Measurement {
    pub iterations: u64,
    pub success: u64,
    pub error: u64,
    pub checks: Vec<CheckSummary>,
    latency: TDigest<K1>,
    latency_count: usize,
}

impl Measurement {
    pub fn new(iterations: u64, success: u64, error: u64, checks: Vec<CheckSummary>) -> Self {
        Self {
            iterations,
            success,
            error,
            checks,
            latency: default_tdigest(),
            latency_count: 0,
        }
    }

    pub fn populate_latencies(&mut self, dur: &[Duration]) {
        for latency in dur {
            self.latency.insert(latency.as_secs_f64());
        }
        self.latency_count += dur.len();
    }

    pub fn latency(&self, quantile: f64) -> Duration {
        if self.latency_count == 0 {
            return Duration::ZERO;
        }

        let secs = self.latency.quantile(quantile);

        // TDigest occasionally yields NaN for sparse data.
        let secs = if secs.is_finite() && secs >= 0. {
            secs
        } else {
            error!("Non-finite latency quantile {quantile}; reporting zero.");
            0.
        };

        Duration::from_secs_f64(secs)
    }

    pub fn into_summary(self, name: &str, vus: usize, elapsed: Duration) -> RunSummary {
        RunSummary {
            name: name.to_string(),
            vus,
            elapsed,
            iterations: self.iterations,
            requests: self.success + self.error,
            failed_requests: self.error,
            latency_p50: self.latency(0.5),
            latency_p90: self.latency(0.9),
            latency_p95: self.latency(0.95),
            latency_p99: self.latency(0.99),
            checks: self.checks,
        }
    }
}

fn default_tdigest() -> TDigest<K1> {
    TDigest::new(K1::new(10.), TDIGEST_BACKLOG_SIZE)
}
