//! Recording named checks against the running virtual user
use crate::transaction::VU_HOOK;
use loadcheck_core::{evaluate_all, Check, CheckOutcome, CheckSummary};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};
#[allow(unused_imports)]
use tracing::{debug, error, trace};

/// Evaluate each check against `value` and report the outcomes to the driver.
///
/// Every check runs even if an earlier one fails. Returns `true` only when all
/// checks passed.
///
/// # Example
/// ```no_run
/// use loadcheck::prelude::*;
///
/// # fn example(res: HttpResult) {
/// check(&res, &[
///     Check::new("status is 200", |r: &HttpResult| r.status == Some(200)),
///     Check::new("response time < 3s", |r: &HttpResult| r.duration_ms() < 3000.),
/// ]);
/// # }
/// ```
pub fn check<T: ?Sized>(value: &T, checks: &[Check<'_, T>]) -> bool {
    let outcomes = evaluate_all(value, checks);

    let recorded = VU_HOOK.try_with(|hook| {
        for outcome in &outcomes {
            hook.checks.record(*outcome);
        }
    });
    if recorded.is_err() {
        error!("No hook available; check outcomes were not recorded.");
    }

    for outcome in &outcomes {
        trace!(check = outcome.name, passed = outcome.passed, "Check evaluated");

        #[cfg(feature = "metrics")]
        metrics::counter!(
            loadcheck_core::CHECKS_METRIC,
            "check" => outcome.name,
            "outcome" => if outcome.passed { "pass" } else { "fail" }
        )
        .increment(1);
    }

    outcomes.iter().all(|o| o.passed)
}

/// Pass/fail counters for every check seen during a run, in first-seen order.
#[derive(Default)]
pub(crate) struct CheckTally {
    counters: RwLock<Vec<CheckCounter>>,
}

struct CheckCounter {
    name: &'static str,
    passes: AtomicU64,
    fails: AtomicU64,
}

impl CheckCounter {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            passes: AtomicU64::new(0),
            fails: AtomicU64::new(0),
        }
    }

    fn add(&self, passed: bool) {
        if passed {
            self.passes.fetch_add(1, Ordering::Relaxed);
        } else {
            self.fails.fetch_add(1, Ordering::Relaxed);
        }
    }
}

impl CheckTally {
    pub fn record(&self, outcome: CheckOutcome) {
        {
            let counters = self.counters.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(counter) = counters.iter().find(|c| c.name == outcome.name) {
                counter.add(outcome.passed);
                return;
            }
        }

        let mut counters = self.counters.write().unwrap_or_else(PoisonError::into_inner);
        // NOTE: Another virtual user may have registered the check between locks.
        if let Some(counter) = counters.iter().find(|c| c.name == outcome.name) {
            counter.add(outcome.passed);
        } else {
            debug!("Registering check `{}`", outcome.name);
            let counter = CheckCounter::new(outcome.name);
            counter.add(outcome.passed);
            counters.push(counter);
        }
    }

    pub fn snapshot(&self) -> Vec<CheckSummary> {
        self.counters
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|c| CheckSummary {
                name: c.name.to_string(),
                passes: c.passes.load(Ordering::Relaxed),
                fails: c.fails.load(Ordering::Relaxed),
            })
            .collect()
    }
}
