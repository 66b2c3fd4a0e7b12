use std::fmt;
use std::time::Duration;

/// Pass/fail tally for a single named check across the whole run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckSummary {
    pub name: String,
    pub passes: u64,
    pub fails: u64,
}

impl CheckSummary {
    pub fn total(&self) -> u64 {
        self.passes + self.fails
    }

    pub fn pass_rate(&self) -> f64 {
        if self.total() == 0 {
            0.
        } else {
            self.passes as f64 / self.total() as f64
        }
    }
}

/// Statistics for a completed run.
///
/// Checks are ordered by the first time they were recorded, which for a
/// typical scenario matches the order they are declared in.
#[derive(Clone, Debug)]
pub struct RunSummary {
    pub name: String,
    pub vus: usize,
    pub elapsed: Duration,
    pub iterations: u64,
    pub requests: u64,
    pub failed_requests: u64,
    pub latency_p50: Duration,
    pub latency_p90: Duration,
    pub latency_p95: Duration,
    pub latency_p99: Duration,
    pub checks: Vec<CheckSummary>,
}

impl RunSummary {
    pub fn check(&self, name: &str) -> Option<&CheckSummary> {
        self.checks.iter().find(|c| c.name == name)
    }

    pub fn checks_passed(&self) -> u64 {
        self.checks.iter().map(|c| c.passes).sum()
    }

    pub fn checks_failed(&self) -> u64 {
        self.checks.iter().map(|c| c.fails).sum()
    }

    pub fn all_checks_passed(&self) -> bool {
        self.checks_failed() == 0
    }

    pub fn failed_request_rate(&self) -> f64 {
        if self.requests == 0 {
            0.
        } else {
            self.failed_requests as f64 / self.requests as f64
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "scenario {}: {} VUs, {}",
            self.name,
            self.vus,
            humantime::format_duration(round_millis(self.elapsed))
        )?;

        for check in &self.checks {
            let mark = if check.fails == 0 { '✓' } else { '✗' };
            writeln!(
                f,
                "  {mark} {} ({:.2}%: {} passed, {} failed)",
                check.name,
                check.pass_rate() * 100.,
                check.passes,
                check.fails
            )?;
        }

        let total = self.checks_passed() + self.checks_failed();
        let rate = if total == 0 {
            0.
        } else {
            self.checks_passed() as f64 / total as f64
        };
        writeln!(
            f,
            "  checks: {:.2}% ({}/{})",
            rate * 100.,
            self.checks_passed(),
            total
        )?;
        writeln!(f, "  iterations: {}", self.iterations)?;
        writeln!(
            f,
            "  http_reqs: {} (failed {:.2}%)",
            self.requests,
            self.failed_request_rate() * 100.
        )?;
        write!(
            f,
            "  http_req_duration: p50={:?}, p90={:?}, p95={:?}, p99={:?}",
            self.latency_p50, self.latency_p90, self.latency_p95, self.latency_p99
        )
    }
}

fn round_millis(dur: Duration) -> Duration {
    Duration::from_millis(dur.as_millis() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(checks: Vec<CheckSummary>) -> RunSummary {
        RunSummary {
            name: "ask".to_string(),
            vus: 2,
            elapsed: Duration::from_millis(3_004),
            iterations: 4,
            requests: 4,
            failed_requests: 1,
            latency_p50: Duration::from_millis(100),
            latency_p90: Duration::from_millis(200),
            latency_p95: Duration::from_millis(250),
            latency_p99: Duration::from_millis(300),
            checks,
        }
    }

    #[test]
    fn totals_across_checks() {
        let stats = summary(vec![
            CheckSummary {
                name: "status is 200".to_string(),
                passes: 3,
                fails: 1,
            },
            CheckSummary {
                name: "response time < 3s".to_string(),
                passes: 4,
                fails: 0,
            },
        ]);

        assert_eq!(stats.checks_passed(), 7);
        assert_eq!(stats.checks_failed(), 1);
        assert!(!stats.all_checks_passed());
        assert_eq!(stats.check("status is 200").map(|c| c.pass_rate()), Some(0.75));
        assert!(stats.check("missing").is_none());
        assert_eq!(stats.failed_request_rate(), 0.25);
    }

    #[test]
    fn display_marks_failing_checks() {
        let stats = summary(vec![
            CheckSummary {
                name: "status is 200".to_string(),
                passes: 3,
                fails: 1,
            },
            CheckSummary {
                name: "response time < 3s".to_string(),
                passes: 4,
                fails: 0,
            },
        ]);

        let report = stats.to_string();
        assert!(report.starts_with("scenario ask: 2 VUs, 3s 4ms"));
        assert!(report.contains("✗ status is 200 (75.00%: 3 passed, 1 failed)"));
        assert!(report.contains("✓ response time < 3s (100.00%: 4 passed, 0 failed)"));
        assert!(report.contains("checks: 87.50% (7/8)"));
        assert!(report.contains("http_reqs: 4 (failed 25.00%)"));
    }

    #[test]
    fn empty_run_has_no_failures() {
        let stats = summary(vec![]);
        assert!(stats.all_checks_passed());
        assert!(stats.to_string().contains("checks: 0.00% (0/0)"));
    }
}
