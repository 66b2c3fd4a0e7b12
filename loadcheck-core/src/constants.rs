use std::time::Duration;

/// Number of virtual users used when none is configured.
pub const DEFAULT_VUS: usize = 50;

/// Wall-clock run length used when none is configured.
pub const DEFAULT_DURATION: Duration = Duration::from_secs(15);

/// Metric name for the per-check pass/fail counter.
pub const CHECKS_METRIC: &str = "loadcheck_checks";

/// Metric name for the completed iteration counter.
pub const ITERATIONS_METRIC: &str = "loadcheck_iterations";
