mod utils;
#[allow(unused)]
use utils::*;

use ask_load::ask_project;
use ask_load::scenario::{LATENCY_CHECK, STATUS_CHECK};
use loadcheck::prelude::*;
use std::time::Duration;

fn tally(summary: &RunSummary, name: &str) -> (u64, u64) {
    let check = summary
        .check(name)
        .unwrap_or_else(|| panic!("check `{name}` was not recorded"));
    (check.passes, check.fails)
}

#[tokio::test]
async fn ok_within_threshold_passes_both_checks() -> anyhow::Result<()> {
    let addr = mock(Duration::from_millis(500)).await?;
    let ctx = ask_context(&format!("http://{addr}"), MOCK_TOKEN)?;

    // One request, then aborted during the pacing sleep.
    let summary = ask_project(ctx)
        .vus(1)
        .duration(Duration::from_millis(1_200))
        .await?;

    assert_eq!(summary.checks.len(), 2);
    assert_eq!(tally(&summary, STATUS_CHECK), (1, 0));
    assert_eq!(tally(&summary, LATENCY_CHECK), (1, 0));
    assert_eq!(summary.requests, 1);
    assert_eq!(summary.failed_requests, 0);
    assert!(summary.latency_p50 >= Duration::from_millis(500));
    assert!(summary.all_checks_passed());
    Ok(())
}

#[tokio::test]
async fn rejected_token_fails_status_only() -> anyhow::Result<()> {
    let addr = mock(Duration::from_millis(100)).await?;
    let ctx = ask_context(&format!("http://{addr}"), "expired-token")?;

    let summary = ask_project(ctx)
        .vus(1)
        .duration(Duration::from_millis(800))
        .await?;

    assert_eq!(tally(&summary, STATUS_CHECK), (0, 1));
    assert_eq!(tally(&summary, LATENCY_CHECK), (1, 0));
    assert_eq!(summary.failed_requests, 1);
    assert!(!summary.all_checks_passed());
    Ok(())
}

#[tokio::test]
async fn slow_response_fails_latency_only() -> anyhow::Result<()> {
    let addr = mock(Duration::from_millis(3_100)).await?;
    let ctx = ask_context(&format!("http://{addr}"), MOCK_TOKEN)?;

    let summary = ask_project(ctx)
        .vus(1)
        .duration(Duration::from_millis(3_600))
        .await?;

    assert_eq!(tally(&summary, STATUS_CHECK), (1, 0));
    assert_eq!(tally(&summary, LATENCY_CHECK), (0, 1));
    Ok(())
}

#[tokio::test]
async fn unreachable_service_fails_status() -> anyhow::Result<()> {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
        listener.local_addr()?.port()
    };
    let ctx = ask_context(&format!("http://127.0.0.1:{port}"), MOCK_TOKEN)?;

    let summary = ask_project(ctx)
        .vus(2)
        .duration(Duration::from_millis(500))
        .await?;

    assert_eq!(tally(&summary, STATUS_CHECK), (0, 2));
    assert_eq!(tally(&summary, LATENCY_CHECK), (2, 0));
    assert_eq!(summary.failed_requests, 2);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn every_iteration_records_both_checks() -> anyhow::Result<()> {
    let addr = mock(Duration::ZERO).await?;
    let ctx = ask_context(&format!("http://{addr}"), MOCK_TOKEN)?;
    let vus = 10;

    let summary = ask_project(ctx)
        .vus(vus)
        .duration(Duration::from_millis(2_500))
        .await?;

    // Paced at one iteration per second per virtual user.
    assert!(summary.iterations >= vus as u64);
    assert!(summary.iterations <= 3 * vus as u64);

    // Every VU is sleeping at shutdown, so each has one started iteration
    // whose checks are recorded but which is not counted as complete.
    let expected = summary.iterations + vus as u64;
    assert_eq!(tally(&summary, STATUS_CHECK), (expected, 0));
    assert_eq!(tally(&summary, LATENCY_CHECK), (expected, 0));
    assert_eq!(summary.requests, expected);

    let report = summary.to_string();
    assert!(report.contains("✓ status is 200"));
    assert!(report.contains("✓ response time < 3s"));
    Ok(())
}
