use ask_load::cli::AskLoadCli;
use ask_load::{ask_project, AskContext, Expiry};
use clap::Parser;
use loadcheck::prelude::*;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("loadcheck=info,ask_load=info")),
        )
        .init();

    let cli = AskLoadCli::parse();
    let config = cli.run_config()?;
    let target = cli.target()?;

    match target.credential().expiry(SystemTime::now(), config.duration) {
        Expiry::Expired { since } => warn!(
            "Bearer token expired {} ago; every `status is 200` check will likely fail",
            whole_secs(since)
        ),
        Expiry::ExpiresDuringRun { remaining } => warn!(
            "Bearer token expires in {}, before the run ends",
            whole_secs(remaining)
        ),
        Expiry::Valid { remaining } => {
            info!("Bearer token valid for {}", whole_secs(remaining))
        }
        Expiry::Unknown => info!("Bearer token expiry unknown"),
    }

    if let Some(addr) = cli.metrics_addr {
        PrometheusBuilder::new().with_http_listener(addr).install()?;
        info!("Serving metrics on http://{addr}/metrics");
    }

    let ctx = Arc::new(AskContext::new(target)?);
    let summary = ask_project(ctx).config(config).await?;

    if !summary.all_checks_passed() && !cli.no_fail_on_checks {
        anyhow::bail!(
            "{} of {} checks failed",
            summary.checks_failed(),
            summary.checks_passed() + summary.checks_failed()
        );
    }

    Ok(())
}

fn whole_secs(dur: Duration) -> humantime::FormattedDuration {
    humantime::format_duration(Duration::from_secs(dur.as_secs()))
}
