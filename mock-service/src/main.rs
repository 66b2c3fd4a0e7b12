use clap::Parser;
use mock_service::{tps_measure_task, MockConfig};
use std::net::SocketAddr;
use std::time::Duration;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Stand-in for the AI service's ask endpoint.
#[derive(Parser)]
#[command(about, long_about = None)]
struct Cli {
    /// Address to listen on
    #[clap(long, default_value = "0.0.0.0:3002")]
    addr: SocketAddr,

    /// Bearer token the ask endpoint accepts
    #[clap(long, env = "MOCK_SERVICE_TOKEN", default_value = "mock-token")]
    token: String,

    /// Delay before every ask response, e.g. `500ms`
    #[clap(long, default_value = "0ms", value_parser = humantime::parse_duration)]
    delay: Duration,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("mock_service=debug,tower_http=debug")),
        )
        .init();

    let cli = Cli::parse();

    tokio::spawn(tps_measure_task());

    tracing::info!("Mock service listening on {}", cli.addr);
    mock_service::run(
        cli.addr,
        MockConfig {
            token: cli.token,
            delay: cli.delay,
        },
    )
    .await?;

    Ok(())
}
