mod utils;
#[allow(unused)]
use utils::*;

use loadcheck::prelude::*;
use reqwest::Client;
use std::net::SocketAddr;
use std::sync::OnceLock;
use std::time::Duration;
use url::Url;

static CLIENT: OnceLock<Client> = OnceLock::new();
static MOCK_ADDR: OnceLock<SocketAddr> = OnceLock::new();

#[tokio::test]
async fn zero_argument_scenario() -> anyhow::Result<()> {
    let addr = mock(Duration::ZERO).await?;
    MOCK_ADDR.get_or_init(|| addr);

    let summary = server_error_scenario()
        .vus(3)
        .duration(Duration::from_millis(500))
        .await?;

    assert_eq!(summary.name, "server_error_scenario");
    assert_eq!(summary.vus, 3);
    assert_eq!(summary.requests, 3);
    assert_eq!(summary.failed_requests, 3);
    let check = summary.check("is server error").unwrap();
    assert_eq!((check.passes, check.fails), (3, 0));
    Ok(())
}

#[tokio::test]
async fn scenario_arguments_are_cloned_per_iteration() -> anyhow::Result<()> {
    let addr = mock(Duration::ZERO).await?;
    let url = Url::parse(&format!("http://{addr}/delay/ms/20/status/200"))?;

    let summary = delay_scenario(Client::new(), url)
        .config(RunConfig {
            vus: 2,
            duration: Duration::from_millis(1_500),
        })
        .await?;

    // Each VU completes one paced iteration and records checks for a second.
    assert_eq!(summary.iterations, 2);
    let check = summary.check("status is 200").unwrap();
    assert_eq!((check.passes, check.fails), (4, 0));
    assert!(summary.latency_p50 >= Duration::from_millis(20));
    Ok(())
}

#[tokio::test]
async fn invalid_config_is_rejected_before_running() {
    let res = delay_scenario(Client::new(), Url::parse("http://127.0.0.1:1/").unwrap())
        .vus(0)
        .await;

    assert!(matches!(res, Err(loadcheck::ConfigError::NoVirtualUsers)));
}

/* Scenario Helpers */

#[scenario]
async fn server_error_scenario() {
    let client = CLIENT.get_or_init(Client::new);
    let Some(addr) = MOCK_ADDR.get() else {
        return;
    };
    let request = RequestDescriptor {
        url: Url::parse(&format!("http://{addr}/delay/ms/1/status/500")).unwrap(),
        headers: Default::default(),
    };

    let res = loadcheck::http::get(client, &request).await;
    check(
        &res,
        &[Check::new("is server error", |r: &HttpResult| {
            r.is_status(500)
        })],
    );

    tokio::time::sleep(Duration::from_secs(1)).await;
}

#[scenario]
async fn delay_scenario(client: Client, url: Url) {
    let request = RequestDescriptor {
        url,
        headers: Default::default(),
    };

    let res = loadcheck::http::get(&client, &request).await;
    check(
        &res,
        &[Check::new("status is 200", |r: &HttpResult| r.is_status(200))],
    );

    tokio::time::sleep(Duration::from_secs(1)).await;
}
