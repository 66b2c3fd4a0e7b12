//! The ask-project-question scenario
use crate::target::AskTarget;
use loadcheck::prelude::*;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::error;

pub const STATUS_CHECK: &str = "status is 200";
pub const LATENCY_CHECK: &str = "response time < 3s";

/// Responses must arrive strictly faster than this.
pub const LATENCY_THRESHOLD: Duration = Duration::from_millis(3_000);

/// Pause after every iteration.
pub const PACING: Duration = Duration::from_secs(1);

/// Give up on a request after this long, as k6 does by default.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Shared, read-only state handed to every virtual user.
#[derive(Clone, Debug)]
pub struct AskContext {
    pub target: AskTarget,
    pub client: Client,
}

impl AskContext {
    pub fn new(target: AskTarget) -> reqwest::Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("ask-load/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { target, client })
    }
}

pub fn ask_checks() -> [Check<'static, HttpResult>; 2] {
    [
        Check::new(STATUS_CHECK, |r: &HttpResult| r.is_status(200)),
        Check::new(LATENCY_CHECK, |r: &HttpResult| {
            r.duration < LATENCY_THRESHOLD
        }),
    ]
}

/// One GET against the ask endpoint, two checks, then a one second pause.
#[scenario]
pub async fn ask_project(ctx: Arc<AskContext>) {
    match ctx.target.request() {
        Ok(request) => {
            let res = loadcheck::http::get(&ctx.client, &request).await;
            check(&res, &ask_checks());
        }
        Err(err) => error!("Unable to build ask request: {err}"),
    }

    tokio::time::sleep(PACING).await;
}
