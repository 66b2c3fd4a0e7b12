use ask_load::{AskContext, AskTarget, Credential};
use mock_service::MockConfig;
use std::net::SocketAddr;
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use tracing::error;
use tracing_subscriber::FmtSubscriber;

#[allow(unused)]
pub const MOCK_TOKEN: &str = "mock-token";
#[allow(unused)]
pub const PROJECT_ID: &str = "68d509597520d838528cb390";
#[allow(unused)]
pub const QUESTION: &str = "What is summary of this project";

#[allow(unused)]
pub fn init() {
    static ONCE_LOCK: OnceLock<()> = OnceLock::new();

    ONCE_LOCK.get_or_init(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            default_panic(info);
            error!("Panic occurred: {info:?}");
        }));

        let _ = FmtSubscriber::builder()
            .with_env_filter("loadcheck=debug,ask_load=debug,mock_service=info")
            .try_init();
    });
}

/// Start a mock AI service answering after `delay`.
#[allow(unused)]
pub async fn mock(delay: Duration) -> anyhow::Result<SocketAddr> {
    init();

    let addr = mock_service::spawn(MockConfig {
        token: MOCK_TOKEN.to_string(),
        delay,
    })
    .await?;

    Ok(addr)
}

/// Scenario context pointing at `base_url` with the given token.
#[allow(unused)]
pub fn ask_context(base_url: &str, token: &str) -> anyhow::Result<Arc<AskContext>> {
    let target = AskTarget::new(base_url, PROJECT_ID, QUESTION, Credential::new(token)?)?;
    Ok(Arc::new(AskContext::new(target)?))
}
