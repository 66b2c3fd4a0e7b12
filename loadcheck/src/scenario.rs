//! Scenario handle and run loop
use crate::vus::VirtualUsers;
use crate::RunResult;
use loadcheck_core::RunConfig;
use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
    time::Duration,
};
use tokio::time::Instant;
#[allow(unused_imports)]
use tracing::{debug, error, info, instrument, trace, warn, Instrument};

/// Load test scenario structure
///
/// Handler for running scenarios. Not intended for manual creation, use the
/// [`#[scenario]`](loadcheck_macros::scenario) macro which will add these methods to functions.
#[pin_project::pin_project]
pub struct Scenario<T> {
    name: String,
    func: T,
    runner_fut: Option<Pin<Box<dyn Future<Output = RunResult> + Send>>>,
    config: RunConfig,
}

impl<T> Scenario<T> {
    #[doc(hidden)]
    pub fn new(name: &str, func: T) -> Self {
        Self {
            name: name.to_string(),
            func,
            runner_fut: None,
            config: RunConfig::default(),
        }
    }
}

impl<T, F> Future for Scenario<T>
where
    T: Fn() -> F + Send + 'static + Clone + Sync,
    F: Future<Output = ()> + Send + 'static,
{
    type Output = RunResult;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        if self.runner_fut.is_none() {
            let name = self.name.clone();
            let func = self.func.clone();
            let config = self.config;
            self.runner_fut = Some(Box::pin(async move {
                run_scenario(name, func, config).await
            }));
        }

        if let Some(runner) = &mut self.runner_fut {
            runner.as_mut().poll(cx)
        } else {
            unreachable!()
        }
    }
}

pub trait ConfigurableScenario<T: Send>: Future<Output = T> + Sized + Send {
    fn vus(self, vus: usize) -> Self;
    fn duration(self, duration: Duration) -> Self;
    fn config(self, config: RunConfig) -> Self;
}

impl<T, F> ConfigurableScenario<RunResult> for Scenario<T>
where
    T: Fn() -> F + Send + 'static + Clone + Sync,
    F: Future<Output = ()> + Send + 'static,
{
    /// Run the scenario with the given number of virtual users. Defaults to 50.
    ///
    /// # Example
    /// ```no_run
    /// use loadcheck::prelude::*;
    /// use std::time::Duration;
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let summary = my_scenario()
    ///         .vus(10)
    ///         .duration(Duration::from_secs(30))
    ///         .await
    ///         .unwrap();
    ///     println!("{summary}");
    /// }
    ///
    /// #[scenario]
    /// async fn my_scenario() {
    /// }
    /// ```
    fn vus(mut self, vus: usize) -> Self {
        self.config.vus = vus;
        self
    }

    /// Run the scenario for the given wall-clock duration. Defaults to 15s.
    ///
    /// Virtual users still running when the duration elapses are aborted,
    /// including any in-flight request.
    fn duration(mut self, duration: Duration) -> Self {
        self.config.duration = duration;
        self
    }

    /// Replace both the virtual user count and duration.
    fn config(mut self, config: RunConfig) -> Self {
        self.config = config;
        self
    }
}

#[instrument(name="scenario", skip_all, fields(name=name))]
pub(crate) async fn run_scenario<T, F>(name: String, scenario: T, config: RunConfig) -> RunResult
where
    T: Fn() -> F + Send + Sync + 'static + Clone,
    F: Future<Output = ()> + Send + 'static,
{
    config.validate()?;

    info!(
        "Running {name} with {} VUs for {}",
        config.vus,
        humantime::format_duration(config.duration)
    );

    let start = Instant::now();

    let mut vus = VirtualUsers::new(scenario);
    vus.spawn(config.vus);
    debug!("Spawned {} virtual users", vus.vus());

    tokio::time::sleep(config.duration).await;

    let elapsed = start.elapsed();
    let summary = vus.shutdown().await.into_summary(&name, config.vus, elapsed);

    info!("Scenario complete\n{summary}");

    Ok(summary)
}
