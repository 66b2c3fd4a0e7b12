use crate::measurement::Measurement;
use crate::task_atomics::TaskAtomics;
use crate::transaction::VU_HOOK;
use std::future::Future;
use std::sync::atomic::Ordering;
use tokio::task::JoinHandle;
#[allow(unused)]
use tracing::{debug, error, info, trace, warn, Instrument};

/// A pool of virtual users, each looping the scenario until shut down.
pub(crate) struct VirtualUsers<T> {
    scenario: T,
    tasks: Vec<JoinHandle<()>>,
    task_atomics: TaskAtomics,
}

impl<T, F> VirtualUsers<T>
where
    T: Fn() -> F + Send + Sync + 'static + Clone,
    F: Future<Output = ()> + Send + 'static,
{
    pub fn new(scenario: T) -> Self {
        Self {
            scenario,
            tasks: vec![],
            task_atomics: TaskAtomics::new(),
        }
    }

    /// Spawn virtual users until `vus` are running.
    pub fn spawn(&mut self, vus: usize) {
        while self.tasks.len() < vus {
            let id = self.tasks.len();
            let scenario = self.scenario.clone();
            let vu_data = self.task_atomics.clone_to_vu_data();
            let iterations = self.task_atomics.iterations();

            let vu = async move {
                trace!("Virtual user started");
                loop {
                    scenario().await;
                    iterations.fetch_add(1, Ordering::Relaxed);

                    #[cfg(feature = "metrics")]
                    metrics::counter!(loadcheck_core::ITERATIONS_METRIC).increment(1);
                }
            };

            self.tasks.push(tokio::spawn(
                VU_HOOK
                    .scope(vu_data, vu)
                    .instrument(tracing::debug_span!("vu", id)),
            ));
        }
    }

    pub fn vus(&self) -> usize {
        self.tasks.len()
    }

    /// Abort every virtual user, including in-flight requests, and collect
    /// what they recorded.
    pub async fn shutdown(mut self) -> Measurement {
        let tasks: Vec<_> = self.tasks.drain(..).collect();
        for handle in &tasks {
            handle.abort();
        }

        for handle in tasks {
            match handle.await {
                Err(err) if err.is_panic() => error!("Virtual user panicked: {err}"),
                _ => {}
            }
        }

        self.task_atomics.collect()
    }
}

impl<T> Drop for VirtualUsers<T> {
    fn drop(&mut self) {
        for handle in &self.tasks {
            handle.abort();
        }
    }
}
