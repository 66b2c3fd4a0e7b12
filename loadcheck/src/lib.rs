#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

pub mod check;
pub mod http;
pub mod scenario;
#[doc(hidden)]
pub mod transaction;

pub(crate) mod measurement;
pub(crate) mod task_atomics;
pub(crate) mod vus;

pub use loadcheck_core as core;
pub use loadcheck_core::{ConfigError, RunConfig, RunSummary};
pub use loadcheck_macros::scenario;
pub use scenario::Scenario;

/// Output of awaiting a configured scenario.
pub type RunResult = Result<RunSummary, ConfigError>;

pub mod prelude {
    pub use crate::check::check;
    pub use crate::http::{HttpResult, RequestDescriptor};
    pub use crate::scenario::ConfigurableScenario;
    pub use crate::RunResult;
    pub use loadcheck_core::{Check, CheckSummary, RunConfig, RunSummary};
    pub use loadcheck_macros::scenario;
}
