pub mod cli;
pub mod credential;
pub mod scenario;
pub mod target;

pub use credential::{Credential, Expiry};
pub use scenario::{ask_project, AskContext};
pub use target::AskTarget;
