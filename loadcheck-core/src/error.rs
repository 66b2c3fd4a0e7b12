use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("At least one virtual user is required")]
    NoVirtualUsers,

    #[error("Run duration must be greater than zero")]
    ZeroDuration,

    #[error("Invalid duration `{input}`: {reason}")]
    InvalidDuration { input: String, reason: String },
}
