use crate::{ConfigError, DEFAULT_DURATION, DEFAULT_VUS};
use std::time::Duration;

/// Concurrency and duration of a single load run.
///
/// Fixed once the run starts; every virtual user observes the same values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunConfig {
    pub vus: usize,
    pub duration: Duration,
}

impl RunConfig {
    pub fn new(vus: usize, duration: Duration) -> Result<Self, ConfigError> {
        let config = Self { vus, duration };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.vus == 0 {
            return Err(ConfigError::NoVirtualUsers);
        }

        if self.duration.is_zero() {
            return Err(ConfigError::ZeroDuration);
        }

        Ok(())
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            vus: DEFAULT_VUS,
            duration: DEFAULT_DURATION,
        }
    }
}

/// Parse a human readable duration such as `15s` or `1m 30s`.
pub fn parse_duration(input: &str) -> Result<Duration, ConfigError> {
    let duration =
        humantime::parse_duration(input.trim()).map_err(|err| ConfigError::InvalidDuration {
            input: input.to_string(),
            reason: err.to_string(),
        })?;

    if duration.is_zero() {
        return Err(ConfigError::ZeroDuration);
    }

    Ok(duration)
}
