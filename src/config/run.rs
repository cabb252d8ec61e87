use std::time::{Duration, Instant};

use url::Url;

use crate::args::{BenchArgs, RunMode};
use crate::error::ConfigError;
use crate::http::RequestTimeouts;

/// Immutable parameters of one benchmark run.
///
/// Built once before the worker pool starts and shared read-only with every
/// request task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub url: String,
    pub concurrency: usize,
    pub total_requests: u64,
    pub mode: RunMode,
    pub duration: Duration,
    pub timeouts: RequestTimeouts,
}

impl RunConfig {
    /// Builds and validates the run configuration from merged CLI/config values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the URL is missing or malformed, or when
    /// the concurrency level or timeout is out of range.
    pub fn from_args(args: &BenchArgs) -> Result<Self, ConfigError> {
        let url = args.url.clone().ok_or(ConfigError::MissingUrl)?;
        let config = Self {
            url,
            concurrency: args.clients,
            total_requests: args.requests,
            mode: args.mode,
            duration: Duration::from_secs(args.time.get()),
            timeouts: RequestTimeouts::symmetric(args.request_timeout),
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks every invariant a run relies on.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let raw = self.url.trim();
        if raw.is_empty() {
            return Err(ConfigError::MissingUrl);
        }
        let parsed = Url::parse(raw).map_err(|err| ConfigError::InvalidUrl {
            url: raw.to_owned(),
            source: err,
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme {
                url: raw.to_owned(),
            });
        }
        if parsed.host_str().is_none_or(str::is_empty) {
            return Err(ConfigError::UrlMissingHost {
                url: raw.to_owned(),
            });
        }
        if self.concurrency == 0 {
            return Err(ConfigError::ConcurrencyTooSmall {
                value: self.concurrency,
            });
        }
        if self.timeouts.read.is_zero() || self.timeouts.write.is_zero() {
            return Err(ConfigError::TimeoutTooSmall);
        }
        if self.mode == RunMode::Duration && Instant::now().checked_add(self.duration).is_none() {
            return Err(ConfigError::DurationTooLarge {
                secs: self.duration.as_secs(),
            });
        }
        Ok(())
    }
}
