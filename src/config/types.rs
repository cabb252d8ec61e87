use std::time::Duration;

use serde::Deserialize;

use crate::args::{OutputFormat, RunMode, parse_duration_arg};
use crate::error::{AppError, AppResult, ConfigError, ValidationError};

/// On-disk configuration; every field is optional and CLI flags win.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub url: Option<String>,
    pub clients: Option<usize>,
    pub time: Option<u64>,
    pub requests: Option<u64>,
    pub mode: Option<RunMode>,
    pub timeout: Option<DurationValue>,
    pub output_format: Option<OutputFormat>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self) -> AppResult<Duration> {
        match self {
            DurationValue::Seconds(secs) => {
                if *secs == 0 {
                    Err(AppError::config(ConfigError::InvalidTimeout {
                        source: ValidationError::DurationZero,
                    }))
                } else {
                    Ok(Duration::from_secs(*secs))
                }
            }
            DurationValue::Text(text) => parse_duration_arg(text),
        }
    }
}
