//! CLI argument types and parsing helpers.
mod cli;
mod defaults;
pub(crate) mod parsers;
mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use cli::BenchArgs;
pub use defaults::{DEFAULT_QUEUE_DEPTH_PER_WORKER, DEFAULT_TOTAL_REQUESTS};
pub use types::{OutputFormat, PositiveU64, RunMode};

pub(crate) use defaults::{DEFAULT_REQUEST_TIMEOUT, DEFAULT_USER_AGENT};
pub(crate) use parsers::parse_duration_arg;
