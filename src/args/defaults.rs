use std::time::Duration;

pub(crate) const DEFAULT_USER_AGENT: &str = concat!("httpbench/", env!("CARGO_PKG_VERSION"));

/// Tasks submitted per run in count mode when `--requests` is not given.
pub const DEFAULT_TOTAL_REQUESTS: u64 = 1_000;

/// Bounded queue slots per worker before `submit` applies back-pressure.
pub const DEFAULT_QUEUE_DEPTH_PER_WORKER: usize = 4;

/// Read and write timeout applied to every request.
pub(crate) const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);
