use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;

use tracing::debug;

use super::client::{BlockingGet, HttpClientFactory, RequestTimeouts};
use crate::metrics::{FailureKind, MetricsAggregator, Outcome};
use crate::pool::panic_message;

/// One GET against the target URL, timed and reported exactly once.
pub struct RequestTask<F: HttpClientFactory> {
    url: Arc<str>,
    timeouts: RequestTimeouts,
    factory: Arc<F>,
    metrics: Arc<MetricsAggregator>,
}

impl<F: HttpClientFactory> RequestTask<F> {
    #[must_use]
    pub const fn new(
        url: Arc<str>,
        timeouts: RequestTimeouts,
        factory: Arc<F>,
        metrics: Arc<MetricsAggregator>,
    ) -> Self {
        Self {
            url,
            timeouts,
            factory,
            metrics,
        }
    }

    /// Executes the request and records its outcome.
    ///
    /// Never panics outward: a panic inside the client collaborator is
    /// recorded as a [`FailureKind::Panic`] failure.
    pub fn run(self) -> Outcome {
        let url = Arc::clone(&self.url);
        let factory = Arc::clone(&self.factory);
        let timeouts = self.timeouts;

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            execute(factory.as_ref(), &url, timeouts)
        }))
        .unwrap_or_else(|payload| {
            Outcome::failure(
                FailureKind::Panic,
                format!("request panicked: {}", panic_message(payload.as_ref())),
            )
        });

        match &outcome {
            Outcome::Success {
                latency_ms,
                status_code,
            } => debug!(
                "GET {} -> {} in {:.2} ms",
                self.url, status_code, latency_ms
            ),
            Outcome::Failure { kind, reason } => {
                debug!("GET {} failed ({}): {}", self.url, kind.as_str(), reason);
            }
        }

        self.metrics.record(&outcome);
        outcome
    }
}

fn execute<F: HttpClientFactory>(factory: &F, url: &str, timeouts: RequestTimeouts) -> Outcome {
    let client = match factory.build(timeouts) {
        Ok(client) => client,
        Err(err) => return Outcome::failure(err.kind, err.reason),
    };

    // Latency covers the request exchange only, not client construction.
    let started = Instant::now();
    match client.get(url) {
        Ok(status_code) => Outcome::success(started.elapsed(), status_code),
        Err(err) => Outcome::failure(err.kind, err.reason),
    }
}
