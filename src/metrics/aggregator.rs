use std::sync::{Mutex, MutexGuard, PoisonError};

use super::histogram::LatencyHistogram;
use super::types::{FailureCounts, LatencyStats, Outcome, StatusCounts, Summary};

const MICROS_PER_MS: f64 = 1_000.0;

#[derive(Debug, Default)]
struct MetricsState {
    success_count: u64,
    failure_count: u64,
    latency_samples: Vec<f64>,
    status_counts: StatusCounts,
    failure_counts: FailureCounts,
}

/// Thread-safe sink for request outcomes.
///
/// Every mutation happens under one lock, so a success's count increment and
/// its latency sample are applied together: `latency_samples.len()` always
/// equals `success_count` for any observer.
#[derive(Debug, Default)]
pub struct MetricsAggregator {
    state: Mutex<MetricsState>,
}

impl MetricsAggregator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one outcome.
    pub fn record(&self, outcome: &Outcome) {
        let mut state = self.lock();
        match outcome {
            Outcome::Success {
                latency_ms,
                status_code,
            } => {
                state.success_count = state.success_count.saturating_add(1);
                state.latency_samples.push(sanitize_latency(*latency_ms));
                state.status_counts.increment(*status_code);
            }
            Outcome::Failure { kind, .. } => {
                state.failure_count = state.failure_count.saturating_add(1);
                state.failure_counts.increment(*kind);
            }
        }
    }

    /// Number of outcomes recorded so far.
    #[must_use]
    pub fn recorded(&self) -> u64 {
        let state = self.lock();
        state.success_count.saturating_add(state.failure_count)
    }

    /// Computes the summary over everything recorded so far.
    ///
    /// Only meaningful once every reporter has finished; calling it again
    /// without new records returns the same values.
    #[must_use]
    pub fn summarize(&self) -> Summary {
        let state = self.lock();
        Summary {
            success_count: state.success_count,
            failure_count: state.failure_count,
            latency: latency_stats(&state.latency_samples),
            status_counts: state.status_counts,
            failure_counts: state.failure_counts,
        }
    }

    fn lock(&self) -> MutexGuard<'_, MetricsState> {
        // No code path panics while holding the lock, so a poisoned state is still consistent.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn sanitize_latency(latency_ms: f64) -> f64 {
    if latency_ms.is_finite() {
        latency_ms.max(0.0)
    } else {
        0.0
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "Mean and percentile conversion operate on fractional milliseconds"
)]
fn latency_stats(samples: &[f64]) -> Option<LatencyStats> {
    let first = samples.first().copied()?;
    let (min_ms, max_ms, sum) = samples
        .iter()
        .fold((first, first, 0.0_f64), |(min, max, sum), &value| {
            (min.min(value), max.max(value), sum + value)
        });
    let count = samples.len() as f64;
    // Rounding in the sum must not push the mean outside the observed range.
    let mean_ms = (sum / count).max(min_ms).min(max_ms);

    let (p50_ms, p90_ms, p99_ms) = match build_histogram(samples) {
        Ok(histogram) => {
            let (p50, p90, p99) = histogram.percentiles();
            let to_ms = |micros: u64| (micros as f64 / MICROS_PER_MS).max(min_ms).min(max_ms);
            (to_ms(p50), to_ms(p90), to_ms(p99))
        }
        Err(err) => {
            tracing::warn!("Percentiles unavailable: {}", err);
            (mean_ms, mean_ms, mean_ms)
        }
    };

    Some(LatencyStats {
        min_ms,
        max_ms,
        mean_ms,
        p50_ms,
        p90_ms,
        p99_ms,
    })
}

#[expect(
    clippy::float_arithmetic,
    reason = "Samples are converted from fractional milliseconds to microseconds"
)]
fn build_histogram(samples: &[f64]) -> Result<LatencyHistogram, String> {
    let mut histogram = LatencyHistogram::new()?;
    for sample in samples {
        let micros = (sample * MICROS_PER_MS).round() as u64;
        histogram.record(micros)?;
    }
    Ok(histogram)
}
