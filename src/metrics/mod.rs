//! Outcome aggregation and summary statistics.
mod aggregator;
mod histogram;
mod types;


pub use aggregator::MetricsAggregator;
pub use histogram::LatencyHistogram;
pub use types::{
    FailureCounts, FailureKind, LatencyStats, Outcome, StatusCounts, Summary, duration_to_ms,
};
