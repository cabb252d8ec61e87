use std::time::Duration;

use serde::Serialize;

/// Why a request attempt produced no response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureKind {
    Timeout,
    Connect,
    Protocol,
    Panic,
    Other,
}

impl FailureKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            FailureKind::Timeout => "timeout",
            FailureKind::Connect => "connect",
            FailureKind::Protocol => "protocol",
            FailureKind::Panic => "panic",
            FailureKind::Other => "other",
        }
    }
}

/// Classified result of one request attempt.
///
/// Any received response is a `Success`, whatever its status code; only
/// transport-level problems are a `Failure`.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success { latency_ms: f64, status_code: u16 },
    Failure { kind: FailureKind, reason: String },
}

impl Outcome {
    #[must_use]
    pub fn success(elapsed: Duration, status_code: u16) -> Self {
        Outcome::Success {
            latency_ms: duration_to_ms(elapsed),
            status_code,
        }
    }

    #[must_use]
    pub fn failure(kind: FailureKind, reason: impl Into<String>) -> Self {
        Outcome::Failure {
            kind,
            reason: reason.into(),
        }
    }
}

/// Millisecond value of a duration, keeping sub-millisecond precision.
#[expect(
    clippy::float_arithmetic,
    reason = "Latency is reported as fractional milliseconds"
)]
#[must_use]
pub fn duration_to_ms(elapsed: Duration) -> f64 {
    elapsed.as_secs_f64() * 1_000.0
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub status_2xx: u64,
    pub status_3xx: u64,
    pub status_4xx: u64,
    pub status_5xx: u64,
    pub status_other: u64,
}

impl StatusCounts {
    pub(crate) const fn increment(&mut self, status_code: u16) {
        match status_code {
            200..=299 => self.status_2xx = self.status_2xx.saturating_add(1),
            300..=399 => self.status_3xx = self.status_3xx.saturating_add(1),
            400..=499 => self.status_4xx = self.status_4xx.saturating_add(1),
            500..=599 => self.status_5xx = self.status_5xx.saturating_add(1),
            _ => self.status_other = self.status_other.saturating_add(1),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FailureCounts {
    pub timeout: u64,
    pub connect: u64,
    pub protocol: u64,
    pub panic: u64,
    pub other: u64,
}

impl FailureCounts {
    pub(crate) const fn increment(&mut self, kind: FailureKind) {
        match kind {
            FailureKind::Timeout => self.timeout = self.timeout.saturating_add(1),
            FailureKind::Connect => self.connect = self.connect.saturating_add(1),
            FailureKind::Protocol => self.protocol = self.protocol.saturating_add(1),
            FailureKind::Panic => self.panic = self.panic.saturating_add(1),
            FailureKind::Other => self.other = self.other.saturating_add(1),
        }
    }
}

/// Latency statistics over successful requests, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatencyStats {
    pub min_ms: f64,
    pub max_ms: f64,
    pub mean_ms: f64,
    pub p50_ms: f64,
    pub p90_ms: f64,
    pub p99_ms: f64,
}

/// Final aggregate of a run.
///
/// `latency` is `None` when no request succeeded; min/max/mean are then
/// unavailable rather than zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub success_count: u64,
    pub failure_count: u64,
    pub latency: Option<LatencyStats>,
    pub status_counts: StatusCounts,
    pub failure_counts: FailureCounts,
}

impl Summary {
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.success_count.saturating_add(self.failure_count)
    }
}
