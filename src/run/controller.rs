use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use super::state::RunState;
use crate::args::RunMode;
use crate::config::RunConfig;
use crate::error::{AppResult, ConfigError, PoolError, RunError};
use crate::http::{HttpClientFactory, ReqwestClientFactory, RequestTask};
use crate::metrics::{FailureKind, MetricsAggregator, Outcome, Summary};
use crate::pool::{TaskHandle, WorkerPool};

/// Everything the reporter needs once a run has completed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    pub url: String,
    pub concurrency: usize,
    pub mode: RunMode,
    pub started_at: String,
    #[serde(serialize_with = "serialize_secs")]
    pub elapsed: Duration,
    pub submitted: u64,
    pub summary: Summary,
}

impl RunReport {
    /// Completed requests per second over the whole run.
    #[expect(
        clippy::float_arithmetic,
        reason = "Throughput is a floating point rate"
    )]
    #[must_use]
    pub fn throughput(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.summary.total() as f64 / secs
        } else {
            0.0
        }
    }
}

fn serialize_secs<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_f64(value.as_secs_f64())
}

/// Owns the worker pool and the metrics aggregator for exactly one run.
pub struct RunController<F: HttpClientFactory = ReqwestClientFactory> {
    config: Arc<RunConfig>,
    factory: Arc<F>,
    metrics: Arc<MetricsAggregator>,
    state: RunState,
    report: Option<RunReport>,
}

impl RunController<ReqwestClientFactory> {
    /// Validates `config` and prepares a run against real HTTP endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when `config` is invalid. Nothing is started.
    pub fn new(config: RunConfig) -> Result<Self, ConfigError> {
        Self::with_factory(config, ReqwestClientFactory)
    }
}

impl<F: HttpClientFactory> RunController<F> {
    /// Validates `config` and prepares a run using `factory` for clients.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when `config` is invalid. The factory is
    /// never invoked in that case.
    pub fn with_factory(config: RunConfig, factory: F) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config: Arc::new(config),
            factory: Arc::new(factory),
            metrics: Arc::new(MetricsAggregator::new()),
            state: RunState::Idle,
            report: None,
        })
    }

    #[must_use]
    pub const fn state(&self) -> RunState {
        self.state
    }

    /// Runs the benchmark to completion and returns its report.
    ///
    /// Individual request failures never abort the run.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::AlreadyStarted`] on a second call, or a
    /// [`PoolError`] when the pool cannot start or loses its workers.
    pub fn run(&mut self) -> AppResult<RunReport> {
        if self.state != RunState::Idle {
            return Err(RunError::AlreadyStarted.into());
        }

        let pool = WorkerPool::start(self.config.concurrency)?;
        self.transition(RunState::Running);
        let started_at = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let started = Instant::now();
        let deadline = match self.config.mode {
            RunMode::Count => {
                debug!(
                    "Count mode: --time ({}s) does not bound the run",
                    self.config.duration.as_secs()
                );
                None
            }
            RunMode::Duration => started.checked_add(self.config.duration),
        };
        info!(
            url = %self.config.url,
            concurrency = pool.concurrency(),
            mode = self.config.mode.as_str(),
            "Benchmark started"
        );

        let url: Arc<str> = Arc::from(self.config.url.as_str());
        let mut pending: VecDeque<TaskHandle<Outcome>> = VecDeque::new();
        let mut submitted: u64 = 0;
        let mut fatal: Option<PoolError> = None;

        while self.should_submit(submitted, deadline) {
            let task = RequestTask::new(
                Arc::clone(&url),
                self.config.timeouts,
                Arc::clone(&self.factory),
                Arc::clone(&self.metrics),
            );
            match pool.submit(move || task.run()) {
                Ok(handle) => {
                    pending.push_back(handle);
                    submitted = submitted.saturating_add(1);
                }
                Err(err) => {
                    fatal = Some(err);
                    break;
                }
            }
            self.reap_finished(&mut pending, &mut fatal);
        }

        self.transition(RunState::Draining);
        debug!(submitted, outstanding = pending.len(), "Waiting for outstanding tasks");
        for handle in pending {
            self.settle(handle.wait(), &mut fatal);
        }
        if let Err(err) = pool.shutdown()
            && fatal.is_none()
        {
            fatal = Some(err);
        }
        let elapsed = started.elapsed();
        self.transition(RunState::Completed);

        if let Some(err) = fatal {
            return Err(err.into());
        }

        let report = RunReport {
            url: self.config.url.clone(),
            concurrency: self.config.concurrency,
            mode: self.config.mode,
            started_at,
            elapsed,
            submitted,
            summary: self.metrics.summarize(),
        };
        info!(
            submitted,
            succeeded = report.summary.success_count,
            failed = report.summary.failure_count,
            "Benchmark finished in {:.2}s",
            elapsed.as_secs_f64()
        );
        self.report = Some(report.clone());
        Ok(report)
    }

    /// Final aggregate of a completed run. Repeated calls return equal values.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::NotCompleted`] until the run has completed.
    pub fn summary(&self) -> Result<Summary, RunError> {
        if self.state != RunState::Completed {
            return Err(RunError::NotCompleted);
        }
        Ok(self.metrics.summarize())
    }

    /// Report of the completed run.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::NotCompleted`] until a run has completed successfully.
    pub fn report(&self) -> Result<&RunReport, RunError> {
        self.report.as_ref().ok_or(RunError::NotCompleted)
    }

    fn transition(&mut self, next: RunState) {
        debug!("Run state {} -> {}", self.state, next);
        self.state = next;
    }

    fn should_submit(&self, submitted: u64, deadline: Option<Instant>) -> bool {
        match self.config.mode {
            RunMode::Count => submitted < self.config.total_requests,
            RunMode::Duration => deadline.is_some_and(|deadline| Instant::now() < deadline),
        }
    }

    /// Settles handles that already finished, oldest first.
    fn reap_finished(
        &self,
        pending: &mut VecDeque<TaskHandle<Outcome>>,
        fatal: &mut Option<PoolError>,
    ) {
        while let Some(front) = pending.front_mut() {
            let Some(result) = front.try_wait() else {
                break;
            };
            drop(pending.pop_front());
            self.settle(result, fatal);
        }
    }

    fn settle(&self, result: Result<Outcome, PoolError>, fatal: &mut Option<PoolError>) {
        match result {
            Ok(_) => {}
            // The task never reached its own recording step.
            Err(PoolError::TaskPanicked { message }) => {
                warn!("Request task panicked outside its guard: {}", message);
                self.metrics
                    .record(&Outcome::failure(FailureKind::Panic, message));
            }
            Err(err) => {
                if fatal.is_none() {
                    *fatal = Some(err);
                }
            }
        }
    }
}
