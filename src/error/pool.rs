use super::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PoolError {
    #[error("Invalid pool configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("Failed to spawn worker {index}: {source}")]
    SpawnWorker {
        index: usize,
        #[source]
        source: std::io::Error,
    },
    #[error("Task queue is closed; no workers are accepting tasks.")]
    QueueClosed,
    #[error("Task panicked: {message}")]
    TaskPanicked { message: String },
    #[error("Task was dropped before it completed.")]
    TaskAbandoned,
    #[error("Worker '{name}' terminated abnormally.")]
    WorkerPanicked { name: String },
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[cfg(test)]
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}
