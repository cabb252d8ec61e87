use thiserror::Error;

#[derive(Debug, Error)]
pub enum RunError {
    #[error("Run was already started; a controller drives exactly one run.")]
    AlreadyStarted,
    #[error("Summary is only available once the run has completed.")]
    NotCompleted,
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
