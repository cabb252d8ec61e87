use tokio::sync::oneshot::{self, error::TryRecvError};

use crate::error::PoolError;

/// Result slot of one submitted task.
#[must_use = "a task handle should be waited on or explicitly dropped"]
#[derive(Debug)]
pub struct TaskHandle<T> {
    receiver: oneshot::Receiver<Result<T, PoolError>>,
}

impl<T> TaskHandle<T> {
    pub(super) const fn new(receiver: oneshot::Receiver<Result<T, PoolError>>) -> Self {
        Self { receiver }
    }

    /// Blocks until the task has finished and returns its value.
    ///
    /// Must not be called from inside an async runtime.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::TaskPanicked`] when the task panicked and
    /// [`PoolError::TaskAbandoned`] when it was dropped without running.
    pub fn wait(self) -> Result<T, PoolError> {
        self.receiver
            .blocking_recv()
            .unwrap_or(Err(PoolError::TaskAbandoned))
    }

    /// Returns the result if the task already finished, without blocking.
    pub fn try_wait(&mut self) -> Option<Result<T, PoolError>> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Closed) => Some(Err(PoolError::TaskAbandoned)),
        }
    }
}
