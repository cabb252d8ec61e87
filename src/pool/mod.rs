//! Fixed-size worker pool fed from one bounded FIFO queue.
mod handle;
mod worker;


use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use crate::args::DEFAULT_QUEUE_DEPTH_PER_WORKER;
use crate::error::{ConfigError, PoolError};

pub use handle::TaskHandle;
pub(crate) use worker::panic_message;

type Job = Box<dyn FnOnce() + Send + 'static>;

/// Runs submitted closures on exactly `concurrency` OS threads.
///
/// Tasks leave the queue in submission order; completion order across
/// workers is unspecified. Dropping the pool behaves like [`WorkerPool::shutdown`]
/// but discards worker failures.
pub struct WorkerPool {
    sender: Option<mpsc::Sender<Job>>,
    workers: Vec<JoinHandle<()>>,
    concurrency: usize,
}

impl WorkerPool {
    /// Starts `concurrency` workers with the default queue depth.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Config`] when `concurrency` is zero and
    /// [`PoolError::SpawnWorker`] when a thread cannot be spawned.
    pub fn start(concurrency: usize) -> Result<Self, PoolError> {
        let capacity = concurrency.saturating_mul(DEFAULT_QUEUE_DEPTH_PER_WORKER);
        Self::with_queue_capacity(concurrency, capacity)
    }

    /// Starts `concurrency` workers sharing a queue of `capacity` slots.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Config`] when `concurrency` is zero and
    /// [`PoolError::SpawnWorker`] when a thread cannot be spawned.
    pub fn with_queue_capacity(concurrency: usize, capacity: usize) -> Result<Self, PoolError> {
        if concurrency == 0 {
            return Err(PoolError::Config(ConfigError::ConcurrencyTooSmall {
                value: concurrency,
            }));
        }

        let (sender, receiver) = mpsc::channel::<Job>(capacity.max(1));
        let receiver = Arc::new(Mutex::new(receiver));
        let mut pool = Self {
            sender: Some(sender),
            workers: Vec::with_capacity(concurrency),
            concurrency,
        };
        for index in 0..concurrency {
            // On failure the partially built pool is dropped, which joins the started workers.
            let handle = worker::spawn_worker(index, Arc::clone(&receiver))?;
            pool.workers.push(handle);
        }
        debug!(concurrency, capacity, "Worker pool started");
        Ok(pool)
    }

    #[must_use]
    pub const fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Enqueues `task` and returns a handle to its result.
    ///
    /// Blocks while the queue is full. Must not be called from inside an
    /// async runtime.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::QueueClosed`] when no worker is left to accept tasks.
    pub fn submit<F, T>(&self, task: F) -> Result<TaskHandle<T>, PoolError>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let sender = self.sender.as_ref().ok_or(PoolError::QueueClosed)?;
        let (result_tx, result_rx) = oneshot::channel();
        let job: Job = Box::new(move || {
            let result = panic::catch_unwind(AssertUnwindSafe(task)).map_err(|payload| {
                PoolError::TaskPanicked {
                    message: panic_message(payload.as_ref()),
                }
            });
            drop(result_tx.send(result));
        });
        if sender.blocking_send(job).is_err() {
            return Err(PoolError::QueueClosed);
        }
        Ok(TaskHandle::new(result_rx))
    }

    /// Stops accepting tasks and blocks until every queued task has run.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::WorkerPanicked`] for the first worker thread that
    /// terminated abnormally; all workers are joined regardless.
    pub fn shutdown(mut self) -> Result<(), PoolError> {
        self.close_and_join()
    }

    fn close_and_join(&mut self) -> Result<(), PoolError> {
        drop(self.sender.take());
        let mut first_error = None;
        for handle in self.workers.drain(..) {
            let name = handle.thread().name().unwrap_or("worker").to_owned();
            if handle.join().is_err() && first_error.is_none() {
                first_error = Some(PoolError::WorkerPanicked { name });
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        if let Err(err) = self.close_and_join() {
            tracing::warn!("Worker pool shut down with error: {}", err);
        }
    }
}
