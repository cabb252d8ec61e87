use std::any::Any;
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};

use tokio::sync::mpsc;
use tracing::trace;

use crate::error::PoolError;

use super::Job;

pub(super) fn spawn_worker(
    index: usize,
    receiver: Arc<Mutex<mpsc::Receiver<Job>>>,
) -> Result<JoinHandle<()>, PoolError> {
    thread::Builder::new()
        .name(format!("httpbench-worker-{}", index))
        .spawn(move || worker_loop(index, &receiver))
        .map_err(|err| PoolError::SpawnWorker { index, source: err })
}

fn worker_loop(index: usize, receiver: &Mutex<mpsc::Receiver<Job>>) {
    trace!(worker = index, "Worker started");
    loop {
        // The guard is released before the job runs, so only the dequeue is serialized.
        let next = receiver
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .blocking_recv();
        match next {
            Some(job) => job(),
            None => break,
        }
    }
    trace!(worker = index, "Worker exiting");
}

/// Best-effort text of a panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        return (*message).to_owned();
    }
    if let Some(message) = payload.downcast_ref::<String>() {
        return message.clone();
    }
    "unknown panic".to_owned()
}
