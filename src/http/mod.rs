//! Request execution: the blocking HTTP collaborator and the per-request task.
mod client;
mod task;


pub use client::{
    BlockingGet, HttpClientFactory, ReqwestClient, ReqwestClientFactory, RequestTimeouts,
    TransportError,
};
pub use task::RequestTask;
