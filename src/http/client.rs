use std::cell::RefCell;
use std::error::Error as StdError;
use std::time::Duration;

use reqwest::blocking::Client;

use crate::args::{DEFAULT_REQUEST_TIMEOUT, DEFAULT_USER_AGENT};
use crate::metrics::FailureKind;

/// Per-request I/O bounds handed to the client collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTimeouts {
    pub read: Duration,
    pub write: Duration,
}

impl RequestTimeouts {
    #[must_use]
    pub const fn symmetric(timeout: Duration) -> Self {
        Self {
            read: timeout,
            write: timeout,
        }
    }
}

impl Default for RequestTimeouts {
    fn default() -> Self {
        Self::symmetric(DEFAULT_REQUEST_TIMEOUT)
    }
}

/// Transport-level failure: no response was received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError {
    pub kind: FailureKind,
    pub reason: String,
}

impl TransportError {
    pub fn new(kind: FailureKind, reason: impl Into<String>) -> Self {
        Self {
            kind,
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind.as_str(), self.reason)
    }
}

/// A synchronous GET that returns the response status or a transport error
/// within bounded time.
pub trait BlockingGet {
    /// Issues one GET request.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when no complete response was received.
    fn get(&self, url: &str) -> Result<u16, TransportError>;
}

/// Produces the client a request task uses.
///
/// A client is never used by two tasks at the same time, so concurrent
/// requests do not contend on a common connection or lock.
pub trait HttpClientFactory: Send + Sync + 'static {
    type Client: BlockingGet;

    /// Returns a client bounded by `timeouts` for the calling task.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when the client cannot be constructed.
    fn build(&self, timeouts: RequestTimeouts) -> Result<Self::Client, TransportError>;
}

thread_local! {
    static WORKER_CLIENT: RefCell<Option<(RequestTimeouts, Client)>> = const { RefCell::new(None) };
}

/// Hands every worker thread its own `reqwest` blocking client.
///
/// The client is built once per thread and timeout pair, then reused by the
/// tasks that thread runs one after another. Idle connections are never kept,
/// so each request still opens its own connection.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReqwestClientFactory;

impl HttpClientFactory for ReqwestClientFactory {
    type Client = ReqwestClient;

    fn build(&self, timeouts: RequestTimeouts) -> Result<ReqwestClient, TransportError> {
        WORKER_CLIENT.with(|slot| {
            let mut slot = slot.borrow_mut();
            if let Some((cached, client)) = slot.as_ref()
                && *cached == timeouts
            {
                return Ok(ReqwestClient {
                    client: client.clone(),
                });
            }
            let client = build_client(timeouts)?;
            *slot = Some((timeouts, client.clone()));
            Ok(ReqwestClient { client })
        })
    }
}

fn build_client(timeouts: RequestTimeouts) -> Result<Client, TransportError> {
    // reqwest has no per-write bound: the write timeout caps connecting and
    // the read timeout caps the whole exchange.
    Client::builder()
        .user_agent(DEFAULT_USER_AGENT)
        .no_proxy()
        .pool_max_idle_per_host(0)
        .connect_timeout(timeouts.write)
        .timeout(timeouts.read)
        .build()
        .map_err(|err| TransportError::new(FailureKind::Other, root_cause(&err)))
}

#[derive(Debug)]
pub struct ReqwestClient {
    client: Client,
}

impl BlockingGet for ReqwestClient {
    fn get(&self, url: &str) -> Result<u16, TransportError> {
        let mut response = self
            .client
            .get(url)
            .send()
            .map_err(|err| classify(&err))?;
        let status = response.status().as_u16();
        // The response only counts once its body has been read in full.
        response
            .copy_to(&mut std::io::sink())
            .map_err(|err| classify(&err))?;
        Ok(status)
    }
}

fn classify(err: &reqwest::Error) -> TransportError {
    let kind = if err.is_timeout() {
        FailureKind::Timeout
    } else if err.is_connect() {
        FailureKind::Connect
    } else if err.is_request() || err.is_body() || err.is_decode() || err.is_redirect() {
        FailureKind::Protocol
    } else {
        FailureKind::Other
    };
    TransportError::new(kind, root_cause(err))
}

/// Innermost error message, which names the actual transport problem.
fn root_cause(err: &(dyn StdError + 'static)) -> String {
    let mut current = err;
    while let Some(source) = current.source() {
        current = source;
    }
    current.to_string()
}
