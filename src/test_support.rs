//! Local fixtures shared by unit tests: a tiny HTTP server and a URL that
//! refuses connections.
use std::io::{Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crate::error::AppResult;

const MAX_REQUEST_HEAD: usize = 8 * 1024;

pub(crate) struct ServerHandle {
    url: String,
    shutdown: mpsc::Sender<()>,
    thread: Option<thread::JoinHandle<()>>,
}

impl ServerHandle {
    pub(crate) fn url(&self) -> &str {
        &self.url
    }
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        drop(self.shutdown.send(()));
        if let Some(handle) = self.thread.take() {
            drop(handle.join());
        }
    }
}

/// Serves `200 OK` to every request after waiting `delay`.
pub(crate) fn spawn_http_server(delay: Duration) -> AppResult<ServerHandle> {
    spawn_http_server_with_status(delay, 200)
}

/// Serves `status` to every request after waiting `delay`.
pub(crate) fn spawn_http_server_with_status(
    delay: Duration,
    status: u16,
) -> AppResult<ServerHandle> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let addr = listener.local_addr()?;
    listener.set_nonblocking(true)?;

    let (shutdown_tx, shutdown_rx) = mpsc::channel();
    let handle = thread::Builder::new()
        .name("test-http-server".to_owned())
        .spawn(move || {
            loop {
                if shutdown_rx.try_recv().is_ok() {
                    break;
                }
                match listener.accept() {
                    Ok((stream, _)) => {
                        thread::spawn(move || handle_client(stream, delay, status));
                    }
                    Err(err) if err.kind() == std::io::ErrorKind::WouldBlock => {
                        thread::sleep(Duration::from_millis(1));
                    }
                    Err(_) => break,
                }
            }
        })?;

    Ok(ServerHandle {
        url: format!("http://{}/", addr),
        shutdown: shutdown_tx,
        thread: Some(handle),
    })
}

/// URL of a loopback port with nothing listening on it.
pub(crate) fn closed_port_url() -> AppResult<String> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(format!("http://{}/", addr))
}

fn handle_client(mut stream: TcpStream, delay: Duration, status: u16) {
    if stream.set_nonblocking(false).is_err() {
        return;
    }
    if read_request_head(&mut stream).is_err() {
        return;
    }
    thread::sleep(delay);
    let response = format!(
        "HTTP/1.1 {} Test\r\nContent-Length: 2\r\nConnection: close\r\n\r\nOK",
        status
    );
    if stream.write_all(response.as_bytes()).is_err() {
        return;
    }
    if stream.flush().is_err() {
        return;
    }
    drop(stream.shutdown(Shutdown::Both));
}

fn read_request_head(stream: &mut TcpStream) -> AppResult<()> {
    let mut head = Vec::new();
    let mut buffer = [0u8; 1024];
    loop {
        let read = stream.read(&mut buffer)?;
        if read == 0 {
            return Err(std::io::Error::from(std::io::ErrorKind::UnexpectedEof).into());
        }
        head.extend_from_slice(buffer.get(..read).unwrap_or_default());
        if head.windows(4).any(|window| window == b"\r\n\r\n") || head.len() > MAX_REQUEST_HEAD {
            return Ok(());
        }
    }
}
