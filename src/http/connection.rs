use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tracing::{debug, error};

use crate::config::Config;
use crate::handler::Handler;
use crate::http::parser::{self, ParseError, DEFAULT_BUFFER_CAPACITY};
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::writer::write_response;
use crate::router::Router;

/// Per-connection limits.
#[derive(Debug, Clone, Copy)]
pub struct ConnectionSettings {
    /// Size of the single read holding the request line and headers
    pub buffer_capacity: usize,
    /// Deadline for reading the whole request; `None` waits forever
    pub read_timeout: Option<Duration>,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            read_timeout: None,
        }
    }
}

impl From<&Config> for ConnectionSettings {
    fn from(cfg: &Config) -> Self {
        Self {
            buffer_capacity: cfg.read_buffer_capacity,
            read_timeout: cfg.read_timeout(),
        }
    }
}

pub struct Connection<S> {
    stream: S,
    peer: SocketAddr,
    router: Arc<Router>,
    settings: ConnectionSettings,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Parsed(Request),
    Dispatched(Request, Arc<dyn Handler>),
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
{
    pub fn new(stream: S, peer: SocketAddr, router: Arc<Router>, settings: ConnectionSettings) -> Self {
        Self {
            stream,
            peer,
            router,
            settings,
            state: ConnectionState::Reading,
        }
    }

    /// Serves exactly one request, then closes.
    ///
    /// Parse failures and route misses are answered here with canned
    /// responses. A handler failure is returned, but only after the
    /// connection has been closed.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        let mut outcome = Ok(());

        loop {
            match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Reading => {
                    self.state = match self.read_request().await {
                        Ok(req) => ConnectionState::Parsed(req),
                        Err(e) if e.is_bad_request() => {
                            debug!(peer = %self.peer, error = %e, "Rejecting request");
                            self.send_canned(Response::bad_request()).await;
                            ConnectionState::Closed
                        }
                        Err(ParseError::ConnectionClosed) => ConnectionState::Closed,
                        Err(e) => {
                            debug!(peer = %self.peer, error = %e, "Request read failed");
                            ConnectionState::Closed
                        }
                    };
                }

                ConnectionState::Parsed(req) => {
                    let handler = self
                        .router
                        .resolve(req.method, req.path_without_query())
                        .cloned();

                    self.state = match handler {
                        Some(handler) => ConnectionState::Dispatched(req, handler),
                        None => {
                            debug!(
                                peer = %self.peer,
                                method = %req.method,
                                path = %req.path,
                                "No route"
                            );
                            self.send_canned(Response::not_found()).await;
                            ConnectionState::Closed
                        }
                    };
                }

                ConnectionState::Dispatched(req, handler) => {
                    debug!(
                        peer = %self.peer,
                        method = %req.method,
                        path = %req.path,
                        body_len = req.body.len(),
                        "Dispatching request"
                    );

                    let handled = handler.handle(&req, &mut self.stream).await;
                    outcome = match handled {
                        Ok(()) => self.stream.flush().await.map_err(Into::into),
                        Err(e) => Err(e),
                    };
                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => {
                    // The peer may already be gone; closing is all that is left to do.
                    let _ = self.stream.shutdown().await;
                    break;
                }
            }
        }

        outcome
    }

    async fn read_request(&mut self) -> Result<Request, ParseError> {
        let capacity = self.settings.buffer_capacity;
        let read = parser::read_request(&mut self.stream, capacity);

        match self.settings.read_timeout {
            Some(limit) => tokio::time::timeout(limit, read).await.map_err(|_| {
                ParseError::Io(std::io::Error::new(
                    std::io::ErrorKind::TimedOut,
                    "request read deadline elapsed",
                ))
            })?,
            None => read.await,
        }
    }

    async fn send_canned(&mut self, response: Response) {
        if let Err(e) = write_response(&mut self.stream, &response).await {
            error!(
                peer = %self.peer,
                status = response.status.as_u16(),
                error = %e,
                "Failed to write error response"
            );
        }
    }
}
