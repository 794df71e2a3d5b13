//! The boundary between the server core and request handlers.
//!
//! A handler receives the parsed [`Request`] and the connection's output
//! sink. It owns the whole response: status line, headers, body. The core
//! never inspects or rewrites what a handler writes; it only flushes and
//! closes the connection afterwards.

use std::future::Future;
use std::pin::Pin;

use tokio::io::AsyncWrite;

use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::writer::write_response;

/// Writable, flushable output bound to one connection.
pub type Sink = dyn AsyncWrite + Unpin + Send;

/// Future returned by [`Handler::handle`].
pub type HandlerFuture<'a> = Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send + 'a>>;

/// Produces the response for one routed request.
///
/// An `Err` is logged by the worker and the connection is closed; nothing
/// is sent on the handler's behalf since it may have written partial output.
pub trait Handler: Send + Sync {
    fn handle<'a>(&'a self, request: &'a Request, out: &'a mut Sink) -> HandlerFuture<'a>;
}

/// Closures that build a [`Response`] are handlers; the response is
/// serialized and flushed for them.
///
/// ```
/// # use keel::http::request::{Method, Request};
/// # use keel::http::response::Response;
/// # use keel::router::RouterBuilder;
/// let mut routes = RouterBuilder::new();
/// routes.register(Method::GET, "/ping", |_: &Request| Response::ok("text/plain", "pong"));
/// ```
impl<F> Handler for F
where
    F: Fn(&Request) -> Response + Send + Sync,
{
    fn handle<'a>(&'a self, request: &'a Request, out: &'a mut Sink) -> HandlerFuture<'a> {
        let response = self(request);
        Box::pin(async move { write_response(out, &response).await })
    }
}
