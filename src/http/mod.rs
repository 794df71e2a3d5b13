//! HTTP protocol implementation.
//!
//! This module implements a one-request-per-connection HTTP/1.1 server core.
//!
//! # Architecture
//!
//! - **`scanner`**: Delimiter search over a bounded byte range
//! - **`parser`**: Turns one bounded read plus the stream into a [`Request`](request::Request)
//! - **`request`**: Request representation, derived path and query parameters
//! - **`connection`**: The per-connection state machine
//! - **`response`**: Response representation with builder pattern
//! - **`writer`**: Serializes and writes responses
//! - **`mime`**: Content type detection based on file extensions
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Single bounded read, then parse
//!        └──────┬──────┘
//!               │ Request parsed          ── parse error ─→ 400, Closed
//!               ▼
//!        ┌──────────────────┐
//!        │     Parsed       │ ← Resolve (method, path) in the router
//!        └──────┬───────────┘
//!               │ Handler found           ── no route ────→ 404, Closed
//!               ▼
//!        ┌──────────────────┐
//!        │    Dispatched    │ ← Handler writes the whole response
//!        └──────┬───────────┘
//!               ▼
//!        ┌──────────────────┐
//!        │      Closed      │ ← Shut down the socket, exactly once
//!        └──────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use keel::http::connection::{Connection, ConnectionSettings};
//! use keel::router::RouterBuilder;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let router = Arc::new(RouterBuilder::new().build());
//!     let listener = TcpListener::bind("127.0.0.1:9999").await?;
//!
//!     loop {
//!         let (socket, peer) = listener.accept().await?;
//!         let router = Arc::clone(&router);
//!         tokio::spawn(async move {
//!             let mut conn = Connection::new(socket, peer, router, ConnectionSettings::default());
//!             if let Err(e) = conn.run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod connection;
pub mod mime;
pub mod parser;
pub mod request;
pub mod response;
pub mod scanner;
pub mod writer;
