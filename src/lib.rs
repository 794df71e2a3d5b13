//! Keel - minimal HTTP/1.1 server core
//!
//! Accepts TCP connections, parses each request by hand out of a single
//! bounded read, routes it by exact `(method, path)` and hands it to a
//! registered handler. One request per connection.

pub mod config;
pub mod handler;
pub mod handlers;
pub mod http;
pub mod router;
pub mod server;
