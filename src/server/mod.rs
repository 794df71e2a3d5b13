//! Listening socket and the worker pool behind it.

pub mod listener;
pub mod pool;

pub use listener::Server;
