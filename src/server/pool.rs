//! Fixed-size pool of connection workers.
//!
//! Accepted sockets go into an unbounded queue. Each of the `size` worker
//! tasks takes one socket at a time and serves it to completion before
//! taking the next. When every worker is busy the queue simply grows.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpStream;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

use crate::http::connection::{Connection, ConnectionSettings};
use crate::router::Router;

type Job = (TcpStream, SocketAddr);

pub struct WorkerPool {
    sender: mpsc::UnboundedSender<Job>,
    workers: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Spawns `size` workers sharing the frozen `router`.
    pub fn new(size: usize, router: Arc<Router>, settings: ConnectionSettings) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let receiver = Arc::new(Mutex::new(receiver));

        let workers = (0..size)
            .map(|id| {
                let receiver = Arc::clone(&receiver);
                let router = Arc::clone(&router);
                tokio::spawn(worker_loop(id, receiver, router, settings))
            })
            .collect();

        Self { sender, workers }
    }

    /// Queues a connection for the next free worker.
    pub fn submit(&self, stream: TcpStream, peer: SocketAddr) -> anyhow::Result<()> {
        self.sender
            .send((stream, peer))
            .map_err(|_| anyhow::anyhow!("worker pool is shut down"))
    }

    pub fn size(&self) -> usize {
        self.workers.len()
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        for worker in &self.workers {
            worker.abort();
        }
    }
}

async fn worker_loop(
    id: usize,
    receiver: Arc<Mutex<mpsc::UnboundedReceiver<Job>>>,
    router: Arc<Router>,
    settings: ConnectionSettings,
) {
    loop {
        let job = receiver.lock().await.recv().await;
        let Some((stream, peer)) = job else {
            debug!(worker = id, "Queue closed, worker exiting");
            break;
        };

        // A separate task so a panicking handler costs one connection, not a pool slot.
        let mut conn = Connection::new(stream, peer, Arc::clone(&router), settings);
        let served = tokio::spawn(async move { conn.run().await }).await;

        match served {
            Ok(Ok(())) => {}
            Ok(Err(e)) => error!(worker = id, peer = %peer, error = %e, "Handler failed"),
            Err(e) if e.is_panic() => error!(worker = id, peer = %peer, "Handler panicked"),
            Err(e) => warn!(worker = id, peer = %peer, error = %e, "Connection task cancelled"),
        }
    }
}
