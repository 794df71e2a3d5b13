use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::config::Config;
use crate::http::connection::ConnectionSettings;
use crate::router::Router;
use crate::server::pool::WorkerPool;

/// Pause after a failed accept; descriptor exhaustion repeats until a connection closes.
const ACCEPT_BACKOFF: Duration = Duration::from_millis(50);

/// A bound listening socket plus the worker pool it feeds.
pub struct Server {
    listener: TcpListener,
    pool: WorkerPool,
}

impl Server {
    /// Binds `cfg.listen_addr` and starts `cfg.workers` workers over `router`.
    pub async fn bind(cfg: &Config, router: Router) -> anyhow::Result<Self> {
        cfg.validate()?;

        let listener = TcpListener::bind(&cfg.listen_addr)
            .await
            .with_context(|| format!("Failed to bind {}", cfg.listen_addr))?;

        let router = Arc::new(router);
        let pool = WorkerPool::new(cfg.workers, router, ConnectionSettings::from(cfg));

        info!(
            address = %listener.local_addr()?,
            workers = pool.size(),
            buffer_capacity = cfg.read_buffer_capacity,
            "Listening"
        );

        Ok(Self { listener, pool })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accepts connections until the pool stops taking them.
    ///
    /// A failed accept is logged and never ends the loop.
    pub async fn run(self) -> anyhow::Result<()> {
        loop {
            let (socket, peer) = match self.listener.accept().await {
                Ok(accepted) => accepted,
                Err(e) => {
                    warn!(error = %e, "Accept failed");
                    tokio::time::sleep(ACCEPT_BACKOFF).await;
                    continue;
                }
            };
            info!("Accepted connection from {}", peer);

            self.pool.submit(socket, peer)?;
        }
    }
}

pub async fn run(cfg: &Config, router: Router) -> anyhow::Result<()> {
    Server::bind(cfg, router).await?.run().await
}
