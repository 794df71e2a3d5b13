use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use keel::config::Config;
use keel::handlers;
use keel::server;

/// Serve a static site over a minimal HTTP/1.1 core.
#[derive(Debug, Parser)]
#[command(name = "keel", version)]
struct Cli {
    /// YAML configuration file
    #[arg(short, long, env = "KEEL_CONFIG")]
    config: Option<PathBuf>,

    /// Address to listen on, e.g. 0.0.0.0:9999
    #[arg(short, long)]
    listen: Option<String>,

    /// Number of connection workers
    #[arg(short, long)]
    workers: Option<usize>,

    /// Directory holding the site's files
    #[arg(long)]
    public_dir: Option<PathBuf>,
}

impl Cli {
    fn into_config(self) -> anyhow::Result<Config> {
        let mut cfg = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::load(),
        };

        if let Some(listen) = self.listen {
            cfg.listen_addr = listen;
        }
        if let Some(workers) = self.workers {
            cfg.workers = workers;
        }
        if let Some(dir) = self.public_dir {
            cfg.public_dir = dir;
        }

        cfg.validate()?;
        Ok(cfg)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = Cli::parse().into_config()?;

    let router = handlers::default_routes(&cfg.public_dir).build();
    tracing::info!(routes = router.len(), public_dir = %cfg.public_dir.display(), "Routes registered");

    tokio::select! {
        res = server::listener::run(&cfg, router) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
