use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

use crate::http::parser::DEFAULT_BUFFER_CAPACITY;

/// Smallest buffer that still holds a minimal request head.
pub const MIN_BUFFER_CAPACITY: usize = 16;

/// Server configuration.
///
/// Every field has a default, so a YAML file only needs the keys it changes:
///
/// ```yaml
/// listen_addr: "0.0.0.0:9999"
/// workers: 64
/// read_buffer_capacity: 4096
/// read_timeout_ms: 30000
/// public_dir: "./public"
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub listen_addr: String,
    /// Fixed size of the connection worker pool
    pub workers: usize,
    /// Bytes available to the single read holding request line and headers
    pub read_buffer_capacity: usize,
    /// Request read deadline; absent means wait indefinitely
    pub read_timeout_ms: Option<u64>,
    /// Root directory for the bundled file handlers
    pub public_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:9999".to_string(),
            workers: 64,
            read_buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            read_timeout_ms: None,
            public_dir: PathBuf::from("./public"),
        }
    }
}

impl Config {
    /// Defaults, with the listen address taken from `LISTEN` when set.
    pub fn load() -> Self {
        let mut cfg = Self::default();
        cfg.apply_env();
        cfg
    }

    /// Reads a YAML file, then applies environment overrides.
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let mut cfg = Self::from_yaml_str(&text)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        cfg.apply_env();
        Ok(cfg)
    }

    pub fn from_yaml_str(text: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn apply_env(&mut self) {
        if let Ok(addr) = std::env::var("LISTEN") {
            self.listen_addr = addr;
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.workers == 0 {
            anyhow::bail!("workers must be >= 1");
        }
        if self.read_buffer_capacity < MIN_BUFFER_CAPACITY {
            anyhow::bail!("read_buffer_capacity must be >= {}", MIN_BUFFER_CAPACITY);
        }
        if self.read_timeout_ms == Some(0) {
            anyhow::bail!("read_timeout_ms must be > 0 when set");
        }
        Ok(())
    }

    pub fn read_timeout(&self) -> Option<Duration> {
        self.read_timeout_ms.map(Duration::from_millis)
    }
}
