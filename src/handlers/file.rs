use std::path::{Component, Path, PathBuf};

use anyhow::Context;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::handler::{Handler, HandlerFuture, Sink};
use crate::http::mime;
use crate::http::request::Request;
use crate::http::response::{ResponseBuilder, StatusCode};
use crate::http::writer::serialize_head;

/// Streams `<root>/<request path>` with a `200 OK`.
///
/// A missing or unreadable file is a handler failure: nothing is written
/// and the worker closes the connection.
#[derive(Debug, Clone)]
pub struct FileHandler {
    root: PathBuf,
}

impl FileHandler {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Maps a request path onto the root, refusing anything but plain names.
    pub fn resolve(&self, request_path: &str) -> anyhow::Result<PathBuf> {
        let relative = Path::new(request_path.trim_start_matches('/'));

        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            anyhow::bail!("refusing to serve {}", request_path);
        }

        Ok(self.root.join(relative))
    }

    async fn serve(&self, request: &Request, out: &mut Sink) -> anyhow::Result<()> {
        let path = self.resolve(request.path_without_query())?;

        let mut file = File::open(&path)
            .await
            .with_context(|| format!("Failed to open {}", path.display()))?;
        let length = file.metadata().await?.len();

        let head = ResponseBuilder::new(StatusCode::Ok)
            .header("Content-Type", mime::content_type(&path))
            .header("Content-Length", length.to_string())
            .build();

        out.write_all(serialize_head(&head).as_bytes()).await?;
        tokio::io::copy(&mut file, out).await?;
        out.flush().await?;

        Ok(())
    }
}

impl Handler for FileHandler {
    fn handle<'a>(&'a self, request: &'a Request, out: &'a mut Sink) -> HandlerFuture<'a> {
        Box::pin(self.serve(request, out))
    }
}
