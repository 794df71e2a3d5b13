use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context;

use crate::handler::{Handler, HandlerFuture, Sink};
use crate::http::mime;
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::writer::write_response;

/// Marker replaced with the render time.
pub const TIME_PLACEHOLDER: &str = "{time}";

/// Serves a text template with [`TIME_PLACEHOLDER`] filled in.
///
/// The template is read on every request, so edits show up without a restart.
#[derive(Debug, Clone)]
pub struct TemplateHandler {
    template: PathBuf,
}

impl TemplateHandler {
    pub fn new(template: impl Into<PathBuf>) -> Self {
        Self {
            template: template.into(),
        }
    }

    async fn serve(&self, out: &mut Sink) -> anyhow::Result<()> {
        let template = tokio::fs::read_to_string(&self.template)
            .await
            .with_context(|| format!("Failed to read template {}", self.template.display()))?;

        let content = render(&template, &timestamp());
        let response = Response::ok(mime::content_type(&self.template), content);

        write_response(out, &response).await
    }
}

impl Handler for TemplateHandler {
    fn handle<'a>(&'a self, _request: &'a Request, out: &'a mut Sink) -> HandlerFuture<'a> {
        Box::pin(self.serve(out))
    }
}

/// Replaces every [`TIME_PLACEHOLDER`] in `template` with `time`.
pub fn render(template: &str, time: &str) -> String {
    template.replace(TIME_PLACEHOLDER, time)
}

/// Seconds since the Unix epoch, with milliseconds.
fn timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:03}", now.as_secs(), now.subsec_millis())
}
