//! Bundled handlers for serving a small static site.
//!
//! These sit outside the server core and use only the public
//! [`Handler`](crate::handler::Handler) contract.

pub mod file;
pub mod template;

use std::path::Path;
use std::sync::Arc;

pub use file::FileHandler;
pub use template::TemplateHandler;

use crate::handler::Handler;
use crate::http::request::Method;
use crate::router::RouterBuilder;

/// Paths served from the public directory by default.
pub const STATIC_PATHS: &[&str] = &[
    "/index.html",
    "/spring.svg",
    "/spring.png",
    "/resources.html",
    "/styles.css",
    "/app.js",
    "/links.html",
    "/forms.html",
    "/classic.html",
    "/events.html",
    "/events.js",
];

/// Page rendered through [`TemplateHandler`] instead of served verbatim.
pub const TEMPLATE_PATH: &str = "/classic.html";

/// Registers `GET` routes for every entry of [`STATIC_PATHS`] under `public_dir`.
pub fn default_routes(public_dir: impl AsRef<Path>) -> RouterBuilder {
    let public_dir = public_dir.as_ref();
    let files: Arc<dyn Handler> = Arc::new(FileHandler::new(public_dir));

    let mut routes = RouterBuilder::new();
    for path in STATIC_PATHS {
        if *path == TEMPLATE_PATH {
            let template = public_dir.join(path.trim_start_matches('/'));
            routes.register(Method::GET, *path, TemplateHandler::new(template));
        } else {
            routes.register_shared(Method::GET, *path, Arc::clone(&files));
        }
    }
    routes
}
