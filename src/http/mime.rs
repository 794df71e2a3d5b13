//! Content type detection by file extension.

use std::path::Path;

/// Fallback for unknown or missing extensions.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Guesses a `Content-Type` value from the extension of `path`.
///
/// # Example
///
/// ```
/// # use keel::http::mime::content_type;
/// assert_eq!(content_type("public/index.html"), "text/html");
/// assert_eq!(content_type("public/spring.SVG"), "image/svg+xml");
/// assert_eq!(content_type("public/blob"), "application/octet-stream");
/// ```
pub fn content_type(path: impl AsRef<Path>) -> &'static str {
    let Some(ext) = path.as_ref().extension().and_then(|e| e.to_str()) else {
        return DEFAULT_CONTENT_TYPE;
    };

    match ext.to_ascii_lowercase().as_str() {
        "html" | "htm" => "text/html",
        "css" => "text/css",
        "js" | "mjs" => "text/javascript",
        "json" => "application/json",
        "txt" => "text/plain",
        "svg" => "image/svg+xml",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "ico" => "image/x-icon",
        "webp" => "image/webp",
        _ => DEFAULT_CONTENT_TYPE,
    }
}
