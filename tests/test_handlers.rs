use std::path::PathBuf;

use keel::handler::Handler;
use keel::handlers::template::render;
use keel::handlers::{default_routes, FileHandler, TemplateHandler, STATIC_PATHS};
use keel::http::mime::content_type;
use keel::http::request::{Method, Request, RequestBuilder};

fn public_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("keel-{}-{}", name, std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn get(path: &str) -> Request {
    RequestBuilder::new().method(Method::GET).path(path).build().unwrap()
}

async fn run(handler: &dyn Handler, req: &Request) -> (anyhow::Result<()>, String) {
    let mut out: Vec<u8> = Vec::new();
    let result = handler.handle(req, &mut out).await;
    (result, String::from_utf8_lossy(&out).into_owned())
}

#[tokio::test]
async fn test_file_handler_serves_file() {
    let dir = public_dir("file");
    std::fs::write(dir.join("index.html"), "<h1>hi</h1>").unwrap();

    let handler = FileHandler::new(&dir);
    let (result, written) = run(&handler, &get("/index.html?utm=1")).await;

    result.unwrap();
    assert_eq!(
        written,
        "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: 11\r\nConnection: close\r\n\r\n<h1>hi</h1>"
    );
}

#[tokio::test]
async fn test_file_handler_missing_file_writes_nothing() {
    let dir = public_dir("missing");
    let handler = FileHandler::new(&dir);

    let (result, written) = run(&handler, &get("/nope.css")).await;

    assert!(result.is_err());
    assert!(written.is_empty());
}

#[test]
fn test_file_handler_refuses_parent_components() {
    let handler = FileHandler::new("/srv/public");

    assert!(handler.resolve("/../etc/passwd").is_err());
    assert_eq!(
        handler.resolve("/css/site.css").unwrap(),
        PathBuf::from("/srv/public/css/site.css")
    );
}

#[tokio::test]
async fn test_template_handler_fills_in_time() {
    let dir = public_dir("template");
    let template = dir.join("classic.html");
    std::fs::write(&template, "<p>now: {time}</p>").unwrap();

    let handler = TemplateHandler::new(&template);
    let (result, written) = run(&handler, &get("/classic.html")).await;

    result.unwrap();
    assert!(written.starts_with("HTTP/1.1 200 OK\r\nContent-Type: text/html\r\n"));
    assert!(written.contains("<p>now: "));
    assert!(!written.contains("{time}"));
}

#[test]
fn test_render_replaces_every_placeholder() {
    assert_eq!(render("{time}|{time}", "T"), "T|T");
    assert_eq!(render("static", "T"), "static");
}

#[tokio::test]
async fn test_default_routes() {
    let dir = public_dir("routes");
    std::fs::write(dir.join("styles.css"), "body{}").unwrap();
    std::fs::write(dir.join("classic.html"), "{time}").unwrap();

    let router = default_routes(&dir).build();
    assert_eq!(router.len(), STATIC_PATHS.len());
    assert!(router.resolve(Method::POST, "/index.html").is_none());

    let css = router.resolve(Method::GET, "/styles.css").unwrap();
    let (result, written) = run(&**css, &get("/styles.css")).await;
    result.unwrap();
    assert!(written.contains("Content-Type: text/css\r\n"));
    assert!(written.ends_with("body{}"));

    let classic = router.resolve(Method::GET, "/classic.html").unwrap();
    let (result, written) = run(&**classic, &get("/classic.html")).await;
    result.unwrap();
    assert!(!written.ends_with("{time}"));
}

#[test]
fn test_content_types() {
    assert_eq!(content_type("a/app.js"), "text/javascript");
    assert_eq!(content_type("spring.png"), "image/png");
    assert_eq!(content_type("README"), "application/octet-stream");
    assert_eq!(content_type("archive.tar.gz"), "application/octet-stream");
}
