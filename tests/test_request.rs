use keel::http::request::{header_value, Method, Request, RequestBuilder, RequestLine};

fn get(target: &str) -> Request {
    RequestBuilder::new()
        .method(Method::GET)
        .path(target)
        .build()
        .unwrap()
}

#[test]
fn test_query_params_keep_order_and_duplicates() {
    let req = get("/find?a=1&a=2&b=3");

    let expected = vec![
        ("a".to_string(), "1".to_string()),
        ("a".to_string(), "2".to_string()),
        ("b".to_string(), "3".to_string()),
    ];
    assert_eq!(req.query_params(), expected.as_slice());
    assert_eq!(req.query_param("a"), vec!["1", "2"]);
    assert_eq!(req.query_param("b"), vec!["3"]);
}

#[test]
fn test_query_param_matches_whole_name() {
    let req = get("/find?ab=1&a=2");

    assert_eq!(req.query_param("a"), vec!["2"]);
    assert!(req.query_param("missing").is_empty());
}

#[test]
fn test_query_params_are_form_decoded() {
    let req = get("/find?q=hello+world&path=%2Fetc&flag");

    assert_eq!(req.query_param("q"), vec!["hello world"]);
    assert_eq!(req.query_param("path"), vec!["/etc"]);
    assert_eq!(req.query_param("flag"), vec![""]);
}

#[test]
fn test_no_query_string() {
    let req = get("/index.html");

    assert_eq!(req.query(), None);
    assert!(req.query_params().is_empty());
    assert_eq!(req.path_without_query(), "/index.html");
}

#[test]
fn test_path_without_query() {
    assert_eq!(get("/a/b?x=1").path_without_query(), "/a/b");
    assert_eq!(get("/a/?").path_without_query(), "/a/");
    assert_eq!(get("/page#top").path_without_query(), "/page");
}

#[test]
fn test_fragment_is_not_part_of_query() {
    let req = get("/page?x=1#top");

    assert_eq!(req.query(), Some("x=1"));
    assert_eq!(req.query_param("x"), vec!["1"]);
}

#[test]
fn test_raw_path_is_kept() {
    let req = get("/search?q=%20rust");

    assert_eq!(req.path, "/search?q=%20rust");
}

#[test]
fn test_request_header_retrieval() {
    let req = RequestBuilder::new()
        .method(Method::GET)
        .path("/")
        .header("Host", "example.com")
        .header("Content-Type", "application/json")
        .build()
        .unwrap();

    assert_eq!(req.header("Host"), Some("example.com"));
    assert_eq!(req.header("Content-Type"), Some("application/json"));
    assert_eq!(req.header("host"), None);
    assert_eq!(req.header("Missing"), None);
}

#[test]
fn test_header_without_value_is_empty() {
    let line = RequestLine {
        method: Method::GET,
        target: "/".to_string(),
    };
    let req = Request::new(line, vec!["X-Flag:".to_string()], Vec::new());

    assert_eq!(req.header("X-Flag"), Some(""));
}

#[test]
fn test_header_value_extraction() {
    assert_eq!(header_value("Host: example.com"), "example.com");
    assert_eq!(header_value("Content-Length:   42  "), "42");
    assert_eq!(header_value("NoSpace:x"), "");
}

#[test]
fn test_request_builder_requires_method_and_path() {
    assert!(RequestBuilder::new().path("/").build().is_err());
    assert!(RequestBuilder::new().method(Method::GET).build().is_err());
}

#[test]
fn test_request_body() {
    let req = RequestBuilder::new()
        .method(Method::POST)
        .path("/submit")
        .body(b"hello".to_vec())
        .build()
        .unwrap();

    assert_eq!(req.body, b"hello".to_vec());
}

#[test]
fn test_method_display() {
    assert_eq!(Method::GET.to_string(), "GET");
    assert_eq!(Method::POST.as_str(), "POST");
    assert_eq!(Method::from_str("POST"), Some(Method::POST));
    assert_eq!(Method::from_str("PUT"), None);
}
