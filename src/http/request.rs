use std::fmt;
use std::sync::OnceLock;

/// HTTP request methods accepted by the server.
///
/// Anything outside this allow-list is rejected while parsing the
/// request line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
    /// POST - Submit data
    POST,
}

impl Method {
    /// Parses an HTTP method from a string.
    ///
    /// # Arguments
    ///
    /// * `s` - String representation of the method (case-sensitive)
    ///
    /// # Returns
    ///
    /// `Some(Method)` if the string is an allowed method, `None` otherwise.
    ///
    /// # Example
    ///
    /// ```
    /// # use keel::http::request::Method;
    /// assert_eq!(Method::from_str("GET"), Some(Method::GET));
    /// assert_eq!(Method::from_str("get"), None);
    /// assert_eq!(Method::from_str("PUT"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "GET" => Some(Method::GET),
            "POST" => Some(Method::POST),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The first line of a request, minus the protocol version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    pub method: Method,
    /// Raw request-target, query string included.
    pub target: String,
}

/// A parsed HTTP request.
///
/// Headers are kept as the raw `Name: value` lines in transmission order;
/// repeated names stay as separate entries. The query-less path is derived
/// on construction, the query parameters on first use.
#[derive(Debug, Clone)]
pub struct Request {
    /// The HTTP method (GET or POST)
    pub method: Method,
    /// The raw request-target (e.g., "/search?q=rust")
    pub path: String,
    /// Raw header lines, without their CRLF terminators
    pub headers: Vec<String>,
    /// Exactly `Content-Length` bytes, or empty
    pub body: Vec<u8>,
    path_without_query: String,
    query_params: OnceLock<Vec<(String, String)>>,
}

/// Builder for constructing Request objects.
pub struct RequestBuilder {
    method: Option<Method>,
    path: Option<String>,
    headers: Vec<String>,
    body: Vec<u8>,
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self {
            method: None,
            path: None,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Appends a `Name: value` header line.
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push(format!("{}: {}", name, value));
        self
    }

    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    pub fn build(self) -> Result<Request, &'static str> {
        let line = RequestLine {
            method: self.method.ok_or("method missing")?,
            target: self.path.ok_or("path missing")?,
        };
        Ok(Request::new(line, self.headers, self.body))
    }
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Request {
    pub fn new(line: RequestLine, headers: Vec<String>, body: Vec<u8>) -> Self {
        let path_without_query = strip_query(&line.target).to_string();

        Self {
            method: line.method,
            path: line.target,
            headers,
            body,
            path_without_query,
            query_params: OnceLock::new(),
        }
    }

    /// The request path with any `?query` (and `#fragment`) removed.
    ///
    /// This is the value routes are matched against.
    pub fn path_without_query(&self) -> &str {
        &self.path_without_query
    }

    /// The raw query string, if the target carries one.
    pub fn query(&self) -> Option<&str> {
        let (_, rest) = self.path.split_once('?')?;
        Some(rest.split('#').next().unwrap_or(rest))
    }

    /// Query parameters in order of appearance, decoded with
    /// `application/x-www-form-urlencoded` rules.
    ///
    /// # Example
    ///
    /// ```
    /// # use keel::http::request::{Method, RequestBuilder};
    /// let req = RequestBuilder::new()
    ///     .method(Method::GET)
    ///     .path("/find?a=1&a=2&b=3")
    ///     .build()
    ///     .unwrap();
    ///
    /// assert_eq!(req.query_param("a"), vec!["1", "2"]);
    /// ```
    pub fn query_params(&self) -> &[(String, String)] {
        self.query_params.get_or_init(|| match self.query() {
            Some(query) => url::form_urlencoded::parse(query.as_bytes())
                .into_owned()
                .collect(),
            None => Vec::new(),
        })
    }

    /// All values for the parameter `name`, in order.
    pub fn query_param(&self, name: &str) -> Vec<&str> {
        self.query_params()
            .iter()
            .filter(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
            .collect()
    }

    /// Value of the first header line whose name equals `key`.
    ///
    /// Names are compared case-sensitively. A line with no value yields `""`.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|line| line.split(':').next() == Some(key))
            .map(|line| header_value(line))
    }
}

/// Text after the first space of a raw header line, trimmed.
///
/// Returns `""` when the line has no space at all.
pub fn header_value(line: &str) -> &str {
    line.split_once(' ')
        .map(|(_, value)| value.trim())
        .unwrap_or("")
}

fn strip_query(target: &str) -> &str {
    target.split(['?', '#']).next().unwrap_or(target)
}
