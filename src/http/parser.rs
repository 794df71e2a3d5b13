use std::fmt;
use std::io;

use bytes::{Buf, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::http::request::{header_value, Method, Request, RequestLine};
use crate::http::scanner::{find, CRLF, CRLF_CRLF};

/// Capacity of the single read that must hold the request line and headers.
pub const DEFAULT_BUFFER_CAPACITY: usize = 4096;

const CONTENT_LENGTH: &str = "Content-Length";

#[derive(Debug)]
pub enum ParseError {
    /// Peer closed before sending any bytes
    ConnectionClosed,
    MalformedRequestLine,
    MalformedHeaders,
    UnsupportedMethod,
    InvalidTarget,
    InvalidContentLength,
    /// Peer closed before `Content-Length` body bytes arrived
    IncompleteBody,
    Io(io::Error),
}

impl ParseError {
    /// Whether the client should be answered with `400 Bad Request`.
    ///
    /// The remaining variants leave nothing useful to answer, so the
    /// connection is simply closed.
    pub fn is_bad_request(&self) -> bool {
        matches!(
            self,
            ParseError::MalformedRequestLine
                | ParseError::MalformedHeaders
                | ParseError::UnsupportedMethod
                | ParseError::InvalidTarget
                | ParseError::InvalidContentLength
        )
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::ConnectionClosed => write!(f, "connection closed before request"),
            ParseError::MalformedRequestLine => write!(f, "malformed request line"),
            ParseError::MalformedHeaders => write!(f, "malformed header block"),
            ParseError::UnsupportedMethod => write!(f, "unsupported method"),
            ParseError::InvalidTarget => write!(f, "request target must start with '/'"),
            ParseError::InvalidContentLength => write!(f, "invalid Content-Length"),
            ParseError::IncompleteBody => write!(f, "connection closed before full body"),
            ParseError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ParseError {
    fn from(e: io::Error) -> Self {
        ParseError::Io(e)
    }
}

/// Request line and header block, with the offset where the body begins.
#[derive(Debug)]
pub struct RequestHead {
    pub line: RequestLine,
    pub headers: Vec<String>,
    /// First byte after the `\r\n\r\n` terminator
    pub body_offset: usize,
}

/// Reads one request from `stream`.
///
/// The request line and header block must arrive in a single read of at
/// most `capacity` bytes; a head that does not fit is rejected, never
/// completed by further reads. Body bytes already in the buffer are used
/// first and the rest of `Content-Length` is read from the stream.
pub async fn read_request<R>(stream: &mut R, capacity: usize) -> Result<Request, ParseError>
where
    R: AsyncRead + Unpin,
{
    let mut buf = BytesMut::zeroed(capacity);
    let n = stream.read(&mut buf[..]).await?;

    if n == 0 {
        return Err(ParseError::ConnectionClosed);
    }
    buf.truncate(n);

    let head = parse_head(&buf)?;
    buf.advance(head.body_offset);

    let body = match content_length(&head.headers)? {
        Some(len) if len > 0 => read_body(stream, buf, len).await?,
        _ => Vec::new(),
    };

    Ok(Request::new(head.line, head.headers, body))
}

/// Parses the request line and header block out of one buffered read.
pub fn parse_head(buf: &[u8]) -> Result<RequestHead, ParseError> {
    let n = buf.len();

    let line_end = find(buf, CRLF, 0, n).ok_or(ParseError::MalformedRequestLine)?;
    let line = parse_request_line(&buf[..line_end])?;

    // Searching from the request-line CRLF lets an empty header block match.
    let head_end = find(buf, CRLF_CRLF, line_end, n).ok_or(ParseError::MalformedHeaders)?;

    let headers = if head_end == line_end {
        Vec::new()
    } else {
        let block = std::str::from_utf8(&buf[line_end + CRLF.len()..head_end])
            .map_err(|_| ParseError::MalformedHeaders)?;
        block.split("\r\n").map(str::to_string).collect()
    };

    Ok(RequestHead {
        line,
        headers,
        body_offset: head_end + CRLF_CRLF.len(),
    })
}

/// Parses `METHOD SP TARGET SP VERSION` (without its CRLF).
pub fn parse_request_line(line: &[u8]) -> Result<RequestLine, ParseError> {
    let line = std::str::from_utf8(line).map_err(|_| ParseError::MalformedRequestLine)?;

    let parts: Vec<&str> = line.split(' ').collect();
    let &[method, target, _version] = parts.as_slice() else {
        return Err(ParseError::MalformedRequestLine);
    };

    let method = Method::from_str(method).ok_or(ParseError::UnsupportedMethod)?;

    if !target.starts_with('/') {
        return Err(ParseError::InvalidTarget);
    }

    Ok(RequestLine {
        method,
        target: target.to_string(),
    })
}

/// Declared body length from the first line starting with `Content-Length`.
///
/// A missing header or an empty value means no body.
pub fn content_length(headers: &[String]) -> Result<Option<usize>, ParseError> {
    let Some(line) = headers.iter().find(|line| line.starts_with(CONTENT_LENGTH)) else {
        return Ok(None);
    };

    let value = header_value(line);
    if value.is_empty() {
        return Ok(None);
    }

    value
        .parse::<usize>()
        .map(Some)
        .map_err(|_| ParseError::InvalidContentLength)
}

async fn read_body<R>(stream: &mut R, mut buffered: BytesMut, len: usize) -> Result<Vec<u8>, ParseError>
where
    R: AsyncRead + Unpin,
{
    // Bytes past the declared length are dropped; one request per connection.
    buffered.truncate(len);

    let mut body = Vec::with_capacity(buffered.len());
    body.extend_from_slice(&buffered);

    let remaining = (len - body.len()) as u64;
    if remaining > 0 {
        (&mut *stream).take(remaining).read_to_end(&mut body).await?;
    }

    if body.len() < len {
        return Err(ParseError::IncompleteBody);
    }

    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_head_simple_get() {
        let buf = b"GET /index.html HTTP/1.1\r\nHost: x\r\n\r\n";
        let head = parse_head(buf).unwrap();

        assert_eq!(head.line.method, Method::GET);
        assert_eq!(head.line.target, "/index.html");
        assert_eq!(head.headers, vec!["Host: x".to_string()]);
        assert_eq!(head.body_offset, buf.len());
    }

    #[test]
    fn parse_head_without_headers() {
        let buf = b"GET / HTTP/1.1\r\n\r\n";
        let head = parse_head(buf).unwrap();

        assert!(head.headers.is_empty());
        assert_eq!(head.body_offset, buf.len());
    }

    #[test]
    fn content_length_treats_empty_value_as_absent() {
        let headers = vec!["Content-Length:".to_string()];
        assert_eq!(content_length(&headers).unwrap(), None);
    }
}
