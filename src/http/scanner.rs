//! Delimiter scanning over a bounded byte range.

/// Terminates the request line and every header line.
pub const CRLF: &[u8] = b"\r\n";

/// Terminates the header block.
pub const CRLF_CRLF: &[u8] = b"\r\n\r\n";

/// Finds the first offset in `[start, end)` where `delimiter` occurs in full.
///
/// The match must lie entirely before `end`. Bounds past the end of the
/// buffer are clamped, and an empty delimiter never matches.
///
/// # Example
///
/// ```
/// # use keel::http::scanner::{find, CRLF};
/// let buf = b"GET / HTTP/1.1\r\nHost: x\r\n\r\n";
/// assert_eq!(find(buf, CRLF, 0, buf.len()), Some(14));
/// assert_eq!(find(buf, CRLF, 0, 14), None);
/// ```
pub fn find(buffer: &[u8], delimiter: &[u8], start: usize, end: usize) -> Option<usize> {
    let end = end.min(buffer.len());

    if delimiter.is_empty() || start >= end || end - start < delimiter.len() {
        return None;
    }

    buffer[start..end]
        .windows(delimiter.len())
        .position(|w| w == delimiter)
        .map(|offset| start + offset)
}
