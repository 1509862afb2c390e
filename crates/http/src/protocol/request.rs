//! The request being built by the parser and the pieces it is made of.

use std::fmt;

use bytes::BytesMut;

use crate::protocol::HeaderSet;

/// Where the parser is within a single request.
///
/// States only move forward: `Init -> ParsingHeaders -> (ParsingBody ->) Done`.
/// `Error` can be entered from any non-terminal state and is never left.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum ParseState {
    #[default]
    Init,
    ParsingHeaders,
    ParsingBody,
    Done,
    Error,
}

impl ParseState {
    /// Returns true for `Done` and `Error`.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, ParseState::Done | ParseState::Error)
    }
}

/// The first line of a request, e.g. `GET /index.html HTTP/1.1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    method: String,
    target: String,
    version: String,
}

impl RequestLine {
    pub fn new(method: impl Into<String>, target: impl Into<String>, version: impl Into<String>) -> Self {
        Self { method: method.into(), target: target.into(), version: version.into() }
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// The version number without the `HTTP/` prefix, e.g. `1.1`.
    pub fn version(&self) -> &str {
        &self.version
    }
}

/// An HTTP request, possibly still being parsed.
///
/// Values handed out by [`StreamReader`](crate::connection::StreamReader) and
/// [`RequestDecoder`](crate::codec::RequestDecoder) are always in the `Done` state.
#[derive(Debug, Default)]
pub struct Request {
    pub(crate) request_line: Option<RequestLine>,
    pub(crate) headers: HeaderSet,
    pub(crate) body: BytesMut,
    pub(crate) state: ParseState,
}

impl Request {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_line(&self) -> Option<&RequestLine> {
        self.request_line.as_ref()
    }

    pub fn headers(&self) -> &HeaderSet {
        &self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn state(&self) -> ParseState {
        self.state
    }

    pub fn is_done(&self) -> bool {
        self.state == ParseState::Done
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(line) = &self.request_line {
            writeln!(f, "Request line:")?;
            writeln!(f, "- Method: {}", line.method)?;
            writeln!(f, "- Target: {}", line.target)?;
            writeln!(f, "- Version: {}", line.version)?;
        }
        writeln!(f, "Headers:")?;
        write!(f, "{}", self.headers)?;
        writeln!(f, "Body:")?;
        write!(f, "{}", String::from_utf8_lossy(&self.body))
    }
}
