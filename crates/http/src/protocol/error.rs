use std::io;
use std::time::Duration;
use thiserror::Error;

/// Every way a request can fail to parse.
///
/// All variants are fatal for the request (and the connection) they occur on.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("malformed request-line: {line:?}")]
    MalformedRequestLine { line: String },

    #[error("unsupported http version: {version:?}")]
    UnsupportedHttpVersion { version: String },

    #[error("request in error state")]
    RequestInErrorState,

    #[error("invalid header: {reason}")]
    InvalidHeader { reason: String },

    #[error("header number exceed the limit {max_num}")]
    TooManyHeaders { max_num: usize },

    #[error("unimplemented transfer encoding: {encoding}")]
    UnimplementedEncoding { encoding: String },

    #[error("body truncated, expected {expected} bytes but received {received}")]
    TruncatedBody { expected: u64, received: u64 },

    #[error("stream ended before the request was complete")]
    TruncatedRequest,

    #[error("request size too large, current: {current_size} exceed the limit {max_size}")]
    RequestTooLarge { current_size: usize, max_size: usize },

    #[error("no complete request within {timeout:?}")]
    Timeout { timeout: Duration },

    #[error("transport read error: {source}")]
    TransportReadError {
        #[from]
        source: io::Error,
    },
}

impl ParseError {
    pub fn malformed_request_line(line: &[u8]) -> Self {
        Self::MalformedRequestLine { line: String::from_utf8_lossy(line).into_owned() }
    }

    pub fn unsupported_version(version: &[u8]) -> Self {
        Self::UnsupportedHttpVersion { version: String::from_utf8_lossy(version).into_owned() }
    }

    pub fn invalid_header<S: ToString>(str: S) -> Self {
        Self::InvalidHeader { reason: str.to_string() }
    }

    pub fn too_many_headers(max_num: usize) -> Self {
        Self::TooManyHeaders { max_num }
    }

    pub fn unimplemented_encoding<S: ToString>(encoding: S) -> Self {
        Self::UnimplementedEncoding { encoding: encoding.to_string() }
    }

    pub fn truncated_body(expected: u64, received: u64) -> Self {
        Self::TruncatedBody { expected, received }
    }

    pub fn too_large(current_size: usize, max_size: usize) -> Self {
        Self::RequestTooLarge { current_size, max_size }
    }

    pub fn timeout(timeout: Duration) -> Self {
        Self::Timeout { timeout }
    }

    pub fn transport<E: Into<io::Error>>(e: E) -> Self {
        Self::TransportReadError { source: e.into() }
    }

    /// Returns true if the error was caused by the peer closing the stream early.
    pub fn is_truncated(&self) -> bool {
        matches!(self, ParseError::TruncatedRequest | ParseError::TruncatedBody { .. })
    }
}
