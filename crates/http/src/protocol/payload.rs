/// How the body of a request is framed.
///
/// Decided once, when the header section completes:
/// - Known length: read exactly that many bytes
/// - Chunked: transfer-encoding chunked, which is not supported
/// - Empty: no body, the request is done with the headers
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PayloadSize {
    /// Payload with known length in bytes
    Length(u64),
    /// Payload using chunked transfer encoding
    Chunked,
    /// Empty payload (no body)
    Empty,
}

impl PayloadSize {
    /// Builds the size from a `Content-Length` value, zero meaning no body.
    #[inline]
    pub fn from_length(length: u64) -> Self {
        if length == 0 { PayloadSize::Empty } else { PayloadSize::Length(length) }
    }
}
