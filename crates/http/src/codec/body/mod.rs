//! Request body framing and accumulation.
//!
//! - [`parse_payload`]: decides how the body is framed once the headers are known
//! - [`LengthDecoder`]: accumulates a body of known length
//!
//! Only Content-Length framing is implemented. A chunked body is recognised so
//! that it can be rejected with a typed error.

mod length_decoder;

pub use length_decoder::LengthDecoder;

use crate::protocol::{HeaderSet, PayloadSize};

const CONTENT_LENGTH: &str = "content-length";

const TRANSFER_ENCODING: &str = "transfer-encoding";

/// Determines how the body is framed from the request headers.
///
/// `Content-Length` alone decides whether there is a body. An absent or unparsable
/// value means no body, unless `Transfer-Encoding` asks for chunked framing.
pub fn parse_payload(headers: &HeaderSet) -> PayloadSize {
    let length = headers.get(CONTENT_LENGTH).and_then(|value| value.trim().parse::<u64>().ok());

    match length {
        Some(length) => PayloadSize::from_length(length),
        None if is_chunked(headers.get(TRANSFER_ENCODING)) => PayloadSize::Chunked,
        None => PayloadSize::Empty,
    }
}

/// Checks if the Transfer-Encoding header indicates chunked encoding.
///
/// According to RFC 7230, chunked must be the last encoding if present.
fn is_chunked(header_value: Option<&str>) -> bool {
    const CHUNKED: &str = "chunked";
    header_value.and_then(|value| value.rsplit(',').next()).is_some_and(|last| last.trim().eq_ignore_ascii_case(CHUNKED))
}
