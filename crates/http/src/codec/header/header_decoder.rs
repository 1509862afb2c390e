//! Header section decoder.
//!
//! Parses every `name: value` line up to and including the blank line that ends
//! the section. Parsing is delegated to `httparse`, which validates header names
//! as tokens and rejects lines without a colon. Every line, the blank one
//! included, must end with CRLF; `httparse` alone would also take a bare LF.
//! Nothing is consumed until the whole section is available, so a partial
//! section is simply retried on the next feed with more bytes.

use httparse::{Error, Status};
use tracing::trace;

use crate::protocol::{HeaderSet, ParseError};

/// Maximum number of headers allowed in a request
const MAX_HEADER_NUM: usize = 64;

/// Decoder for the header section of a request.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderDecoder;

impl HeaderDecoder {
    /// Attempts to decode a complete header section from the front of `src`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(consumed))` if the section is complete; its headers were appended to `headers`
    /// - `Ok(None)` if more data is needed; nothing was consumed and `headers` is untouched
    /// - `Err(ParseError)` if a header line is invalid or there are too many of them
    pub fn decode(src: &[u8], headers: &mut HeaderSet) -> Result<Option<usize>, ParseError> {
        let mut parsed = [httparse::EMPTY_HEADER; MAX_HEADER_NUM];

        let status = httparse::parse_headers(src, &mut parsed).map_err(|e| match e {
            Error::TooManyHeaders => ParseError::too_many_headers(MAX_HEADER_NUM),
            e => ParseError::invalid_header(e.to_string()),
        })?;

        match status {
            Status::Complete((consumed, _)) if has_bare_lf(&src[..consumed]) => Err(bare_lf_error()),
            Status::Partial if has_bare_lf(src) => Err(bare_lf_error()),
            Status::Complete((consumed, parsed)) => {
                trace!(header_count = parsed.len(), header_bytes = consumed, "parsed header section");
                for header in parsed {
                    let value = std::str::from_utf8(header.value)
                        .map_err(|_| ParseError::invalid_header(format!("value of {} is not valid utf-8", header.name)))?;
                    headers.append(header.name, value.trim());
                }
                Ok(Some(consumed))
            }
            Status::Partial => Ok(None),
        }
    }
}

fn has_bare_lf(section: &[u8]) -> bool {
    section.first() == Some(&b'\n') || section.windows(2).any(|pair| pair[1] == b'\n' && pair[0] != b'\r')
}

fn bare_lf_error() -> ParseError {
    ParseError::invalid_header("header line not terminated by CRLF")
}
