//! Framed adapter for [`RequestParser`].
//!
//! [`RequestDecoder`] lets a [`RequestParser`] drive a `tokio_util::codec::FramedRead`,
//! which then owns the receive buffer and yields one [`Request`] per frame.
//!
//! # Example
//!
//! ```no_run
//! use feed_http::codec::RequestDecoder;
//! use tokio_util::codec::Decoder;
//! use bytes::BytesMut;
//!
//! let mut decoder = RequestDecoder::new();
//! let mut buffer = BytesMut::from(&b"GET / HTTP/1.1\r\nHost: test\r\n\r\n"[..]);
//! let request = decoder.decode(&mut buffer);
//! ```

use bytes::{Buf, BytesMut};
use tokio_util::codec::Decoder;

use crate::codec::RequestParser;
use crate::protocol::{ParseError, ParseState, Request};

/// A decoder producing complete requests from a growing buffer.
///
/// A fresh parser is started after every request, so bytes left in the buffer
/// are decoded as the start of the next one.
#[derive(Debug, Default)]
pub struct RequestDecoder {
    parser: RequestParser,
}

impl RequestDecoder {
    /// Creates a new `RequestDecoder` instance
    pub fn new() -> Self {
        Default::default()
    }
}

impl Decoder for RequestDecoder {
    type Item = Request;
    type Error = ParseError;

    /// Feeds the buffered bytes to the parser and drops what it consumed.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(request))`: a request was completed
    /// - `Ok(None)`: need more data to proceed
    /// - `Err(_)`: the request is invalid
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        let fed = self.parser.feed(src);
        src.advance(self.parser.last_consumed());
        fed?;

        if self.parser.is_done() {
            return Ok(std::mem::take(&mut self.parser).into_request());
        }
        Ok(None)
    }

    /// Like `decode`, but the stream has ended: a started request can no longer complete.
    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        match self.decode(src)? {
            Some(request) => Ok(Some(request)),
            None if src.is_empty() && self.parser.state() == ParseState::Init => Ok(None),
            None => Err(self.parser.eof_error()),
        }
    }
}
