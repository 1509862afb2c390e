//! Incremental request parser.
//!
//! [`RequestParser`] is fed the unconsumed front of a receive buffer, as many
//! times as needed, and reports how many bytes it has taken each time. It never
//! looks at a byte twice: the caller drops the consumed prefix and appends new
//! bytes behind the rest.
//!
//! # State Machine
//!
//! ```text
//! Init ──request-line──▶ ParsingHeaders ──blank line──▶ ParsingBody ──Content-Length bytes──▶ Done
//!                                        └──────── no body ───────────────────────────────────▶ Done
//! ```
//!
//! Any failure moves the parser to `Error`, where it stays.

use bytes::BytesMut;
use tracing::trace;

use crate::codec::body::{LengthDecoder, parse_payload};
use crate::codec::header::HeaderDecoder;
use crate::codec::request_line::RequestLineDecoder;
use crate::protocol::{ParseError, ParseState, PayloadSize, Request};

/// Upper bound for the body buffer allocated up front, whatever Content-Length claims.
const INITIAL_BODY_CAPACITY: usize = 8 * 1024;

/// A streaming parser for a single HTTP/1.1 request.
#[derive(Debug, Default)]
pub struct RequestParser {
    request: Request,
    body_decoder: LengthDecoder,
    last_consumed: usize,
}

impl RequestParser {
    pub fn new() -> Self {
        Default::default()
    }

    /// Feeds the parser with the bytes that are available but not yet consumed.
    ///
    /// The parser advances through as many states as `src` allows and stops as soon
    /// as a state needs more data.
    ///
    /// # Returns
    ///
    /// - `Ok(n)`: the first `n` bytes of `src` were consumed; `0` means more data is needed
    ///   (or the request is already done)
    /// - `Err(_)`: the request is invalid; the parser is now in the `Error` state
    ///   and any further call fails with [`ParseError::RequestInErrorState`]
    ///
    /// Bytes can be consumed by a call that fails, e.g. an invalid request-line is
    /// consumed up to and including its CRLF. [`last_consumed`](Self::last_consumed)
    /// reports that count in both cases.
    pub fn feed(&mut self, src: &[u8]) -> Result<usize, ParseError> {
        let mut read = 0;
        let result = self.parse(src, &mut read);
        self.last_consumed = read;
        result.map(|()| read)
    }

    /// How many bytes the most recent [`feed`](Self::feed) consumed, whether it succeeded or not.
    pub fn last_consumed(&self) -> usize {
        self.last_consumed
    }

    fn parse(&mut self, src: &[u8], read: &mut usize) -> Result<(), ParseError> {
        loop {
            let current = &src[*read..];

            match self.request.state {
                ParseState::Init => match RequestLineDecoder::decode(current) {
                    Some((consumed, line)) => {
                        *read += consumed;
                        let line = line.map_err(|e| self.fail(e))?;
                        trace!(method = line.method(), target = line.target(), "parsed request line");
                        self.request.request_line = Some(line);
                        self.transition(ParseState::ParsingHeaders);
                    }
                    None => return Ok(()),
                },

                ParseState::ParsingHeaders => match HeaderDecoder::decode(current, &mut self.request.headers) {
                    Ok(Some(consumed)) => {
                        *read += consumed;
                        self.start_body()?;
                    }
                    Ok(None) => return Ok(()),
                    Err(e) => return Err(self.fail(e)),
                },

                ParseState::ParsingBody => {
                    *read += self.body_decoder.decode(current, &mut self.request.body);
                    if !self.body_decoder.is_finished() {
                        return Ok(());
                    }
                    self.transition(ParseState::Done);
                }

                ParseState::Done => return Ok(()),

                ParseState::Error => return Err(ParseError::RequestInErrorState),
            }
        }
    }

    pub fn state(&self) -> ParseState {
        self.request.state
    }

    pub fn is_done(&self) -> bool {
        self.request.is_done()
    }

    /// The request as parsed so far.
    pub fn request(&self) -> &Request {
        &self.request
    }

    /// Returns the request if it has been completely parsed.
    pub fn into_request(self) -> Option<Request> {
        self.is_done().then_some(self.request)
    }

    /// The error to report when the stream ends before the request is done.
    pub fn eof_error(&self) -> ParseError {
        match self.request.state {
            ParseState::ParsingBody => ParseError::truncated_body(self.body_decoder.expected(), self.body_decoder.received()),
            _ => ParseError::TruncatedRequest,
        }
    }

    fn start_body(&mut self) -> Result<(), ParseError> {
        match parse_payload(&self.request.headers) {
            PayloadSize::Empty => self.transition(ParseState::Done),
            PayloadSize::Length(length) => {
                trace!(content_length = length, "request has body");
                self.request.body = BytesMut::with_capacity(usize::try_from(length).unwrap_or(usize::MAX).min(INITIAL_BODY_CAPACITY));
                self.body_decoder = LengthDecoder::new(length);
                self.transition(ParseState::ParsingBody);
            }
            PayloadSize::Chunked => return Err(self.fail(ParseError::unimplemented_encoding("chunked"))),
        }
        Ok(())
    }

    fn transition(&mut self, to: ParseState) {
        trace!(from = ?self.request.state, to = ?to, "request parser transition");
        self.request.state = to;
    }

    fn fail(&mut self, error: ParseError) -> ParseError {
        trace!(from = ?self.request.state, cause = %error, "request parser failed");
        self.request.state = ParseState::Error;
        error
    }
}
