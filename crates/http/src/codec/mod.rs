//! Request decoding.
//!
//! A request is decoded in three steps, each with its own decoder:
//!
//! - [`RequestLineDecoder`]: the request-line
//! - [`HeaderDecoder`](header::HeaderDecoder): the header section
//! - [`LengthDecoder`](body::LengthDecoder): a body framed by Content-Length
//!
//! [`RequestParser`] drives them as a state machine over repeated feeds, and
//! [`RequestDecoder`] adapts the parser to `tokio_util`'s [`Decoder`](tokio_util::codec::Decoder).

pub mod body;
pub mod header;
mod request_decoder;
mod request_line;
mod request_parser;

pub use request_decoder::RequestDecoder;
pub use request_line::RequestLineDecoder;
pub use request_parser::RequestParser;
