//! Core request types.
//!
//! - [`Request`], [`RequestLine`] and [`ParseState`]: the request being built
//!   and the state of the parser building it
//! - [`HeaderSet`]: ordered, case-insensitive headers
//! - [`PayloadSize`]: how the body is framed
//! - [`ParseError`]: everything that can go wrong while reading a request

mod payload;
pub use payload::PayloadSize;

mod header;
pub use header::HeaderSet;

mod request;
pub use request::ParseState;
pub use request::Request;
pub use request::RequestLine;

mod error;
pub use error::ParseError;
