//! Reading requests from a byte stream.
//!
//! - [`StreamReader`]: owns the receive buffer of one connection, pulls bytes from
//!   the transport and feeds them to a [`RequestParser`](crate::codec::RequestParser)
//!   until a request is complete
//! - [`ReaderConfig`]: buffer limits and the read deadline

mod reader_config;
mod stream_reader;

pub use reader_config::{DEFAULT_INITIAL_CAPACITY, DEFAULT_MAX_BUFFER_SIZE, DEFAULT_READ_TIMEOUT, ReaderConfig};
pub use stream_reader::StreamReader;
