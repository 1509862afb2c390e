//! An incremental HTTP/1.1 request parser
//!
//! This crate parses HTTP/1.1 requests from byte streams that deliver data in
//! arbitrarily sized fragments: a single read may end in the middle of the
//! request-line or a header, or carry the start of the next request. The parser
//! consumes bytes as they arrive and reports exactly how many it took, so the
//! caller never loses or duplicates a byte of its receive buffer.
//!
//! # Example
//!
//! ```no_run
//! use feed_http::connection::StreamReader;
//! use tokio::net::TcpListener;
//! use tracing::{error, info, warn, Level};
//! use tracing_subscriber::FmtSubscriber;
//!
//! #[tokio::main]
//! async fn main() {
//!     let subscriber = FmtSubscriber::builder().with_max_level(Level::INFO).finish();
//!     tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
//!
//!     let tcp_listener = TcpListener::bind("127.0.0.1:42069").await.expect("bind server error");
//!
//!     loop {
//!         let (tcp_stream, _remote_addr) = match tcp_listener.accept().await {
//!             Ok(stream_and_addr) => stream_and_addr,
//!             Err(e) => {
//!                 warn!(cause = %e, "failed to accept");
//!                 continue;
//!             }
//!         };
//!
//!         tokio::spawn(async move {
//!             let mut reader = StreamReader::new(tcp_stream);
//!             match reader.read_request().await {
//!                 Ok(request) => info!(%request, "received request"),
//!                 Err(e) => error!(cause = %e, "can't read request"),
//!             }
//!         });
//!     }
//! }
//! ```
//!
//! # Architecture
//!
//! - [`protocol`]: the request types and the error type
//! - [`codec`]: the decoders and the [`RequestParser`](codec::RequestParser) state machine
//! - [`connection`]: the [`StreamReader`](connection::StreamReader) that owns the
//!   receive buffer and drives the parser from an `AsyncRead`
//!
//! # Limitations
//!
//! - HTTP/1.1 only
//! - Bodies must be framed by Content-Length; chunked transfer encoding is rejected
//!   with [`ParseError::UnimplementedEncoding`](protocol::ParseError::UnimplementedEncoding)
//! - Maximum number of headers: 64
//! - One request per [`read_request`](connection::StreamReader::read_request) call

pub mod codec;
pub mod connection;
pub mod protocol;

mod utils;
pub(crate) use utils::ensure;
