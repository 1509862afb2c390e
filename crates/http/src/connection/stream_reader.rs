use std::cmp;

use bytes::{Buf, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::time;
use tracing::{debug, trace, warn};

use crate::codec::RequestParser;
use crate::connection::ReaderConfig;
use crate::ensure;
use crate::protocol::{ParseError, Request};

/// Reads complete requests from a byte stream.
///
/// `StreamReader` owns the receive buffer of a connection. Every read appends to
/// the back of the buffer, the whole unconsumed content is fed to the parser, and
/// the consumed prefix is dropped from the front. Bytes following a request stay
/// buffered, see [`buffered`](Self::buffered).
///
/// # Type Parameters
///
/// * `R`: The async readable stream type
#[derive(Debug)]
pub struct StreamReader<R> {
    reader: R,
    buffer: BytesMut,
    config: ReaderConfig,
}

impl<R> StreamReader<R>
where
    R: AsyncRead + Unpin,
{
    pub fn new(reader: R) -> Self {
        Self::with_config(reader, ReaderConfig::default())
    }

    pub fn with_config(reader: R, config: ReaderConfig) -> Self {
        Self { reader, buffer: BytesMut::with_capacity(config.initial_capacity()), config }
    }

    /// Reads the next request.
    ///
    /// Either a complete request is returned, or an error and nothing else: a
    /// partially parsed request is never handed out. When the configured deadline
    /// elapses first, the read is aborted with [`ParseError::Timeout`] and the
    /// buffer is released.
    pub async fn read_request(&mut self) -> Result<Request, ParseError> {
        let Some(timeout) = self.config.read_timeout() else {
            return self.read_request_inner().await;
        };

        match time::timeout(timeout, self.read_request_inner()).await {
            Ok(result) => result,
            Err(_elapsed) => {
                warn!(?timeout, buffered = self.buffer.len(), "request not complete before deadline");
                self.buffer = BytesMut::new();
                Err(ParseError::timeout(timeout))
            }
        }
    }

    /// Bytes received but not consumed by any request so far.
    pub fn buffered(&self) -> &[u8] {
        &self.buffer
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    async fn read_request_inner(&mut self) -> Result<Request, ParseError> {
        let mut parser = RequestParser::new();
        let max_size = self.config.max_buffer_size();

        loop {
            let fed = parser.feed(&self.buffer);
            let consumed = parser.last_consumed();
            self.buffer.advance(consumed);
            fed?;
            trace!(consumed, buffered = self.buffer.len(), state = ?parser.state(), "fed request parser");

            if parser.is_done() {
                break;
            }

            ensure!(self.buffer.len() < max_size, ParseError::too_large(self.buffer.len(), max_size));

            if self.fill_buffer(max_size - self.buffer.len()).await? == 0 {
                debug!(state = ?parser.state(), buffered = self.buffer.len(), "stream ended before request was complete");
                return Err(parser.eof_error());
            }
        }

        parser.into_request().ok_or(ParseError::TruncatedRequest)
    }

    /// Reads at most `limit` bytes onto the back of the buffer, returning how many were read.
    async fn fill_buffer(&mut self, limit: usize) -> Result<usize, ParseError> {
        self.buffer.reserve(cmp::min(limit, self.config.initial_capacity()));

        let read = (&mut self.reader).take(limit as u64).read_buf(&mut self.buffer).await.map_err(ParseError::transport)?;
        debug!(read, buffered = self.buffer.len(), "read from transport");
        Ok(read)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::io;
    use std::pin::Pin;
    use std::task::{Context, Poll};
    use std::time::Duration;
    use tokio::io::ReadBuf;

    use crate::protocol::ParseState;

    // hands out one scripted chunk per read, then end-of-stream
    struct MockIO {
        chunks: VecDeque<io::Result<Vec<u8>>>,
        reads: usize,
    }

    impl MockIO {
        fn new<I, C>(chunks: I) -> Self
        where
            I: IntoIterator<Item = C>,
            C: AsRef<[u8]>,
        {
            Self { chunks: chunks.into_iter().map(|chunk| Ok(chunk.as_ref().to_vec())).collect(), reads: 0 }
        }

        fn failing_after<C: AsRef<[u8]>>(chunk: C) -> Self {
            let mut mock = Self::new([chunk]);
            mock.chunks.push_back(Err(io::Error::new(io::ErrorKind::ConnectionReset, "connection reset by peer")));
            mock
        }
    }

    impl AsyncRead for MockIO {
        fn poll_read(mut self: Pin<&mut Self>, _cx: &mut Context<'_>, buf: &mut ReadBuf<'_>) -> Poll<io::Result<()>> {
            self.reads += 1;
            match self.chunks.pop_front() {
                Some(Ok(mut chunk)) => {
                    let amt = cmp::min(chunk.len(), buf.remaining());
                    buf.put_slice(&chunk[..amt]);
                    if amt < chunk.len() {
                        let rest = chunk.split_off(amt);
                        self.chunks.push_front(Ok(rest));
                    }
                    Poll::Ready(Ok(()))
                }
                Some(Err(e)) => Poll::Ready(Err(e)),
                None => Poll::Ready(Ok(())),
            }
        }
    }

    const SIMPLE_GET: &[u8] = b"GET / HTTP/1.1\r\nHost: test\r\n\r\n";

    #[tokio::test]
    async fn whole_request_in_one_read() {
        let mut reader = StreamReader::new(MockIO::new([SIMPLE_GET]));

        let request = reader.read_request().await.unwrap();

        assert_eq!(request.state(), ParseState::Done);
        let line = request.request_line().unwrap();
        assert_eq!((line.method(), line.target(), line.version()), ("GET", "/", "1.1"));
        assert_eq!(request.headers().get("Host"), Some("test"));
        assert!(request.body().is_empty());
        assert!(reader.buffered().is_empty());
    }

    #[tokio::test]
    async fn fragmented_request() {
        let mut reader = StreamReader::new(MockIO::new([&SIMPLE_GET[..3], &SIMPLE_GET[3..20], &SIMPLE_GET[20..29], &SIMPLE_GET[29..]]));

        let request = reader.read_request().await.unwrap();

        assert_eq!(request.request_line().unwrap().method(), "GET");
        assert_eq!(request.headers().get("host"), Some("test"));
    }

    #[tokio::test]
    async fn byte_at_a_time() {
        let input = b"POST /coffee HTTP/1.1\r\nHost: localhost:42069\r\nContent-Length: 13\r\n\r\nhello world!\n";
        let mut reader = StreamReader::new(MockIO::new(input.iter().map(std::slice::from_ref)));

        let request = reader.read_request().await.unwrap();

        assert_eq!(request.request_line().unwrap().target(), "/coffee");
        assert_eq!(request.headers().get("content-length"), Some("13"));
        assert_eq!(request.body(), b"hello world!\n");
    }

    #[tokio::test]
    async fn post_with_body() {
        let mut reader = StreamReader::new(MockIO::new([&b"POST /x HTTP/1.1\r\nContent-Length: 5\r\n\r\nhello"[..]]));

        let request = reader.read_request().await.unwrap();

        assert_eq!(request.body(), b"hello");
        assert_eq!(request.state(), ParseState::Done);
    }

    #[tokio::test]
    async fn extra_bytes_stay_buffered() {
        let mut reader = StreamReader::new(MockIO::new([&b"POST /x HTTP/1.1\r\nContent-Length: 5\r\n\r\nhello, world"[..]]));

        let request = reader.read_request().await.unwrap();

        assert_eq!(request.body(), b"hello");
        assert_eq!(reader.buffered(), b", world");
    }

    #[tokio::test]
    async fn buffered_bytes_start_the_next_request() {
        let mut reader = StreamReader::new(MockIO::new([&b"GET /one HTTP/1.1\r\n\r\nGET /two HTTP/1.1\r\n"[..], b"\r\n"]));

        let first = reader.read_request().await.unwrap();
        assert_eq!(first.request_line().unwrap().target(), "/one");

        let second = reader.read_request().await.unwrap();
        assert_eq!(second.request_line().unwrap().target(), "/two");
        assert!(reader.buffered().is_empty());
    }

    #[tokio::test]
    async fn eof_inside_headers_is_truncated_request() {
        let mut reader = StreamReader::new(MockIO::new([&b"GET / HTTP/1.1\r\nHost: test\r\n"[..]]));

        let result = reader.read_request().await;

        assert!(matches!(result, Err(ParseError::TruncatedRequest)));
    }

    #[tokio::test]
    async fn eof_before_anything_is_truncated_request() {
        let mut reader = StreamReader::new(MockIO::new(Vec::<Vec<u8>>::new()));

        assert!(matches!(reader.read_request().await, Err(ParseError::TruncatedRequest)));
    }

    #[tokio::test]
    async fn eof_inside_body_is_truncated_body() {
        let mut reader = StreamReader::new(MockIO::new([&b"POST /x HTTP/1.1\r\nContent-Length: 20\r\n\r\n"[..], b"partial content"]));

        let result = reader.read_request().await;

        assert!(matches!(result, Err(ParseError::TruncatedBody { expected: 20, received: 15 })));
    }

    #[tokio::test]
    async fn malformed_request_line() {
        let mut reader = StreamReader::new(MockIO::new([&b"BADREQUESTLINE\r\nHost: test\r\n\r\n"[..]]));

        assert!(matches!(reader.read_request().await, Err(ParseError::MalformedRequestLine { .. })));
        assert_eq!(reader.buffered(), b"Host: test\r\n\r\n");
    }

    #[tokio::test]
    async fn unsupported_version() {
        let mut reader = StreamReader::new(MockIO::new([&b"GET / HTTP/2.0\r\n\r\n"[..]]));

        assert!(matches!(reader.read_request().await, Err(ParseError::UnsupportedHttpVersion { .. })));
        assert_eq!(reader.buffered(), b"\r\n");
    }

    #[tokio::test]
    async fn bare_lf_in_headers_is_rejected() {
        let mut reader = StreamReader::new(MockIO::new([&b"GET / HTTP/1.1\r\nHost: test\n\n"[..]]));

        assert!(matches!(reader.read_request().await, Err(ParseError::InvalidHeader { .. })));
        assert_eq!(reader.buffered(), b"Host: test\n\n");
    }

    #[tokio::test]
    async fn chunked_body_is_rejected() {
        let mut reader = StreamReader::new(MockIO::new([&b"POST /x HTTP/1.1\r\nTransfer-Encoding: chunked\r\n\r\n5\r\nhello\r\n0\r\n\r\n"[..]]));

        assert!(matches!(reader.read_request().await, Err(ParseError::UnimplementedEncoding { .. })));
    }

    #[tokio::test]
    async fn long_header_grows_the_buffer() {
        let value = "x".repeat(3000);
        let input = format!("GET / HTTP/1.1\r\nX-Long: {value}\r\n\r\n");
        let config = ReaderConfig::new().with_initial_capacity(16);
        let mut reader = StreamReader::with_config(MockIO::new([input.as_bytes()]), config);

        let request = reader.read_request().await.unwrap();

        assert_eq!(request.headers().get("x-long"), Some(value.as_str()));
    }

    #[tokio::test]
    async fn oversized_header_section_is_rejected() {
        let input = format!("GET / HTTP/1.1\r\nX-Long: {}\r\n\r\n", "x".repeat(200));
        let config = ReaderConfig::new().with_max_buffer_size(64);
        let mut reader = StreamReader::with_config(MockIO::new([input.as_bytes()]), config);

        let result = reader.read_request().await;

        assert!(matches!(result, Err(ParseError::RequestTooLarge { current_size: 64, max_size: 64 })));
    }

    #[tokio::test]
    async fn body_is_not_bound_by_buffer_limit() {
        let body = "b".repeat(500);
        let input = format!("POST /upload HTTP/1.1\r\nContent-Length: 500\r\n\r\n{body}");
        let chunks: Vec<&[u8]> = input.as_bytes().chunks(40).collect();
        let config = ReaderConfig::new().with_max_buffer_size(64).with_initial_capacity(8);
        let mut reader = StreamReader::with_config(MockIO::new(chunks), config);

        let request = reader.read_request().await.unwrap();

        assert_eq!(request.body(), body.as_bytes());
    }

    #[tokio::test]
    async fn read_error_is_transport_error() {
        let mut reader = StreamReader::new(MockIO::failing_after(b"GET / HTTP/1.1\r\n"));

        let result = reader.read_request().await;

        match result {
            Err(ParseError::TransportReadError { source }) => assert_eq!(source.kind(), io::ErrorKind::ConnectionReset),
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[tokio::test]
    async fn no_read_after_completion() {
        let mut reader = StreamReader::new(MockIO::new([SIMPLE_GET, b"never read"]));

        reader.read_request().await.unwrap();

        assert_eq!(reader.into_inner().reads, 1);
    }

    #[tokio::test]
    async fn silent_peer_times_out() {
        let (client, server) = tokio::io::duplex(64);
        let config = ReaderConfig::new().with_read_timeout(Duration::from_millis(50));
        let mut reader = StreamReader::with_config(server, config);

        let result = reader.read_request().await;

        assert!(matches!(result, Err(ParseError::Timeout { .. })));
        assert!(reader.buffered().is_empty());
        drop(client);
    }
}
