//! Request-line recognition.
//!
//! A request-line is `method SP target SP HTTP/1.1 CRLF`. Only the token count
//! and the version are validated; method and target are taken as they are.

use crate::protocol::{ParseError, RequestLine};

const CRLF: &[u8] = b"\r\n";

const PROTOCOL_NAME: &[u8] = b"HTTP";

const SUPPORTED_VERSION: &[u8] = b"1.1";

/// Decoder for the first line of a request.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestLineDecoder;

impl RequestLineDecoder {
    /// Attempts to decode a request-line from the front of `src`.
    ///
    /// # Returns
    ///
    /// - `None` if `src` holds no complete line yet; nothing was consumed
    /// - `Some((consumed, Ok(line)))` for a valid line
    /// - `Some((consumed, Err(_)))` for an invalid line
    ///
    /// `consumed` always covers the line and its CRLF, whether the line was valid or not.
    pub fn decode(src: &[u8]) -> Option<(usize, Result<RequestLine, ParseError>)> {
        let end = find_crlf(src)?;
        Some((end + CRLF.len(), parse_request_line(&src[..end])))
    }
}

fn find_crlf(src: &[u8]) -> Option<usize> {
    src.windows(CRLF.len()).position(|window| window == CRLF)
}

fn parse_request_line(line: &[u8]) -> Result<RequestLine, ParseError> {
    let mut tokens = line.split(|b| *b == b' ');
    let (Some(method), Some(target), Some(version), None) = (tokens.next(), tokens.next(), tokens.next(), tokens.next())
    else {
        return Err(ParseError::malformed_request_line(line));
    };

    let mut version_parts = version.split(|b| *b == b'/');
    match (version_parts.next(), version_parts.next(), version_parts.next()) {
        (Some(name), Some(number), None) if name == PROTOCOL_NAME && number == SUPPORTED_VERSION => {}
        _ => return Err(ParseError::unsupported_version(version)),
    }

    let method = std::str::from_utf8(method).map_err(|_| ParseError::malformed_request_line(line))?;
    let target = std::str::from_utf8(target).map_err(|_| ParseError::malformed_request_line(line))?;

    Ok(RequestLine::new(method, target, "1.1"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_get() {
        let (consumed, line) = RequestLineDecoder::decode(b"GET / HTTP/1.1\r\nHost: test\r\n\r\n").unwrap();

        let line = line.unwrap();
        assert_eq!(consumed, 16);
        assert_eq!(line.method(), "GET");
        assert_eq!(line.target(), "/");
        assert_eq!(line.version(), "1.1");
    }

    #[test]
    fn target_with_query() {
        let (consumed, line) = RequestLineDecoder::decode(b"GET /index/?a=1&b=2 HTTP/1.1\r\n").unwrap();

        assert_eq!(consumed, 30);
        assert_eq!(line.unwrap().target(), "/index/?a=1&b=2");
    }

    #[test]
    fn waits_for_crlf() {
        assert!(RequestLineDecoder::decode(b"").is_none());
        assert!(RequestLineDecoder::decode(b"GET / HTTP/1.1").is_none());
        assert!(RequestLineDecoder::decode(b"GET / HTTP/1.1\r").is_none());
        assert!(RequestLineDecoder::decode(b"GET / HTTP/1.1\n").is_none());
    }

    #[test]
    fn wrong_token_count_is_malformed() {
        for input in [&b"BADREQUESTLINE\r\n"[..], b"GET /\r\n", b"GET  / HTTP/1.1\r\n", b"GET / HTTP/1.1 extra\r\n", b"\r\n"] {
            let (consumed, line) = RequestLineDecoder::decode(input).unwrap();
            assert_eq!(consumed, input.len());
            assert!(matches!(line, Err(ParseError::MalformedRequestLine { .. })), "input {input:?}");
        }
    }

    #[test]
    fn other_versions_are_unsupported() {
        for input in [&b"GET / HTTP/2.0\r\n"[..], b"GET / HTTP/1.0\r\n", b"GET / HTTPS/1.1\r\n", b"GET / HTTP/1/1\r\n", b"GET / http/1.1\r\n", b"GET / HTTP1.1\r\n"] {
            let (consumed, line) = RequestLineDecoder::decode(input).unwrap();
            assert_eq!(consumed, input.len());
            assert!(matches!(line, Err(ParseError::UnsupportedHttpVersion { .. })), "input {input:?}");
        }
    }

    #[test]
    fn only_the_first_line_is_consumed() {
        let input = b"POST /coffee HTTP/1.1\r\nGET / HTTP/1.1\r\n";
        let (consumed, line) = RequestLineDecoder::decode(input).unwrap();

        assert_eq!(consumed, 23);
        assert_eq!(line.unwrap().method(), "POST");
        assert_eq!(&input[consumed..], b"GET / HTTP/1.1\r\n");
    }
}
