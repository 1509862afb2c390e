//! Decoder for request bodies framed by a Content-Length header, as defined in
//! [RFC 7230 Section 3.3.2](https://tools.ietf.org/html/rfc7230#section-3.3.2).

use std::cmp;

use bytes::BytesMut;

/// Accumulates a body of known length.
///
/// Each call takes as many bytes as are both available and still missing, so bytes
/// past the end of the body are never touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LengthDecoder {
    /// The total content length, specified by Content-Length header
    expected: u64,
    /// The number of bytes remaining to be read from the payload
    length: u64,
}

impl LengthDecoder {
    /// Creates a new LengthDecoder instance.
    ///
    /// # Arguments
    /// * `length` - The total content length to decode, specified by Content-Length header
    pub fn new(length: u64) -> Self {
        Self { expected: length, length }
    }

    /// Appends up to the remaining number of bytes from `src` to `body`.
    ///
    /// Returns how many bytes were taken from the front of `src`.
    pub fn decode(&mut self, src: &[u8], body: &mut BytesMut) -> usize {
        let len = cmp::min(usize::try_from(self.length).unwrap_or(usize::MAX), src.len());
        body.extend_from_slice(&src[..len]);
        self.length -= len as u64;
        len
    }

    /// Returns true once the whole body has been read.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.length == 0
    }

    #[inline]
    pub fn expected(&self) -> u64 {
        self.expected
    }

    #[inline]
    pub fn received(&self) -> u64 {
        self.expected - self.length
    }
}

impl Default for LengthDecoder {
    fn default() -> Self {
        LengthDecoder::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic() {
        let buffer = b"101234567890abcdef\r\n\r\n";
        let mut body = BytesMut::new();

        let mut length_decoder = LengthDecoder::new(10);
        let consumed = length_decoder.decode(buffer, &mut body);

        assert_eq!(consumed, 10);
        assert!(length_decoder.is_finished());
        assert_eq!(&body[..], b"1012345678");
        assert_eq!(&buffer[consumed..], b"90abcdef\r\n\r\n");
    }

    #[test]
    fn accumulates_across_calls() {
        let mut body = BytesMut::new();
        let mut length_decoder = LengthDecoder::new(5);

        assert_eq!(length_decoder.decode(b"he", &mut body), 2);
        assert!(!length_decoder.is_finished());
        assert_eq!(length_decoder.received(), 2);

        assert_eq!(length_decoder.decode(b"", &mut body), 0);
        assert_eq!(length_decoder.decode(b"llo, world", &mut body), 3);
        assert!(length_decoder.is_finished());
        assert_eq!(length_decoder.expected(), 5);
        assert_eq!(&body[..], b"hello");

        assert_eq!(length_decoder.decode(b"more", &mut body), 0);
        assert_eq!(&body[..], b"hello");
    }
}
