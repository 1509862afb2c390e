//! Header section decoding.
//!
//! - [`HeaderDecoder`]: decodes the `name: value` lines following the request-line
//!   - Validates header names and enforces a maximum header count
//!   - Consumes nothing until the terminating blank line has arrived

mod header_decoder;

pub use header_decoder::HeaderDecoder;
