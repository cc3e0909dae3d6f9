//! Request body collection and JSON decoding.
//!
//! An HTTP/1.x request body arrives as a sequence of chunks on the connection
//! stream. [`BodyCollector`] accumulates those chunks, in arrival order, into
//! a single request-scoped buffer. Only once the stream has delivered the
//! announced number of bytes may the buffer be decoded; both exits consume
//! the collector, so a partial buffer is never decoded and a finished
//! collector never collects again.
use std::fmt;

use serde_json::Value;

/// Why a request body could not be decoded.
#[derive(Debug, Clone, PartialEq)]
pub enum BodyDecodeError {
    /// The stream ended before the announced content length arrived.
    Incomplete { expected: usize, received: usize },
    /// The completed buffer is not well-formed JSON.
    Malformed(String),
}

impl fmt::Display for BodyDecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Incomplete { expected, received } => {
                write!(f, "body ended after {} of {} bytes", received, expected)
            }
            Self::Malformed(reason) => write!(f, "{}", reason),
        }
    }
}

/// Decode a stream-completed buffer as JSON text.
pub fn decode_json(bytes: &[u8]) -> Result<Value, BodyDecodeError> {
    serde_json::from_slice(bytes).map_err(|e| BodyDecodeError::Malformed(e.to_string()))
}

/// Accumulates the body of one request, chunk by chunk.
///
/// The buffer has exactly one writer (whoever reads the stream) and one
/// reader (the completion step), and lives only as long as its request.
pub struct BodyCollector {
    buf: Vec<u8>,
    expected: usize,
}

impl BodyCollector {
    /// Create an empty collector for a body of `expected` bytes.
    pub fn new(expected: usize) -> Self {
        Self {
            buf: Vec::with_capacity(expected),
            expected,
        }
    }

    /// Append one chunk, in arrival order.
    pub fn push(&mut self, chunk: &[u8]) {
        self.buf.extend_from_slice(chunk);
    }

    pub fn is_complete(&self) -> bool {
        self.buf.len() >= self.expected
    }

    /// Bytes still missing before the body is complete.
    pub fn remaining(&self) -> usize {
        self.expected.saturating_sub(self.buf.len())
    }

    /// End of stream: decode the accumulated buffer as JSON. Fails if the
    /// stream ended before the announced length arrived.
    pub fn decode(self) -> Result<Value, BodyDecodeError> {
        if !self.is_complete() {
            return Err(BodyDecodeError::Incomplete {
                expected: self.expected,
                received: self.buf.len(),
            });
        }
        decode_json(&self.buf)
    }

    /// End of stream: take the raw buffer without decoding.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_chunks_accumulate_in_order() {
        let mut collector = BodyCollector::new(10);
        collector.push(b"{\"a\"");
        collector.push(b":");
        assert!(!collector.is_complete());
        assert_eq!(collector.remaining(), 5);
        collector.push(b"\"bc\"}");
        assert!(collector.is_complete());
        assert_eq!(collector.into_bytes(), b"{\"a\":\"bc\"}".to_vec());
    }

    #[test]
    fn test_decode_complete_buffer() {
        let mut collector = BodyCollector::new(15);
        collector.push(b"{\"name\"");
        collector.push(b":\"test\"}");
        let value = collector.decode().unwrap();
        assert_eq!(value["name"], "test");
    }

    #[test]
    fn test_partial_buffer_is_never_decoded() {
        let mut collector = BodyCollector::new(15);
        collector.push(b"{\"name\":\"te");
        assert_eq!(
            collector.decode(),
            Err(BodyDecodeError::Incomplete {
                expected: 15,
                received: 11,
            })
        );
    }

    #[test]
    fn test_malformed_json_fails_decode() {
        let mut collector = BodyCollector::new(9);
        collector.push(b"{bad json");
        match collector.decode() {
            Err(BodyDecodeError::Malformed(_)) => (),
            other => panic!("expected malformed error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_body_is_not_json() {
        let collector = BodyCollector::new(0);
        assert!(collector.decode().is_err());
    }
}
