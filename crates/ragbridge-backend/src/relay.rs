// SSE-to-plain-text relay.
//
// The backend answers `/query/stream` as a Server-Sent-Events byte stream.
// The page wants plain text. This module strips the SSE framing on the fly:
// each upstream chunk is decoded, split into lines, classified, and the
// surviving content is forwarded immediately. Nothing is buffered beyond the
// trailing bytes of an incomplete UTF-8 character.

use std::pin::Pin;

use bytes::Bytes;
use futures::{Stream, StreamExt};

const DATA_PREFIX: &str = "data: ";

/// Incremental UTF-8 decoder.
///
/// Upstream chunk boundaries are arbitrary and can fall in the middle of a
/// multi-byte character. The decoder holds the incomplete tail between calls
/// so the character is assembled once the rest arrives.
#[derive(Debug, Default)]
pub struct Utf8ChunkDecoder {
    pending: Vec<u8>,
}

impl Utf8ChunkDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a chunk, prepending any bytes held back from the previous call.
    pub fn decode(&mut self, chunk: &[u8]) -> String {
        let mut bytes = std::mem::take(&mut self.pending);
        bytes.extend_from_slice(chunk);

        match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(err) => {
                let valid_up_to = err.utf8_error().valid_up_to();
                let incomplete_tail = err.utf8_error().error_len().is_none();
                let bytes = err.into_bytes();

                if incomplete_tail {
                    // Sequence cut off by the chunk boundary: hold the tail
                    // for the next chunk. At most 3 bytes.
                    self.pending = bytes[valid_up_to..].to_vec();
                    String::from_utf8_lossy(&bytes[..valid_up_to]).into_owned()
                } else {
                    // Genuinely invalid bytes, not a boundary artifact.
                    String::from_utf8_lossy(&bytes).into_owned()
                }
            }
        }
    }
}

/// Classify one SSE line and produce the text it contributes, if any.
///
/// - `data: ` with empty payload marks a line break.
/// - `data: ` with non-whitespace payload contributes the bare payload.
/// - `event:`/`id:` framing lines, malformed `data:` lines and blank lines
///   contribute nothing.
/// - Any other non-blank line is passed through trimmed.
fn transform_line(line: &str) -> Option<Bytes> {
    if let Some(payload) = line.strip_prefix(DATA_PREFIX) {
        if payload.is_empty() {
            return Some(Bytes::from_static(b"\n"));
        }
        if payload.trim().is_empty() {
            return None;
        }
        return Some(Bytes::copy_from_slice(payload.as_bytes()));
    }

    if line.starts_with("data:") || line.starts_with("event:") || line.starts_with("id:") {
        return None;
    }

    let trimmed = line.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(Bytes::copy_from_slice(trimmed.as_bytes()))
    }
}

/// Relay an SSE byte stream as plain text.
///
/// Single pass, forward only. Each chunk is split on `\n` independently; a
/// trailing partial line is classified as-is rather than carried into the
/// next chunk. An upstream read error ends the output stream early, the
/// error is logged and not surfaced to the consumer.
pub fn relay_sse_to_text<S, E>(upstream: S) -> Pin<Box<dyn Stream<Item = Bytes> + Send>>
where
    S: Stream<Item = Result<Bytes, E>> + Send + 'static,
    E: std::fmt::Display + Send,
{
    Box::pin(async_stream::stream! {
        let mut chunks = Box::pin(upstream);
        let mut decoder = Utf8ChunkDecoder::new();

        while let Some(chunk_result) = chunks.next().await {
            match chunk_result {
                Ok(bytes) => {
                    let text = decoder.decode(&bytes);
                    for line in text.split('\n') {
                        if let Some(out) = transform_line(line) {
                            yield out;
                        }
                    }
                }
                Err(e) => {
                    tracing::error!("Stream reading error: {}", e);
                    break;
                }
            }
        }
    })
}

/// Relay the body of an already-validated streaming backend response.
pub fn relay_response(response: reqwest::Response) -> Pin<Box<dyn Stream<Item = Bytes> + Send>> {
    relay_sse_to_text(response.bytes_stream())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_line_strips_prefix() {
        assert_eq!(transform_line("data: Hello").unwrap(), Bytes::from("Hello"));
    }

    #[test]
    fn test_empty_data_line_is_newline() {
        assert_eq!(transform_line("data: ").unwrap(), Bytes::from("\n"));
    }

    #[test]
    fn test_whitespace_payload_dropped() {
        assert!(transform_line("data:    ").is_none());
    }

    #[test]
    fn test_framing_lines_dropped() {
        assert!(transform_line("event: ping").is_none());
        assert!(transform_line("id: 42").is_none());
        assert!(transform_line("").is_none());
        assert!(transform_line("   ").is_none());
    }

    #[test]
    fn test_data_without_space_dropped() {
        assert!(transform_line("data:compact").is_none());
    }

    #[test]
    fn test_bare_content_line_trimmed() {
        assert_eq!(transform_line("  loose text  ").unwrap(), Bytes::from("loose text"));
    }

    #[test]
    fn test_payload_keeps_inner_whitespace() {
        assert_eq!(transform_line("data:  padded ").unwrap(), Bytes::from(" padded "));
    }

    #[test]
    fn test_decoder_whole_chunks() {
        let mut decoder = Utf8ChunkDecoder::new();
        assert_eq!(decoder.decode("héllo".as_bytes()), "héllo");
        assert_eq!(decoder.decode(b"plain"), "plain");
    }

    #[test]
    fn test_decoder_split_multibyte() {
        // U+00E9 is 0xC3 0xA9; split it across two chunks.
        let mut decoder = Utf8ChunkDecoder::new();
        assert_eq!(decoder.decode(&[b'h', 0xC3]), "h");
        assert_eq!(decoder.decode(&[0xA9, b'!']), "é!");
    }

    #[test]
    fn test_decoder_split_four_byte_char() {
        // U+1F980 (🦀) is 0xF0 0x9F 0xA6 0x80.
        let mut decoder = Utf8ChunkDecoder::new();
        assert_eq!(decoder.decode(&[0xF0, 0x9F]), "");
        assert_eq!(decoder.decode(&[0xA6]), "");
        assert_eq!(decoder.decode(&[0x80]), "🦀");
    }

    #[test]
    fn test_decoder_invalid_bytes_replaced() {
        let mut decoder = Utf8ChunkDecoder::new();
        let text = decoder.decode(&[b'a', 0xFF, b'b']);
        assert_eq!(text, "a\u{FFFD}b");
    }
}
