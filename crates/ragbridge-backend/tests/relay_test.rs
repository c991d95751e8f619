use bytes::Bytes;
use futures::StreamExt;

use ragbridge_backend::relay_sse_to_text;

/// Run the relay over a fixed chunk sequence and collect the output text.
async fn relay_to_string(chunks: Vec<Result<Bytes, std::io::Error>>) -> String {
    let upstream = futures::stream::iter(chunks);
    let output: Vec<Bytes> = relay_sse_to_text(upstream).collect().await;

    let mut text = String::new();
    for piece in output {
        text.push_str(std::str::from_utf8(&piece).expect("relay output must be valid UTF-8"));
    }
    text
}

fn ok(chunk: &str) -> Result<Bytes, std::io::Error> {
    Ok(Bytes::copy_from_slice(chunk.as_bytes()))
}

#[tokio::test]
async fn test_data_lines_with_line_break() {
    // Scenario A: empty data line between two payloads becomes one newline,
    // payloads carry no appended newline.
    let output = relay_to_string(vec![ok("data: Hello\n"), ok("data: \n"), ok("data: world\n")]).await;
    assert_eq!(output, "Hello\nworld");
}

#[tokio::test]
async fn test_event_only_stream_is_empty() {
    // Scenario B: framing-only input produces no output and still ends cleanly.
    let output = relay_to_string(vec![ok("event: ping\n")]).await;
    assert_eq!(output, "");
}

#[tokio::test]
async fn test_framing_interleaved_with_data() {
    let output = relay_to_string(vec![ok("event: message\nid: 7\ndata: hi\n\n")]).await;
    assert_eq!(output, "hi");
}

#[tokio::test]
async fn test_whitespace_payload_produces_nothing() {
    let output = relay_to_string(vec![ok("data: one\ndata:   \ndata: two\n")]).await;
    assert_eq!(output, "onetwo");
}

#[tokio::test]
async fn test_bare_content_line_passed_through_trimmed() {
    let output = relay_to_string(vec![ok("  stray output  \n")]).await;
    assert_eq!(output, "stray output");
}

#[tokio::test]
async fn test_multibyte_char_split_across_chunks() {
    // 0xC3 0xA9 ("é") is cut by the chunk boundary; the decoder must
    // reassemble it instead of emitting replacement characters.
    let chunks = vec![
        Ok(Bytes::copy_from_slice(b"data: caf\xC3")),
        Ok(Bytes::copy_from_slice(b"\xA9\n")),
    ];
    let output = relay_to_string(chunks).await;
    assert_eq!(output, "caf\u{e9}");
}

#[tokio::test]
async fn test_line_split_across_chunks_is_not_stitched() {
    // Each chunk's trailing partial line is classified independently. The
    // two halves still reach the client in order.
    let output = relay_to_string(vec![ok("data: Hel"), ok("lo\n")]).await;
    assert_eq!(output, "Hello");
}

#[tokio::test]
async fn test_upstream_error_truncates_without_marker() {
    // A mid-stream read failure ends the output early; no error text is
    // injected into the relayed stream.
    let chunks = vec![
        ok("data: partial answer\n"),
        Err(std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset")),
        ok("data: never seen\n"),
    ];
    let output = relay_to_string(chunks).await;
    assert_eq!(output, "partial answer");
}

#[tokio::test]
async fn test_empty_upstream_closes_cleanly() {
    let output = relay_to_string(vec![]).await;
    assert_eq!(output, "");
}

#[tokio::test]
async fn test_order_preserved_across_many_chunks() {
    let output = relay_to_string(vec![
        ok("data: a\n"),
        ok("data: \n"),
        ok("data: b\n"),
        ok("data: \n"),
        ok("data: c\n"),
    ])
    .await;
    assert_eq!(output, "a\nb\nc");
}
