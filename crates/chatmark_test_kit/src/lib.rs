//! Test utilities shared by the chatmark crates.
//!
//! Loads recorded transport fixtures from disk and builds event-stream bodies
//! for mocked upstream responses.

/// Loads a fixture file
///
/// # Example
/// ```ignore
/// let content = fixture("src/fixtures/completion.sse").await;
/// ```
pub async fn fixture(path: &str) -> String {
    tokio::fs::read_to_string(path)
        .await
        .unwrap_or_else(|e| panic!("Failed to load fixture at {path}: {e}"))
}

/// Loads a fixture file relative to the calling crate's manifest directory
///
/// # Example
/// ```ignore
/// let content = fixture!("src/fixtures/completion.sse").await;
/// ```
#[macro_export]
macro_rules! fixture {
    ($path:expr) => {
        $crate::fixture(&format!("{}/{}", env!("CARGO_MANIFEST_DIR"), $path))
    };
}

/// One `data: ` line carrying `delta` as `choices[0].delta.content`.
pub fn delta_line(delta: &str) -> String {
    let envelope = serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion.chunk",
        "choices": [{"index": 0, "delta": {"content": delta}, "finish_reason": null}]
    });
    format!("data: {envelope}")
}

/// A complete event-stream body: one event per delta followed by the
/// `[DONE]` sentinel, events separated by blank lines.
pub fn sse_body(deltas: &[&str]) -> String {
    let mut body = String::new();
    for delta in deltas {
        body.push_str(&delta_line(delta));
        body.push_str("\n\n");
    }
    body.push_str("data: [DONE]\n\n");
    body
}
