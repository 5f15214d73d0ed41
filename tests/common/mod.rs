//! Common test utilities for integration tests.
//!
//! Reusable SSE fixtures and controller setup helpers.
//!
//! # Example
//!
//! ```ignore
//! let mock = MockHttpConfig::new()
//!     .with_stream(vec![delta_event("Hel"), done_event()])
//!     .build();
//! let mut controller = controller_with(mock);
//! ```

#![allow(dead_code)]

pub mod mocks;

pub use mocks::*;

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use chatwire::app::ChatController;
use chatwire::config::ChatConfig;

/// Endpoint the default config posts to.
pub const TEST_ENDPOINT: &str = "http://localhost:8000/api/chat/";

/// Upper bound for any wait in a test.
pub const TEST_TIMEOUT: Duration = Duration::from_secs(5);

/// One SSE event carrying a content delta, terminated by a blank line.
pub fn delta_event(content: &str) -> Bytes {
    Bytes::from(delta_event_text(content))
}

/// Text of one delta event; JSON-escapes the content.
pub fn delta_event_text(content: &str) -> String {
    let payload = serde_json::json!({"choices": [{"delta": {"content": content}}]});
    format!("data: {}\n\n", payload)
}

/// The end-of-stream sentinel event.
pub fn done_event() -> Bytes {
    Bytes::from_static(b"data: [DONE]\n\n")
}

/// Concatenate events into one body.
pub fn body_of(events: &[Bytes]) -> Vec<u8> {
    events.iter().flat_map(|e| e.iter().copied()).collect()
}

/// Split a body at the given byte offsets.
pub fn split_at(body: &[u8], cuts: &[usize]) -> Vec<Bytes> {
    let mut chunks = Vec::new();
    let mut start = 0;
    for &cut in cuts {
        chunks.push(Bytes::copy_from_slice(&body[start..cut]));
        start = cut;
    }
    chunks.push(Bytes::copy_from_slice(&body[start..]));
    chunks
}

/// Controller with the default config over the given mock.
pub fn controller_with(mock: MockHttpClient) -> ChatController {
    ChatController::new(Arc::new(mock), ChatConfig::default())
}

/// Process controller events until idle, failing the test on timeout.
pub async fn run_to_idle(controller: &mut ChatController) {
    tokio::time::timeout(TEST_TIMEOUT, controller.run_until_idle())
        .await
        .expect("controller did not become idle");
}
