//! SSE payload deserialization and delta extraction
//!
//! Chunks follow the OpenAI-style streaming shape:
//! `{"choices":[{"delta":{"content":"..."}}]}`. Any other field is ignored.

use serde::Deserialize;
use tracing::debug;

use crate::sse::events::SseParseError;

/// One streamed chunk
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ChunkPayload {
    #[serde(default)]
    pub choices: Vec<ChoicePayload>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ChoicePayload {
    #[serde(default)]
    pub delta: Option<DeltaPayload>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub(crate) struct DeltaPayload {
    #[serde(default)]
    pub content: Option<String>,
}

/// Parse a payload and pull out `choices[0].delta.content`.
///
/// Returns `Ok(None)` when the fragment is present but empty, and
/// `Err(SseParseError::MissingDelta)` when the path is absent.
pub fn interpret_payload(payload: &str) -> Result<Option<String>, SseParseError> {
    let chunk: ChunkPayload =
        serde_json::from_str(payload).map_err(|e| SseParseError::InvalidJson {
            payload: payload.to_string(),
            reason: e.to_string(),
        })?;

    let content = chunk
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.delta)
        .and_then(|delta| delta.content)
        .ok_or(SseParseError::MissingDelta)?;

    if content.is_empty() {
        Ok(None)
    } else {
        Ok(Some(content))
    }
}

/// Lenient form of [`interpret_payload`] used by the streaming pipeline.
///
/// A malformed or empty event never ends the stream: the error is logged and
/// the event produces no fragment.
pub fn extract_delta(payload: &str) -> Option<String> {
    match interpret_payload(payload) {
        Ok(fragment) => fragment,
        Err(e) => {
            debug!(code = e.error_code(), "Skipping stream event: {}", e);
            None
        }
    }
}
