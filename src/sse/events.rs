//! SSE line and payload types
//!
//! Contains the line classification used by the event parser, the outcome of
//! parsing a single event block, and the recoverable parse error type.

/// The literal payload that terminates the logical stream.
pub const DONE_SENTINEL: &str = "[DONE]";

/// A single classified line of an event block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SseLine {
    /// `data: <payload>` with the prefix stripped and the value trimmed
    Data(String),
    /// `event: <type>`
    Event(String),
    /// `id:` or `retry:` fields, which carry nothing for a chat reply
    Field { name: String, value: String },
    /// `: comment` (keep-alives land here)
    Comment(String),
    /// Blank line
    Empty,
}

/// What one event block carries once its payload lines are joined
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventPayload {
    /// The block had no `data:` lines, or they were all blank
    Empty,
    /// The block's payload was the termination sentinel
    Done,
    /// A payload to hand to the interpreter
    Data(String),
}

impl EventPayload {
    /// Whether this payload ends the logical stream.
    pub fn is_done(&self) -> bool {
        matches!(self, EventPayload::Done)
    }
}

/// SSE payload parsing errors.
///
/// These are per-event conditions: the pipeline logs them and moves on to
/// the next block.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SseParseError {
    /// Payload was not valid JSON for the chunk schema
    #[error("Invalid JSON payload: {reason}")]
    InvalidJson { payload: String, reason: String },
    /// Payload parsed but `choices[0].delta.content` was absent
    #[error("Payload has no delta content")]
    MissingDelta,
}

impl SseParseError {
    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            SseParseError::InvalidJson { .. } => "E_SSE_JSON",
            SseParseError::MissingDelta => "E_SSE_DELTA",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_payload_is_done() {
        assert!(EventPayload::Done.is_done());
        assert!(!EventPayload::Empty.is_done());
        assert!(!EventPayload::Data("{}".to_string()).is_done());
    }

    #[test]
    fn test_sse_parse_error_display() {
        let err = SseParseError::InvalidJson {
            payload: "nope".to_string(),
            reason: "expected value".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid JSON payload: expected value");
        assert_eq!(err.error_code(), "E_SSE_JSON");

        assert_eq!(
            SseParseError::MissingDelta.to_string(),
            "Payload has no delta content"
        );
        assert_eq!(SseParseError::MissingDelta.error_code(), "E_SSE_DELTA");
    }
}
