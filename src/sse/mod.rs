//! SSE (Server-Sent Events) stream decoding
//!
//! Turns the chat endpoint's streamed body into reply fragments.
//! SSE format consists of:
//! - `data: <json>` - data payload line, possibly repeated within an event
//! - Empty line - signals end of event
//! - Lines starting with `:` - comments (ignored)
//! - `data: [DONE]` - end of the logical stream
//!
//! # Module structure
//! - `decoder` - Incremental UTF-8 decoding and blank-line framing (FrameDecoder)
//! - `events` - Line and payload types (SseLine, EventPayload, SseParseError)
//! - `parser` - Event block parsing (parse_sse_line, parse_event_block)
//! - `payloads` - JSON chunk deserialization and delta extraction

mod decoder;
mod events;
mod parser;
mod payloads;

// Re-export public types
pub use decoder::{FrameDecoder, Utf8Carry};
pub use events::{EventPayload, SseLine, SseParseError, DONE_SENTINEL};
pub use parser::{parse_event_block, parse_sse_line};
pub use payloads::{extract_delta, interpret_payload};
