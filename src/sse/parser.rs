//! SSE event block parsing
//!
//! Turns one event block from the frame decoder into the payload it carries.
//! Only `data:` lines contribute; everything else in a block is classified
//! and dropped.

use crate::sse::events::{EventPayload, SseLine, DONE_SENTINEL};

/// Parse a single SSE line into its component type
pub fn parse_sse_line(line: &str) -> SseLine {
    if line.is_empty() {
        return SseLine::Empty;
    }

    if let Some(stripped) = line.strip_prefix(':') {
        return SseLine::Comment(stripped.trim().to_string());
    }

    if let Some(rest) = line.strip_prefix("data:") {
        return SseLine::Data(rest.trim().to_string());
    }

    if let Some(rest) = line.strip_prefix("event:") {
        return SseLine::Event(rest.trim().to_string());
    }

    for name in ["id", "retry"] {
        if let Some(value) = line
            .strip_prefix(name)
            .and_then(|rest| rest.strip_prefix(':'))
        {
            return SseLine::Field {
                name: name.to_string(),
                value: value.trim().to_string(),
            };
        }
    }

    // Unknown line format - treat as comment
    SseLine::Comment(line.to_string())
}

/// Parse one event block into its payload.
///
/// Multiple `data:` lines are joined with a single `\n`. A joined payload of
/// exactly `[DONE]` ends the stream.
pub fn parse_event_block(block: &str) -> EventPayload {
    let data_lines: Vec<String> = block
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter_map(|line| match parse_sse_line(line) {
            SseLine::Data(data) => Some(data),
            _ => None,
        })
        .collect();

    if data_lines.is_empty() {
        return EventPayload::Empty;
    }

    let payload = data_lines.join("\n");
    if payload == DONE_SENTINEL {
        EventPayload::Done
    } else if payload.is_empty() {
        EventPayload::Empty
    } else {
        EventPayload::Data(payload)
    }
}
