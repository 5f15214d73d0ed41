//! Reply pipeline: transport reader → frame decoder → event parser →
//! payload interpreter.
//!
//! Only the reader's pull suspends. Every block derived from a chunk is parsed
//! and interpreted synchronously, in order, before the next pull.

use tracing::{debug, warn};

use crate::error::TransportError;
use crate::sse::{extract_delta, parse_event_block, EventPayload, FrameDecoder};
use crate::stream::reader::{Pull, TransportReader};

/// How a reply stream stopped without a transport failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamEnd {
    /// The `[DONE]` sentinel was received
    Sentinel,
    /// The server closed the body
    EndOfStream,
    /// The session was cancelled while reading
    Cancelled,
}

/// Feed one chunk's blocks through the parser and interpreter.
///
/// Returns `true` once the sentinel is seen; blocks after it are ignored.
pub fn process_blocks<F>(blocks: Vec<String>, on_fragment: &mut F) -> bool
where
    F: FnMut(String),
{
    for block in blocks {
        match parse_event_block(&block) {
            EventPayload::Done => return true,
            EventPayload::Empty => {}
            EventPayload::Data(payload) => {
                if let Some(fragment) = extract_delta(&payload) {
                    on_fragment(fragment);
                }
            }
        }
    }
    false
}

/// Drive a reply stream to its end, handing each fragment to `on_fragment`
/// in the order it was decoded.
///
/// The reader is released before this returns, whatever the outcome.
pub async fn pump<F>(
    reader: &mut TransportReader,
    mut on_fragment: F,
) -> Result<StreamEnd, TransportError>
where
    F: FnMut(String),
{
    let mut decoder = FrameDecoder::new();

    loop {
        match reader.pull().await? {
            Pull::Chunk(chunk) => {
                let blocks = decoder.feed(&chunk);
                if process_blocks(blocks, &mut on_fragment) {
                    debug!("Received stream sentinel");
                    reader.release();
                    return Ok(StreamEnd::Sentinel);
                }
            }
            Pull::End => {
                if let Some(remainder) = decoder.finish() {
                    warn!(
                        bytes = remainder.len(),
                        "Discarding incomplete event at end of stream"
                    );
                }
                return Ok(StreamEnd::EndOfStream);
            }
            Pull::Cancelled => return Ok(StreamEnd::Cancelled),
        }
    }
}
