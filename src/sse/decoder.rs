//! Frame decoding: raw byte chunks to complete event blocks.
//!
//! Bytes arrive in arbitrary chunks from the transport. A chunk boundary may
//! fall inside a multi-byte character or inside the blank-line separator, so
//! both the undecoded tail of the previous chunk and the unterminated text of
//! the current event are carried between calls in [`FrameDecoder`].

use once_cell::sync::Lazy;
use regex::Regex;

/// Blank line between events, with bare or CR-prefixed line endings.
static EVENT_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\r?\n\r?\n").expect("Invalid event separator regex"));

/// UTF-8 encoding of U+FEFF.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Incremental UTF-8 decoder state.
///
/// Holds the bytes of a character whose encoding was cut off at the end of
/// the last chunk (at most three bytes). A byte-order mark at the very start
/// of the stream is dropped; one anywhere later is ordinary text.
#[derive(Debug, Clone, Default)]
pub struct Utf8Carry {
    partial: Vec<u8>,
    bom_checked: bool,
}

impl Utf8Carry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode `chunk`, prefixed by whatever was carried from the last call.
    ///
    /// Invalid sequences become U+FFFD exactly as `String::from_utf8_lossy`
    /// would render them over the whole stream; a truncated sequence at the
    /// end of the chunk is held back instead.
    pub fn decode(&mut self, chunk: &[u8]) -> String {
        let mut bytes = std::mem::take(&mut self.partial);
        bytes.extend_from_slice(chunk);

        let mut rest: &[u8] = &bytes;
        if !self.bom_checked {
            if rest.len() < UTF8_BOM.len() && UTF8_BOM.starts_with(rest) {
                // Could still become a BOM
                self.partial = bytes;
                return String::new();
            }
            self.bom_checked = true;
            rest = rest.strip_prefix(UTF8_BOM).unwrap_or(rest);
        }

        let mut out = String::with_capacity(rest.len());
        loop {
            match std::str::from_utf8(rest) {
                Ok(text) => {
                    out.push_str(text);
                    break;
                }
                Err(err) => {
                    let valid = err.valid_up_to();
                    out.push_str(&String::from_utf8_lossy(&rest[..valid]));
                    match err.error_len() {
                        Some(len) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            rest = &rest[valid + len..];
                        }
                        None => {
                            self.partial = rest[valid..].to_vec();
                            break;
                        }
                    }
                }
            }
        }
        out
    }

    /// Whether a truncated character is waiting for more bytes.
    pub fn has_partial(&self) -> bool {
        !self.partial.is_empty()
    }

    /// Flush a truncated trailing character, if any, as U+FFFD.
    pub fn finish(self) -> String {
        String::from_utf8_lossy(&self.partial).into_owned()
    }
}

/// Splits a decoded byte stream into event blocks.
#[derive(Debug, Clone, Default)]
pub struct FrameDecoder {
    utf8: Utf8Carry,
    /// Text not yet terminated by a blank line
    pending: String,
}

impl FrameDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one chunk and return every event block it completes, in order.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        let text = self.utf8.decode(chunk);
        self.pending.push_str(&text);

        let mut blocks = Vec::new();
        let mut consumed = 0;
        for separator in EVENT_SEPARATOR.find_iter(&self.pending) {
            blocks.push(self.pending[consumed..separator.start()].to_string());
            consumed = separator.end();
        }
        if consumed > 0 {
            self.pending.drain(..consumed);
        }
        blocks
    }

    /// Text buffered since the last complete block.
    pub fn pending(&self) -> &str {
        &self.pending
    }

    /// End of stream. Returns the unterminated remainder, which is never
    /// interpreted as an event; callers only log it.
    pub fn finish(self) -> Option<String> {
        let mut remainder = self.pending;
        remainder.push_str(&self.utf8.finish());
        if remainder.is_empty() {
            None
        } else {
            Some(remainder)
        }
    }
}
