//! Error types for chatwire.
//!
//! | Type | Raised by | Surfaced to user |
//! |------|-----------|------------------|
//! | [`TransportError`] | HTTP client, transport reader | Yes, as the fixed reply error text |
//! | [`SseParseError`](crate::sse::SseParseError) | Payload interpreter | No, logged and skipped |
//! | [`ChatError`] | `ChatController::begin` | Returned to the caller |
//! | [`ConfigError`] | `ChatConfig::from_env` | At startup |

mod chat;
mod transport;

pub use chat::{ChatError, ConfigError};
pub use transport::{classify_reqwest_error, TransportError};
