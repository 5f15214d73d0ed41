use serde::{Deserialize, Serialize};

/// Request body for the chat endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatRequest {
    /// The user's message text
    pub content: String,
    /// Always "user" for messages sent from this client
    pub sender_type: String,
}

impl ChatRequest {
    /// Create a request carrying a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            sender_type: "user".to_string(),
        }
    }
}
