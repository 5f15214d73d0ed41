//! Errors returned to callers of the chat controller and configuration.

/// Reasons a new exchange was not started.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChatError {
    /// The input was empty or whitespace only.
    #[error("Message is empty")]
    EmptyInput,

    /// A reply is still streaming.
    #[error("A reply is already streaming")]
    Busy,
}

impl ChatError {
    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            ChatError::EmptyInput => "Type a message before sending.".to_string(),
            ChatError::Busy => {
                "Please wait for the current response to complete before sending another message."
                    .to_string()
            }
        }
    }
}

/// Invalid configuration values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The endpoint is not an http(s) URL.
    #[error("Invalid endpoint '{value}': expected an http:// or https:// URL")]
    InvalidEndpoint { value: String },

    /// An environment variable could not be parsed.
    #[error("Invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}
