//! Client configuration.
//!
//! Settings come from defaults, optionally overridden by environment
//! variables, then by the builder methods.

use std::time::Duration;

use crate::error::ConfigError;

/// Chat endpoint used when nothing else is configured
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/api/chat/";

/// Text that replaces an assistant reply whose stream failed
pub const DEFAULT_ERROR_TEXT: &str = "Sorry, an error occurred.";

/// Default time allowed to establish the connection
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Environment variable overriding the endpoint
pub const ENDPOINT_ENV: &str = "CHATWIRE_ENDPOINT";

/// Environment variable overriding the connect timeout, in whole seconds
pub const CONNECT_TIMEOUT_ENV: &str = "CHATWIRE_CONNECT_TIMEOUT_SECS";

/// Configuration for the chat client.
///
/// # Example
///
/// ```ignore
/// use chatwire::config::ChatConfig;
///
/// let config = ChatConfig::from_env()?
///     .with_error_text("Something went wrong.");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatConfig {
    /// URL the user message is POSTed to
    pub endpoint: String,
    /// Connect timeout for the HTTP client (the stream itself has no timeout)
    pub connect_timeout: Duration,
    /// Fixed text shown when a reply fails
    pub error_text: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            error_text: DEFAULT_ERROR_TEXT.to_string(),
        }
    }
}

impl ChatConfig {
    /// Create a new ChatConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the chat endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the connect timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the text shown in place of a failed reply.
    pub fn with_error_text(mut self, text: impl Into<String>) -> Self {
        self.error_text = text.into();
        self
    }

    /// Create config from `CHATWIRE_ENDPOINT` and `CHATWIRE_CONNECT_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(endpoint) = lookup(ENDPOINT_ENV).filter(|v| !v.trim().is_empty()) {
            config.endpoint = endpoint.trim().to_string();
        }

        if let Some(raw) = lookup(CONNECT_TIMEOUT_ENV).filter(|v| !v.trim().is_empty()) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .map_err(|e| ConfigError::InvalidValue {
                    key: CONNECT_TIMEOUT_ENV.to_string(),
                    value: raw.clone(),
                    reason: e.to_string(),
                })?;
            config.connect_timeout = Duration::from_secs(secs);
        }

        config.validate()?;
        Ok(config)
    }

    /// Check that the endpoint is an http(s) URL.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let lower = self.endpoint.to_lowercase();
        let rest = lower
            .strip_prefix("http://")
            .or_else(|| lower.strip_prefix("https://"));
        match rest {
            Some(host) if !host.is_empty() && !host.starts_with('/') => Ok(()),
            _ => Err(ConfigError::InvalidEndpoint {
                value: self.endpoint.clone(),
            }),
        }
    }
}
