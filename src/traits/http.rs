//! HTTP client trait abstraction.
//!
//! Provides a trait-based abstraction for the one HTTP operation the chat
//! core needs (a streaming POST), enabling dependency injection and mocking
//! in tests.

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::collections::HashMap;
use std::fmt;
use std::pin::Pin;

use crate::error::TransportError;

/// HTTP headers represented as a key-value map.
pub type Headers = HashMap<String, String>;

/// A response body delivered as sequential byte chunks.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, TransportError>> + Send>>;

/// Streaming HTTP response.
pub struct StreamResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: Headers,
    /// Streamed body; `None` when the server sent nothing to stream
    pub body: Option<ByteStream>,
}

impl StreamResponse {
    /// Create a response with a streamable body.
    pub fn new(status: u16, body: ByteStream) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: Some(body),
        }
    }

    /// Create a response that carries no body.
    pub fn without_body(status: u16) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Attach response headers.
    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers = headers;
        self
    }

    /// Check if the response indicates success (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Whether the response has a body to read.
    pub fn has_body(&self) -> bool {
        self.body.is_some()
    }
}

impl fmt::Debug for StreamResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamResponse")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .field("body", &self.body.as_ref().map(|_| "<stream>"))
            .finish()
    }
}

/// Trait for HTTP client operations.
///
/// Implementations include the production reqwest-based client and a mock
/// client for testing.
///
/// # Example
///
/// ```ignore
/// use chatwire::traits::{HttpClient, Headers};
///
/// async fn open<C: HttpClient>(client: &C) -> Result<(), TransportError> {
///     let response = client.post_stream("http://localhost:8000/api/chat/", "{}", &Headers::new()).await?;
///     println!("Status: {}", response.status);
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Perform a POST request and return a streaming response.
    ///
    /// Non-2xx statuses are reported as [`TransportError::HttpStatus`].
    ///
    /// # Arguments
    /// * `url` - The URL to request
    /// * `body` - Request body as a string
    /// * `headers` - Request headers
    async fn post_stream(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<StreamResponse, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_response_new() {
        let body: ByteStream = Box::pin(futures::stream::empty());
        let response = StreamResponse::new(200, body);
        assert_eq!(response.status, 200);
        assert!(response.headers.is_empty());
        assert!(response.has_body());
    }

    #[test]
    fn test_stream_response_without_body() {
        let response = StreamResponse::without_body(204);
        assert!(!response.has_body());
        assert!(response.is_success());
    }

    #[test]
    fn test_stream_response_is_success() {
        assert!(StreamResponse::without_body(200).is_success());
        assert!(StreamResponse::without_body(299).is_success());
        assert!(!StreamResponse::without_body(300).is_success());
        assert!(!StreamResponse::without_body(500).is_success());
    }

    #[test]
    fn test_stream_response_debug_hides_body() {
        let body: ByteStream = Box::pin(futures::stream::empty());
        let debug = format!("{:?}", StreamResponse::new(200, body));
        assert!(debug.contains("<stream>"));
    }
}
