//! Mock configurations for test fixtures.
//!
//! Re-exports the mock implementations from `chatwire::adapters::mock` and
//! adds a builder for scripting reply streams.

pub use chatwire::adapters::mock::{MockHttpClient, MockResponse, RecordedRequest};
pub use chatwire::traits::{Headers, HttpClient};

use bytes::Bytes;
use chatwire::error::TransportError;

/// Configuration for setting up mock HTTP responses.
pub struct MockHttpConfig {
    client: MockHttpClient,
}

impl MockHttpConfig {
    /// Creates a new mock HTTP configuration.
    pub fn new() -> Self {
        Self {
            client: MockHttpClient::new(),
        }
    }

    /// Configures a body that streams these chunks, then ends.
    pub fn with_stream(self, chunks: Vec<Bytes>) -> Self {
        self.client.set_default_response(MockResponse::Stream(chunks));
        self
    }

    /// Configures a body that streams these chunks, then fails.
    #[allow(dead_code)]
    pub fn with_stream_then_error(self, chunks: Vec<Bytes>, message: &str) -> Self {
        self.client.set_default_response(MockResponse::StreamThenError(
            chunks,
            TransportError::BodyRead {
                message: message.to_string(),
            },
        ));
        self
    }

    /// Configures a body that streams these chunks and then stays open.
    #[allow(dead_code)]
    pub fn with_pending_stream(self, chunks: Vec<Bytes>) -> Self {
        self.client.set_default_response(MockResponse::Pending(chunks));
        self
    }

    /// Configures a response without a body.
    #[allow(dead_code)]
    pub fn with_no_body(self) -> Self {
        self.client.set_default_response(MockResponse::NoBody);
        self
    }

    /// Configures a request that is never answered.
    #[allow(dead_code)]
    pub fn with_hanging_request(self) -> Self {
        self.client.set_default_response(MockResponse::Hang);
        self
    }

    /// Configures the request itself to fail.
    #[allow(dead_code)]
    pub fn with_request_error(self, error: TransportError) -> Self {
        self.client.set_default_response(MockResponse::Error(error));
        self
    }

    /// Builds the configured MockHttpClient.
    pub fn build(self) -> MockHttpClient {
        self.client
    }
}

impl Default for MockHttpConfig {
    fn default() -> Self {
        Self::new()
    }
}
