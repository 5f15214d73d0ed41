//! Mock HTTP client for testing.
//!
//! Provides a configurable mock HTTP client that returns scripted streaming
//! responses or errors.

use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::error::TransportError;
use crate::traits::{ByteStream, Headers, HttpClient, StreamResponse};

/// A recorded HTTP request for verification in tests.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Request URL
    pub url: String,
    /// Request headers
    pub headers: Headers,
    /// Request body
    pub body: String,
}

/// Configuration for a mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// 200 response whose body yields these chunks, then ends
    Stream(Vec<Bytes>),
    /// 200 response whose body yields these chunks, then fails
    StreamThenError(Vec<Bytes>, TransportError),
    /// 200 response whose body yields these chunks, then never ends
    Pending(Vec<Bytes>),
    /// 204 response without a body
    NoBody,
    /// The request itself fails
    Error(TransportError),
    /// The request is recorded but never answered
    Hang,
}

/// Mock HTTP client for testing.
///
/// Responses are matched by exact URL, then by URL prefix, then fall back to
/// the default response.
///
/// # Example
///
/// ```ignore
/// use chatwire::adapters::mock::{MockHttpClient, MockResponse};
/// use bytes::Bytes;
///
/// let client = MockHttpClient::new();
/// client.set_response(
///     "http://localhost:8000/api/chat/",
///     MockResponse::Stream(vec![Bytes::from("data: [DONE]\n\n")]),
/// );
/// ```
#[derive(Debug, Clone)]
pub struct MockHttpClient {
    /// Configured responses by URL pattern
    responses: Arc<Mutex<HashMap<String, MockResponse>>>,
    /// Default response when no specific match
    default_response: Arc<Mutex<Option<MockResponse>>>,
    /// Recorded requests for verification
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockHttpClient {
    /// Create a new mock HTTP client.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            default_response: Arc::new(Mutex::new(None)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Set a response for a specific URL.
    pub fn set_response(&self, url: &str, response: MockResponse) {
        let mut responses = self.responses.lock().unwrap();
        responses.insert(url.to_string(), response);
    }

    /// Set a default response for URLs without specific matches.
    pub fn set_default_response(&self, response: MockResponse) {
        let mut default = self.default_response.lock().unwrap();
        *default = Some(response);
    }

    /// Get all recorded requests.
    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Clear all recorded requests.
    pub fn clear_requests(&self) {
        self.requests.lock().unwrap().clear();
    }

    fn record_request(&self, url: &str, headers: &Headers, body: &str) {
        let mut requests = self.requests.lock().unwrap();
        requests.push(RecordedRequest {
            url: url.to_string(),
            headers: headers.clone(),
            body: body.to_string(),
        });
    }

    fn get_response(&self, url: &str) -> Option<MockResponse> {
        let responses = self.responses.lock().unwrap();

        if let Some(response) = responses.get(url) {
            return Some(response.clone());
        }

        for (pattern, response) in responses.iter() {
            if url.starts_with(pattern) {
                return Some(response.clone());
            }
        }

        let default = self.default_response.lock().unwrap();
        default.clone()
    }

    fn chunks(chunks: Vec<Bytes>) -> impl futures::Stream<Item = Result<Bytes, TransportError>> {
        futures::stream::iter(chunks.into_iter().map(Ok))
    }
}

impl Default for MockHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn post_stream(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<StreamResponse, TransportError> {
        self.record_request(url, headers, body);

        let stream: ByteStream = match self.get_response(url) {
            Some(MockResponse::Stream(chunks)) => Box::pin(Self::chunks(chunks)),
            Some(MockResponse::StreamThenError(chunks, err)) => Box::pin(
                Self::chunks(chunks).chain(futures::stream::once(async move { Err(err) })),
            ),
            Some(MockResponse::Pending(chunks)) => {
                Box::pin(Self::chunks(chunks).chain(futures::stream::pending()))
            }
            Some(MockResponse::NoBody) => return Ok(StreamResponse::without_body(204)),
            Some(MockResponse::Error(err)) => return Err(err),
            Some(MockResponse::Hang) => return futures::future::pending().await,
            None => {
                return Err(TransportError::Other {
                    message: format!("No mock response for URL: {}", url),
                })
            }
        };

        Ok(StreamResponse::new(200, stream))
    }
}
