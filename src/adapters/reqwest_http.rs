//! Reqwest-based HTTP client adapter.
//!
//! This module provides the production HTTP client, implementing the
//! [`HttpClient`] trait from `crate::traits`.

use async_trait::async_trait;
use futures_util::StreamExt;
use tracing::debug;

use crate::config::ChatConfig;
use crate::error::{classify_reqwest_error, TransportError};
use crate::traits::{Headers, HttpClient, StreamResponse};

/// HTTP client implementation using reqwest.
///
/// # Example
///
/// ```ignore
/// use chatwire::adapters::ReqwestHttpClient;
/// use chatwire::traits::{Headers, HttpClient};
///
/// let client = ReqwestHttpClient::new();
/// let response = client.post_stream("http://localhost:8000/api/chat/", "{}", &Headers::new()).await?;
/// println!("Status: {}", response.status);
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    /// Create a new ReqwestHttpClient with default settings.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Create a new ReqwestHttpClient with a custom reqwest::Client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Build a client honouring the configured connect timeout.
    ///
    /// Only connecting is bounded; a reply may stream for as long as the
    /// server keeps it open.
    pub fn from_config(config: &ChatConfig) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| TransportError::InvalidRequest {
                message: e.to_string(),
            })?;
        Ok(Self { client })
    }

    /// Get a reference to the underlying reqwest::Client.
    pub fn inner(&self) -> &reqwest::Client {
        &self.client
    }

    /// Convert reqwest headers to our Headers type.
    fn convert_headers(headers: &reqwest::header::HeaderMap) -> Headers {
        headers
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.to_string(), v.to_string()))
            })
            .collect()
    }

    /// Apply headers to a request builder.
    fn apply_headers(
        builder: reqwest::RequestBuilder,
        headers: &Headers,
    ) -> reqwest::RequestBuilder {
        let mut builder = builder;
        for (key, value) in headers {
            builder = builder.header(key, value);
        }
        builder
    }

    /// Whether a successful response carries nothing to stream.
    fn is_bodiless(response: &reqwest::Response) -> bool {
        response.status() == reqwest::StatusCode::NO_CONTENT
            || response.content_length() == Some(0)
    }
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn post_stream(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<StreamResponse, TransportError> {
        let builder = self.client.post(url).body(body.to_string());
        let builder = Self::apply_headers(builder, headers);

        let response = builder
            .send()
            .await
            .map_err(|e| classify_reqwest_error(&e, url))?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(TransportError::HttpStatus { status, message });
        }

        let response_headers = Self::convert_headers(response.headers());

        if Self::is_bodiless(&response) {
            debug!(status, "Response carries no body");
            return Ok(StreamResponse::without_body(status).with_headers(response_headers));
        }

        let owned_url = url.to_string();
        let stream = response
            .bytes_stream()
            .map(move |result| result.map_err(|e| classify_reqwest_error(&e, &owned_url)));

        Ok(StreamResponse::new(status, Box::pin(stream)).with_headers(response_headers))
    }
}
