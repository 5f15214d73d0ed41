//! Transport error types.
//!
//! Errors raised while opening or reading the reply stream. Every variant is
//! a non-cancellation failure: cancelling a session is not an error and never
//! produces one of these.

/// Transport-level failure of a reply stream.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// Connection to the server failed.
    #[error("Connection failed to '{url}': {message}")]
    ConnectionFailed { url: String, message: String },

    /// DNS resolution failed.
    #[error("DNS resolution failed for '{host}'")]
    DnsResolutionFailed { host: String },

    /// Request or read timed out.
    #[error("{operation} timed out")]
    Timeout { operation: String },

    /// TLS/SSL error.
    #[error("TLS error: {message}")]
    Tls { message: String },

    /// HTTP status error (non-2xx response).
    #[error("HTTP {status} error: {message}")]
    HttpStatus { status: u16, message: String },

    /// Reading the response body failed mid-stream.
    #[error("Stream read failed: {message}")]
    BodyRead { message: String },

    /// The request could not be built or sent.
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    /// Generic transport error.
    #[error("Transport error: {message}")]
    Other { message: String },
}

impl TransportError {
    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            TransportError::ConnectionFailed { .. } => {
                "Unable to connect to the server. Please check that it is running.".to_string()
            }
            TransportError::DnsResolutionFailed { host } => {
                format!("Could not resolve server address '{}'.", host)
            }
            TransportError::Timeout { .. } => {
                "The server took too long to respond.".to_string()
            }
            TransportError::Tls { .. } => {
                "A secure connection could not be established.".to_string()
            }
            TransportError::HttpStatus { status, .. } => match *status {
                400 => "The request was invalid. Please try again.".to_string(),
                404 => "The chat endpoint was not found.".to_string(),
                500..=599 => {
                    "The server is experiencing issues. Please try again later.".to_string()
                }
                _ => format!("The server returned an error (HTTP {}).", status),
            },
            TransportError::BodyRead { .. } => {
                "The connection was interrupted while receiving the reply.".to_string()
            }
            TransportError::InvalidRequest { message } => {
                format!("The request could not be sent: {}", message)
            }
            TransportError::Other { message } => format!("Network error: {}", message),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            TransportError::ConnectionFailed { .. } => "E_NET_CONN",
            TransportError::DnsResolutionFailed { .. } => "E_NET_DNS",
            TransportError::Timeout { .. } => "E_NET_TIMEOUT",
            TransportError::Tls { .. } => "E_NET_TLS",
            TransportError::HttpStatus { .. } => "E_NET_HTTP",
            TransportError::BodyRead { .. } => "E_NET_READ",
            TransportError::InvalidRequest { .. } => "E_NET_REQUEST",
            TransportError::Other { .. } => "E_NET_OTHER",
        }
    }
}

/// Classify a reqwest error into a TransportError.
pub fn classify_reqwest_error(err: &reqwest::Error, url: &str) -> TransportError {
    if err.is_connect() {
        TransportError::ConnectionFailed {
            url: url.to_string(),
            message: err.to_string(),
        }
    } else if err.is_timeout() {
        TransportError::Timeout {
            operation: "HTTP request".to_string(),
        }
    } else if err.is_status() {
        TransportError::HttpStatus {
            status: err.status().map(|s| s.as_u16()).unwrap_or(0),
            message: err.to_string(),
        }
    } else if err.is_builder() || err.is_request() {
        TransportError::InvalidRequest {
            message: err.to_string(),
        }
    } else if err.is_body() || err.is_decode() {
        TransportError::BodyRead {
            message: err.to_string(),
        }
    } else {
        // Check for TLS errors in the error chain
        let err_str = err.to_string().to_lowercase();
        if err_str.contains("tls") || err_str.contains("ssl") || err_str.contains("certificate") {
            TransportError::Tls {
                message: err.to_string(),
            }
        } else if err_str.contains("dns") || err_str.contains("resolve") {
            TransportError::DnsResolutionFailed {
                host: extract_host_from_url(url),
            }
        } else {
            TransportError::Other {
                message: err.to_string(),
            }
        }
    }
}

/// Extract the host portion from a URL string.
fn extract_host_from_url(url: &str) -> String {
    let url_lower = url.to_lowercase();
    let without_scheme = if url_lower.starts_with("https://") {
        &url[8..]
    } else if url_lower.starts_with("http://") {
        &url[7..]
    } else {
        url
    };

    without_scheme
        .split(&['/', ':'][..])
        .next()
        .unwrap_or(url)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = TransportError::HttpStatus {
            status: 502,
            message: "bad gateway".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 502 error: bad gateway");

        let err = TransportError::BodyRead {
            message: "connection reset".to_string(),
        };
        assert_eq!(err.to_string(), "Stream read failed: connection reset");
    }

    #[test]
    fn test_user_message_for_status() {
        let err = TransportError::HttpStatus {
            status: 503,
            message: String::new(),
        };
        assert!(err.user_message().contains("experiencing issues"));

        let err = TransportError::HttpStatus {
            status: 418,
            message: String::new(),
        };
        assert!(err.user_message().contains("HTTP 418"));
    }

    #[test]
    fn test_error_codes_are_distinct() {
        let errors = [
            TransportError::ConnectionFailed {
                url: String::new(),
                message: String::new(),
            },
            TransportError::DnsResolutionFailed {
                host: String::new(),
            },
            TransportError::Timeout {
                operation: String::new(),
            },
            TransportError::Tls {
                message: String::new(),
            },
            TransportError::HttpStatus {
                status: 500,
                message: String::new(),
            },
            TransportError::BodyRead {
                message: String::new(),
            },
            TransportError::InvalidRequest {
                message: String::new(),
            },
            TransportError::Other {
                message: String::new(),
            },
        ];
        let mut codes: Vec<_> = errors.iter().map(|e| e.error_code()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_extract_host_from_url() {
        assert_eq!(
            extract_host_from_url("http://localhost:8000/api/chat/"),
            "localhost"
        );
        assert_eq!(extract_host_from_url("https://example.com/x"), "example.com");
        assert_eq!(extract_host_from_url("example.com"), "example.com");
    }
}
