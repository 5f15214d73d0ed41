//! Mock implementations for testing.
//!
//! Lets the controller and pipeline be exercised without network access.

pub mod http;

pub use http::{MockHttpClient, MockResponse, RecordedRequest};
