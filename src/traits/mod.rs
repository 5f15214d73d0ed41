//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - Streaming HTTP POST used to open a reply stream

pub mod http;

pub use http::{ByteStream, Headers, HttpClient, StreamResponse};
