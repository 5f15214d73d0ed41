//! chatwire - streaming chat client core
//!
//! Sends a user message to a chat endpoint and assembles the assistant reply
//! from a Server-Sent Events stream as it arrives.
//!
//! This library exposes modules for use by the binary and integration tests.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod sse;
pub mod stream;
pub mod traits;
