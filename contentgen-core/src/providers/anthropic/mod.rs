//! Anthropic provider implementation
//!
//! Translates canonical requests to the Messages API. Token counting and
//! embeddings are not offered by this backend.

mod client;
pub mod converter;
mod streaming;
pub mod types;

pub use client::{AnthropicGenerator, ANTHROPIC_BASE_URL, ANTHROPIC_VERSION};
pub use streaming::parse_stream;

/// Model used when the session does not override it
pub const DEFAULT_ANTHROPIC_MODEL: &str = "claude-sonnet-4-20250514";
