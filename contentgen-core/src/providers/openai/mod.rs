//! OpenAI provider implementation
//!
//! This module provides an adapter for the OpenAI chat completions and
//! embeddings APIs, translating between the canonical protocol and
//! OpenAI's message format. The client is shared with other
//! OpenAI-compatible backends.

mod client;
pub mod converter;
mod streaming;
pub mod types;

pub(crate) use client::ChatCompletionsClient;
pub use client::{OpenAiGenerator, OPENAI_BASE_URL};
pub use streaming::parse_stream;

/// Model used when the session does not override it
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o";
