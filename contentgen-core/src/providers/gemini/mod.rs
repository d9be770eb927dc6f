//! Gemini provider implementation
//!
//! The canonical protocol is the Gemini wire model, so this adapter sends
//! requests and returns responses without translating them. Backend errors
//! come back exactly as the API reported them.

mod client;
mod streaming;
pub mod types;

pub use client::{
    GeminiGenerator, GEMINI_BASE_URL, VERTEX_API_KEY_ENV, VERTEX_BASE_URL, VERTEX_BASE_URL_ENV,
};
pub use streaming::parse_stream;

/// Model used when the session does not override it
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-pro";
