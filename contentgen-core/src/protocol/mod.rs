//! Protocol module for content generation requests and responses
//!
//! This module defines the canonical data model shared by every provider
//! adapter. These structures are designed to be:
//! - Provider-agnostic
//! - Wire-compatible with the primary (Gemini) REST schema
//! - Identical in shape for complete and streamed responses

pub mod types;

pub use types::{
    Blob, Candidate, Content, ContentEmbedding, ContentListUnion, ContentUnion,
    CountTokensParameters, CountTokensResponse, EmbedContentParameters, EmbedContentResponse,
    FileData, FinishReason, FunctionCall, FunctionResponse, GenerateContentParameters,
    GenerateContentResponse, GenerateContentStream, GenerationConfig, Part, Role, UsageMetadata,
};
