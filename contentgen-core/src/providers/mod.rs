//! Provider abstraction and adapters
//!
//! This module implements the generator abstraction that lets callers talk to
//! any supported backend through one four-operation interface. Each adapter
//! translates the canonical protocol to its backend's wire format and back;
//! the factory picks exactly one adapter per session.

pub mod adapter;
pub mod anthropic;
pub mod deepseek;
pub mod error;
pub mod factory;
pub mod gemini;
pub mod groq;
pub mod openai;
pub mod transform;

pub use adapter::{ContentGenerator, ProviderKind, UserTier};
pub use error::{GeneratorError, GeneratorResult};
pub use factory::{ContentGeneratorConfig, GeneratorFactory, ManagedGeneratorFactory};

// Re-export concrete generators
pub use anthropic::AnthropicGenerator;
pub use deepseek::DeepSeekGenerator;
pub use gemini::GeminiGenerator;
pub use groq::GroqGenerator;
pub use openai::OpenAiGenerator;
