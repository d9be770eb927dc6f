//! Contentgen Core Library
//!
//! One content-generation interface over several LLM backends: a canonical
//! message model, per-provider adapters, and a factory that picks the adapter
//! for a session from settings and environment.

pub mod config;
pub mod http;
pub mod protocol;
pub mod providers;

pub use config::{AuthType, Environment, SecretString, SessionConfig};
pub use protocol::{
    Content, GenerateContentParameters, GenerateContentResponse, GenerateContentStream, Part, Role,
};
pub use providers::{
    ContentGenerator, ContentGeneratorConfig, GeneratorError, GeneratorFactory, GeneratorResult,
    ManagedGeneratorFactory, ProviderKind, UserTier,
};

/// Returns the version of the Contentgen Core library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
