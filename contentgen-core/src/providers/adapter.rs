//! Content generator trait and provider enumeration
//!
//! `ContentGenerator` is the single capability surface the rest of the system
//! calls. Every adapter implements all four operations; an operation the
//! backend cannot perform is an explicit rejecting implementation.

use crate::config::{Environment, SecretString};
use crate::protocol::{
    CountTokensParameters, CountTokensResponse, EmbedContentParameters, EmbedContentResponse,
    GenerateContentParameters, GenerateContentResponse, GenerateContentStream,
};
use crate::providers::error::{GeneratorError, GeneratorResult};
use crate::providers::{anthropic, deepseek, gemini, groq, openai};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Core trait that every provider adapter implements
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Single-shot generation returning exactly one candidate
    async fn generate_content(
        &self,
        request: GenerateContentParameters,
    ) -> GeneratorResult<GenerateContentResponse>;

    /// Incremental generation; each element carries only its own delta
    async fn generate_content_stream(
        &self,
        request: GenerateContentParameters,
    ) -> GeneratorResult<GenerateContentStream>;

    async fn count_tokens(
        &self,
        request: CountTokensParameters,
    ) -> GeneratorResult<CountTokensResponse>;

    /// One embedding per normalized input, in input order
    async fn embed_content(
        &self,
        request: EmbedContentParameters,
    ) -> GeneratorResult<EmbedContentResponse>;

    /// Account tier, reported only by managed backends
    fn user_tier(&self) -> Option<UserTier> {
        None
    }
}

/// Account tier reported by managed backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserTier {
    Free,
    Legacy,
    Standard,
}

/// Supported providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Gemini,
    #[serde(rename = "openai")]
    OpenAi,
    Anthropic,
    #[serde(rename = "deepseek")]
    DeepSeek,
    Groq,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 5] = [
        ProviderKind::Gemini,
        ProviderKind::OpenAi,
        ProviderKind::Anthropic,
        ProviderKind::DeepSeek,
        ProviderKind::Groq,
    ];

    /// Provider tag used in configuration and error messages
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "gemini",
            ProviderKind::OpenAi => "openai",
            ProviderKind::Anthropic => "anthropic",
            ProviderKind::DeepSeek => "deepseek",
            ProviderKind::Groq => "groq",
        }
    }

    /// Variable holding the API key for key-based auth
    pub fn api_key_env(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "GEMINI_API_KEY",
            ProviderKind::OpenAi => "OPENAI_API_KEY",
            ProviderKind::Anthropic => "ANTHROPIC_API_KEY",
            ProviderKind::DeepSeek => "DEEPSEEK_API_KEY",
            ProviderKind::Groq => "GROQ_API_KEY",
        }
    }

    /// Variable overriding the default endpoint
    pub fn base_url_env(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "GOOGLE_GEMINI_BASE_URL",
            ProviderKind::OpenAi => "OPENAI_BASE_URL",
            ProviderKind::Anthropic => "ANTHROPIC_BASE_URL",
            ProviderKind::DeepSeek => "DEEPSEEK_BASE_URL",
            ProviderKind::Groq => "GROQ_BASE_URL",
        }
    }

    /// Model used when the session does not override it
    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => gemini::DEFAULT_GEMINI_MODEL,
            ProviderKind::OpenAi => openai::DEFAULT_OPENAI_MODEL,
            ProviderKind::Anthropic => anthropic::DEFAULT_ANTHROPIC_MODEL,
            ProviderKind::DeepSeek => deepseek::DEFAULT_DEEPSEEK_MODEL,
            ProviderKind::Groq => groq::DEFAULT_GROQ_MODEL,
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = GeneratorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProviderKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| GeneratorError::UnsupportedProvider(s.to_string()))
    }
}

/// Explicit key first, environment variable second; fails naming the variable
pub(crate) fn require_api_key(
    explicit: Option<&SecretString>,
    environment: &Environment,
    provider: &'static str,
    env_var: &'static str,
) -> GeneratorResult<SecretString> {
    if let Some(key) = explicit.filter(|key| !key.is_empty()) {
        return Ok(key.clone());
    }

    environment
        .get(env_var)
        .map(SecretString::new)
        .ok_or(GeneratorError::MissingApiKey { provider, env_var })
}
