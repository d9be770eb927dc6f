//! Groq provider
//!
//! Groq serves open-weight models behind an OpenAI-compatible endpoint, so
//! the adapter is a thin layer over the shared chat completions client.
//! Token counting and embeddings are not offered.

use crate::config::Environment;
use crate::protocol::{
    CountTokensParameters, CountTokensResponse, EmbedContentParameters, EmbedContentResponse,
    GenerateContentParameters, GenerateContentResponse, GenerateContentStream,
};
use crate::providers::adapter::{ContentGenerator, ProviderKind};
use crate::providers::factory::ContentGeneratorConfig;
use crate::providers::openai::ChatCompletionsClient;
use crate::providers::{GeneratorError, GeneratorResult};
use async_trait::async_trait;

/// Default Groq endpoint, already carrying the `/openai/v1` prefix
pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

pub const DEFAULT_GROQ_MODEL: &str = "llama-3.3-70b-versatile";

/// Groq adapter
pub struct GroqGenerator {
    inner: ChatCompletionsClient,
}

impl GroqGenerator {
    pub fn new(config: &ContentGeneratorConfig) -> GeneratorResult<Self> {
        Self::with_env(config, &Environment::process())
    }

    pub fn with_env(
        config: &ContentGeneratorConfig,
        environment: &Environment,
    ) -> GeneratorResult<Self> {
        let inner = ChatCompletionsClient::from_config(
            ProviderKind::Groq,
            GROQ_BASE_URL,
            config,
            environment,
        )?;
        Ok(Self { inner })
    }
}

#[async_trait]
impl ContentGenerator for GroqGenerator {
    async fn generate_content(
        &self,
        request: GenerateContentParameters,
    ) -> GeneratorResult<GenerateContentResponse> {
        self.inner.complete(&request).await
    }

    async fn generate_content_stream(
        &self,
        request: GenerateContentParameters,
    ) -> GeneratorResult<GenerateContentStream> {
        self.inner.complete_stream(&request).await
    }

    async fn count_tokens(
        &self,
        _request: CountTokensParameters,
    ) -> GeneratorResult<CountTokensResponse> {
        Err(GeneratorError::not_implemented("count_tokens", "groq"))
    }

    async fn embed_content(
        &self,
        _request: EmbedContentParameters,
    ) -> GeneratorResult<EmbedContentResponse> {
        Err(GeneratorError::not_implemented("embed_content", "groq"))
    }
}
