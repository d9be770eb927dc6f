//! DeepSeek provider
//!
//! DeepSeek speaks the OpenAI chat completions protocol, so generation
//! reuses the shared client. It offers neither token counting nor
//! embeddings.

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

/// Default DeepSeek endpoint
pub const DEEPSEEK_BASE_URL: &str = "https://api.deepseek.com";

/// Model used when the session does not override it
pub const DEFAULT_DEEPSEEK_MODEL: &str = "deepseek-chat";

/// DeepSeek adapter
pub struct DeepSeekGenerator {
    inner: ChatCompletionsClient,
}

impl DeepSeekGenerator {
    pub fn new(config: &ContentGeneratorConfig) -> GeneratorResult<Self> {
        Self::with_env(config, &Environment::process())
    }

    pub fn with_env(
        config: &ContentGeneratorConfig,
        environment: &Environment,
    ) -> GeneratorResult<Self> {
        let inner = ChatCompletionsClient::from_config(
            ProviderKind::DeepSeek,
            DEEPSEEK_BASE_URL,
            config,
            environment,
        )?;
        Ok(Self { inner })
    }
}

#[async_trait]
impl ContentGenerator for DeepSeekGenerator {
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
        let provider = self.inner.provider();
        Err(GeneratorError::not_implemented("count_tokens", provider))
    }

    async fn embed_content(
        &self,
        _request: EmbedContentParameters,
    ) -> GeneratorResult<EmbedContentResponse> {
        let provider = self.inner.provider();
        Err(GeneratorError::not_implemented("embed_content", provider))
    }
}
