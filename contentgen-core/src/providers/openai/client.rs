//! OpenAI-compatible chat completions client

use super::converter::{
    from_chat_response, from_embedding_response, to_chat_request, to_embedding_request,
};
use super::streaming::parse_stream;
use super::types::{ChatCompletionResponse, EmbeddingResponse};
use crate::config::{Environment, SecretString};
use crate::http::{build_client, ensure_success};
use crate::protocol::{
    CountTokensParameters, CountTokensResponse, EmbedContentParameters, EmbedContentResponse,
    GenerateContentParameters, GenerateContentResponse, GenerateContentStream,
};
use crate::providers::adapter::{require_api_key, ContentGenerator, ProviderKind};
use crate::providers::factory::ContentGeneratorConfig;
use crate::providers::{GeneratorError, GeneratorResult};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

/// Default OpenAI endpoint
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Client for any backend speaking the OpenAI chat completions protocol
pub(crate) struct ChatCompletionsClient {
    provider: &'static str,
    client: Client,
    base_url: String,
    api_key: SecretString,
}

impl ChatCompletionsClient {
    /// Build from a resolved config; fails when no API key can be found
    pub(crate) fn from_config(
        kind: ProviderKind,
        default_base_url: &str,
        config: &ContentGeneratorConfig,
        environment: &Environment,
    ) -> GeneratorResult<Self> {
        let provider = kind.as_str();
        let api_key = require_api_key(
            config.api_key.as_ref(),
            environment,
            provider,
            kind.api_key_env(),
        )?;
        let base_url = config
            .base_url
            .clone()
            .or_else(|| environment.get(kind.base_url_env()))
            .unwrap_or_else(|| default_base_url.to_string());
        let client = build_client(config.proxy.as_deref(), None)?;

        info!(
            provider,
            base_url = %base_url,
            api_key = %api_key.partial_redact(),
            "created chat completions client"
        );

        Ok(Self {
            provider,
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    pub(crate) fn provider(&self) -> &'static str {
        self.provider
    }

    async fn post<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> GeneratorResult<reqwest::Response> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .post(&url)
            .bearer_auth(self.api_key.expose_secret())
            .json(body)
            .send()
            .await?;

        ensure_success(self.provider, response).await
    }

    pub(crate) async fn complete(
        &self,
        request: &GenerateContentParameters,
    ) -> GeneratorResult<GenerateContentResponse> {
        let request_id = Uuid::new_v4();
        debug!(
            provider = self.provider,
            %request_id,
            model = %request.model,
            "chat completion"
        );

        let body = to_chat_request(request, false);
        let response: ChatCompletionResponse =
            self.post("/chat/completions", &body).await?.json().await?;

        debug!(provider = self.provider, %request_id, "chat completion finished");
        Ok(from_chat_response(response))
    }

    pub(crate) async fn complete_stream(
        &self,
        request: &GenerateContentParameters,
    ) -> GeneratorResult<GenerateContentStream> {
        let request_id = Uuid::new_v4();
        debug!(
            provider = self.provider,
            %request_id,
            model = %request.model,
            "streaming chat completion"
        );

        let body = to_chat_request(request, true);
        let response = self.post("/chat/completions", &body).await?;

        Ok(parse_stream(response.bytes_stream()))
    }

    pub(crate) async fn embed(
        &self,
        request: &EmbedContentParameters,
    ) -> GeneratorResult<EmbedContentResponse> {
        let request_id = Uuid::new_v4();
        let body = to_embedding_request(request);
        debug!(
            provider = self.provider,
            %request_id,
            inputs = body.input.len(),
            "embeddings"
        );

        let response: EmbeddingResponse = self.post("/embeddings", &body).await?.json().await?;
        Ok(from_embedding_response(response))
    }
}

/// OpenAI adapter
pub struct OpenAiGenerator {
    inner: ChatCompletionsClient,
}

impl OpenAiGenerator {
    /// Create the adapter, reading a missing key from the process environment
    pub fn new(config: &ContentGeneratorConfig) -> GeneratorResult<Self> {
        Self::with_env(config, &Environment::process())
    }

    pub fn with_env(
        config: &ContentGeneratorConfig,
        environment: &Environment,
    ) -> GeneratorResult<Self> {
        let inner = ChatCompletionsClient::from_config(
            ProviderKind::OpenAi,
            OPENAI_BASE_URL,
            config,
            environment,
        )?;
        Ok(Self { inner })
    }
}

#[async_trait]
impl ContentGenerator for OpenAiGenerator {
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
        Err(GeneratorError::not_implemented("count_tokens", "openai"))
    }

    async fn embed_content(
        &self,
        request: EmbedContentParameters,
    ) -> GeneratorResult<EmbedContentResponse> {
        self.inner.embed(&request).await
    }
}
