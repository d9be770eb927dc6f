//! Anthropic Messages API client

use super::converter::{from_messages_response, to_messages_request};
use super::streaming::parse_stream;
use super::types::MessagesResponse;
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
use tracing::{debug, info};
use uuid::Uuid;

/// Default Anthropic endpoint
pub const ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";

/// Value sent in the `anthropic-version` header
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Anthropic adapter
pub struct AnthropicGenerator {
    client: Client,
    base_url: String,
    api_key: SecretString,
}

impl AnthropicGenerator {
    /// Create the adapter, reading a missing key from the process environment
    pub fn new(config: &ContentGeneratorConfig) -> GeneratorResult<Self> {
        Self::with_env(config, &Environment::process())
    }

    pub fn with_env(
        config: &ContentGeneratorConfig,
        environment: &Environment,
    ) -> GeneratorResult<Self> {
        let kind = ProviderKind::Anthropic;
        let api_key = require_api_key(
            config.api_key.as_ref(),
            environment,
            kind.as_str(),
            kind.api_key_env(),
        )?;
        let base_url = config
            .base_url
            .clone()
            .or_else(|| environment.get(kind.base_url_env()))
            .unwrap_or_else(|| ANTHROPIC_BASE_URL.to_string());

        info!(
            base_url = %base_url,
            api_key = %api_key.partial_redact(),
            "created anthropic client"
        );

        Ok(Self {
            client: build_client(config.proxy.as_deref(), None)?,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    async fn send(
        &self,
        request: &GenerateContentParameters,
        stream: bool,
    ) -> GeneratorResult<reqwest::Response> {
        let body = to_messages_request(request, stream);
        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", self.api_key.expose_secret())
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await?;

        ensure_success(ProviderKind::Anthropic.as_str(), response).await
    }
}

#[async_trait]
impl ContentGenerator for AnthropicGenerator {
    async fn generate_content(
        &self,
        request: GenerateContentParameters,
    ) -> GeneratorResult<GenerateContentResponse> {
        let request_id = Uuid::new_v4();
        debug!(provider = "anthropic", %request_id, model = %request.model, "messages request");

        let response: MessagesResponse = self.send(&request, false).await?.json().await?;

        debug!(
            provider = "anthropic",
            %request_id,
            stop_reason = ?response.stop_reason,
            "messages request finished"
        );
        Ok(from_messages_response(response))
    }

    async fn generate_content_stream(
        &self,
        request: GenerateContentParameters,
    ) -> GeneratorResult<GenerateContentStream> {
        let request_id = Uuid::new_v4();
        debug!(
            provider = "anthropic",
            %request_id,
            model = %request.model,
            "streaming messages request"
        );

        let response = self.send(&request, true).await?;
        Ok(parse_stream(response.bytes_stream()))
    }

    async fn count_tokens(
        &self,
        _request: CountTokensParameters,
    ) -> GeneratorResult<CountTokensResponse> {
        Err(GeneratorError::not_implemented("count_tokens", "anthropic"))
    }

    async fn embed_content(
        &self,
        _request: EmbedContentParameters,
    ) -> GeneratorResult<EmbedContentResponse> {
        Err(GeneratorError::not_implemented("embed_content", "anthropic"))
    }
}
