//! Gemini and Vertex AI (express mode) client

use super::streaming::parse_stream;
use super::types::{
    BatchEmbedBody, CountTokensBody, EmbedRequestItem, GenerateContentBody, PredictBody,
    PredictInstance, PredictResponse,
};
use crate::config::{Environment, SecretString};
use crate::http::{build_client, ensure_success, HttpOptions};
use crate::protocol::{
    CountTokensParameters, CountTokensResponse, EmbedContentParameters, EmbedContentResponse,
    GenerateContentParameters, GenerateContentResponse, GenerateContentStream,
};
use crate::providers::adapter::{require_api_key, ContentGenerator, ProviderKind};
use crate::providers::factory::ContentGeneratorConfig;
use crate::providers::transform::embedding_inputs;
use crate::providers::GeneratorResult;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

/// Default Gemini Developer API endpoint
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default Vertex AI endpoint for publisher models
pub const VERTEX_BASE_URL: &str = "https://aiplatform.googleapis.com/v1/publishers/google";

/// Key variable for Vertex AI express mode
pub const VERTEX_API_KEY_ENV: &str = "GOOGLE_API_KEY";

/// Endpoint override for Vertex AI
pub const VERTEX_BASE_URL_ENV: &str = "GOOGLE_VERTEX_BASE_URL";

/// Primary adapter. Requests and responses are the canonical structures.
pub struct GeminiGenerator {
    client: Client,
    base_url: String,
    api_key: SecretString,
    vertexai: bool,
}

impl GeminiGenerator {
    /// Create the adapter, reading a missing key from the process environment
    pub fn new(config: &ContentGeneratorConfig) -> GeneratorResult<Self> {
        Self::with_env(config, &Environment::process())
    }

    pub fn with_env(
        config: &ContentGeneratorConfig,
        environment: &Environment,
    ) -> GeneratorResult<Self> {
        let http_options = HttpOptions::for_environment(environment);
        Self::with_options(config, environment, &http_options)
    }

    pub(crate) fn with_options(
        config: &ContentGeneratorConfig,
        environment: &Environment,
        http_options: &HttpOptions,
    ) -> GeneratorResult<Self> {
        let vertexai = config.vertexai.unwrap_or(false);
        let (key_env, base_url_env, default_base_url) = if vertexai {
            (VERTEX_API_KEY_ENV, VERTEX_BASE_URL_ENV, VERTEX_BASE_URL)
        } else {
            let kind = ProviderKind::Gemini;
            (kind.api_key_env(), kind.base_url_env(), GEMINI_BASE_URL)
        };

        let api_key = require_api_key(config.api_key.as_ref(), environment, "gemini", key_env)?;
        let base_url = config
            .base_url
            .clone()
            .or_else(|| environment.get(base_url_env))
            .unwrap_or_else(|| default_base_url.to_string());
        let client = build_client(config.proxy.as_deref(), http_options.user_agent())?;

        info!(
            vertexai,
            base_url = %base_url,
            api_key = %api_key.partial_redact(),
            "created gemini client"
        );

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            vertexai,
        })
    }

    /// `{base}/models/{model}:{method}`; a `models/` prefix on the id is accepted
    fn method_url(&self, model: &str, method: &str) -> String {
        let model = model.strip_prefix("models/").unwrap_or(model);
        format!("{}/models/{}:{}", self.base_url, model, method)
    }

    async fn post<T: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &T,
    ) -> GeneratorResult<reqwest::Response> {
        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(body)
            .send()
            .await?;

        ensure_success("gemini", response).await
    }
}

#[async_trait]
impl ContentGenerator for GeminiGenerator {
    async fn generate_content(
        &self,
        request: GenerateContentParameters,
    ) -> GeneratorResult<GenerateContentResponse> {
        let request_id = Uuid::new_v4();
        debug!(provider = "gemini", %request_id, model = %request.model, "generate content");

        let url = self.method_url(&request.model, "generateContent");
        let response = self
            .post(&url, &GenerateContentBody::from_request(&request))
            .await?
            .json()
            .await?;

        debug!(provider = "gemini", %request_id, "generate content finished");
        Ok(response)
    }

    async fn generate_content_stream(
        &self,
        request: GenerateContentParameters,
    ) -> GeneratorResult<GenerateContentStream> {
        let request_id = Uuid::new_v4();
        debug!(
            provider = "gemini",
            %request_id,
            model = %request.model,
            "streaming generate content"
        );

        let url = self.method_url(&request.model, "streamGenerateContent") + "?alt=sse";
        let body = GenerateContentBody::from_request(&request);
        let response = self.post(&url, &body).await?;

        Ok(parse_stream(response.bytes_stream()))
    }

    async fn count_tokens(
        &self,
        request: CountTokensParameters,
    ) -> GeneratorResult<CountTokensResponse> {
        let request_id = Uuid::new_v4();
        debug!(provider = "gemini", %request_id, model = %request.model, "count tokens");

        let url = self.method_url(&request.model, "countTokens");
        let body = CountTokensBody {
            contents: request.contents.normalize(),
        };
        Ok(self.post(&url, &body).await?.json().await?)
    }

    async fn embed_content(
        &self,
        request: EmbedContentParameters,
    ) -> GeneratorResult<EmbedContentResponse> {
        let request_id = Uuid::new_v4();
        debug!(
            provider = "gemini",
            %request_id,
            model = %request.model,
            vertexai = self.vertexai,
            "embed content"
        );

        if self.vertexai {
            let url = self.method_url(&request.model, "predict");
            let body = PredictBody {
                instances: embedding_inputs(&request.contents)
                    .into_iter()
                    .map(|content| PredictInstance { content })
                    .collect(),
            };
            let response: PredictResponse = self.post(&url, &body).await?.json().await?;
            return Ok(response.into());
        }

        let bare_model = request.model.strip_prefix("models/");
        let model = format!("models/{}", bare_model.unwrap_or(&request.model));
        let url = self.method_url(&request.model, "batchEmbedContents");
        let body = BatchEmbedBody {
            requests: request
                .contents
                .normalize()
                .into_iter()
                .map(|content| EmbedRequestItem {
                    model: model.clone(),
                    content,
                })
                .collect(),
        };
        Ok(self.post(&url, &body).await?.json().await?)
    }
}
