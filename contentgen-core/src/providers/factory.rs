//! Provider selection and generator construction
//!
//! Construction is two-phase. `resolve_config` turns session settings and the
//! selected auth mode into a `ContentGeneratorConfig` and never fails; a
//! missing key is simply left out. `create_generator` then dispatches on the
//! provider tag and builds exactly one adapter, which is where a missing key
//! or an unknown provider is reported.

use crate::config::{AuthType, Environment, SecretString, SessionConfig};
use crate::http::HttpOptions;
use crate::providers::adapter::{ContentGenerator, ProviderKind};
use crate::providers::anthropic::AnthropicGenerator;
use crate::providers::deepseek::DeepSeekGenerator;
use crate::providers::gemini::{
    GeminiGenerator, DEFAULT_GEMINI_MODEL, VERTEX_API_KEY_ENV, VERTEX_BASE_URL_ENV,
};
use crate::providers::groq::GroqGenerator;
use crate::providers::openai::OpenAiGenerator;
use crate::providers::{GeneratorError, GeneratorResult};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

/// Everything an adapter needs to construct its backend client
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentGeneratorConfig {
    pub model: String,

    /// Provider tag; parsed into a `ProviderKind` at creation time
    pub provider: String,

    pub api_key: Option<SecretString>,

    /// Use Vertex AI instead of the Gemini Developer API
    pub vertexai: Option<bool>,

    pub auth_type: Option<AuthType>,

    pub proxy: Option<String>,

    /// Endpoint override
    pub base_url: Option<String>,
}

impl ContentGeneratorConfig {
    pub fn new(model: impl Into<String>, provider: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            provider: provider.into(),
            ..Default::default()
        }
    }

    pub fn with_api_key(mut self, api_key: SecretString) -> Self {
        self.api_key = Some(api_key);
        self
    }

    pub fn with_vertexai(mut self, vertexai: bool) -> Self {
        self.vertexai = Some(vertexai);
        self
    }

    pub fn with_auth_type(mut self, auth_type: AuthType) -> Self {
        self.auth_type = Some(auth_type);
        self
    }

    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }
}

/// Builds generators for managed auth modes (Google login, Cloud Shell).
///
/// Implemented outside this crate; the factory hands over construction
/// entirely and does not wrap the result.
#[async_trait]
pub trait ManagedGeneratorFactory: Send + Sync {
    async fn create(
        &self,
        http_options: HttpOptions,
        auth_type: AuthType,
        session: &SessionConfig,
        session_id: Option<&str>,
    ) -> GeneratorResult<Box<dyn ContentGenerator>>;
}

/// Selects and constructs the content generator for a session
#[derive(Clone, Default)]
pub struct GeneratorFactory {
    environment: Environment,
    managed: Option<Arc<dyn ManagedGeneratorFactory>>,
}

impl GeneratorFactory {
    /// Factory reading the process environment, without managed auth support
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_env(environment: Environment) -> Self {
        Self {
            environment,
            managed: None,
        }
    }

    pub fn with_managed(mut self, managed: Arc<dyn ManagedGeneratorFactory>) -> Self {
        self.managed = Some(managed);
        self
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Resolve the generator config for a session.
    ///
    /// `auth_type` overrides the session's own auth mode. Only the variables
    /// of the selected mode are read.
    pub fn resolve_config(
        &self,
        session: &SessionConfig,
        auth_type: Option<AuthType>,
    ) -> ContentGeneratorConfig {
        let auth_type = auth_type.or(session.auth_type);
        let provider = match auth_type {
            Some(auth) => auth.provider().as_str().to_string(),
            None => session
                .provider
                .clone()
                .unwrap_or_else(|| ProviderKind::Gemini.as_str().to_string()),
        };
        let model = session.model.clone().unwrap_or_else(|| {
            provider
                .parse::<ProviderKind>()
                .map(|kind| kind.default_model())
                .unwrap_or(DEFAULT_GEMINI_MODEL)
                .to_string()
        });

        let mut config = ContentGeneratorConfig {
            model,
            provider,
            auth_type,
            proxy: session.proxy.clone(),
            ..Default::default()
        };

        let Some(auth) = auth_type else {
            debug!(
                provider = %config.provider,
                model = %config.model,
                "resolved config without auth mode"
            );
            return config;
        };

        if auth.is_managed() {
            debug!(auth_type = %auth, model = %config.model, "resolved config for managed auth");
            return config;
        }

        let (key_env, base_url_env) = match auth {
            AuthType::UseVertexAi => {
                config.vertexai = Some(true);
                (VERTEX_API_KEY_ENV, VERTEX_BASE_URL_ENV)
            }
            other => {
                let kind = other.provider();
                (kind.api_key_env(), kind.base_url_env())
            }
        };
        config.api_key = self.environment.get(key_env).map(SecretString::new);
        config.base_url = self.environment.get(base_url_env);

        debug!(
            auth_type = %auth,
            provider = %config.provider,
            model = %config.model,
            has_api_key = config.api_key.is_some(),
            "resolved content generator config"
        );
        config
    }

    /// Construct the generator selected by `config.provider`.
    ///
    /// Unknown tags fail before any client is built. Managed auth on the
    /// primary provider is handed to the managed factory.
    pub async fn create_generator(
        &self,
        config: &ContentGeneratorConfig,
        session: &SessionConfig,
        session_id: Option<&str>,
    ) -> GeneratorResult<Box<dyn ContentGenerator>> {
        let kind: ProviderKind = config.provider.parse()?;
        info!(provider = %kind, model = %config.model, session_id, "creating content generator");

        let environment = &self.environment;
        let generator: Box<dyn ContentGenerator> = match kind {
            ProviderKind::Gemini => {
                let http_options = HttpOptions::for_environment(environment);
                match config.auth_type.filter(AuthType::is_managed) {
                    Some(auth) => {
                        let managed = self
                            .managed
                            .as_ref()
                            .ok_or(GeneratorError::ManagedAuthUnavailable(auth))?;
                        return managed
                            .create(http_options, auth, session, session_id)
                            .await;
                    }
                    None => {
                        let gemini =
                            GeminiGenerator::with_options(config, environment, &http_options)?;
                        Box::new(gemini)
                    }
                }
            }
            ProviderKind::OpenAi => Box::new(OpenAiGenerator::with_env(config, environment)?),
            ProviderKind::Anthropic => Box::new(AnthropicGenerator::with_env(config, environment)?),
            ProviderKind::DeepSeek => Box::new(DeepSeekGenerator::with_env(config, environment)?),
            ProviderKind::Groq => Box::new(GroqGenerator::with_env(config, environment)?),
        };

        Ok(generator)
    }
}

impl std::fmt::Debug for GeneratorFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratorFactory")
            .field("environment", &self.environment)
            .field("managed", &self.managed.is_some())
            .finish()
    }
}
