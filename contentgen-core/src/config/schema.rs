//! Configuration schema structures with serde support

use super::error::ValidationError;
use crate::providers::ProviderKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Session settings, as persisted in a settings file
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    /// Model override; each provider has a documented default otherwise
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Outbound proxy address (http, https, socks5)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy: Option<String>,

    /// Selected authentication mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_type: Option<AuthType>,

    /// Provider tag used when no auth mode is selected
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
}

impl SessionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    pub fn with_auth_type(mut self, auth_type: AuthType) -> Self {
        self.auth_type = Some(auth_type);
        self
    }

    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    /// Built-in validation for required shapes
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(model) = &self.model {
            if model.trim().is_empty() {
                return Err(ValidationError::invalid_value(
                    "model",
                    "non-empty model id",
                    "empty string",
                ));
            }
        }
        Ok(())
    }
}

/// Authentication modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum AuthType {
    /// Google account login, handled by the managed generator
    #[serde(rename = "oauth-personal")]
    LoginWithGoogle,
    #[serde(rename = "gemini-api-key")]
    UseGemini,
    #[serde(rename = "vertex-ai")]
    UseVertexAi,
    /// Cloud Shell credentials, handled by the managed generator
    #[serde(rename = "cloud-shell")]
    CloudShell,
    #[serde(rename = "openai-api-key")]
    UseOpenAi,
    #[serde(rename = "anthropic-api-key")]
    UseAnthropic,
    #[serde(rename = "deepseek-api-key")]
    UseDeepSeek,
    #[serde(rename = "groq-api-key")]
    UseGroq,
}

impl AuthType {
    pub const ALL: [AuthType; 8] = [
        AuthType::LoginWithGoogle,
        AuthType::UseGemini,
        AuthType::UseVertexAi,
        AuthType::CloudShell,
        AuthType::UseOpenAi,
        AuthType::UseAnthropic,
        AuthType::UseDeepSeek,
        AuthType::UseGroq,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AuthType::LoginWithGoogle => "oauth-personal",
            AuthType::UseGemini => "gemini-api-key",
            AuthType::UseVertexAi => "vertex-ai",
            AuthType::CloudShell => "cloud-shell",
            AuthType::UseOpenAi => "openai-api-key",
            AuthType::UseAnthropic => "anthropic-api-key",
            AuthType::UseDeepSeek => "deepseek-api-key",
            AuthType::UseGroq => "groq-api-key",
        }
    }

    /// The provider this mode authenticates against
    pub fn provider(&self) -> ProviderKind {
        match self {
            AuthType::LoginWithGoogle
            | AuthType::UseGemini
            | AuthType::UseVertexAi
            | AuthType::CloudShell => ProviderKind::Gemini,
            AuthType::UseOpenAi => ProviderKind::OpenAi,
            AuthType::UseAnthropic => ProviderKind::Anthropic,
            AuthType::UseDeepSeek => ProviderKind::DeepSeek,
            AuthType::UseGroq => ProviderKind::Groq,
        }
    }

    /// Modes whose generator is built outside this crate
    pub fn is_managed(&self) -> bool {
        matches!(self, AuthType::LoginWithGoogle | AuthType::CloudShell)
    }
}

impl fmt::Display for AuthType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AuthType::ALL
            .into_iter()
            .find(|auth| auth.as_str() == s)
            .ok_or_else(|| ValidationError::invalid_value("auth_type", "known auth type", s))
    }
}
