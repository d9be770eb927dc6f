//! Provider error types and handling

use crate::config::{AuthType, ConfigError};
use thiserror::Error;

/// Result type for generator operations
pub type GeneratorResult<T> = Result<T, GeneratorError>;

/// Errors surfaced by the factory and by every adapter operation
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// No API key in the configuration or the environment
    #[error("{provider} API key is required; set {env_var} or configure a key")]
    MissingApiKey {
        provider: &'static str,
        env_var: &'static str,
    },

    /// The backend has no endpoint for this operation
    #[error("{operation} is not implemented for provider {provider}")]
    NotImplemented {
        operation: &'static str,
        provider: &'static str,
    },

    /// Provider tag outside the supported set
    #[error("Unsupported provider: {0}")]
    UnsupportedProvider(String),

    /// Managed auth selected without an external generator factory
    #[error("No managed content generator is available for auth type {0}")]
    ManagedAuthUnavailable(AuthType),

    /// Invalid client-side setup (proxy, headers, settings file)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Non-success HTTP status; the body is exactly what the backend sent
    #[error("{provider} API error ({status}): {body}")]
    Api {
        provider: &'static str,
        status: u16,
        body: String,
    },

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Server-sent event framing failure
    #[error("Stream error: {0}")]
    Stream(String),

    /// Raised by an externally built generator
    #[error(transparent)]
    External(#[from] anyhow::Error),
}

impl GeneratorError {
    pub fn not_implemented(operation: &'static str, provider: &'static str) -> Self {
        Self::NotImplemented {
            operation,
            provider,
        }
    }

    pub fn is_not_implemented(&self) -> bool {
        matches!(self, Self::NotImplemented { .. })
    }
}

impl From<ConfigError> for GeneratorError {
    fn from(err: ConfigError) -> Self {
        GeneratorError::Configuration(err.to_string())
    }
}

impl<E> From<eventsource_stream::EventStreamError<E>> for GeneratorError
where
    E: Into<GeneratorError> + std::error::Error,
{
    fn from(err: eventsource_stream::EventStreamError<E>) -> Self {
        match err {
            eventsource_stream::EventStreamError::Transport(e) => e.into(),
            other => GeneratorError::Stream(other.to_string()),
        }
    }
}
