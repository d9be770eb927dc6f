//! Configuration validation utilities

use super::error::ValidationError;
use super::schema::SessionConfig;
use url::Url;

const PROXY_SCHEMES: [&str; 4] = ["http", "https", "socks5", "socks5h"];

/// Session settings validator with rules beyond the schema's own checks
#[derive(Debug, Default)]
pub struct ConfigValidator;

impl ConfigValidator {
    /// Create a new validator
    pub fn new() -> Self {
        Self
    }

    /// Validate a configuration with extended rules
    pub fn validate(&self, config: &SessionConfig) -> Result<(), ValidationError> {
        // First run the built-in validation
        config.validate()?;

        if let Some(proxy) = &config.proxy {
            self.validate_proxy(proxy)?;
        }

        Ok(())
    }

    fn validate_proxy(&self, proxy: &str) -> Result<(), ValidationError> {
        let url = Url::parse(proxy)
            .map_err(|e| ValidationError::invalid_url("proxy", e.to_string()))?;

        if !PROXY_SCHEMES.contains(&url.scheme()) {
            let message = format!("unsupported scheme '{}'", url.scheme());
            let err = ValidationError::invalid_url("proxy", message)
                .with_context("expected one of http, https, socks5, socks5h");
            return Err(err);
        }

        if url.host_str().is_none() {
            return Err(ValidationError::invalid_url("proxy", "missing host"));
        }

        Ok(())
    }
}
