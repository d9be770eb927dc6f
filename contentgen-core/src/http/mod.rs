//! HTTP layer shared by the provider adapters
//!
//! This module handles:
//! - Client construction with pooling, proxy and User-Agent
//! - Outbound request options handed to externally built generators
//! - Capturing backend error responses without reshaping them

pub mod client;
pub mod error;

pub use client::build_client;
pub use error::ensure_success;

use crate::config::Environment;
use std::collections::HashMap;

/// Product token at the start of the User-Agent header
pub const PRODUCT_NAME: &str = "contentgen";

/// Variable that overrides the version reported in the User-Agent header
pub const CLI_VERSION_ENV: &str = "CLI_VERSION";

/// Options for outbound HTTP requests
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpOptions {
    /// Headers added to every request
    pub headers: HashMap<String, String>,
}

impl HttpOptions {
    /// Options carrying the User-Agent for the given environment
    pub fn for_environment(environment: &Environment) -> Self {
        let mut headers = HashMap::new();
        headers.insert("User-Agent".to_string(), user_agent(environment));
        Self { headers }
    }

    pub fn user_agent(&self) -> Option<&str> {
        self.headers.get("User-Agent").map(String::as_str)
    }
}

/// `<product>/<version> (<platform>; <architecture>)`
pub fn user_agent(environment: &Environment) -> String {
    let version = environment
        .get(CLI_VERSION_ENV)
        .unwrap_or_else(|| crate::version().to_string());
    format!(
        "{}/{} ({}; {})",
        PRODUCT_NAME,
        version,
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_agent_prefers_cli_version() {
        let environment = Environment::from_pairs([(CLI_VERSION_ENV, "9.9.9")]);
        let ua = user_agent(&environment);
        assert!(ua.starts_with("contentgen/9.9.9 ("));
        assert!(ua.contains(std::env::consts::ARCH));
    }

    #[test]
    fn test_user_agent_falls_back_to_crate_version() {
        let ua = user_agent(&Environment::empty());
        assert_eq!(
            ua,
            format!(
                "contentgen/{} ({}; {})",
                env!("CARGO_PKG_VERSION"),
                std::env::consts::OS,
                std::env::consts::ARCH
            )
        );
    }

    #[test]
    fn test_http_options_carry_user_agent() {
        let options = HttpOptions::for_environment(&Environment::empty());
        assert!(options.user_agent().unwrap().starts_with("contentgen/"));
    }
}
