//! Environment variable access and interpolation for configuration

use super::error::ConfigError;
use regex::Regex;
use std::collections::HashMap;
use std::env;
use std::sync::OnceLock;

/// Read-only view over environment variables.
///
/// Empty values are treated as absent, so `FOO=` behaves like an unset `FOO`.
#[derive(Debug, Clone, Default)]
pub enum Environment {
    /// The real process environment
    #[default]
    Process,
    /// A fixed snapshot, independent of the process environment
    Fixed(HashMap<String, String>),
}

impl Environment {
    pub fn process() -> Self {
        Self::Process
    }

    /// A snapshot built from key/value pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::Fixed(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// An environment with no variables at all
    pub fn empty() -> Self {
        Self::Fixed(HashMap::new())
    }

    /// Look up a variable
    pub fn get(&self, name: &str) -> Option<String> {
        let value = match self {
            Self::Process => env::var(name).ok(),
            Self::Fixed(vars) => vars.get(name).cloned(),
        };
        value.filter(|v| !v.is_empty())
    }
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("env var pattern is a valid regex")
    })
}

/// Replace every `${VAR}` with its value; fails on the first unset variable
pub fn interpolate_env_vars(
    content: &str,
    environment: &Environment,
) -> Result<String, ConfigError> {
    let mut first_missing: Option<String> = None;

    let interpolated = env_var_pattern().replace_all(content, |cap: &regex::Captures<'_>| {
        environment.get(&cap[1]).unwrap_or_else(|| {
            first_missing.get_or_insert_with(|| cap[1].to_string());
            String::new()
        })
    });

    match first_missing {
        Some(var) => Err(ConfigError::EnvVarNotFound { var }),
        None => Ok(interpolated.into_owned()),
    }
}
