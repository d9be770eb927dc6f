//! Settings loading errors

use std::fmt;
use thiserror::Error;

/// Result type for settings operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Failure to read, interpolate, parse or validate a settings file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read settings file '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot parse '{path}' (line {}, column {}): {message}",
            .line.map_or_else(|| "?".to_string(), |l| l.to_string()),
            .column.map_or_else(|| "?".to_string(), |c| c.to_string()))]
    ParseError {
        path: String,
        line: Option<usize>,
        column: Option<usize>,
        message: String,
    },

    #[error("Invalid settings: {0}")]
    ValidationError(#[from] ValidationError),

    /// A `${VAR}` reference with no value in the environment
    #[error("Environment variable '{var}' referenced in settings is not set")]
    EnvVarNotFound { var: String },
}

/// A rejected settings field
#[derive(Debug, Error)]
pub struct ValidationError {
    /// Dotted path of the offending field, e.g. `proxy`
    pub field_path: String,
    pub kind: ValidationErrorKind,
    pub context: Option<String>,
}

#[derive(Debug, Error)]
pub enum ValidationErrorKind {
    #[error("expected {expected}, got {actual}")]
    InvalidValue { expected: String, actual: String },

    #[error("bad URL, {message}")]
    InvalidUrl { message: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.context {
            Some(context) => write!(f, "{}: {} ({})", self.field_path, self.kind, context),
            None => write!(f, "{}: {}", self.field_path, self.kind),
        }
    }
}

impl ValidationError {
    pub fn new(field_path: impl Into<String>, kind: ValidationErrorKind) -> Self {
        Self {
            field_path: field_path.into(),
            kind,
            context: None,
        }
    }

    pub fn with_context(self, context: impl Into<String>) -> Self {
        Self {
            context: Some(context.into()),
            ..self
        }
    }

    pub fn invalid_value(
        field_path: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        let kind = ValidationErrorKind::InvalidValue {
            expected: expected.into(),
            actual: actual.into(),
        };
        Self::new(field_path, kind)
    }

    pub fn invalid_url(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        let kind = ValidationErrorKind::InvalidUrl {
            message: message.into(),
        };
        Self::new(field_path, kind)
    }
}
