//! Configuration module
//!
//! Session settings, authentication modes, environment access and secret
//! handling. Settings files are YAML or JSON with `${VAR}` interpolation.

mod env;
mod error;
mod schema;
mod secrets;
mod validator;

pub use env::{interpolate_env_vars, Environment};
pub use error::{ConfigError, ConfigResult, ValidationError, ValidationErrorKind};
pub use schema::{AuthType, SessionConfig};
pub use secrets::SecretString;
pub use validator::ConfigValidator;

use std::fs;
use std::path::Path;

/// Load session settings from a YAML file
pub fn load_from_yaml<P: AsRef<Path>>(path: P) -> ConfigResult<SessionConfig> {
    load_from_yaml_with_env(path, &Environment::process())
}

/// Load session settings from a YAML file, interpolating from `environment`
pub fn load_from_yaml_with_env<P: AsRef<Path>>(
    path: P,
    environment: &Environment,
) -> ConfigResult<SessionConfig> {
    let path = path.as_ref();
    let interpolated = read_interpolated(path, environment)?;

    let config: SessionConfig =
        serde_yaml::from_str(&interpolated).map_err(|e| ConfigError::ParseError {
            path: path.to_string_lossy().to_string(),
            line: e.location().map(|l| l.line()),
            column: e.location().map(|l| l.column()),
            message: e.to_string(),
        })?;

    ConfigValidator::new().validate(&config)?;
    Ok(config)
}

/// Load session settings from a JSON file
pub fn load_from_json<P: AsRef<Path>>(path: P) -> ConfigResult<SessionConfig> {
    load_from_json_with_env(path, &Environment::process())
}

/// Load session settings from a JSON file, interpolating from `environment`
pub fn load_from_json_with_env<P: AsRef<Path>>(
    path: P,
    environment: &Environment,
) -> ConfigResult<SessionConfig> {
    let path = path.as_ref();
    let interpolated = read_interpolated(path, environment)?;

    let config: SessionConfig =
        serde_json::from_str(&interpolated).map_err(|e| ConfigError::ParseError {
            path: path.to_string_lossy().to_string(),
            line: Some(e.line()),
            column: Some(e.column()),
            message: e.to_string(),
        })?;

    ConfigValidator::new().validate(&config)?;
    Ok(config)
}

fn read_interpolated(path: &Path, environment: &Environment) -> ConfigResult<String> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
        path: path.to_string_lossy().to_string(),
        source: e,
    })?;

    interpolate_env_vars(&content, environment)
}
