//! Configuration loading from disk and the environment.

use std::env;
use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::GatewayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable naming the upstream API origin.
pub const API_SERVER_URL_VAR: &str = "API_SERVER_URL";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: GatewayConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Apply environment overrides to an already-loaded configuration.
///
/// Called once at startup; the resolved value is the only upstream origin
/// the gateway will ever use for the life of the process.
pub fn apply_env_overrides(config: &mut GatewayConfig) {
    config.upstream.url = resolve_upstream(
        env::var(API_SERVER_URL_VAR).ok().as_deref(),
        &config.upstream.url,
    );
}

/// Pick the upstream origin: a set, non-empty environment value wins over
/// the configured one.
fn resolve_upstream(env_value: Option<&str>, configured: &str) -> String {
    match env_value {
        Some(value) if !value.trim().is_empty() => value.trim().to_string(),
        _ => configured.to_string(),
    }
}
