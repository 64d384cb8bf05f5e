//! Configuration loader (defaults + file + env merge).

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use thiserror::Error;

use crate::schema::HashiConfig;

/// Environment variable prefix. Nested keys are separated by `__`,
/// e.g. `HASHI_SERVER__PORT=9000`.
pub const ENV_PREFIX: &str = "HASHI_";

/// Errors from configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to load or merge configuration.
    #[error("configuration error: {0}")]
    Load(String),
}

/// Loads configuration by merging layers:
/// 1. Default values
/// 2. Config file (if given)
/// 3. Environment variables (`HASHI_` prefix)
pub fn load_config(config_path: Option<&str>) -> Result<HashiConfig, ConfigError> {
    let mut figment = Figment::from(Serialized::defaults(HashiConfig::default()));

    if let Some(path) = config_path {
        figment = figment.merge(Toml::file(path));
    }

    figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

    figment
        .extract()
        .map_err(|e| ConfigError::Load(e.to_string()))
}
