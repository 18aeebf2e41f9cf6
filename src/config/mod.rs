// Configuration module
// Author: kelexine (https://github.com/kelexine)

mod models;

pub use models::*;

use crate::error::{GatewayError, Result};
use config::{Config, Environment, File};
use std::path::PathBuf;

/// Environment variable prefix, e.g. `CORPUS_GATEWAY__UPSTREAM__BASE_URL`.
pub const ENV_PREFIX: &str = "CORPUS_GATEWAY";

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Environment variables (highest)
    /// 2. Config file (`path`, or the default location when `None`)
    /// 3. Defaults (lowest)
    ///
    /// CLI overrides are applied by the caller on the returned value.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let file = match path {
            Some(path) => File::with_name(path).required(true),
            None => File::with_name(&Self::default_config_path()).required(false),
        };

        let config = Config::builder()
            // Start with defaults
            .add_source(Config::try_from(&Self::default())?)
            .add_source(file)
            // Nested keys use a double underscore so field names keep theirs
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()
            .map_err(|e| GatewayError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| GatewayError::Config(e.to_string()))
    }

    fn default_config_path() -> String {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".corpus-gateway")
            .join("config.toml")
            .to_string_lossy()
            .to_string()
    }
}
