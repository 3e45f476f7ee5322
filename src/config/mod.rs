// Configuration module
// Author: kelexine (https://github.com/kelexine)

mod models;

pub use models::*;

use crate::error::{GatewayError, Result};
use config::{Config, Environment, File, FileFormat};
use std::path::{Path, PathBuf};

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Environment variables (highest, prefix `CACHEGATE__`)
    /// 2. Config file (`path`, or `~/.cachegate/config.toml`)
    /// 3. Defaults (lowest)
    ///
    /// An explicit `path` must exist; the default file is optional.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => File::from(path).format(FileFormat::Toml).required(true),
            None => File::from(Self::default_config_path())
                .format(FileFormat::Toml)
                .required(false),
        };

        let config = Config::builder()
            // Start with defaults
            .add_source(Config::try_from(&Self::default())?)
            .add_source(file)
            // Override with environment variables, e.g. CACHEGATE__CACHE__MAX_ENTRIES
            .add_source(
                Environment::with_prefix("CACHEGATE")
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("audit.allowed_uris")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| GatewayError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| GatewayError::Config(e.to_string()))
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| GatewayError::Internal(e.to_string()))
    }

    fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".cachegate")
            .join("config.toml")
    }
}
