// Configuration module

mod models;

pub use models::*;

use crate::error::{ProxyError, Result};
use config::{Config, Environment, File};
use std::path::{Path, PathBuf};

/// Environment variable the provider key is traditionally stored in.
pub const API_KEY_ENV: &str = "STABILITY_API_KEY";

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Environment variables (`STABILITY_RELAY__SECTION__KEY`)
    /// 2. Config file (`path`, or `~/.stability-relay/config.toml`)
    /// 3. Defaults (lowest)
    ///
    /// CLI flags are applied on top by the caller. When no key was configured
    /// through the sources above, `STABILITY_API_KEY` is used.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(p) => File::from(p).required(true),
            None => File::from(Self::default_config_path()).required(false),
        };

        let config = Config::builder()
            .add_source(Config::try_from(&Self::default())?)
            .add_source(file)
            .add_source(
                Environment::with_prefix("STABILITY_RELAY")
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.cors_origins")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| ProxyError::Config(e.to_string()))?;

        let mut app_config: AppConfig = config
            .try_deserialize()
            .map_err(|e| ProxyError::Config(e.to_string()))?;

        if !app_config.provider.api_key.is_configured() {
            if let Ok(key) = std::env::var(API_KEY_ENV) {
                app_config.provider.api_key = ApiKey::new(key);
            }
        }

        app_config.validate()?;
        Ok(app_config)
    }

    /// Reject settings that would make every request fail.
    pub fn validate(&self) -> Result<()> {
        if self.images.max_dimension == 0 {
            return Err(ProxyError::Config(
                "images.max_dimension must be greater than zero".to_string(),
            ));
        }
        if self.server.workers == 0 {
            return Err(ProxyError::Config(
                "server.workers must be greater than zero".to_string(),
            ));
        }
        if !self.provider.api_base_url.starts_with("http://")
            && !self.provider.api_base_url.starts_with("https://")
        {
            return Err(ProxyError::Config(format!(
                "provider.api_base_url must be an http(s) URL, got {}",
                self.provider.api_base_url
            )));
        }
        Ok(())
    }

    fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".stability-relay")
            .join("config.toml")
    }
}
