//! Configuration data structures for stability-relay.
//!
//! This module defines the schema for the application settings: the HTTP
//! listener, the upstream Stability API, fixed generation parameters, image
//! handling and logging.

use crate::imaging::{OutputFormat, DEFAULT_MAX_DIMENSION};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use zeroize::Zeroize;

/// The root configuration object for the application.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// HTTP server settings (host, port, workers).
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream Stability API settings.
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Fixed sampling parameters for text-to-image requests.
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Upload normalization and output format.
    #[serde(default)]
    pub images: ImageConfig,

    /// Logging and observability settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings for the built-in HTTP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The IP address or hostname the server should bind to.
    /// Default: `127.0.0.1`
    #[serde(default = "default_host")]
    pub host: String,

    /// The port number the server should listen on.
    /// Default: `5000`
    #[serde(default = "default_port")]
    pub port: u16,

    /// Number of Tokio worker threads.
    /// Default: Number of logical CPU cores.
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Largest accepted request body in bytes.
    /// Default: `20 MiB`
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,

    /// Origins allowed by CORS. Empty means any origin.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

/// Bearer credential for the provider.
///
/// Wiped from memory on drop and never printed by `Debug`.
#[derive(Clone, Default, Serialize, Deserialize, Zeroize)]
#[zeroize(drop)]
#[serde(transparent)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_configured(&self) -> bool {
        !self.0.trim().is_empty()
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_configured() {
            f.write_str("ApiKey([REDACTED])")
        } else {
            f.write_str("ApiKey(<unset>)")
        }
    }
}

/// Settings for the upstream Stability API connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Bearer token. Falls back to the `STABILITY_API_KEY` environment variable.
    #[serde(default)]
    pub api_key: ApiKey,

    /// Base URL for the Stability REST API.
    /// Default: `https://api.stability.ai`
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    #[serde(default = "default_generate_path")]
    pub generate_path: String,

    #[serde(default = "default_inpaint_path")]
    pub inpaint_path: String,

    #[serde(default = "default_erase_path")]
    pub erase_path: String,

    /// Default: `60`
    #[serde(default = "default_generate_timeout")]
    pub generate_timeout_seconds: u64,

    /// Default: `60`
    #[serde(default = "default_inpaint_timeout")]
    pub inpaint_timeout_seconds: u64,

    /// Default: `30`
    #[serde(default = "default_erase_timeout")]
    pub erase_timeout_seconds: u64,

    /// TCP connect timeout in seconds.
    /// Default: `10`
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,
}

impl ProviderConfig {
    pub fn generate_timeout(&self) -> Duration {
        Duration::from_secs(self.generate_timeout_seconds)
    }

    pub fn inpaint_timeout(&self) -> Duration {
        Duration::from_secs(self.inpaint_timeout_seconds)
    }

    pub fn erase_timeout(&self) -> Duration {
        Duration::from_secs(self.erase_timeout_seconds)
    }
}

/// Sampling parameters sent with every text-to-image request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Default: `30`
    #[serde(default = "default_steps")]
    pub steps: u32,

    /// Guidance scale. Default: `7.0`
    #[serde(default = "default_cfg_scale")]
    pub cfg_scale: f32,
}

/// Settings for upload normalization and result encoding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageConfig {
    /// Format requested from the provider and returned to the caller.
    /// Default: `png`
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Canonical encoding for forwarded images and masks.
    /// Default: `png`
    #[serde(default)]
    pub upload_format: OutputFormat,

    /// Longest side allowed for forwarded images.
    /// Default: `1024`
    #[serde(default = "default_max_dimension")]
    pub max_dimension: u32,
}

/// Settings for application logging and output format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum log level (`trace`, `debug`, `info`, `warn`, `error`).
    /// Default: `info`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format for logs (`pretty`, `json`, `compact`).
    /// Default: `pretty`
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: default_workers(),
            max_body_bytes: default_max_body_bytes(),
            cors_origins: Vec::new(),
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: ApiKey::default(),
            api_base_url: default_api_base_url(),
            generate_path: default_generate_path(),
            inpaint_path: default_inpaint_path(),
            erase_path: default_erase_path(),
            generate_timeout_seconds: default_generate_timeout(),
            inpaint_timeout_seconds: default_inpaint_timeout(),
            erase_timeout_seconds: default_erase_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            steps: default_steps(),
            cfg_scale: default_cfg_scale(),
        }
    }
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            output_format: OutputFormat::Png,
            upload_format: OutputFormat::Png,
            max_dimension: default_max_dimension(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

// Helper functions for serde defaults
fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_workers() -> usize {
    num_cpus::get()
}

fn default_max_body_bytes() -> usize {
    20 * 1024 * 1024
}

fn default_api_base_url() -> String {
    "https://api.stability.ai".to_string()
}

fn default_generate_path() -> String {
    "/v2beta/stable-image/generate/core".to_string()
}

fn default_inpaint_path() -> String {
    "/v2beta/stable-image/edit/inpaint".to_string()
}

fn default_erase_path() -> String {
    "/v2beta/stable-image/edit/erase".to_string()
}

fn default_generate_timeout() -> u64 {
    60
}

fn default_inpaint_timeout() -> u64 {
    60
}

fn default_erase_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_steps() -> u32 {
    30
}

fn default_cfg_scale() -> f32 {
    7.0
}

fn default_max_dimension() -> u32 {
    DEFAULT_MAX_DIMENSION
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}
