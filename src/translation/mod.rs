//! The request translator.
//!
//! Every image route is one linear pass: validate the inbound form, normalize
//! any uploads, build exactly one outbound provider request, and translate the
//! provider's answer. The translator holds only shared, immutable state, so a
//! single instance serves all requests concurrently.

pub mod request;
pub mod response;

pub use request::{build_erase_request, build_generate_request, build_inpaint_request};
pub use response::{translate_response, ImageOutput};

use crate::config::AppConfig;
use crate::error::{ProxyError, Result};
use crate::imaging::{normalize_image, NormalizedImage, OutputFormat};
use crate::metrics;
use crate::models::health::{ApiKeyStatus, HealthCheck, HealthResponse, HealthStatus};
use crate::models::{EraseRequest, GenerateRequest, InpaintRequest, UploadedFile};
use crate::stability::ImageProvider;
use crate::utils::logging::mask_key;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Clone)]
pub struct RequestTranslator {
    config: Arc<AppConfig>,
    provider: Arc<dyn ImageProvider>,
}

impl RequestTranslator {
    pub fn new(config: Arc<AppConfig>, provider: Arc<dyn ImageProvider>) -> Self {
        Self { config, provider }
    }

    /// Text-to-image
    pub async fn generate(&self, req: GenerateRequest) -> Result<ImageOutput> {
        info!(
            "Generate request: aspect_ratio={}, prompt_chars={}",
            req.aspect_ratio.as_deref().unwrap_or("default"),
            req.prompt.chars().count()
        );

        let outbound = build_generate_request(&req, &self.config);
        let response = self.provider.send(outbound).await?;
        translate_response(response, self.config.images.output_format)
    }

    /// Masked edit guided by a prompt
    pub async fn inpaint(&self, req: InpaintRequest) -> Result<ImageOutput> {
        info!(
            "Inpaint request: image={}, mask={}, prompt_chars={}",
            req.image.file_name,
            req.mask.file_name,
            req.prompt.chars().count()
        );

        let (image, mask) = self.normalize_pair(req.image, req.mask).await?;
        let outbound = build_inpaint_request(&req.prompt, image, mask, &self.config);
        let response = self.provider.send(outbound).await?;
        translate_response(response, self.config.images.output_format)
    }

    /// Object removal; the prompt is optional
    pub async fn erase(&self, req: EraseRequest) -> Result<ImageOutput> {
        info!(
            "Erase request: image={}, mask={}, has_prompt={}",
            req.image.file_name,
            req.mask.file_name,
            req.prompt.is_some()
        );

        let (image, mask) = self.normalize_pair(req.image, req.mask).await?;
        let outbound = build_erase_request(req.prompt.as_deref(), image, mask, &self.config);
        let response = self.provider.send(outbound).await?;
        translate_response(response, self.config.images.output_format)
    }

    /// Liveness plus credential presence. Never contacts the provider.
    pub fn health_check(&self) -> HealthResponse {
        let mut checks = HashMap::new();
        let mut status = HealthStatus::Healthy;

        let credential_check = if self.config.provider.api_key.is_configured() {
            HealthCheck::ok("Provider API key is configured")
        } else {
            status = HealthStatus::Degraded;
            HealthCheck::error("Provider API key is not configured")
        };
        checks.insert("provider_credential".to_string(), credential_check);

        checks.insert(
            "configuration".to_string(),
            HealthCheck::ok(format!("API base: {}", self.config.provider.api_base_url)),
        );

        checks.insert(
            "images".to_string(),
            HealthCheck::ok(format!(
                "Output {}, uploads {} capped at {}px",
                self.config.images.output_format,
                self.config.images.upload_format,
                self.config.images.max_dimension
            )),
        );

        HealthResponse {
            status,
            checks,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Masked view of the configured key
    pub fn api_key_status(&self) -> Result<ApiKeyStatus> {
        let key = &self.config.provider.api_key;
        if !key.is_configured() {
            return Err(ProxyError::MissingCredential);
        }

        Ok(ApiKeyStatus {
            status: "ok".to_string(),
            key_prefix: mask_key(key.expose()),
            key_length: key.expose().len(),
        })
    }

    /// Normalize image and mask on the blocking pool
    async fn normalize_pair(
        &self,
        image: UploadedFile,
        mask: UploadedFile,
    ) -> Result<(NormalizedImage, NormalizedImage)> {
        let format = self.config.images.upload_format;
        let max_dimension = self.config.images.max_dimension;

        tokio::task::spawn_blocking(move || {
            let image = normalize_upload("image", &image, format, max_dimension)?;
            let mask = normalize_upload("mask", &mask, format, max_dimension)?;
            Ok((image, mask))
        })
        .await
        .map_err(|e| ProxyError::Internal(format!("Image normalization task failed: {}", e)))?
    }
}

fn normalize_upload(
    field: &str,
    upload: &UploadedFile,
    format: OutputFormat,
    max_dimension: u32,
) -> Result<NormalizedImage> {
    match normalize_image(&upload.data, format, max_dimension) {
        Ok(normalized) => {
            metrics::record_normalization(if normalized.resized { "resized" } else { "unchanged" });
            debug!(
                "Normalized {} '{}' to {}x{} {} ({} bytes)",
                field,
                upload.file_name,
                normalized.width,
                normalized.height,
                normalized.format,
                normalized.bytes.len()
            );
            Ok(normalized)
        }
        Err(e) => {
            metrics::record_normalization("error");
            warn!("Failed to normalize {} '{}': {}", field, upload.file_name, e);
            if e.is_client_error() {
                Err(ProxyError::Validation(format!("Invalid {} file: {}", field, e)))
            } else {
                Err(ProxyError::Image(e))
            }
        }
    }
}
