// Stability REST API client

use super::{Endpoint, FormField, ImageProvider, ProviderRequest, ProviderResponse};
use crate::config::{ApiKey, ProviderConfig};
use crate::error::{ProxyError, Result};
use crate::metrics;
use crate::utils::logging::sanitize;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, error, warn};

/// Client for the Stability image API.
///
/// Holds a pooled HTTP client and the bearer credential. Each `send` is one
/// multipart POST with no retry; the per-request timeout comes from the
/// [`ProviderRequest`].
pub struct StabilityClient {
    http_client: Client,
    config: ProviderConfig,
}

impl StabilityClient {
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let http_client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Some(Duration::from_secs(60)))
            .tcp_nodelay(true)
            .use_rustls_tls()
            .build()
            .map_err(|e| ProxyError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        debug!("Created Stability HTTP client for {}", config.api_base_url);

        Ok(Self {
            http_client,
            config: config.clone(),
        })
    }

    /// Full URL of a provider endpoint
    pub fn endpoint_url(&self, endpoint: Endpoint) -> String {
        let path = match endpoint {
            Endpoint::Generate => &self.config.generate_path,
            Endpoint::Inpaint => &self.config.inpaint_path,
            Endpoint::Erase => &self.config.erase_path,
        };
        format!(
            "{}/{}",
            self.config.api_base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn api_key(&self) -> Result<&ApiKey> {
        let key = &self.config.api_key;
        if key.is_configured() {
            Ok(key)
        } else {
            Err(ProxyError::MissingCredential)
        }
    }

    fn build_form(fields: Vec<FormField>) -> Result<Form> {
        let mut form = Form::new();
        for field in fields {
            form = match field {
                FormField::Text { name, value } => form.text(name, value),
                FormField::File {
                    name,
                    file_name,
                    content_type,
                    data,
                } => {
                    let part = Part::bytes(data.to_vec())
                        .file_name(file_name)
                        .mime_str(content_type)
                        .map_err(|e| {
                            ProxyError::Internal(format!("Invalid content type {}: {}", content_type, e))
                        })?;
                    form.part(name, part)
                }
            };
        }
        Ok(form)
    }

    fn classify(err: reqwest::Error, timeout: Duration) -> ProxyError {
        if err.is_timeout() {
            ProxyError::Timeout(format!(
                "Stability API did not respond within {} seconds",
                timeout.as_secs()
            ))
        } else {
            ProxyError::Transport(err.to_string())
        }
    }
}

#[async_trait]
impl ImageProvider for StabilityClient {
    async fn send(&self, request: ProviderRequest) -> Result<ProviderResponse> {
        let api_key = self.api_key()?;
        let url = self.endpoint_url(request.endpoint);
        let endpoint = request.endpoint.as_str();
        let timeout = request.timeout;

        debug!(
            "Calling Stability {} endpoint with {} form fields",
            endpoint,
            request.fields.len()
        );

        let form = Self::build_form(request.fields)?;
        let start = Instant::now();

        let result = async {
            let response = self
                .http_client
                .post(&url)
                .header(AUTHORIZATION, format!("Bearer {}", api_key.expose()))
                .header(ACCEPT, request.accept)
                .multipart(form)
                .timeout(timeout)
                .send()
                .await?;

            let status = response.status().as_u16();
            let content_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            let body = response.bytes().await?;

            Ok::<_, reqwest::Error>(ProviderResponse {
                status,
                content_type,
                body,
            })
        }
        .await;

        let elapsed = start.elapsed().as_secs_f64();

        match result {
            Ok(response) => {
                metrics::record_provider_call(endpoint, &response.status.to_string(), elapsed);
                if !response.is_success() {
                    warn!(
                        "Stability {} returned HTTP {}: {}",
                        endpoint,
                        response.status,
                        sanitize(&String::from_utf8_lossy(&response.body))
                    );
                }
                Ok(response)
            }
            Err(e) => {
                let err = Self::classify(e, timeout);
                let outcome = match err {
                    ProxyError::Timeout(_) => "timeout",
                    _ => "transport_error",
                };
                metrics::record_provider_call(endpoint, outcome, elapsed);
                error!("Stability {} call failed: {}", endpoint, sanitize(&err.to_string()));
                Err(err)
            }
        }
    }
}
