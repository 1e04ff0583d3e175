// Stability API provider module
//
// The translator talks to the provider only through `ImageProvider`, so tests
// can swap in a fake without network access.

mod client;

pub use client::StabilityClient;

use crate::error::Result;
use async_trait::async_trait;
use bytes::Bytes;
use std::time::Duration;

/// Provider endpoints the relay calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Generate,
    Inpaint,
    Erase,
}

impl Endpoint {
    /// Label used in logs and metrics
    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::Generate => "generate",
            Endpoint::Inpaint => "inpaint",
            Endpoint::Erase => "erase",
        }
    }
}

/// One part of the outbound multipart body
#[derive(Debug, Clone, PartialEq)]
pub enum FormField {
    Text {
        name: &'static str,
        value: String,
    },
    File {
        name: &'static str,
        file_name: String,
        content_type: &'static str,
        data: Bytes,
    },
}

impl FormField {
    pub fn text(name: &'static str, value: impl Into<String>) -> Self {
        FormField::Text {
            name,
            value: value.into(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FormField::Text { name, .. } | FormField::File { name, .. } => *name,
        }
    }
}

/// Outbound request, minus the credential which the provider attaches
#[derive(Debug, Clone)]
pub struct ProviderRequest {
    pub endpoint: Endpoint,
    pub fields: Vec<FormField>,
    pub accept: &'static str,
    pub timeout: Duration,
}

impl ProviderRequest {
    pub fn new(endpoint: Endpoint, timeout: Duration) -> Self {
        Self {
            endpoint,
            fields: Vec::new(),
            accept: "image/*",
            timeout,
        }
    }

    pub fn field(mut self, field: FormField) -> Self {
        self.fields.push(field);
        self
    }

    /// Value of a text field, if present
    pub fn text_field(&self, name: &str) -> Option<&str> {
        self.fields.iter().find_map(|f| match f {
            FormField::Text { name: n, value } if *n == name => Some(value.as_str()),
            _ => None,
        })
    }

    /// Bytes of a file field, if present
    pub fn file_field(&self, name: &str) -> Option<&Bytes> {
        self.fields.iter().find_map(|f| match f {
            FormField::File { name: n, data, .. } if *n == name => Some(data),
            _ => None,
        })
    }
}

/// Whatever the provider answered, success or not
#[derive(Debug, Clone)]
pub struct ProviderResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl ProviderResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The single capability the translator needs from the provider.
///
/// Implementations perform exactly one HTTP exchange per call and never retry.
/// Network failures map to `ProxyError::Transport`, deadline overruns to
/// `ProxyError::Timeout`; any HTTP status, including errors, is returned as a
/// `ProviderResponse`.
#[async_trait]
pub trait ImageProvider: Send + Sync {
    async fn send(&self, request: ProviderRequest) -> Result<ProviderResponse>;
}
