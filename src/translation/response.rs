// Provider response → caller response translation

use crate::error::{ProxyError, Result};
use crate::imaging::OutputFormat;
use crate::stability::ProviderResponse;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use bytes::Bytes;

/// Image bytes returned to the browser
#[derive(Debug, Clone)]
pub struct ImageOutput {
    pub bytes: Bytes,
    pub content_type: &'static str,
}

impl IntoResponse for ImageOutput {
    fn into_response(self) -> Response {
        ([(header::CONTENT_TYPE, self.content_type)], self.bytes).into_response()
    }
}

/// Turn the provider's answer into the caller's.
///
/// Success bodies pass through untouched, labelled with the negotiated output
/// format. Any non-2xx status becomes `ProxyError::Upstream` carrying the
/// provider's status and body text verbatim.
pub fn translate_response(response: ProviderResponse, format: OutputFormat) -> Result<ImageOutput> {
    if !response.is_success() {
        let text = String::from_utf8_lossy(&response.body).into_owned();
        let message = if text.trim().is_empty() {
            format!("Provider returned HTTP {} with an empty body", response.status)
        } else {
            text
        };
        return Err(ProxyError::Upstream {
            status: response.status,
            message,
        });
    }

    if response.body.is_empty() {
        return Err(ProxyError::Transport(
            "Provider returned an empty image".to_string(),
        ));
    }

    Ok(ImageOutput {
        bytes: response.body,
        content_type: format.mime_type(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &'static [u8]) -> ProviderResponse {
        ProviderResponse {
            status,
            content_type: None,
            body: Bytes::from_static(body),
        }
    }

    #[test]
    fn test_success_passthrough() {
        let out = translate_response(response(200, b"\x89PNGdata"), OutputFormat::Png).unwrap();
        assert_eq!(out.bytes.as_ref(), b"\x89PNGdata");
        assert_eq!(out.content_type, "image/png");
    }

    #[test]
    fn test_error_passthrough() {
        let err = translate_response(
            response(403, br#"{"name":"content_moderation"}"#),
            OutputFormat::Png,
        )
        .unwrap_err();
        match err {
            ProxyError::Upstream { status, message } => {
                assert_eq!(status, 403);
                assert_eq!(message, r#"{"name":"content_moderation"}"#);
            }
            other => panic!("expected upstream error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_success_body_is_gateway_error() {
        let err = translate_response(response(200, b""), OutputFormat::Webp).unwrap_err();
        assert!(matches!(err, ProxyError::Transport(_)));
    }
}
