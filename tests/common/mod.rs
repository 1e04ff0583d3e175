// Shared helpers for integration tests
#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Request};
use bytes::Bytes;
use http_body_util::BodyExt;
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use stability_relay::config::{ApiKey, AppConfig};
use stability_relay::error::{ProxyError, Result};
use stability_relay::stability::{ImageProvider, ProviderRequest, ProviderResponse};
use std::io::Cursor;
use std::sync::{Arc, Mutex};

pub const TEST_KEY: &str = "sk-test-key-123456";
pub const BOUNDARY: &str = "relay-test-boundary";

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.provider.api_key = ApiKey::new(TEST_KEY);
    config
}

type Reply = Box<dyn Fn() -> Result<ProviderResponse> + Send + Sync>;

/// In-memory provider that records every request and answers from a script
pub struct FakeProvider {
    requests: Mutex<Vec<ProviderRequest>>,
    reply: Reply,
}

impl FakeProvider {
    pub fn new(reply: impl Fn() -> Result<ProviderResponse> + Send + Sync + 'static) -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            reply: Box::new(reply),
        })
    }

    pub fn ok(body: &'static [u8]) -> Arc<Self> {
        Self::status(200, body)
    }

    pub fn status(status: u16, body: &'static [u8]) -> Arc<Self> {
        Self::new(move || {
            Ok(ProviderResponse {
                status,
                content_type: Some("image/png".to_string()),
                body: Bytes::from_static(body),
            })
        })
    }

    pub fn failing(make: fn() -> ProxyError) -> Arc<Self> {
        Self::new(move || Err(make()))
    }

    pub fn requests(&self) -> Vec<ProviderRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl ImageProvider for FakeProvider {
    async fn send(&self, request: ProviderRequest) -> Result<ProviderResponse> {
        self.requests.lock().unwrap().push(request);
        (self.reply)()
    }
}

/// One part of a hand-built multipart body
pub enum Part<'a> {
    Text(&'a str, &'a str),
    File(&'a str, &'a str, &'a [u8]),
}

pub fn multipart_request(uri: &str, parts: &[Part<'_>]) -> Request<Body> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File(name, file_name, data) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n",
                        name, file_name
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(data);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .header(header::CONTENT_LENGTH, body.len())
        .body(Body::from(body))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub async fn body_bytes(body: Body) -> Bytes {
    body.collect().await.unwrap().to_bytes()
}

pub async fn body_json(body: Body) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(body).await).unwrap()
}

pub fn encode(img: DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), format).unwrap();
    buf
}

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = ImageBuffer::from_pixel(width, height, Rgb([30u8, 140, 90]));
    encode(DynamicImage::ImageRgb8(img), ImageFormat::Png)
}

pub fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = ImageBuffer::from_pixel(width, height, Rgb([220u8, 220, 20]));
    encode(DynamicImage::ImageRgb8(img), ImageFormat::Jpeg)
}
