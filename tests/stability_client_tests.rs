// Stability client tests against a local mock server

use bytes::Bytes;
use mockito::Matcher;
use stability_relay::config::{ApiKey, ProviderConfig};
use stability_relay::error::ProxyError;
use stability_relay::stability::{
    Endpoint, FormField, ImageProvider, ProviderRequest, StabilityClient,
};
use std::time::Duration;

const KEY: &str = "sk-client-test-0001";

fn provider_config(base_url: &str) -> ProviderConfig {
    ProviderConfig {
        api_key: ApiKey::new(KEY),
        api_base_url: base_url.to_string(),
        connect_timeout_seconds: 1,
        ..ProviderConfig::default()
    }
}

fn generate_request(timeout: Duration) -> ProviderRequest {
    ProviderRequest::new(Endpoint::Generate, timeout)
        .field(FormField::text("prompt", "a red fox"))
        .field(FormField::text("output_format", "png"))
}

#[tokio::test]
async fn test_send_posts_multipart_with_bearer() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v2beta/stable-image/generate/core")
        .match_header("authorization", format!("Bearer {}", KEY).as_str())
        .match_header("accept", "image/*")
        .match_header(
            "content-type",
            Matcher::Regex("^multipart/form-data; boundary=".to_string()),
        )
        .match_body(Matcher::Regex("a red fox".to_string()))
        .with_status(200)
        .with_header("content-type", "image/png")
        .with_body("PNGDATA")
        .create_async()
        .await;

    let client = StabilityClient::new(&provider_config(&server.url())).unwrap();
    let response = client
        .send(generate_request(Duration::from_secs(5)))
        .await
        .unwrap();

    assert!(response.is_success());
    assert_eq!(response.content_type.as_deref(), Some("image/png"));
    assert_eq!(response.body, Bytes::from_static(b"PNGDATA"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_file_parts_are_sent() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v2beta/stable-image/edit/erase")
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex("name=\"image\"; filename=\"image.png\"".to_string()),
            Matcher::Regex("name=\"mask\"; filename=\"mask.png\"".to_string()),
        ]))
        .with_status(200)
        .with_body("ok")
        .create_async()
        .await;

    let file = |name: &'static str| FormField::File {
        name,
        file_name: format!("{}.png", name),
        content_type: "image/png",
        data: Bytes::from_static(b"\x89PNG"),
    };

    let client = StabilityClient::new(&provider_config(&server.url())).unwrap();
    let request = ProviderRequest::new(Endpoint::Erase, Duration::from_secs(5))
        .field(file("image"))
        .field(file("mask"))
        .field(FormField::text("prompt", ""));

    let response = client.send(request).await.unwrap();
    assert!(response.is_success());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_error_status_is_returned_not_raised() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/v2beta/stable-image/generate/core")
        .with_status(403)
        .with_header("content-type", "application/json")
        .with_body(r#"{"name":"forbidden","errors":["content moderation"]}"#)
        .create_async()
        .await;

    let client = StabilityClient::new(&provider_config(&server.url())).unwrap();
    let response = client
        .send(generate_request(Duration::from_secs(5)))
        .await
        .unwrap();

    assert_eq!(response.status, 403);
    assert!(!response.is_success());
    assert!(String::from_utf8_lossy(&response.body).contains("content moderation"));
}

#[tokio::test]
async fn test_slow_provider_times_out() {
    // Accepts connections but never answers
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    let client = StabilityClient::new(&provider_config(&format!("http://{}", addr))).unwrap();
    let err = client
        .send(generate_request(Duration::from_secs(1)))
        .await
        .unwrap_err();

    assert!(matches!(err, ProxyError::Timeout(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_unreachable_provider_is_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = StabilityClient::new(&provider_config(&format!("http://{}", addr))).unwrap();
    let err = client
        .send(generate_request(Duration::from_secs(5)))
        .await
        .unwrap_err();

    assert!(matches!(err, ProxyError::Transport(_)), "got {:?}", err);
}
