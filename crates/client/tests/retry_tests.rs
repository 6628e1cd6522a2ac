//! Rate limit (429) retry behavior tests.
//!
//! # Invariants
//! - 429 responses trigger retry with exponential backoff (1s, 2s, 4s)
//! - retries are bounded by max_retries; exhaustion yields MaxRetriesExceeded
//! - non-429 failures do not retry

mod common;

use std::time::Duration;

use cleanroom_client::ClientError;
use cleanroom_client::models::FederationConfig;
use common::*;
use serde_json::json;
use wiremock::matchers::{method, path};

#[tokio::test(start_paused = true)]
async fn test_retry_on_429_then_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/fed/create"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({"error": "rate limited"})))
        .up_to_n_times(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/fed/create"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(&mock_server)
        .await;

    let client = Client::new();
    let server_uri = mock_server.uri();
    let result_handle = tokio::spawn({
        let client = client.clone();
        let server_uri = server_uri.clone();
        async move {
            endpoints::create_federation(&client, &server_uri, &FederationConfig::default(), 3)
                .await
        }
    });

    assert_pending(&result_handle, "429 retry should wait for backoff").await;
    advance_and_yield(Duration::from_secs(1)).await;
    assert_pending(&result_handle, "second 429 retry should wait for backoff").await;
    advance_and_yield(Duration::from_secs(2)).await;
    let result = result_handle.await.expect("create federation task");

    assert!(result.is_ok());
}

#[tokio::test(start_paused = true)]
async fn test_retry_on_429_exhaustion() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/fed/clean-room-1/syncStats"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({"error": "rate limited"})))
        .mount(&mock_server)
        .await;

    let client = Client::new();
    let server_uri = mock_server.uri();
    let result_handle = tokio::spawn({
        let client = client.clone();
        let server_uri = server_uri.clone();
        async move { endpoints::get_sync_stats(&client, &server_uri, "clean-room-1", 2).await }
    });

    assert_pending(&result_handle, "429 exhaustion should wait for backoff").await;
    advance_and_yield(Duration::from_secs(1)).await;
    assert_pending(&result_handle, "429 exhaustion should wait for second backoff").await;
    advance_and_yield(Duration::from_secs(2)).await;
    let result = result_handle.await.expect("sync stats task");

    let err = result.unwrap_err();
    assert!(matches!(err, ClientError::MaxRetriesExceeded(3)));
}

#[tokio::test]
async fn test_500_fails_without_retry() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/fed/create"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "boom"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::new();
    let result =
        endpoints::create_federation(&client, &mock_server.uri(), &FederationConfig::default(), 3)
            .await;

    let err = result.unwrap_err();
    assert!(matches!(err, ClientError::ApiError { status: 500, .. }));
}
