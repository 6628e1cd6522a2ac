//! Federation endpoint tests.
//!
//! Verifies the wire shape of the federation lifecycle:
//! - create sends the camelCase config body to /fed/create
//! - invite posts the password to /fed/{pid}/invite and returns the
//!   payload verbatim
//! - join forwards the opaque invite JSON unmodified
//! - pulsing start/stop are GET requests with no body
//! - syncStats parses into typed records

mod common;

use common::*;
use cleanroom_client::models::{FederationConfig, JoinRequest, SyncSchedule};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};

#[tokio::test]
async fn test_create_federation_sends_camel_case_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/fed/create"))
        .and(body_json(json!({
            "pid": "clean-room-1",
            "natsHosts": "nats://charm:4222",
            "syncSchedule": "m1"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(&mock_server)
        .await;

    let client = Client::new();
    let config = FederationConfig::default();

    let result =
        endpoints::create_federation(&client, &mock_server.uri(), &config, 3).await;

    assert!(result.is_ok());
    assert_eq!(result.unwrap()["ok"], true);
}

#[tokio::test]
async fn test_create_federation_error_propagates_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/fed/create"))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(json!({"error": "pid already exists"})),
        )
        .mount(&mock_server)
        .await;

    let client = Client::new();
    let config = FederationConfig::default();

    let result = endpoints::create_federation(&client, &mock_server.uri(), &config, 3).await;

    let err = result.unwrap_err();
    match err {
        cleanroom_client::ClientError::ApiError {
            status, message, ..
        } => {
            assert_eq!(status, 409);
            assert_eq!(message, "pid already exists");
        }
        other => panic!("expected ApiError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_generate_invite_returns_opaque_payload() {
    let mock_server = MockServer::start().await;

    let invite = json!({
        "pid": "clean-room-1",
        "token": "f3a9c0",
        "natsHosts": "nats://charm:4222"
    });

    Mock::given(method("POST"))
        .and(path("/fed/clean-room-1/invite"))
        .and(body_json(json!({"password": "passwd66"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(&invite))
        .mount(&mock_server)
        .await;

    let client = Client::new();
    let result =
        endpoints::generate_invite(&client, &mock_server.uri(), "clean-room-1", "passwd66", 3)
            .await;

    assert_eq!(result.unwrap(), invite);
}

#[tokio::test]
async fn test_generate_invite_encodes_pid_path_segment() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/fed/room%201/invite"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&mock_server)
        .await;

    let client = Client::new();
    let result =
        endpoints::generate_invite(&client, &mock_server.uri(), "room 1", "pw", 3).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_join_federation_forwards_invite_verbatim() {
    let mock_server = MockServer::start().await;

    let invite_json = "{\"token\":\"f3a9c0\",\"pid\":\"clean-room-1\"}".to_string();

    Mock::given(method("POST"))
        .and(path("/fed/join"))
        .and(body_json(json!({
            "pid": "clean-room-1-peer",
            "inviteJson": invite_json.clone()
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"joined": true})))
        .mount(&mock_server)
        .await;

    let client = Client::new();
    let request = JoinRequest {
        pid: "clean-room-1-peer".to_string(),
        invite_json,
    };

    let result = endpoints::join_federation(&client, &mock_server.uri(), &request, 3).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_start_and_stop_pulsing_are_gets() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/fed/clean-room-1/startPulsing"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/fed/clean-room-1/stopPulsing"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::new();
    assert!(
        endpoints::start_pulsing(&client, &mock_server.uri(), "clean-room-1", 3)
            .await
            .is_ok()
    );
    assert!(
        endpoints::stop_pulsing(&client, &mock_server.uri(), "clean-room-1", 3)
            .await
            .is_ok()
    );
}

#[tokio::test]
async fn test_get_sync_stats_parses_records() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/fed/clean-room-1/syncStats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"timestamp": "2024-05-01T10:00:00Z", "status": "success", "mergedCount": 120},
            {"timestamp": "2024-05-01T10:01:00Z", "status": "error", "mergedCount": 0,
             "errors": ["peer timeout"]}
        ])))
        .mount(&mock_server)
        .await;

    let client = Client::new();
    let stats = endpoints::get_sync_stats(&client, &mock_server.uri(), "clean-room-1", 3)
        .await
        .unwrap();

    assert_eq!(stats.len(), 2);
    assert_eq!(stats[0].status, "success");
    assert_eq!(stats[0].merged_count, 120);
    assert!(stats[1].has_errors());
}

#[tokio::test]
async fn test_sync_schedule_variants_hit_the_wire() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/fed/create"))
        .and(body_json(json!({
            "pid": "clean-room-1",
            "natsHosts": "nats://charm:4222",
            "syncSchedule": "h6"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&mock_server)
        .await;

    let client = Client::new();
    let config = FederationConfig {
        sync_schedule: SyncSchedule::EverySixHours,
        ..FederationConfig::default()
    };

    assert!(
        endpoints::create_federation(&client, &mock_server.uri(), &config, 3)
            .await
            .is_ok()
    );
}

#[tokio::test]
async fn test_get_sync_stats_empty_list() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/fed/clean-room-1/syncStats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let client = Client::new();
    let stats = endpoints::get_sync_stats(&client, &mock_server.uri(), "clean-room-1", 3)
        .await
        .unwrap();
    assert!(stats.is_empty());
}
