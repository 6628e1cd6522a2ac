//! Side-effect runtime tests against a mock backend.
//!
//! # Invariants
//! - Every API trigger produces exactly one result action.
//! - "Push all" fans out into independent requests; one failure leaves
//!   the other files' results untouched.
//! - Pulsing start/stop each issue exactly one backend call.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tokio::sync::mpsc::channel;
use uuid::Uuid;
use wiremock::matchers::{body_string, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use cleanroom_client::CleanRoomClient;
use cleanroom_tui::action::{Action, PushPayload};
use cleanroom_tui::app::{App, WizardStep};
use cleanroom_tui::runtime::side_effects::handle_side_effects;

fn client_for(server: &MockServer) -> Arc<CleanRoomClient> {
    Arc::new(
        CleanRoomClient::builder()
            .base_url(server.uri())
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap(),
    )
}

fn payload(name: &str, csv: &str) -> PushPayload {
    PushPayload {
        file_id: Uuid::new_v4(),
        file_name: name.to_string(),
        rows: 1,
        csv_text: csv.to_string(),
    }
}

#[tokio::test]
async fn test_create_federation_flow_advances_wizard() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/fed/create"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let (tx, mut rx) = channel::<Action>(16);
    let mut app = App::default();
    let trigger = Action::CreateFederation(app.wizard.federation_config());

    app.apply(&trigger);
    handle_side_effects(trigger, client_for(&server), tx).await;

    let result = rx.recv().await.expect("result action");
    match &result {
        Action::FederationCreated(Ok(_)) => {}
        other => panic!("expected FederationCreated(Ok), got {other:?}"),
    }
    app.apply(&result);
    assert_eq!(app.wizard.step, WizardStep::Inviting);
}

#[tokio::test]
async fn test_create_federation_failure_stays_on_step() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/fed/create"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({"error": "pid already exists"})))
        .mount(&server)
        .await;

    let (tx, mut rx) = channel::<Action>(16);
    let mut app = App::default();
    let trigger = Action::CreateFederation(app.wizard.federation_config());

    app.apply(&trigger);
    handle_side_effects(trigger, client_for(&server), tx).await;

    let result = rx.recv().await.expect("result action");
    app.apply(&result);

    assert_eq!(app.wizard.step, WizardStep::Configuring);
    assert!(
        app.wizard
            .configure_op
            .error()
            .unwrap()
            .contains("pid already exists")
    );
}

#[tokio::test]
async fn test_push_all_fires_independent_requests() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/projects/healthcare-clean-room/learn"))
        .and(body_string("bad\n"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({"error": "schema mismatch"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/projects/healthcare-clean-room/learn"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(2)
        .mount(&server)
        .await;

    let (tx, mut rx) = channel::<Action>(16);
    let payloads = vec![
        payload("a.csv", "good-a\n"),
        payload("bad.csv", "bad\n"),
        payload("c.csv", "good-c\n"),
    ];

    handle_side_effects(
        Action::PushAllFiles {
            pid: "healthcare-clean-room".to_string(),
            payloads,
        },
        client_for(&server),
        tx,
    )
    .await;

    let mut ok = Vec::new();
    let mut failed = Vec::new();
    for _ in 0..3 {
        match rx.recv().await.expect("push result") {
            Action::FilePushed {
                file_name, result, ..
            } => match result {
                Ok(_) => ok.push(file_name),
                Err(_) => failed.push(file_name),
            },
            other => panic!("unexpected action: {other:?}"),
        }
    }

    // Completion order is unspecified; outcomes are per-file.
    ok.sort();
    assert_eq!(ok, vec!["a.csv".to_string(), "c.csv".to_string()]);
    assert_eq!(failed, vec!["bad.csv".to_string()]);
}

#[tokio::test]
async fn test_pulsing_start_and_stop_each_call_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/fed/clean-room-1/startPulsing"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/fed/clean-room-1/stopPulsing"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let (tx, mut rx) = channel::<Action>(16);
    let client = client_for(&server);
    let mut app = App::default();

    handle_side_effects(
        Action::StartPulsing {
            pid: "clean-room-1".to_string(),
        },
        client.clone(),
        tx.clone(),
    )
    .await;
    let started = rx.recv().await.expect("start result");
    assert!(matches!(started, Action::PulsingStarted(Ok(()))));
    app.apply(&started);
    assert!(app.wizard.pulsing);

    handle_side_effects(
        Action::StopPulsing {
            pid: "clean-room-1".to_string(),
        },
        client,
        tx,
    )
    .await;
    let stopped = rx.recv().await.expect("stop result");
    assert!(matches!(stopped, Action::PulsingStopped(Ok(()))));
    app.apply(&stopped);
    assert!(!app.wizard.pulsing);
}

#[tokio::test]
async fn test_sync_stats_load_populates_wizard() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/fed/clean-room-1/syncStats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"timestamp": "2024-05-01T10:00:00Z", "status": "success", "mergedCount": 120}
        ])))
        .mount(&server)
        .await;

    let (tx, mut rx) = channel::<Action>(16);
    let mut app = App::default();

    handle_side_effects(
        Action::LoadSyncStats {
            pid: "clean-room-1".to_string(),
        },
        client_for(&server),
        tx,
    )
    .await;

    let result = rx.recv().await.expect("stats result");
    app.apply(&result);
    assert_eq!(app.wizard.sync_stats.len(), 1);
    assert_eq!(app.wizard.sync_stats[0].merged_count, 120);
}
