//! Async side effect handlers for TUI actions.
//!
//! Responsibilities:
//! - Handle async API calls triggered by user actions.
//! - Spawn one background task per call so the UI never blocks; "push
//!   all" fans out into independent tasks with no shared failure state.
//! - Send results back via the action channel for state updates.
//! - Own the sync-stats poll task, whose lifetime is bound to a
//!   cancellation token rather than a boolean flag.
//!
//! Does NOT handle:
//! - Direct application state modification (results travel as actions).
//! - UI rendering or terminal management.

use std::sync::Arc;
use std::time::Duration;

use secrecy::ExposeSecret;
use tokio::sync::mpsc::Sender;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use cleanroom_client::CleanRoomClient;

use crate::action::{Action, PushPayload};

/// Shared client handle for async tasks.
pub type SharedClient = Arc<CleanRoomClient>;

/// Handle side effects (async API calls) for actions.
///
/// API trigger actions spawn a background task and report back through
/// `tx`; every other action is ignored here.
pub async fn handle_side_effects(action: Action, client: SharedClient, tx: Sender<Action>) {
    match action {
        Action::CreateFederation(config) => {
            tokio::spawn(async move {
                let result = client
                    .create_federation(&config)
                    .await
                    .map_err(|e| e.to_string());
                let _ = tx.send(Action::FederationCreated(result)).await;
            });
        }
        Action::GenerateInvite { pid, password } => {
            tokio::spawn(async move {
                let result = client
                    .generate_invite(&pid, password.expose_secret())
                    .await
                    .map_err(|e| e.to_string());
                let _ = tx.send(Action::InviteGenerated(result)).await;
            });
        }
        Action::JoinFederation(request) => {
            tokio::spawn(async move {
                let result = client
                    .join_federation(&request)
                    .await
                    .map_err(|e| e.to_string());
                let _ = tx.send(Action::FederationJoined(result)).await;
            });
        }
        Action::StartPulsing { pid } => {
            tokio::spawn(async move {
                let result = client.start_pulsing(&pid).await.map_err(|e| e.to_string());
                let _ = tx.send(Action::PulsingStarted(result)).await;
            });
        }
        Action::StopPulsing { pid } => {
            tokio::spawn(async move {
                let result = client.stop_pulsing(&pid).await.map_err(|e| e.to_string());
                let _ = tx.send(Action::PulsingStopped(result)).await;
            });
        }
        Action::LoadSyncStats { pid } => {
            tokio::spawn(async move {
                let result = client
                    .get_sync_stats(&pid)
                    .await
                    .map_err(|e| e.to_string());
                let _ = tx.send(Action::SyncStatsLoaded(result)).await;
            });
        }
        Action::CreateProject(params) => {
            tokio::spawn(async move {
                let result = client
                    .create_project(&params)
                    .await
                    .map_err(|e| e.to_string());
                let _ = tx.send(Action::ProjectCreated(result)).await;
            });
        }
        Action::PushFile { pid, payload } => {
            spawn_push(client, tx, pid, payload);
        }
        Action::PushAllFiles { pid, payloads } => {
            // One independent request per file; no batching, no shared
            // failure state, completion order unspecified.
            for payload in payloads {
                spawn_push(client.clone(), tx.clone(), pid.clone(), payload);
            }
        }
        Action::RunExplore {
            pid,
            metric,
            request,
        } => {
            tokio::spawn(async move {
                let result = client
                    .explore(&pid, metric, &request)
                    .await
                    .map_err(|e| e.to_string());
                let _ = tx.send(Action::ExploreComplete(result)).await;
            });
        }
        _ => {}
    }
}

fn spawn_push(client: SharedClient, tx: Sender<Action>, pid: String, payload: PushPayload) {
    tokio::spawn(async move {
        let PushPayload {
            file_id,
            file_name,
            rows,
            csv_text,
        } = payload;
        let result = client
            .push_data(&pid, csv_text)
            .await
            .map_err(|e| e.to_string());
        let _ = tx
            .send(Action::FilePushed {
                file_id,
                file_name,
                rows,
                result,
            })
            .await;
    });
}

/// Spawn the sync-stats poll for an active pulsing session.
///
/// Emits one `LoadSyncStats` immediately and then one per `interval`
/// until the token is cancelled. Cancellation stops the poll before its
/// next emission; the in-flight fetch, if any, still completes.
pub fn spawn_sync_stats_poll(
    pid: String,
    tx: Sender<Action>,
    token: CancellationToken,
    interval: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            tokio::select! {
                _ = token.cancelled() => {
                    tracing::debug!(pid, "sync stats poll cancelled");
                    break;
                }
                _ = ticker.tick() => {
                    if tx.send(Action::LoadSyncStats { pid: pid.clone() }).await.is_err() {
                        break;
                    }
                }
            }
        }
    })
}
