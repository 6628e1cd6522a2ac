//! Unified action type for async TUI event handling.
//!
//! Actions flow through a channel from input handlers and async tasks to
//! the main app state. They fall into three groups:
//!
//! - **System / input**: raw terminal events, tab switching, theme toggle.
//! - **API triggers**: carry the request payload; picked up by the
//!   side-effects runtime which spawns one task per call.
//! - **API results**: carry `Result<_, String>` back for state updates.
//!
//! When logging actions, use [`RedactedAction`] instead of `?action` so
//! invite passwords and CSV contents never reach the log files.

use crossterm::event::KeyEvent;
use secrecy::SecretString;
use serde_json::Value;
use uuid::Uuid;

use cleanroom_client::models::{
    CreateProjectParams, ExploreMetric, ExploreRequest, FederationConfig, JoinRequest, SyncStat,
};

use crate::ui::ToastLevel;

/// A single file queued for pushing, as carried by push actions.
#[derive(Debug, Clone)]
pub struct PushPayload {
    pub file_id: Uuid,
    pub file_name: String,
    pub rows: u64,
    pub csv_text: String,
}

/// Unified action type for async TUI event handling.
#[derive(Debug, Clone)]
pub enum Action {
    // System
    /// Quit the application.
    Quit,
    /// Raw keyboard input event.
    Input(KeyEvent),
    /// Terminal resize event with new dimensions (width, height).
    Resize(u16, u16),
    /// Periodic UI tick for animations and toast expiry.
    Tick,
    /// Switch to the next tab in cyclic order.
    NextTab,
    /// Switch to the previous tab in cyclic order.
    PreviousTab,
    /// Toggle between light and dark theme (persisted immediately).
    ToggleTheme,
    /// Open the fuzzy search overlay.
    OpenSearch,
    /// Show a toast notification.
    Toast { message: String, level: ToastLevel },

    // Federation wizard
    /// Create the federation from the configure step's form.
    CreateFederation(FederationConfig),
    FederationCreated(Result<Value, String>),
    /// Generate an invite for the given federation.
    GenerateInvite {
        pid: String,
        password: SecretString,
    },
    InviteGenerated(Result<Value, String>),
    /// Join an existing federation with a pasted invite payload.
    JoinFederation(JoinRequest),
    FederationJoined(Result<Value, String>),

    // Pulsing
    StartPulsing { pid: String },
    PulsingStarted(Result<(), String>),
    StopPulsing { pid: String },
    PulsingStopped(Result<(), String>),
    LoadSyncStats { pid: String },
    SyncStatsLoaded(Result<Vec<SyncStat>, String>),
    /// Write the currently displayed sync stats to a CSV file.
    ExportSyncStats,
    /// Copy the generated invite payload to the system clipboard.
    CopyInvite,

    // Ingestion
    CreateProject(CreateProjectParams),
    ProjectCreated(Result<Value, String>),
    /// Push a single queued file.
    PushFile { pid: String, payload: PushPayload },
    /// Push every queued file; one independent request per file.
    PushAllFiles {
        pid: String,
        payloads: Vec<PushPayload>,
    },
    FilePushed {
        file_id: Uuid,
        file_name: String,
        rows: u64,
        result: Result<Value, String>,
    },

    // Exploration
    RunExplore {
        pid: String,
        metric: ExploreMetric,
        request: ExploreRequest,
    },
    ExploreComplete(Result<Value, String>),
}

/// Debug wrapper that logs the action name without sensitive payloads.
///
/// Invite passwords, invite JSON and CSV contents must not be written to
/// log files; everything else is small enough that the variant name and
/// a few scalars carry the signal.
pub struct RedactedAction<'a>(pub &'a Action);

impl std::fmt::Debug for RedactedAction<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Action::Input(_) => write!(f, "Input(..)"),
            Action::GenerateInvite { pid, .. } => {
                write!(f, "GenerateInvite {{ pid: {pid:?}, password: <redacted> }}")
            }
            Action::JoinFederation(req) => {
                write!(f, "JoinFederation {{ pid: {:?}, invite: <redacted> }}", req.pid)
            }
            Action::InviteGenerated(result) => {
                write!(f, "InviteGenerated({})", ok_or_err(result.is_ok()))
            }
            Action::PushFile { pid, payload } => write!(
                f,
                "PushFile {{ pid: {pid:?}, file: {:?}, rows: {} }}",
                payload.file_name, payload.rows
            ),
            Action::PushAllFiles { pid, payloads } => {
                write!(f, "PushAllFiles {{ pid: {pid:?}, files: {} }}", payloads.len())
            }
            Action::FilePushed {
                file_name, result, ..
            } => write!(
                f,
                "FilePushed {{ file: {file_name:?}, result: {} }}",
                ok_or_err(result.is_ok())
            ),
            other => {
                // Remaining variants carry no sensitive payloads.
                write!(f, "{:?}", DiscriminantName(other))
            }
        }
    }
}

fn ok_or_err(ok: bool) -> &'static str {
    if ok { "Ok(..)" } else { "Err(..)" }
}

/// Formats just the variant name of an action.
struct DiscriminantName<'a>(&'a Action);

impl std::fmt::Debug for DiscriminantName<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self.0 {
            Action::Quit => "Quit",
            Action::Input(_) => "Input",
            Action::Resize(..) => "Resize",
            Action::Tick => "Tick",
            Action::NextTab => "NextTab",
            Action::PreviousTab => "PreviousTab",
            Action::ToggleTheme => "ToggleTheme",
            Action::OpenSearch => "OpenSearch",
            Action::Toast { .. } => "Toast",
            Action::CreateFederation(_) => "CreateFederation",
            Action::FederationCreated(_) => "FederationCreated",
            Action::GenerateInvite { .. } => "GenerateInvite",
            Action::InviteGenerated(_) => "InviteGenerated",
            Action::JoinFederation(_) => "JoinFederation",
            Action::FederationJoined(_) => "FederationJoined",
            Action::StartPulsing { .. } => "StartPulsing",
            Action::PulsingStarted(_) => "PulsingStarted",
            Action::StopPulsing { .. } => "StopPulsing",
            Action::PulsingStopped(_) => "PulsingStopped",
            Action::LoadSyncStats { .. } => "LoadSyncStats",
            Action::SyncStatsLoaded(_) => "SyncStatsLoaded",
            Action::ExportSyncStats => "ExportSyncStats",
            Action::CopyInvite => "CopyInvite",
            Action::CreateProject(_) => "CreateProject",
            Action::ProjectCreated(_) => "ProjectCreated",
            Action::PushFile { .. } => "PushFile",
            Action::PushAllFiles { .. } => "PushAllFiles",
            Action::FilePushed { .. } => "FilePushed",
            Action::RunExplore { .. } => "RunExplore",
            Action::ExploreComplete(_) => "ExploreComplete",
        };
        f.write_str(name)
    }
}
