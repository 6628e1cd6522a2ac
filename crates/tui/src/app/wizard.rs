//! Federation setup wizard state.
//!
//! The wizard is an explicit state machine: `WizardStep` only moves
//! forward, one step per successful backend call, so "generate invite
//! before create" is unrepresentable rather than merely disabled.
//! Pulsing sits outside the linear sequence and can be toggled at any
//! step.

use secrecy::SecretString;
use serde_json::Value;
use tui_input::Input;
use tui_textarea::TextArea;

use cleanroom_client::models::{FederationConfig, JoinRequest, SyncSchedule, SyncStat};
use cleanroom_config::constants::SYNC_STATS_MAX_ITEMS;

use crate::app::state::OpState;

/// Position in the linear setup sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WizardStep {
    /// Step 1: edit federation parameters, create the clean room.
    #[default]
    Configuring,
    /// Step 2: created; generate the invitation payload.
    Inviting,
    /// Step 3: invite generated; join with a pasted payload.
    Joining,
    /// All three steps completed.
    Joined,
}

impl WizardStep {
    /// 0-based index for the step indicator.
    pub fn index(self) -> usize {
        match self {
            Self::Configuring => 0,
            Self::Inviting => 1,
            Self::Joining => 2,
            Self::Joined => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Configuring => "Configure Clean Room",
            Self::Inviting => "Generate Secure Invite",
            Self::Joining => "Join Clean Room",
            Self::Joined => "Federation Ready",
        }
    }
}

/// Which widget on the setup tab currently receives text input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupFocus {
    Pid,
    NatsHosts,
    Schedule,
    Password,
    InviteEditor,
}

/// State for the federation setup tab.
pub struct WizardState {
    pub step: WizardStep,
    pub focus: SetupFocus,

    // Configure step form
    pub pid: Input,
    pub nats_hosts: Input,
    pub sync_schedule: SyncSchedule,
    pub configure_op: OpState,

    // Invite step
    pub password: Input,
    pub show_password: bool,
    /// Pretty-printed invite payload as returned by the backend.
    pub invite: Option<String>,
    pub invite_op: OpState,

    // Join step
    pub join_editor: TextArea<'static>,
    pub join_op: OpState,

    // Pulsing overlay (independent of the step sequence)
    pub pulsing: bool,
    pub pulsing_op: OpState,
    pub sync_stats: Vec<SyncStat>,
    pub stats_op: OpState,
}

impl WizardState {
    pub fn new(last_pid: Option<String>) -> Self {
        let defaults = FederationConfig::default();
        let pid = last_pid.unwrap_or(defaults.pid);

        let mut join_editor = TextArea::default();
        join_editor.set_placeholder_text("Paste the invitation JSON here...");

        Self {
            step: WizardStep::Configuring,
            focus: SetupFocus::Pid,
            pid: Input::new(pid),
            nats_hosts: Input::new(defaults.nats_hosts),
            sync_schedule: defaults.sync_schedule,
            configure_op: OpState::Idle,
            password: Input::new("passwd66".to_string()),
            show_password: false,
            invite: None,
            invite_op: OpState::Idle,
            join_editor,
            join_op: OpState::Idle,
            pulsing: false,
            pulsing_op: OpState::Idle,
            sync_stats: Vec::new(),
            stats_op: OpState::Idle,
        }
    }

    /// The federation configuration currently described by the form.
    pub fn federation_config(&self) -> FederationConfig {
        FederationConfig {
            pid: self.pid.value().to_string(),
            nats_hosts: self.nats_hosts.value().to_string(),
            sync_schedule: self.sync_schedule,
        }
    }

    /// The invite password as a redactable secret.
    pub fn invite_password(&self) -> SecretString {
        SecretString::new(self.password.value().to_string().into())
    }

    /// Password text for rendering, masked unless visibility is toggled.
    pub fn password_display(&self) -> String {
        if self.show_password {
            self.password.value().to_string()
        } else {
            "•".repeat(self.password.value().chars().count())
        }
    }

    /// Whether the configure step can be submitted right now.
    pub fn can_create(&self) -> bool {
        self.step == WizardStep::Configuring
            && !self.configure_op.is_pending()
            && !self.pid.value().trim().is_empty()
    }

    /// Whether the invite step can be submitted right now.
    pub fn can_generate_invite(&self) -> bool {
        self.step == WizardStep::Inviting && !self.invite_op.is_pending()
    }

    /// Whether the join step can be submitted right now.
    ///
    /// Only a non-emptiness check on the pasted payload; well-formedness
    /// is the backend's call.
    pub fn can_join(&self) -> bool {
        self.step == WizardStep::Joining
            && !self.join_op.is_pending()
            && !self.join_text().trim().is_empty()
    }

    /// The pasted invite payload.
    pub fn join_text(&self) -> String {
        self.join_editor.lines().join("\n")
    }

    /// The join request for the current form, if submittable.
    ///
    /// The joining peer identifies itself as `<pid>-peer`.
    pub fn join_request(&self) -> Option<JoinRequest> {
        if !self.can_join() {
            return None;
        }
        Some(JoinRequest {
            pid: format!("{}-peer", self.pid.value()),
            invite_json: self.join_text(),
        })
    }

    /// Single-line rendering of the invite payload.
    pub fn invite_compact(&self) -> Option<String> {
        let invite = self.invite.as_ref()?;
        let compact: String = invite
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        Some(compact)
    }

    // Transitions

    pub fn on_create_started(&mut self) {
        self.configure_op = OpState::Pending;
    }

    pub fn on_created(&mut self, result: &Result<Value, String>) {
        match result {
            Ok(_) => {
                self.configure_op = OpState::Idle;
                if self.step == WizardStep::Configuring {
                    self.step = WizardStep::Inviting;
                    self.focus = SetupFocus::Password;
                }
            }
            Err(message) => {
                self.configure_op = OpState::Failed(message.clone());
            }
        }
    }

    pub fn on_invite_started(&mut self) {
        self.invite_op = OpState::Pending;
    }

    pub fn on_invite_generated(&mut self, result: &Result<Value, String>) {
        match result {
            Ok(payload) => {
                self.invite_op = OpState::Idle;
                self.invite = Some(
                    serde_json::to_string_pretty(payload)
                        .unwrap_or_else(|_| payload.to_string()),
                );
                if self.step == WizardStep::Inviting {
                    self.step = WizardStep::Joining;
                    self.focus = SetupFocus::InviteEditor;
                }
            }
            Err(message) => {
                self.invite_op = OpState::Failed(message.clone());
            }
        }
    }

    pub fn on_join_started(&mut self) {
        self.join_op = OpState::Pending;
    }

    pub fn on_joined(&mut self, result: &Result<Value, String>) {
        match result {
            Ok(_) => {
                self.join_op = OpState::Idle;
                if self.step == WizardStep::Joining {
                    self.step = WizardStep::Joined;
                }
            }
            Err(message) => {
                self.join_op = OpState::Failed(message.clone());
            }
        }
    }

    pub fn on_pulsing_toggle_started(&mut self) {
        self.pulsing_op = OpState::Pending;
    }

    pub fn on_pulsing_started(&mut self, result: &Result<(), String>) {
        match result {
            Ok(()) => {
                self.pulsing_op = OpState::Idle;
                self.pulsing = true;
            }
            Err(message) => {
                self.pulsing_op = OpState::Failed(message.clone());
            }
        }
    }

    pub fn on_pulsing_stopped(&mut self, result: &Result<(), String>) {
        match result {
            Ok(()) => {
                self.pulsing_op = OpState::Idle;
                self.pulsing = false;
            }
            Err(message) => {
                self.pulsing_op = OpState::Failed(message.clone());
            }
        }
    }

    /// Replace the displayed stats, newest first, capped for display.
    pub fn on_sync_stats(&mut self, result: Result<Vec<SyncStat>, String>) {
        match result {
            Ok(mut stats) => {
                self.stats_op = OpState::Idle;
                stats.truncate(SYNC_STATS_MAX_ITEMS);
                self.sync_stats = stats;
            }
            Err(message) => {
                self.stats_op = OpState::Failed(message);
            }
        }
    }

    /// Cycle focus over the widgets reachable at the current step.
    pub fn focus_next(&mut self) {
        self.focus = match (self.step, self.focus) {
            (WizardStep::Configuring, SetupFocus::Pid) => SetupFocus::NatsHosts,
            (WizardStep::Configuring, SetupFocus::NatsHosts) => SetupFocus::Schedule,
            (WizardStep::Configuring, _) => SetupFocus::Pid,
            (WizardStep::Inviting, SetupFocus::Password) => SetupFocus::Password,
            (WizardStep::Inviting, _) => SetupFocus::Password,
            (WizardStep::Joining, SetupFocus::InviteEditor) => SetupFocus::InviteEditor,
            (WizardStep::Joining, _) => SetupFocus::InviteEditor,
            (WizardStep::Joined, focus) => focus,
        };
    }

    /// True when the focused widget consumes printable characters.
    pub fn is_editing(&self) -> bool {
        match self.focus {
            SetupFocus::Pid | SetupFocus::NatsHosts | SetupFocus::Password => true,
            SetupFocus::InviteEditor => self.step == WizardStep::Joining,
            SetupFocus::Schedule => false,
        }
    }
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new(None)
    }
}
