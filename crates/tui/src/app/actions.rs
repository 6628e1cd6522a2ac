//! Applying actions to application state.
//!
//! Triggers mark the relevant operation pending; results resolve it.
//! Side effects (the actual HTTP calls) are handled separately by the
//! runtime — this module never performs I/O beyond clipboard/export
//! helpers already owned by `App`.

use crate::action::Action;
use crate::app::App;
use crate::app::state::OpState;
use crate::ui::search::SearchOverlay;
use crate::ui::toast::Toast;

impl App {
    /// Apply an action to the application state.
    pub fn apply(&mut self, action: &Action) {
        match action {
            // System
            Action::Tick => self.on_tick(),
            Action::NextTab => self.current_tab = self.current_tab.next(),
            Action::PreviousTab => self.current_tab = self.current_tab.previous(),
            Action::ToggleTheme => self.toggle_theme(),
            Action::OpenSearch => self.search = Some(SearchOverlay::new()),
            Action::Toast { message, level } => {
                self.push_toast(Toast::new(message.clone(), *level));
            }

            // Wizard
            Action::CreateFederation(_) => self.wizard.on_create_started(),
            Action::FederationCreated(result) => {
                self.wizard.on_created(result);
                match result {
                    Ok(_) => self.push_toast(Toast::success("Clean room created")),
                    Err(e) => {
                        self.push_toast(Toast::error(format!("Create clean room failed: {e}")));
                    }
                }
            }
            Action::GenerateInvite { .. } => self.wizard.on_invite_started(),
            Action::InviteGenerated(result) => {
                self.wizard.on_invite_generated(result);
                match result {
                    Ok(_) => self.push_toast(Toast::success("Invite generated")),
                    Err(e) => {
                        self.push_toast(Toast::error(format!("Generate invite failed: {e}")));
                    }
                }
            }
            Action::JoinFederation(_) => self.wizard.on_join_started(),
            Action::FederationJoined(result) => {
                self.wizard.on_joined(result);
                match result {
                    Ok(_) => self.push_toast(Toast::success("Joined clean room")),
                    Err(e) => {
                        self.push_toast(Toast::error(format!("Join clean room failed: {e}")));
                    }
                }
            }

            // Pulsing
            Action::StartPulsing { .. } | Action::StopPulsing { .. } => {
                self.wizard.on_pulsing_toggle_started();
            }
            Action::PulsingStarted(result) => {
                self.wizard.on_pulsing_started(result);
                match result {
                    Ok(()) => self.push_toast(Toast::success("Pulsing started")),
                    Err(e) => self.push_toast(Toast::error(format!("Start pulsing failed: {e}"))),
                }
            }
            Action::PulsingStopped(result) => {
                self.wizard.on_pulsing_stopped(result);
                match result {
                    Ok(()) => self.push_toast(Toast::info("Pulsing stopped")),
                    Err(e) => self.push_toast(Toast::error(format!("Stop pulsing failed: {e}"))),
                }
            }
            Action::LoadSyncStats { .. } => self.wizard.stats_op = OpState::Pending,
            Action::SyncStatsLoaded(result) => self.wizard.on_sync_stats(result.clone()),
            Action::ExportSyncStats => self.export_sync_stats(),
            Action::CopyInvite => self.copy_invite_to_clipboard(),

            // Ingestion
            Action::CreateProject(_) => self.ingest.form.create_op = OpState::Pending,
            Action::ProjectCreated(result) => {
                match result {
                    Ok(_) => {
                        self.ingest.form.create_op = OpState::Idle;
                        self.push_toast(Toast::success("Project initialized"));
                    }
                    Err(e) => {
                        self.ingest.form.create_op = OpState::Failed(e.clone());
                        self.push_toast(Toast::error(format!(
                            "Initialize project failed: {e}"
                        )));
                    }
                }
            }
            Action::PushFile { payload, .. } => self.ingest.on_push_started(payload.file_id),
            Action::PushAllFiles { payloads, .. } => {
                for payload in payloads {
                    self.ingest.on_push_started(payload.file_id);
                }
            }
            Action::FilePushed {
                file_id,
                file_name,
                rows,
                result,
            } => {
                self.ingest.on_file_pushed(*file_id, file_name, *rows, result);
                match result {
                    Ok(_) => self.push_toast(Toast::success(format!("Pushed {file_name}"))),
                    Err(e) => {
                        self.push_toast(Toast::error(format!("Push {file_name} failed: {e}")));
                    }
                }
            }

            // Exploration
            Action::RunExplore { .. } => self.explore.on_analyze_started(),
            Action::ExploreComplete(result) => {
                let failed = result.as_ref().err().cloned();
                self.explore.on_analyze_complete(result.clone());
                match failed {
                    None => self.push_toast(Toast::success("Analysis complete")),
                    Some(e) => self.push_toast(Toast::error(format!("Analysis failed: {e}"))),
                }
            }

            // Handled by the main loop / input layer.
            Action::Quit | Action::Input(_) | Action::Resize(..) => {}
        }
    }
}
