//! Keyboard handling.
//!
//! Two modes, switched per key press:
//! - **Navigation mode**: letters are commands (tab switching, submit,
//!   pulsing toggle, list edits).
//! - **Edit mode**: printable keys go to the focused text widget; Esc
//!   returns to navigation, Tab cycles fields.
//!
//! The search overlay, when open, captures everything first.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use tui_input::backend::crossterm::EventHandler;

use crate::action::Action;
use crate::app::App;
use crate::app::explore::COHORT_OPTIONS;
use crate::app::ingest::{EditedList, IngestFocus, list_add, list_remove, list_update};
use crate::app::state::CurrentTab;
use crate::app::wizard::{SetupFocus, WizardStep};
use crate::ui::toast::Toast;
use cleanroom_client::models::ExploreMetric;

impl App {
    /// Handle keyboard input - returns an Action if one should be dispatched.
    pub fn handle_input(&mut self, key: KeyEvent) -> Option<Action> {
        // Ctrl+C always quits, regardless of mode.
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(Action::Quit);
        }

        if self.search.is_some() {
            return self.handle_search_input(key);
        }

        if self.edit_mode {
            return self.handle_edit_input(key);
        }

        // Global navigation bindings.
        match key.code {
            KeyCode::Char('q') => return Some(Action::Quit),
            KeyCode::Char('1') => {
                self.current_tab = CurrentTab::Setup;
                return None;
            }
            KeyCode::Char('2') => {
                self.current_tab = CurrentTab::Ingestion;
                return None;
            }
            KeyCode::Char('3') => {
                self.current_tab = CurrentTab::Exploration;
                return None;
            }
            KeyCode::Char('m') => return Some(Action::ToggleTheme),
            KeyCode::Char('/') => return Some(Action::OpenSearch),
            KeyCode::Right => return Some(Action::NextTab),
            KeyCode::Left => return Some(Action::PreviousTab),
            _ => {}
        }

        match self.current_tab {
            CurrentTab::Setup => self.handle_setup_input(key),
            CurrentTab::Ingestion => self.handle_ingest_input(key),
            CurrentTab::Exploration => self.handle_explore_input(key),
        }
    }

    // Search overlay

    fn handle_search_input(&mut self, key: KeyEvent) -> Option<Action> {
        let overlay = self.search.as_mut()?;
        match key.code {
            KeyCode::Esc => {
                self.search = None;
            }
            KeyCode::Down => overlay.next(),
            KeyCode::Up => overlay.previous(),
            KeyCode::Enter => {
                if let Some(suggestion) = overlay.selected() {
                    tracing::info!(cohort = suggestion.title, "search selection");
                    let message = format!("Selected {}", suggestion.title);
                    self.search = None;
                    self.push_toast(Toast::info(message));
                }
            }
            _ => {
                overlay.input.handle_event(&Event::Key(key));
                overlay.refilter();
            }
        }
        None
    }

    // Edit mode

    fn handle_edit_input(&mut self, key: KeyEvent) -> Option<Action> {
        if key.code == KeyCode::Esc {
            self.edit_mode = false;
            return None;
        }

        match self.current_tab {
            CurrentTab::Setup => self.handle_setup_edit(key),
            CurrentTab::Ingestion => self.handle_ingest_edit(key),
            // Nothing editable on the exploration tab.
            CurrentTab::Exploration => {
                self.edit_mode = false;
                None
            }
        }
    }

    fn handle_setup_edit(&mut self, key: KeyEvent) -> Option<Action> {
        if key.code == KeyCode::Tab {
            self.wizard.focus_next();
            return None;
        }

        match self.wizard.focus {
            SetupFocus::Pid => {
                if key.code == KeyCode::Enter {
                    return self.submit_wizard_step();
                }
                self.wizard.pid.handle_event(&Event::Key(key));
            }
            SetupFocus::NatsHosts => {
                if key.code == KeyCode::Enter {
                    return self.submit_wizard_step();
                }
                self.wizard.nats_hosts.handle_event(&Event::Key(key));
            }
            SetupFocus::Schedule => match key.code {
                KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') => {
                    self.wizard.sync_schedule = self.wizard.sync_schedule.cycle_next();
                }
                KeyCode::Enter => return self.submit_wizard_step(),
                _ => {}
            },
            SetupFocus::Password => {
                if key.code == KeyCode::Enter {
                    return self.submit_wizard_step();
                }
                self.wizard.password.handle_event(&Event::Key(key));
            }
            SetupFocus::InviteEditor => {
                // Multi-line editor: Enter inserts a newline; submit is Ctrl+S.
                if key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    return self.submit_wizard_step();
                }
                self.wizard.join_editor.input(key);
            }
        }
        None
    }

    fn handle_ingest_edit(&mut self, key: KeyEvent) -> Option<Action> {
        match self.ingest.focus {
            IngestFocus::PathPrompt => match key.code {
                KeyCode::Enter => {
                    let path = self.ingest.path_input.value().trim().to_string();
                    self.ingest.path_input.reset();
                    self.edit_mode = false;
                    self.ingest.focus = IngestFocus::FileQueue;
                    if path.is_empty() {
                        return None;
                    }
                    match self.ingest.add_file(std::path::Path::new(&path)) {
                        Ok(()) => self.push_toast(Toast::success(format!("Queued {path}"))),
                        Err(e) => self.push_toast(Toast::error(format!("Add file failed: {e}"))),
                    }
                }
                _ => {
                    self.ingest.path_input.handle_event(&Event::Key(key));
                }
            },
            IngestFocus::ProjectPid => match key.code {
                KeyCode::Enter => {
                    self.edit_mode = false;
                    self.ingest.focus = IngestFocus::FileQueue;
                }
                _ => {
                    self.ingest.form.pid.handle_event(&Event::Key(key));
                }
            },
            IngestFocus::ListEditor => match key.code {
                KeyCode::Enter => {
                    let value = self.ingest.list_editor.value().to_string();
                    let index = self.ingest.list_selected;
                    list_update(self.ingest.edited_list_mut(), index, value);
                    self.ingest.list_editor.reset();
                    self.edit_mode = false;
                    self.ingest.focus = match self.ingest.edited_list {
                        EditedList::Targets => IngestFocus::TargetList,
                        EditedList::Conditions => IngestFocus::CondList,
                    };
                }
                _ => {
                    self.ingest.list_editor.handle_event(&Event::Key(key));
                }
            },
            _ => {
                self.edit_mode = false;
            }
        }
        None
    }

    // Setup tab, navigation mode

    fn submit_wizard_step(&mut self) -> Option<Action> {
        match self.wizard.step {
            WizardStep::Configuring if self.wizard.can_create() => {
                Some(Action::CreateFederation(self.wizard.federation_config()))
            }
            WizardStep::Inviting if self.wizard.can_generate_invite() => {
                Some(Action::GenerateInvite {
                    pid: self.wizard.pid.value().to_string(),
                    password: self.wizard.invite_password(),
                })
            }
            WizardStep::Joining => self.wizard.join_request().map(Action::JoinFederation),
            _ => None,
        }
    }

    fn handle_setup_input(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Char('e') | KeyCode::Char('i') => {
                self.wizard.focus = match self.wizard.step {
                    WizardStep::Configuring => SetupFocus::Pid,
                    WizardStep::Inviting => SetupFocus::Password,
                    WizardStep::Joining | WizardStep::Joined => SetupFocus::InviteEditor,
                };
                self.edit_mode = true;
                None
            }
            KeyCode::Tab => {
                self.wizard.focus_next();
                None
            }
            KeyCode::Enter => self.submit_wizard_step(),
            KeyCode::Char('s') => {
                self.wizard.sync_schedule = self.wizard.sync_schedule.cycle_next();
                None
            }
            KeyCode::Char('v') => {
                self.wizard.show_password = !self.wizard.show_password;
                None
            }
            KeyCode::Char('p') => {
                if self.wizard.pulsing_op.is_pending() {
                    return None;
                }
                let pid = self.wizard.pid.value().to_string();
                if self.wizard.pulsing {
                    Some(Action::StopPulsing { pid })
                } else {
                    Some(Action::StartPulsing { pid })
                }
            }
            KeyCode::Char('r') => Some(Action::LoadSyncStats {
                pid: self.wizard.pid.value().to_string(),
            }),
            KeyCode::Char('c') => {
                self.copy_invite_to_clipboard();
                None
            }
            KeyCode::Char('x') => Some(Action::ExportSyncStats),
            _ => None,
        }
    }

    // Ingestion tab, navigation mode

    fn handle_ingest_input(&mut self, key: KeyEvent) -> Option<Action> {
        // Preview popup captures navigation keys while open.
        if self.ingest.preview_open.is_some() {
            match key.code {
                KeyCode::Esc | KeyCode::Char('v') => self.ingest.preview_open = None,
                KeyCode::Char('p') => {
                    let index = self.ingest.preview_open.take()?;
                    return self.push_file_at(index);
                }
                _ => {}
            }
            return None;
        }

        // Attribute list focus has its own bindings.
        if matches!(
            self.ingest.focus,
            IngestFocus::TargetList | IngestFocus::CondList
        ) {
            return self.handle_list_input(key);
        }

        match key.code {
            KeyCode::Char('a') => {
                self.ingest.focus = IngestFocus::PathPrompt;
                self.edit_mode = true;
                None
            }
            KeyCode::Up => {
                self.ingest.selected_file = self.ingest.selected_file.saturating_sub(1);
                None
            }
            KeyCode::Down => {
                if !self.ingest.files.is_empty() {
                    self.ingest.selected_file =
                        (self.ingest.selected_file + 1).min(self.ingest.files.len() - 1);
                }
                None
            }
            KeyCode::Char('d') => {
                if let Some(file) = self.ingest.selected() {
                    let id = file.id;
                    self.ingest.remove_file(id);
                }
                None
            }
            KeyCode::Char('v') | KeyCode::Enter => {
                if self.ingest.selected().is_some() {
                    self.ingest.preview_open = Some(self.ingest.selected_file);
                }
                None
            }
            KeyCode::Char('p') => self.push_file_at(self.ingest.selected_file),
            KeyCode::Char('P') => {
                let payloads: Vec<_> =
                    self.ingest.files.iter().map(|f| f.push_payload()).collect();
                if payloads.is_empty() {
                    self.push_toast(Toast::warning("No files queued"));
                    return None;
                }
                Some(Action::PushAllFiles {
                    pid: self.ingest.form.pid.value().to_string(),
                    payloads,
                })
            }
            KeyCode::Char('X') => {
                self.ingest.clear_files();
                None
            }
            KeyCode::Char('i') => {
                if self.ingest.form.create_op.is_pending() {
                    return None;
                }
                Some(Action::CreateProject(self.ingest.form.params()))
            }
            KeyCode::Char('e') => {
                self.ingest.focus = IngestFocus::ProjectPid;
                self.edit_mode = true;
                None
            }
            KeyCode::Char('k') => {
                self.ingest.form.kind = self.ingest.form.kind.toggle();
                None
            }
            KeyCode::Char('s') => {
                self.ingest.form.persist = !self.ingest.form.persist;
                None
            }
            KeyCode::Char('h') => {
                self.ingest.form.enable_histogram = !self.ingest.form.enable_histogram;
                None
            }
            KeyCode::Char('t') => {
                self.ingest.focus = IngestFocus::TargetList;
                self.ingest.edited_list = EditedList::Targets;
                self.ingest.list_selected = 0;
                None
            }
            KeyCode::Char('c') => {
                self.ingest.focus = IngestFocus::CondList;
                self.ingest.edited_list = EditedList::Conditions;
                self.ingest.list_selected = 0;
                None
            }
            _ => None,
        }
    }

    fn push_file_at(&mut self, index: usize) -> Option<Action> {
        let file = self.ingest.files.get(index)?;
        Some(Action::PushFile {
            pid: self.ingest.form.pid.value().to_string(),
            payload: file.push_payload(),
        })
    }

    /// Positional edits on the focused attribute list.
    fn handle_list_input(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Esc => {
                self.ingest.focus = IngestFocus::FileQueue;
            }
            KeyCode::Up => {
                self.ingest.list_selected = self.ingest.list_selected.saturating_sub(1);
            }
            KeyCode::Down => {
                let len = self.ingest.edited_list_ref().len();
                if len > 0 {
                    self.ingest.list_selected = (self.ingest.list_selected + 1).min(len - 1);
                }
            }
            KeyCode::Char('a') => {
                list_add(self.ingest.edited_list_mut());
                self.ingest.list_selected = self.ingest.edited_list_ref().len() - 1;
            }
            KeyCode::Char('d') => {
                let index = self.ingest.list_selected;
                list_remove(self.ingest.edited_list_mut(), index);
                let len = self.ingest.edited_list_ref().len();
                if self.ingest.list_selected >= len && len > 0 {
                    self.ingest.list_selected = len - 1;
                }
            }
            KeyCode::Char('e') | KeyCode::Enter => {
                let current = self
                    .ingest
                    .edited_list_ref()
                    .get(self.ingest.list_selected)
                    .cloned();
                if let Some(value) = current {
                    self.ingest.list_editor = tui_input::Input::new(value);
                    self.ingest.focus = IngestFocus::ListEditor;
                    self.edit_mode = true;
                }
            }
            _ => {}
        }
        None
    }

    // Exploration tab, navigation mode

    fn handle_explore_input(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Up => {
                self.explore.cohort_cursor = self.explore.cohort_cursor.saturating_sub(1);
                None
            }
            KeyCode::Down => {
                self.explore.cohort_cursor =
                    (self.explore.cohort_cursor + 1).min(COHORT_OPTIONS.len() - 1);
                None
            }
            KeyCode::Enter => {
                self.explore.cohort_index = Some(self.explore.cohort_cursor);
                None
            }
            KeyCode::Esc => {
                self.explore.cohort_index = None;
                None
            }
            KeyCode::Char('u') => {
                self.explore.metric = ExploreMetric::Uni;
                None
            }
            KeyCode::Char('b') => {
                self.explore.metric = ExploreMetric::Bi;
                None
            }
            KeyCode::Char('p') => {
                self.explore.metric = ExploreMetric::Predictive;
                None
            }
            KeyCode::Char('a') => {
                if !self.explore.can_analyze() {
                    if self.explore.cohort_index.is_none() {
                        self.push_toast(Toast::warning("Select a cohort first"));
                    }
                    return None;
                }
                let request = self.explore.explore_request()?;
                Some(Action::RunExplore {
                    pid: self.ingest.form.pid.value().to_string(),
                    metric: self.explore.metric,
                    request,
                })
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_q_quits_in_navigation_mode() {
        let mut app = App::default();
        assert!(matches!(app.handle_input(key(KeyCode::Char('q'))), Some(Action::Quit)));
    }

    #[test]
    fn test_ctrl_c_quits_even_in_edit_mode() {
        let mut app = App::default();
        app.edit_mode = true;
        assert!(matches!(app.handle_input(ctrl('c')), Some(Action::Quit)));
    }

    #[test]
    fn test_number_keys_switch_tabs() {
        let mut app = App::default();
        app.handle_input(key(KeyCode::Char('3')));
        assert_eq!(app.current_tab, CurrentTab::Exploration);
        app.handle_input(key(KeyCode::Char('2')));
        assert_eq!(app.current_tab, CurrentTab::Ingestion);
    }

    #[test]
    fn test_arrow_keys_cycle_tabs() {
        let mut app = App::default();
        let action = app.handle_input(key(KeyCode::Right));
        assert!(matches!(action, Some(Action::NextTab)));
        app.apply(&action.unwrap());
        assert_eq!(app.current_tab, CurrentTab::Ingestion);

        let action = app.handle_input(key(KeyCode::Left));
        app.apply(&action.unwrap());
        assert_eq!(app.current_tab, CurrentTab::Setup);
    }

    #[test]
    fn test_enter_submits_configure_step() {
        let mut app = App::default();
        let action = app.handle_input(key(KeyCode::Enter));
        match action {
            Some(Action::CreateFederation(config)) => {
                assert_eq!(config.pid, "clean-room-1");
            }
            other => panic!("expected CreateFederation, got {other:?}"),
        }
    }

    #[test]
    fn test_enter_does_not_submit_while_pending() {
        let mut app = App::default();
        app.wizard.on_create_started();
        assert!(app.handle_input(key(KeyCode::Enter)).is_none());
    }

    #[test]
    fn test_invite_submit_only_after_create_succeeded() {
        let mut app = App::default();
        app.wizard.on_created(&Ok(serde_json::json!({})));
        let action = app.handle_input(key(KeyCode::Enter));
        assert!(matches!(action, Some(Action::GenerateInvite { .. })));
    }

    #[test]
    fn test_join_submit_requires_invite_text() {
        let mut app = App::default();
        app.wizard.on_created(&Ok(serde_json::json!({})));
        app.wizard.on_invite_generated(&Ok(serde_json::json!({})));

        assert!(app.handle_input(key(KeyCode::Enter)).is_none());

        app.wizard.join_editor.insert_str("{\"token\":\"abc\"}");
        let action = app.handle_input(key(KeyCode::Enter));
        match action {
            Some(Action::JoinFederation(request)) => {
                assert_eq!(request.pid, "clean-room-1-peer");
            }
            other => panic!("expected JoinFederation, got {other:?}"),
        }
    }

    #[test]
    fn test_pulsing_key_toggles_between_start_and_stop() {
        let mut app = App::default();
        let action = app.handle_input(key(KeyCode::Char('p')));
        assert!(matches!(action, Some(Action::StartPulsing { .. })));

        app.wizard.on_pulsing_started(&Ok(()));
        let action = app.handle_input(key(KeyCode::Char('p')));
        assert!(matches!(action, Some(Action::StopPulsing { .. })));
    }

    #[test]
    fn test_typing_into_pid_field_in_edit_mode() {
        let mut app = App::default();
        app.handle_input(key(KeyCode::Char('e')));
        assert!(app.edit_mode);
        assert_eq!(app.wizard.focus, SetupFocus::Pid);

        app.handle_input(key(KeyCode::Char('x')));
        assert_eq!(app.wizard.pid.value(), "clean-room-1x");

        app.handle_input(key(KeyCode::Esc));
        assert!(!app.edit_mode);
    }

    #[test]
    fn test_push_all_carries_every_queued_file() {
        let mut app = App::default();
        app.current_tab = CurrentTab::Ingestion;
        for content in ["a\n1\n", "b\n2\n", "c\n3\n"] {
            app.ingest.files.push(crate::app::ingest::UploadedFile {
                id: uuid::Uuid::new_v4(),
                name: "f.csv".to_string(),
                size: content.len() as u64,
                preview: crate::app::ingest::csv_preview(content),
                content: content.to_string(),
                added_at: chrono::Local::now(),
                push: crate::app::ingest::PushState::Idle,
            });
        }

        let action = app.handle_input(key(KeyCode::Char('P')));
        match action {
            Some(Action::PushAllFiles { payloads, .. }) => assert_eq!(payloads.len(), 3),
            other => panic!("expected PushAllFiles, got {other:?}"),
        }
    }

    #[test]
    fn test_push_all_with_empty_queue_warns() {
        let mut app = App::default();
        app.current_tab = CurrentTab::Ingestion;
        assert!(app.handle_input(key(KeyCode::Char('P'))).is_none());
        assert_eq!(app.toasts.len(), 1);
    }

    #[test]
    fn test_target_list_edits_via_keys() {
        let mut app = App::default();
        app.current_tab = CurrentTab::Ingestion;

        app.handle_input(key(KeyCode::Char('t')));
        assert_eq!(app.ingest.focus, IngestFocus::TargetList);

        app.handle_input(key(KeyCode::Char('a')));
        assert_eq!(
            app.ingest.form.target_list,
            vec!["age".to_string(), "bmi".to_string(), String::new()]
        );

        app.handle_input(key(KeyCode::Up));
        app.handle_input(key(KeyCode::Char('d')));
        assert_eq!(
            app.ingest.form.target_list,
            vec!["age".to_string(), String::new()]
        );
    }

    #[test]
    fn test_analyze_requires_cohort_selection() {
        let mut app = App::default();
        app.current_tab = CurrentTab::Exploration;

        assert!(app.handle_input(key(KeyCode::Char('a'))).is_none());
        assert_eq!(app.toasts.len(), 1);

        app.handle_input(key(KeyCode::Down));
        app.handle_input(key(KeyCode::Enter));
        let action = app.handle_input(key(KeyCode::Char('a')));
        match action {
            Some(Action::RunExplore { metric, request, .. }) => {
                assert_eq!(metric, ExploreMetric::Uni);
                assert_eq!(request.cohort, "hypertension");
            }
            other => panic!("expected RunExplore, got {other:?}"),
        }
    }

    #[test]
    fn test_metric_toggle_is_exclusive() {
        let mut app = App::default();
        app.current_tab = CurrentTab::Exploration;
        app.handle_input(key(KeyCode::Char('b')));
        assert_eq!(app.explore.metric, ExploreMetric::Bi);
        app.handle_input(key(KeyCode::Char('p')));
        assert_eq!(app.explore.metric, ExploreMetric::Predictive);
    }

    #[test]
    fn test_search_overlay_captures_input() {
        let mut app = App::default();
        app.search = Some(crate::ui::search::SearchOverlay::new());

        app.handle_input(key(KeyCode::Char('q')));
        // 'q' typed into the overlay, not treated as quit.
        assert!(app.search.is_some());
        assert_eq!(app.search.as_ref().unwrap().input.value(), "q");

        app.handle_input(key(KeyCode::Esc));
        assert!(app.search.is_none());
    }
}
