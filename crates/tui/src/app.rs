//! Application state and input handling.
//!
//! The module is organized into submodules:
//! - `state`: shared state types (tabs, operation lifecycle)
//! - `wizard`: federation setup state machine
//! - `ingest`: queued files and the project form
//! - `explore`: exploration dashboard state
//! - `input`: keyboard handling per tab
//! - `actions`: applying action results to state

pub mod actions;
pub mod explore;
pub mod ingest;
pub mod input;
pub mod state;
pub mod wizard;

pub use state::{CurrentTab, OpState};
pub use wizard::{SetupFocus, WizardStep};

use cleanroom_config::{ColorTheme, PersistedState, Theme};

use crate::app::explore::ExploreState;
use crate::app::ingest::IngestState;
use crate::app::wizard::WizardState;
use crate::ui::search::SearchOverlay;
use crate::ui::toast::Toast;

/// Main application state.
pub struct App {
    pub current_tab: CurrentTab,

    /// Currently selected color theme (persisted across runs).
    pub color_theme: ColorTheme,
    /// Expanded runtime theme derived from `color_theme`.
    pub theme: Theme,

    pub wizard: WizardState,
    pub ingest: IngestState,
    pub explore: ExploreState,

    pub toasts: Vec<Toast>,
    /// Open search overlay, if any.
    pub search: Option<SearchOverlay>,
    /// When true, printable keys go to the focused text widget.
    pub edit_mode: bool,
    /// Animation frame for the loading spinner.
    pub spinner_frame: u8,

    /// Backend base URL shown in the header.
    pub base_url: String,
}

impl App {
    /// Create a new App instance.
    ///
    /// # Arguments
    ///
    /// * `persisted` - Optional persisted state from previous runs
    /// * `base_url` - Backend base URL for the header display
    pub fn new(persisted: Option<PersistedState>, base_url: String) -> Self {
        let persisted = persisted.unwrap_or_default();

        Self {
            current_tab: CurrentTab::Setup,
            color_theme: persisted.selected_theme,
            theme: Theme::from(persisted.selected_theme),
            wizard: WizardState::new(persisted.last_federation_pid),
            ingest: IngestState::new(persisted.last_project_pid),
            explore: ExploreState::new(),
            toasts: Vec::new(),
            search: None,
            edit_mode: false,
            spinner_frame: 0,
            base_url,
        }
    }

    /// Exports the current state for persistence.
    pub fn get_persisted_state(&self) -> PersistedState {
        PersistedState {
            selected_theme: self.color_theme,
            last_federation_pid: Some(self.wizard.pid.value().to_string())
                .filter(|p| !p.is_empty()),
            last_project_pid: Some(self.ingest.form.pid.value().to_string())
                .filter(|p| !p.is_empty()),
        }
    }

    /// Flip the theme and re-expand the palette.
    pub fn toggle_theme(&mut self) {
        self.color_theme = self.color_theme.toggle();
        self.theme = Theme::from(self.color_theme);
    }

    pub fn push_toast(&mut self, toast: Toast) {
        self.toasts.push(toast);
    }

    /// Periodic tick: advance animations and drop expired toasts.
    pub fn on_tick(&mut self) {
        self.spinner_frame = self.spinner_frame.wrapping_add(1);
        self.toasts.retain(|t| !t.is_expired());
    }

    /// True when any backend call is in flight.
    pub fn is_loading(&self) -> bool {
        self.wizard.configure_op.is_pending()
            || self.wizard.invite_op.is_pending()
            || self.wizard.join_op.is_pending()
            || self.wizard.pulsing_op.is_pending()
            || self.ingest.form.create_op.is_pending()
            || self
                .ingest
                .files
                .iter()
                .any(|f| f.push == crate::app::ingest::PushState::Pending)
            || self.explore.analyze_op.is_pending()
    }

    /// Copy the generated invite to the system clipboard.
    pub fn copy_invite_to_clipboard(&mut self) {
        let Some(invite) = self.wizard.invite.clone() else {
            self.push_toast(Toast::warning("No invite generated yet"));
            return;
        };
        match arboard::Clipboard::new().and_then(|mut c| c.set_text(invite)) {
            Ok(()) => self.push_toast(Toast::success("Invite copied to clipboard")),
            Err(e) => self.push_toast(Toast::error(format!("Clipboard copy failed: {e}"))),
        }
    }

    /// Export the displayed sync stats to a CSV file in the working dir.
    pub fn export_sync_stats(&mut self) {
        if self.wizard.sync_stats.is_empty() {
            self.push_toast(Toast::warning("No sync stats to export"));
            return;
        }
        match crate::export::export_sync_stats(&self.wizard.sync_stats, std::path::Path::new(".")) {
            Ok(path) => {
                self.push_toast(Toast::success(format!("Exported to {}", path.display())));
            }
            Err(e) => self.push_toast(Toast::error(format!("Export failed: {e}"))),
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(None, cleanroom_config::constants::DEFAULT_BASE_URL.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_app_starts_on_setup_tab() {
        let app = App::default();
        assert_eq!(app.current_tab, CurrentTab::Setup);
        assert!(!app.edit_mode);
        assert!(!app.is_loading());
    }

    #[test]
    fn test_persisted_pids_flow_into_forms() {
        let persisted = PersistedState {
            selected_theme: ColorTheme::Light,
            last_federation_pid: Some("ward-7".to_string()),
            last_project_pid: Some("ward-7-project".to_string()),
        };
        let app = App::new(Some(persisted), "http://localhost:3101/api".to_string());
        assert_eq!(app.color_theme, ColorTheme::Light);
        assert_eq!(app.wizard.pid.value(), "ward-7");
        assert_eq!(app.ingest.form.pid.value(), "ward-7-project");
    }

    #[test]
    fn test_get_persisted_state_round_trip() {
        let mut app = App::default();
        app.toggle_theme();
        let state = app.get_persisted_state();
        assert_eq!(state.selected_theme, app.color_theme);
        assert_eq!(state.last_federation_pid.as_deref(), Some("clean-room-1"));
    }

    #[test]
    fn test_tick_prunes_expired_toasts() {
        let mut app = App::default();
        let mut expired = Toast::info("old");
        expired.ttl = std::time::Duration::from_millis(0);
        app.push_toast(expired);
        app.push_toast(Toast::info("fresh"));

        app.on_tick();
        assert_eq!(app.toasts.len(), 1);
        assert_eq!(app.toasts[0].message, "fresh");
    }
}
