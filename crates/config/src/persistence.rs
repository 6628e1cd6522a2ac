//! Persistence for user preferences.
//!
//! Saves and loads UI preferences to disk using platform-standard
//! configuration directories. This replaces the browser local-storage
//! theme flag of the original dashboard with an explicit settings
//! service: load once at startup, save on toggle and on quit.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::types::ColorTheme;

/// User preferences that persist across application runs.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PersistedState {
    /// Selected color theme.
    pub selected_theme: ColorTheme,
    /// Last federation pid the operator worked with.
    pub last_federation_pid: Option<String>,
    /// Last analysis project pid the operator worked with.
    pub last_project_pid: Option<String>,
}

/// Manages loading and saving user configuration to disk.
pub struct ConfigManager {
    /// Path to the configuration file.
    config_path: PathBuf,
}

impl ConfigManager {
    /// Creates a new `ConfigManager` using platform-standard config directories.
    ///
    /// # Errors
    /// Returns an error if `ProjectDirs::from` fails (should be rare).
    pub fn new() -> Result<Self> {
        let proj_dirs = directories::ProjectDirs::from("io", "cleanroom-tui", "cleanroom-tui")
            .context("Failed to determine project directories")?;

        let config_path = proj_dirs.config_dir().join("state.json");

        Ok(Self { config_path })
    }

    /// Creates a `ConfigManager` with an explicit file path.
    pub fn with_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    /// Returns the path to the configuration file.
    pub fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    /// Loads persisted state from disk.
    ///
    /// Returns default state if the file doesn't exist or cannot be read.
    pub fn load(&self) -> PersistedState {
        match self.load_inner() {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!(
                    path = %self.config_path.display(),
                    error = %e,
                    "Failed to load persisted state, using defaults"
                );
                PersistedState::default()
            }
        }
    }

    fn load_inner(&self) -> Result<PersistedState> {
        let content = std::fs::read_to_string(&self.config_path)?;
        let state: PersistedState = serde_json::from_str(&content)?;
        Ok(state)
    }

    /// Saves persisted state to disk.
    ///
    /// # Errors
    /// Returns an error if the parent directory cannot be created
    /// or the file cannot be written.
    pub fn save(&self, state: &PersistedState) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = serde_json::to_string_pretty(state)?;
        std::fs::write(&self.config_path, content).context("Failed to write state file")?;

        tracing::debug!(
            path = %self.config_path.display(),
            "Persisted state saved"
        );

        Ok(())
    }
}
