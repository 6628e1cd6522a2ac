//! Data ingestion state: queued CSV files and the project form.
//!
//! Files are read fully into memory when added; nothing is persisted.
//! Each queued file pushes independently and can be re-pushed at will.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Local};
use tui_input::Input;
use uuid::Uuid;

use cleanroom_client::models::{CreateProjectParams, ProjectKind};
use cleanroom_config::constants::CSV_PREVIEW_ROWS;

use crate::action::PushPayload;
use crate::app::state::OpState;

/// Push lifecycle of a single queued file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PushState {
    #[default]
    Idle,
    Pending,
    Pushed,
    Failed(String),
}

impl PushState {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "queued",
            Self::Pending => "pushing",
            Self::Pushed => "pushed",
            Self::Failed(_) => "failed",
        }
    }
}

/// A CSV file queued for ingestion.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub id: Uuid,
    pub name: String,
    pub size: u64,
    pub content: String,
    /// First rows of the file, comma-split, row 0 = header.
    pub preview: Vec<Vec<String>>,
    pub added_at: DateTime<Local>,
    pub push: PushState,
}

impl UploadedFile {
    /// Approximate data row count (line count minus the header).
    pub fn data_rows(&self) -> u64 {
        (self.content.lines().filter(|l| !l.trim().is_empty()).count() as u64).saturating_sub(1)
    }

    /// Column count taken from the header row.
    pub fn columns(&self) -> usize {
        self.preview.first().map(|h| h.len()).unwrap_or(0)
    }

    /// The payload carried by a push action for this file.
    pub fn push_payload(&self) -> PushPayload {
        PushPayload {
            file_id: self.id,
            file_name: self.name.clone(),
            rows: self.data_rows(),
            csv_text: self.content.clone(),
        }
    }
}

/// Split CSV text into a tabular preview.
///
/// Preview-only: splits on commas and newlines, drops blank lines, no
/// quoting or escaping support. Not a general CSV parser and must not
/// be used as one; pushed data always travels as the raw original text.
pub fn csv_preview(content: &str) -> Vec<Vec<String>> {
    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .take(CSV_PREVIEW_ROWS)
        .map(|line| line.split(',').map(|cell| cell.to_string()).collect())
        .collect()
}

/// One row of the upload history table.
#[derive(Debug, Clone)]
pub struct UploadRecord {
    pub file_name: String,
    pub rows: u64,
    pub timestamp: DateTime<Local>,
    pub status: UploadStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStatus {
    Success,
    Error,
}

impl UploadStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// Seed history shown before any push has happened in this session.
fn seed_history() -> Vec<UploadRecord> {
    let now = Local::now();
    vec![
        UploadRecord {
            file_name: "peer_A_patients.csv".to_string(),
            rows: 1250,
            timestamp: now - chrono::Duration::hours(2),
            status: UploadStatus::Success,
        },
        UploadRecord {
            file_name: "peer_B_patients.csv".to_string(),
            rows: 980,
            timestamp: now - chrono::Duration::hours(1),
            status: UploadStatus::Success,
        },
    ]
}

/// The analysis project form.
pub struct ProjectForm {
    pub pid: Input,
    pub kind: ProjectKind,
    pub persist: bool,
    pub enable_histogram: bool,
    pub target_list: Vec<String>,
    pub cond_list: Vec<String>,
    pub create_op: OpState,
}

impl ProjectForm {
    pub fn new(last_pid: Option<String>) -> Self {
        Self {
            pid: Input::new(last_pid.unwrap_or_else(|| "healthcare-clean-room".to_string())),
            kind: ProjectKind::Cpu,
            persist: true,
            enable_histogram: true,
            target_list: vec!["age".to_string(), "bmi".to_string()],
            cond_list: vec![
                "smoker".to_string(),
                "diagnosis:I10_Hypertension".to_string(),
            ],
            create_op: OpState::Idle,
        }
    }

    /// The creation parameters for the current form.
    ///
    /// Target and condition lists travel comma-joined inside the `extra`
    /// map, exactly as the backend expects them.
    pub fn params(&self) -> CreateProjectParams {
        let mut extra = BTreeMap::new();
        extra.insert("sml_project_autosave".to_string(), "true".to_string());
        extra.insert(
            "sml_project_target_list".to_string(),
            self.target_list.join(","),
        );
        extra.insert("sml_project_cond_list".to_string(), self.cond_list.join(","));

        CreateProjectParams {
            pid: self.pid.value().to_string(),
            kind: self.kind,
            persist: self.persist,
            enable_histogram: self.enable_histogram,
            extra,
        }
    }
}

impl Default for ProjectForm {
    fn default() -> Self {
        Self::new(None)
    }
}

/// Positional edits shared by the target and condition lists.
///
/// Lists are identified by position: removing index `i` splices the
/// vector, updating replaces in place, adding appends an empty entry.
pub fn list_add(list: &mut Vec<String>) {
    list.push(String::new());
}

pub fn list_remove(list: &mut Vec<String>, index: usize) {
    if index < list.len() {
        list.remove(index);
    }
}

pub fn list_update(list: &mut [String], index: usize, value: String) {
    if let Some(slot) = list.get_mut(index) {
        *slot = value;
    }
}

/// Which widget on the ingestion tab currently receives input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IngestFocus {
    #[default]
    FileQueue,
    PathPrompt,
    ProjectPid,
    TargetList,
    CondList,
    ListEditor,
}

/// Which attribute list is being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditedList {
    Targets,
    Conditions,
}

/// State for the data ingestion tab.
pub struct IngestState {
    pub files: Vec<UploadedFile>,
    pub selected_file: usize,
    pub history: Vec<UploadRecord>,
    pub form: ProjectForm,
    pub focus: IngestFocus,

    /// Path prompt for adding a file (the terminal stand-in for the
    /// original drag-and-drop zone).
    pub path_input: Input,

    /// Open preview popup, if any (index into `files`).
    pub preview_open: Option<usize>,

    // Attribute list editing
    pub edited_list: EditedList,
    pub list_selected: usize,
    pub list_editor: Input,
}

impl IngestState {
    pub fn new(last_project_pid: Option<String>) -> Self {
        Self {
            files: Vec::new(),
            selected_file: 0,
            history: seed_history(),
            form: ProjectForm::new(last_project_pid),
            focus: IngestFocus::FileQueue,
            path_input: Input::default(),
            preview_open: None,
            edited_list: EditedList::Targets,
            list_selected: 0,
            list_editor: Input::default(),
        }
    }

    /// Read a CSV file from disk and queue it.
    ///
    /// Only `.csv` files are accepted, mirroring the original picker
    /// filter. The file is read fully into memory.
    pub fn add_file(&mut self, path: &Path) -> anyhow::Result<()> {
        let extension_ok = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
        if !extension_ok {
            anyhow::bail!("only .csv files are accepted: {}", path.display());
        }

        let content = std::fs::read_to_string(path)?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unnamed.csv")
            .to_string();

        self.files.push(UploadedFile {
            id: Uuid::new_v4(),
            name,
            size: content.len() as u64,
            preview: csv_preview(&content),
            content,
            added_at: Local::now(),
            push: PushState::Idle,
        });
        self.selected_file = self.files.len() - 1;
        Ok(())
    }

    /// Remove a file from the queue by id.
    pub fn remove_file(&mut self, id: Uuid) {
        self.files.retain(|f| f.id != id);
        if self.selected_file >= self.files.len() && !self.files.is_empty() {
            self.selected_file = self.files.len() - 1;
        }
    }

    /// Remove every queued file.
    pub fn clear_files(&mut self) {
        self.files.clear();
        self.selected_file = 0;
        self.preview_open = None;
    }

    pub fn selected(&self) -> Option<&UploadedFile> {
        self.files.get(self.selected_file)
    }

    /// Mark a file pending before its push request goes out.
    pub fn on_push_started(&mut self, id: Uuid) {
        if let Some(file) = self.files.iter_mut().find(|f| f.id == id) {
            file.push = PushState::Pending;
        }
    }

    /// Apply a push result; successes append to the history table.
    ///
    /// Results arrive in arbitrary order and only touch their own file,
    /// so a failed push never disturbs the others.
    pub fn on_file_pushed(
        &mut self,
        id: Uuid,
        file_name: &str,
        rows: u64,
        result: &Result<serde_json::Value, String>,
    ) {
        if let Some(file) = self.files.iter_mut().find(|f| f.id == id) {
            file.push = match result {
                Ok(_) => PushState::Pushed,
                Err(message) => PushState::Failed(message.clone()),
            };
        }
        self.history.insert(
            0,
            UploadRecord {
                file_name: file_name.to_string(),
                rows,
                timestamp: Local::now(),
                status: if result.is_ok() {
                    UploadStatus::Success
                } else {
                    UploadStatus::Error
                },
            },
        );
    }

    /// The list currently being edited.
    pub fn edited_list_mut(&mut self) -> &mut Vec<String> {
        match self.edited_list {
            EditedList::Targets => &mut self.form.target_list,
            EditedList::Conditions => &mut self.form.cond_list,
        }
    }

    pub fn edited_list_ref(&self) -> &Vec<String> {
        match self.edited_list {
            EditedList::Targets => &self.form.target_list,
            EditedList::Conditions => &self.form.cond_list,
        }
    }

    /// True when the focused widget consumes printable characters.
    pub fn is_editing(&self) -> bool {
        matches!(
            self.focus,
            IngestFocus::PathPrompt | IngestFocus::ProjectPid | IngestFocus::ListEditor
        )
    }
}

impl Default for IngestState {
    fn default() -> Self {
        Self::new(None)
    }
}
