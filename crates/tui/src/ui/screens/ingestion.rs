//! Data ingestion screen: project form, file queue, preview, history.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, List, ListItem, ListState, Paragraph, Row, Table},
};

use crate::app::App;
use crate::app::ingest::{EditedList, IngestFocus, PushState, UploadStatus};
use crate::app::state::OpState;
use crate::ui::theme::{ThemeExt, spinner_char};
use crate::ui::widgets::empty::render_empty_state;

pub fn render(app: &App, f: &mut Frame, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(38), Constraint::Percentage(62)])
        .split(area);

    render_project_form(app, f, columns[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(9)])
        .split(columns[1]);
    render_file_queue(app, f, right[0]);
    render_history(app, f, right[1]);

    if let Some(index) = app.ingest.preview_open {
        render_preview_popup(app, f, index);
    }
}

fn render_project_form(app: &App, f: &mut Frame, area: Rect) {
    let theme = &app.theme;
    let ingest = &app.ingest;
    let form = &ingest.form;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border())
        .title(Span::styled("Project Configuration", theme.title()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(4), Constraint::Min(4)])
        .split(inner);

    let pid_focused = app.edit_mode && ingest.focus == IngestFocus::ProjectPid;
    let toggle = |on: bool| if on { "[x]" } else { "[ ]" };
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Project ID: ", if pid_focused {
                theme.border_focused()
            } else {
                theme.text_dim()
            }),
            Span::styled(form.pid.value().to_string(), theme.text()),
        ]),
        Line::from(vec![
            Span::styled("Type ('k'): ", theme.text_dim()),
            Span::styled(form.kind.label(), theme.text()),
        ]),
        Line::from(vec![
            Span::styled(format!("{} Persist Data ('s')  ", toggle(form.persist)), theme.text()),
            Span::styled(
                format!("{} Histogram ('h')", toggle(form.enable_histogram)),
                theme.text(),
            ),
        ]),
    ];
    match &form.create_op {
        OpState::Pending => lines.push(Line::from(Span::styled(
            format!("{} Initializing...", spinner_char(app.spinner_frame)),
            theme.info(),
        ))),
        OpState::Failed(message) => {
            lines.push(Line::from(Span::styled(format!("✗ {message}"), theme.error())));
        }
        OpState::Idle => lines.push(Line::from(Span::styled(
            "'i' initializes the project",
            theme.text_dim(),
        ))),
    }
    f.render_widget(Paragraph::new(lines), rows[0]);

    render_attribute_list(
        app,
        f,
        rows[1],
        "Target Attributes ('t')",
        &form.target_list,
        EditedList::Targets,
        IngestFocus::TargetList,
    );
    render_attribute_list(
        app,
        f,
        rows[2],
        "Condition Attributes ('c')",
        &form.cond_list,
        EditedList::Conditions,
        IngestFocus::CondList,
    );
}

fn render_attribute_list(
    app: &App,
    f: &mut Frame,
    area: Rect,
    title: &str,
    entries: &[String],
    list_kind: EditedList,
    focus_kind: IngestFocus,
) {
    let theme = &app.theme;
    let ingest = &app.ingest;
    let focused = ingest.focus == focus_kind
        || (ingest.focus == IngestFocus::ListEditor && ingest.edited_list == list_kind);

    let items: Vec<ListItem> = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let editing_this = app.edit_mode
                && ingest.focus == IngestFocus::ListEditor
                && ingest.edited_list == list_kind
                && ingest.list_selected == i;
            let text = if editing_this {
                format!("{}▏", ingest.list_editor.value())
            } else if entry.is_empty() {
                "<empty>".to_string()
            } else {
                entry.clone()
            };
            ListItem::new(Line::from(Span::styled(text, theme.text())))
        })
        .collect();

    let mut state = ListState::default();
    if focused && !entries.is_empty() {
        state.select(Some(ingest.list_selected.min(entries.len() - 1)));
    }

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(if focused {
                    theme.border_focused()
                } else {
                    theme.border()
                })
                .title(title.to_string()),
        )
        .highlight_style(theme.highlight());
    f.render_stateful_widget(list, area, &mut state);
}

fn render_file_queue(app: &App, f: &mut Frame, area: Rect) {
    let theme = &app.theme;
    let ingest = &app.ingest;

    if app.edit_mode && ingest.focus == IngestFocus::PathPrompt {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(3)])
            .split(area);
        let prompt = Paragraph::new(ingest.path_input.value())
            .style(theme.text())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme.border_focused())
                    .title("Path to CSV file"),
            );
        f.render_widget(prompt, rows[0]);
        render_queue_table(app, f, rows[1]);
        return;
    }

    render_queue_table(app, f, area);
}

fn render_queue_table(app: &App, f: &mut Frame, area: Rect) {
    let theme = &app.theme;
    let ingest = &app.ingest;

    if ingest.files.is_empty() {
        render_empty_state(
            f,
            area,
            "CSV File Upload",
            "No files queued. Press 'a' to add a CSV file.",
        );
        return;
    }

    let header = Row::new(vec!["File", "Size", "Rows", "Cols", "Added", "Status"])
        .style(theme.table_header());

    let rows: Vec<Row> = ingest
        .files
        .iter()
        .enumerate()
        .map(|(i, file)| {
            let status_style = match &file.push {
                PushState::Idle => theme.text_dim(),
                PushState::Pending => theme.info(),
                PushState::Pushed => theme.success(),
                PushState::Failed(_) => theme.error(),
            };
            let status = match &file.push {
                PushState::Failed(message) => format!("failed: {message}"),
                other => other.label().to_string(),
            };
            let row = Row::new(vec![
                Cell::from(file.name.clone()),
                Cell::from(format_size(file.size)),
                Cell::from(file.data_rows().to_string()),
                Cell::from(file.columns().to_string()),
                Cell::from(file.added_at.format("%H:%M:%S").to_string()),
                Cell::from(Span::styled(status, status_style)),
            ]);
            if i == ingest.selected_file && ingest.focus == IngestFocus::FileQueue {
                row.style(theme.highlight())
            } else {
                row
            }
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Min(20),
            Constraint::Length(10),
            Constraint::Length(7),
            Constraint::Length(6),
            Constraint::Length(10),
            Constraint::Min(12),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border())
            .title(Span::styled(
                format!("CSV File Upload ({} queued)", ingest.files.len()),
                theme.title(),
            )),
    );
    f.render_widget(table, area);
}

/// Human-readable file size (1024-based, two decimals).
fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 B".to_string();
    }
    let exponent = (bytes as f64).log(1024.0).floor() as usize;
    let exponent = exponent.min(UNITS.len() - 1);
    let value = bytes as f64 / 1024f64.powi(exponent as i32);
    if exponent == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.2} {}", UNITS[exponent])
    }
}

fn render_history(app: &App, f: &mut Frame, area: Rect) {
    let theme = &app.theme;

    let header =
        Row::new(vec!["File Name", "Rows", "Timestamp", "Status"]).style(theme.table_header());

    let rows: Vec<Row> = app
        .ingest
        .history
        .iter()
        .map(|record| {
            let status_style = match record.status {
                UploadStatus::Success => theme.success(),
                UploadStatus::Error => theme.error(),
            };
            Row::new(vec![
                Cell::from(record.file_name.clone()),
                Cell::from(record.rows.to_string()),
                Cell::from(record.timestamp.format("%Y-%m-%d %H:%M").to_string()),
                Cell::from(Span::styled(record.status.label(), status_style)),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Min(24),
            Constraint::Length(8),
            Constraint::Length(18),
            Constraint::Length(9),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border())
            .title(Span::styled("Upload History", theme.title())),
    );
    f.render_widget(table, area);
}

fn render_preview_popup(app: &App, f: &mut Frame, index: usize) {
    let theme = &app.theme;
    let Some(file) = app.ingest.files.get(index) else {
        return;
    };

    let area = popup_rect(f.area(), 70, 60);
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_focused())
        .title(Span::styled(
            format!("Data Preview: {}", file.name),
            theme.title(),
        ));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(inner);

    if let Some((header_cells, data)) = file.preview.split_first() {
        let widths: Vec<Constraint> = header_cells
            .iter()
            .map(|_| Constraint::Min(8))
            .collect();
        let header = Row::new(
            header_cells
                .iter()
                .map(|h| Cell::from(h.clone()))
                .collect::<Vec<_>>(),
        )
        .style(theme.table_header());
        let body: Vec<Row> = data
            .iter()
            .map(|row| Row::new(row.iter().map(|c| Cell::from(c.clone())).collect::<Vec<_>>()))
            .collect();
        f.render_widget(Table::new(body, widths).header(header), rows_layout[0]);
    }

    let caption = Paragraph::new(Span::styled(
        format!(
            "Showing first {} rows. Total data rows: {}. 'p' pushes, Esc closes.",
            file.preview.len().saturating_sub(1),
            file.data_rows()
        ),
        theme.text_dim(),
    ));
    f.render_widget(caption, rows_layout[1]);
}

fn popup_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render_to_text(app: &App) -> String {
        let backend = TestBackend::new(140, 45);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                render(app, f, area);
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_empty_queue_shows_hint() {
        let app = App::default();
        let content = render_to_text(&app);
        assert!(content.contains("No files queued"));
        assert!(content.contains("healthcare-clean-room"));
    }

    #[test]
    fn test_history_shows_seed_rows() {
        let app = App::default();
        let content = render_to_text(&app);
        assert!(content.contains("peer_A_patients.csv"));
        assert!(content.contains("1250"));
    }

    #[test]
    fn test_preview_popup_renders_table() {
        let mut app = App::default();
        let content = "age,bmi\n54,27.8\n61,31.2\n";
        app.ingest.files.push(crate::app::ingest::UploadedFile {
            id: uuid::Uuid::new_v4(),
            name: "patients.csv".to_string(),
            size: content.len() as u64,
            preview: crate::app::ingest::csv_preview(content),
            content: content.to_string(),
            added_at: chrono::Local::now(),
            push: PushState::Idle,
        });
        app.ingest.preview_open = Some(0);

        let text = render_to_text(&app);
        assert!(text.contains("Data Preview: patients.csv"));
        assert!(text.contains("27.8"));
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.00 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.00 MB");
    }
}
