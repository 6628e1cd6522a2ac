//! Loading state widget with animated spinner.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    widgets::{Block, Borders, Paragraph},
};

use crate::ui::theme::spinner_char;

/// Render a loading indicator with the standard "Loading {resource}..."
/// message format.
pub fn render_loading(f: &mut Frame, area: Rect, title: &str, resource: &str, spinner_frame: u8) {
    let spinner = spinner_char(spinner_frame);
    let loading_widget = Paragraph::new(format!("{spinner} Loading {resource}..."))
        .block(Block::default().borders(Borders::ALL).title(title))
        .alignment(Alignment::Center);
    f.render_widget(loading_widget, area);
}
