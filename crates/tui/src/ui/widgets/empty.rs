//! Empty state widget.
//!
//! Consistent empty-state display for panels with nothing to show yet.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    widgets::{Block, Borders, Paragraph},
};

/// Render an empty state with a custom hint message.
pub fn render_empty_state(f: &mut Frame, area: Rect, title: &str, message: &str) {
    let placeholder = Paragraph::new(message)
        .block(Block::default().borders(Borders::ALL).title(title))
        .alignment(Alignment::Center);
    f.render_widget(placeholder, area);
}
