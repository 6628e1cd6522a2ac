//! Page chrome: header, tab bar, footer, and the top-level render entry.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
};

use crate::app::App;
use crate::app::state::CurrentTab;
use crate::input::keymap;
use crate::ui::theme::{ThemeExt, spinner_char};
use crate::ui::{screens, search, toast};

/// Render the whole frame: chrome, active tab, overlays, toasts.
pub fn render(app: &App, f: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Length(3), // tab bar
            Constraint::Min(5),    // body
            Constraint::Length(1), // footer
        ])
        .split(f.area());

    render_header(app, f, chunks[0]);
    render_tab_bar(app, f, chunks[1]);

    match app.current_tab {
        CurrentTab::Setup => screens::setup::render(app, f, chunks[2]),
        CurrentTab::Ingestion => screens::ingestion::render(app, f, chunks[2]),
        CurrentTab::Exploration => screens::exploration::render(app, f, chunks[2]),
    }

    render_footer(app, f, chunks[3]);

    if let Some(overlay) = &app.search {
        search::render_search_overlay(f, overlay, &app.theme);
    }

    toast::render_toasts(f, &app.toasts, &app.theme);
}

fn render_header(app: &App, f: &mut Frame, area: Rect) {
    let theme = &app.theme;

    let pulsing = if app.wizard.pulsing {
        Span::styled(
            " PULSING ACTIVE ",
            Style::default().fg(theme.pulsing_active),
        )
    } else {
        Span::styled(
            " PULSING STOPPED ",
            Style::default().fg(theme.pulsing_stopped),
        )
    };

    let mut spans = vec![
        Span::styled("Healthcare Data Clean Room", theme.title()),
        Span::raw("  "),
        Span::styled(app.base_url.clone(), theme.text_dim()),
        Span::raw("  "),
        pulsing,
    ];
    if app.is_loading() {
        spans.push(Span::styled(
            format!(" {} ", spinner_char(app.spinner_frame)),
            theme.info(),
        ));
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border()),
    );
    f.render_widget(header, area);
}

fn render_tab_bar(app: &App, f: &mut Frame, area: Rect) {
    let theme = &app.theme;
    let titles: Vec<Line> = CurrentTab::ALL
        .iter()
        .map(|tab| Line::from(format!(" {} ", tab.title())))
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.current_tab.index())
        .style(theme.text_dim())
        .highlight_style(theme.title())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border()),
        );
    f.render_widget(tabs, area);
}

fn render_footer(app: &App, f: &mut Frame, area: Rect) {
    let theme = &app.theme;

    let hints: Vec<keymap::KeyHint> = if app.search.is_some() {
        keymap::SEARCH_HINTS.to_vec()
    } else if app.edit_mode {
        keymap::EDIT_HINTS.to_vec()
    } else {
        keymap::tab_hints(app.current_tab)
            .iter()
            .chain(keymap::GLOBAL_HINTS.iter())
            .copied()
            .collect()
    };

    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (key, label) in hints {
        spans.push(Span::styled(format!(" {key} "), theme.highlight()));
        spans.push(Span::styled(format!(" {label}  "), theme.text_dim()));
    }

    let footer = Paragraph::new(Line::from(spans));
    f.render_widget(footer, area);
}
