//! Fuzzy search overlay over the static cohort/diagnosis suggestions.
//!
//! Local, in-memory filtering only; selecting an entry logs the choice
//! and closes the overlay. No backend call is wired up.

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};
use tui_input::Input;

use cleanroom_config::Theme;

use crate::ui::theme::ThemeExt;

/// One entry in the suggestion list.
#[derive(Debug, Clone)]
pub struct Suggestion {
    pub title: &'static str,
    pub category: &'static str,
    pub description: &'static str,
}

/// The fixed suggestion list shown by the overlay.
pub static SUGGESTIONS: [Suggestion; 8] = [
    Suggestion {
        title: "All Patients",
        category: "Cohort",
        description: "Complete patient dataset",
    },
    Suggestion {
        title: "I10_Hypertension",
        category: "Diagnosis",
        description: "Patients with hypertension diagnosis",
    },
    Suggestion {
        title: "J45_Asthma",
        category: "Diagnosis",
        description: "Patients with asthma diagnosis",
    },
    Suggestion {
        title: "K21_Reflux",
        category: "Diagnosis",
        description: "Patients with gastroesophageal reflux",
    },
    Suggestion {
        title: "E11_Type2Diabetes",
        category: "Diagnosis",
        description: "Patients with Type 2 diabetes",
    },
    Suggestion {
        title: "Smokers",
        category: "Risk Factor",
        description: "Patients who smoke",
    },
    Suggestion {
        title: "Age > 65",
        category: "Demographics",
        description: "Senior patients",
    },
    Suggestion {
        title: "BMI > 30",
        category: "Health Metrics",
        description: "Obese patients",
    },
];

/// State of the search overlay while it is open.
pub struct SearchOverlay {
    pub input: Input,
    matcher: SkimMatcherV2,
    /// Indices into [`SUGGESTIONS`], best match first.
    pub filtered: Vec<usize>,
    pub cursor: usize,
}

impl SearchOverlay {
    pub fn new() -> Self {
        Self {
            input: Input::default(),
            matcher: SkimMatcherV2::default(),
            filtered: (0..SUGGESTIONS.len()).collect(),
            cursor: 0,
        }
    }

    /// Re-rank the suggestion list against the current query.
    ///
    /// Matches against title and description; an empty query shows
    /// everything in original order.
    pub fn refilter(&mut self) {
        let query = self.input.value();
        if query.trim().is_empty() {
            self.filtered = (0..SUGGESTIONS.len()).collect();
        } else {
            let mut scored: Vec<(i64, usize)> = SUGGESTIONS
                .iter()
                .enumerate()
                .filter_map(|(i, s)| {
                    let title_score = self.matcher.fuzzy_match(s.title, query);
                    let desc_score = self.matcher.fuzzy_match(s.description, query);
                    title_score
                        .into_iter()
                        .chain(desc_score)
                        .max()
                        .map(|score| (score, i))
                })
                .collect();
            scored.sort_by(|a, b| b.0.cmp(&a.0));
            self.filtered = scored.into_iter().map(|(_, i)| i).collect();
        }
        if self.cursor >= self.filtered.len() {
            self.cursor = 0;
        }
    }

    pub fn next(&mut self) {
        if !self.filtered.is_empty() {
            self.cursor = (self.cursor + 1) % self.filtered.len();
        }
    }

    pub fn previous(&mut self) {
        if !self.filtered.is_empty() {
            self.cursor = (self.cursor + self.filtered.len() - 1) % self.filtered.len();
        }
    }

    /// The suggestion under the cursor, if any.
    pub fn selected(&self) -> Option<&'static Suggestion> {
        self.filtered.get(self.cursor).map(|&i| &SUGGESTIONS[i])
    }
}

impl Default for SearchOverlay {
    fn default() -> Self {
        Self::new()
    }
}

/// Render the overlay as a centered popup.
pub fn render_search_overlay(f: &mut Frame, overlay: &SearchOverlay, theme: &Theme) {
    let area = centered_rect(f.area(), 50, 60);
    f.render_widget(Clear, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    let input = Paragraph::new(overlay.input.value())
        .style(theme.text())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_focused())
                .title(Span::styled("Search cohorts, conditions...", theme.title())),
        );
    f.render_widget(input, chunks[0]);

    let items: Vec<ListItem> = overlay
        .filtered
        .iter()
        .map(|&i| {
            let s = &SUGGESTIONS[i];
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(s.title, theme.text()),
                    Span::raw("  "),
                    Span::styled(format!("[{}]", s.category), theme.info()),
                ]),
                Line::from(Span::styled(format!("  {}", s.description), theme.text_dim())),
            ])
        })
        .collect();

    let mut list_state = ListState::default();
    list_state.select(if overlay.filtered.is_empty() {
        None
    } else {
        Some(overlay.cursor)
    });

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border()),
        )
        .highlight_style(theme.highlight());
    f.render_stateful_widget(list, chunks[1], &mut list_state);
}

/// A rectangle centered in `area` taking the given percentages.
fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
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
