//! Exploration dashboard: cohort controls, metric tiles, charts, and
//! the last analysis result.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    symbols,
    text::{Line, Span},
    widgets::{
        Axis, BarChart, Block, Borders, Chart, Dataset, GraphType, List, ListItem, ListState,
        Paragraph, Wrap,
    },
};

use cleanroom_client::models::ExploreMetric;

use crate::app::App;
use crate::app::explore::{
    BMI_MONTHS, BMI_TARGET, BMI_VALUES, CONDITION_BUCKETS, COHORT_OPTIONS, METRIC_TILES,
};
use crate::app::state::OpState;
use crate::ui::theme::{ThemeExt, spinner_char};

pub fn render(app: &App, f: &mut Frame, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // metric tiles
            Constraint::Min(10),   // controls + charts
        ])
        .split(area);

    render_metric_tiles(app, f, rows[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(28),
            Constraint::Percentage(72),
        ])
        .split(rows[1]);

    render_controls(app, f, columns[0]);
    render_charts(app, f, columns[1]);
}

fn render_metric_tiles(app: &App, f: &mut Frame, area: Rect) {
    let theme = &app.theme;
    let tiles = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(25); 4])
        .split(area);

    for (tile, chunk) in METRIC_TILES.iter().zip(tiles.iter()) {
        let change_style = if tile.change.starts_with('+') {
            theme.success()
        } else {
            theme.error()
        };
        let content = vec![
            Line::from(Span::styled(tile.value, theme.title())),
            Line::from(vec![
                Span::styled(tile.label, theme.text_dim()),
                Span::raw(" "),
                Span::styled(tile.change, change_style),
            ]),
        ];
        let widget = Paragraph::new(content).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border()),
        );
        f.render_widget(widget, *chunk);
    }
}

fn render_controls(app: &App, f: &mut Frame, area: Rect) {
    let theme = &app.theme;
    let explore = &app.explore;

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(5)])
        .split(area);

    // Metric toggle + analyze status
    let metric_line = Line::from(
        ExploreMetric::ALL
            .iter()
            .flat_map(|m| {
                let style = if *m == explore.metric {
                    theme.highlight()
                } else {
                    theme.text_dim()
                };
                vec![Span::styled(format!(" {} ", m.label()), style), Span::raw(" ")]
            })
            .collect::<Vec<_>>(),
    );
    let status_line = match &explore.analyze_op {
        OpState::Pending => Line::from(Span::styled(
            format!("{} Analyzing...", spinner_char(app.spinner_frame)),
            theme.info(),
        )),
        OpState::Failed(message) => Line::from(Span::styled(
            format!("✗ Analysis failed: {message}"),
            theme.error(),
        )),
        OpState::Idle => Line::from(Span::styled(
            "'a' runs the analysis on the selected cohort",
            theme.text_dim(),
        )),
    };
    let controls = Paragraph::new(vec![metric_line, status_line])
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border())
                .title(Span::styled("Analysis Controls", theme.title())),
        );
    f.render_widget(controls, rows[0]);

    // Cohort selector
    let items: Vec<ListItem> = COHORT_OPTIONS
        .iter()
        .enumerate()
        .map(|(i, cohort)| {
            let selected_marker = if explore.cohort_index == Some(i) {
                "● "
            } else {
                "○ "
            };
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(selected_marker, theme.title()),
                    Span::styled(cohort.label, theme.text()),
                    Span::raw(" "),
                    Span::styled(format!("({} patients)", cohort.count), theme.text_dim()),
                ]),
                Line::from(Span::styled(
                    format!("  {}", cohort.description),
                    theme.text_dim(),
                )),
            ])
        })
        .collect();

    let mut state = ListState::default();
    state.select(Some(explore.cohort_cursor));

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border())
                .title(Span::styled("Select Cohort", theme.title())),
        )
        .highlight_style(theme.highlight());
    f.render_stateful_widget(list, rows[1], &mut state);
}

fn render_charts(app: &App, f: &mut Frame, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(rows[0]);

    render_age_distribution(app, f, top[0]);
    render_condition_distribution(app, f, top[1]);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(rows[1]);

    render_bmi_trend(app, f, bottom[0]);
    render_result_panel(app, f, bottom[1]);
}

fn render_age_distribution(app: &App, f: &mut Frame, area: Rect) {
    let theme = &app.theme;
    let data = app.explore.age_distribution();

    let title = if app.explore.result_histogram.is_some() {
        "Age Distribution (analysis result)"
    } else {
        "Age Distribution"
    };

    let bars: Vec<(&str, u64)> = data
        .iter()
        .map(|(label, value)| (label.as_str(), *value))
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border())
                .title(Span::styled(title, theme.title())),
        )
        .data(&bars)
        .bar_width(7)
        .bar_gap(1)
        .bar_style(Style::default().fg(theme.chart_bar))
        .value_style(theme.text());
    f.render_widget(chart, area);
}

fn render_condition_distribution(app: &App, f: &mut Frame, area: Rect) {
    let theme = &app.theme;
    let total: u64 = CONDITION_BUCKETS.iter().map(|(_, count)| count).sum();

    let lines: Vec<Line> = CONDITION_BUCKETS
        .iter()
        .map(|(label, count)| {
            let share = *count as f64 / total as f64;
            let filled = (share * 20.0).round() as usize;
            Line::from(vec![
                Span::styled(format!("{label:>13} "), theme.text_dim()),
                Span::styled(
                    "█".repeat(filled),
                    Style::default().fg(theme.chart_bar),
                ),
                Span::styled(format!(" {count} ({:.0}%)", share * 100.0), theme.text()),
            ])
        })
        .collect();

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border())
            .title(Span::styled("Condition Distribution", theme.title())),
    );
    f.render_widget(widget, area);
}

fn render_bmi_trend(app: &App, f: &mut Frame, area: Rect) {
    let theme = &app.theme;

    let series: Vec<(f64, f64)> = BMI_VALUES
        .iter()
        .enumerate()
        .map(|(i, value)| (i as f64, *value))
        .collect();
    let target: Vec<(f64, f64)> = (0..BMI_MONTHS.len())
        .map(|i| (i as f64, BMI_TARGET))
        .collect();

    let datasets = vec![
        Dataset::default()
            .name("Average BMI")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(theme.chart_line))
            .data(&series),
        Dataset::default()
            .name("Target BMI")
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(theme.chart_reference))
            .data(&target),
    ];

    let x_labels: Vec<Span> = [0, 3, 6, 9, 11]
        .iter()
        .map(|&i| Span::styled(BMI_MONTHS[i], theme.text_dim()))
        .collect();

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border())
                .title(Span::styled(
                    "BMI Trend Analysis (12-month)",
                    theme.title(),
                )),
        )
        .x_axis(
            Axis::default()
                .bounds([0.0, (BMI_MONTHS.len() - 1) as f64])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .bounds([24.0, 29.0])
                .labels(vec![
                    Span::styled("24", theme.text_dim()),
                    Span::styled("26.5", theme.text_dim()),
                    Span::styled("29", theme.text_dim()),
                ]),
        );
    f.render_widget(chart, area);
}

fn render_result_panel(app: &App, f: &mut Frame, area: Rect) {
    let theme = &app.theme;

    let body = match &app.explore.result {
        Some(value) => {
            serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
        }
        None => "No analysis run yet.\nSelect a cohort and press 'a'.".to_string(),
    };

    let widget = Paragraph::new(body)
        .style(theme.text())
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border())
                .title(Span::styled("Analysis Result", theme.title())),
        );
    f.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render_to_text(app: &App) -> String {
        let backend = TestBackend::new(160, 50);
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
    fn test_dashboard_renders_mock_data() {
        let app = App::default();
        let content = render_to_text(&app);
        assert!(content.contains("Total Patients"));
        assert!(content.contains("12,450"));
        assert!(content.contains("Age Distribution"));
        assert!(content.contains("Hypertension"));
        assert!(content.contains("BMI Trend Analysis"));
        assert!(content.contains("No analysis run yet"));
    }

    #[test]
    fn test_result_panel_shows_response() {
        let mut app = App::default();
        app.explore
            .on_analyze_complete(Ok(serde_json::json!({"model": "ready"})));
        let content = render_to_text(&app);
        assert!(content.contains("ready"));
    }

    #[test]
    fn test_age_chart_switches_to_result_histogram() {
        let mut app = App::default();
        app.explore.on_analyze_complete(Ok(serde_json::json!({
            "labels": ["0-10"],
            "values": [7]
        })));
        let content = render_to_text(&app);
        assert!(content.contains("analysis result"));
        assert!(content.contains("0-10"));
    }
}
