//! Clean room setup screen: wizard steps, pulsing controls, sync stats.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

use cleanroom_client::models::SyncSchedule;

use crate::app::App;
use crate::app::state::OpState;
use crate::app::wizard::{SetupFocus, WizardStep};
use crate::ui::theme::{ThemeExt, spinner_char};
use crate::ui::widgets::empty::render_empty_state;

pub fn render(app: &App, f: &mut Frame, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(area);

    render_wizard(app, f, columns[0]);
    render_controls(app, f, columns[1]);
}

fn render_wizard(app: &App, f: &mut Frame, area: Rect) {
    let theme = &app.theme;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border())
        .title(Span::styled("Federation Setup Wizard", theme.title()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // step indicator
            Constraint::Length(8), // configure step
            Constraint::Length(7), // invite step
            Constraint::Min(6),    // join step
        ])
        .split(inner);

    render_step_indicator(app, f, rows[0]);
    render_configure_step(app, f, rows[1]);
    render_invite_step(app, f, rows[2]);
    render_join_step(app, f, rows[3]);
}

fn render_step_indicator(app: &App, f: &mut Frame, area: Rect) {
    let theme = &app.theme;
    let current = app.wizard.step.index();

    let mut spans = Vec::new();
    for (i, step) in [
        WizardStep::Configuring,
        WizardStep::Inviting,
        WizardStep::Joining,
    ]
    .iter()
    .enumerate()
    {
        let marker = if current > i {
            Span::styled(format!(" ✓ {} ", step.label()), theme.success())
        } else if current == i {
            Span::styled(format!(" ▶ {} ", step.label()), theme.title())
        } else {
            Span::styled(format!(" ○ {} ", step.label()), theme.disabled())
        };
        spans.push(marker);
        if i < 2 {
            spans.push(Span::styled("→", theme.text_dim()));
        }
    }
    if current == 3 {
        spans.push(Span::styled(" ✓ Joined", theme.success()));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn field_line<'a>(
    label: &'a str,
    value: String,
    focused: bool,
    theme: &cleanroom_config::Theme,
) -> Line<'a> {
    let label_style = if focused {
        theme.border_focused()
    } else {
        theme.text_dim()
    };
    Line::from(vec![
        Span::styled(format!("{label:>14}: "), label_style),
        Span::styled(value, theme.text()),
        if focused {
            Span::styled("▏", theme.border_focused())
        } else {
            Span::raw("")
        },
    ])
}

fn op_status_line<'a>(op: &'a OpState, pending_text: &'a str, app: &App) -> Option<Line<'a>> {
    let theme = &app.theme;
    match op {
        OpState::Pending => Some(Line::from(Span::styled(
            format!("{} {pending_text}", spinner_char(app.spinner_frame)),
            theme.info(),
        ))),
        OpState::Failed(message) => Some(Line::from(Span::styled(
            format!("✗ {message}"),
            theme.error(),
        ))),
        OpState::Idle => None,
    }
}

fn render_configure_step(app: &App, f: &mut Frame, area: Rect) {
    let theme = &app.theme;
    let wizard = &app.wizard;
    let active = wizard.step == WizardStep::Configuring;

    let border = if active {
        theme.border_focused()
    } else {
        theme.border()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title("1. Configure Clean Room");

    let focus = |field: SetupFocus| active && app.edit_mode && wizard.focus == field;

    let mut lines = vec![
        field_line(
            "Federation PID",
            wizard.pid.value().to_string(),
            focus(SetupFocus::Pid),
            theme,
        ),
        field_line(
            "NATS Hosts",
            wizard.nats_hosts.value().to_string(),
            focus(SetupFocus::NatsHosts),
            theme,
        ),
        field_line(
            "Sync Schedule",
            schedule_selector(wizard.sync_schedule),
            focus(SetupFocus::Schedule),
            theme,
        ),
    ];
    if let Some(status) = op_status_line(&wizard.configure_op, "Creating...", app) {
        lines.push(status);
    } else if active {
        lines.push(Line::from(Span::styled(
            "Press Enter to create the clean room",
            theme.text_dim(),
        )));
    }

    f.render_widget(Paragraph::new(lines).block(block), area);
}

/// Selector text with the active schedule highlighted in place.
fn schedule_selector(current: SyncSchedule) -> String {
    SyncSchedule::ALL
        .iter()
        .map(|s| {
            if *s == current {
                format!("[{}]", s.label())
            } else {
                s.as_str().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_invite_step(app: &App, f: &mut Frame, area: Rect) {
    let theme = &app.theme;
    let wizard = &app.wizard;
    let active = wizard.step == WizardStep::Inviting;
    let reached = wizard.step.index() >= WizardStep::Inviting.index();

    let border = if active {
        theme.border_focused()
    } else {
        theme.border()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title("2. Generate Secure Invite");

    let mut lines = Vec::new();
    if reached {
        lines.push(field_line(
            "Password",
            wizard.password_display(),
            active && app.edit_mode && wizard.focus == SetupFocus::Password,
            theme,
        ));
        lines.push(Line::from(Span::styled(
            "'v' toggles visibility; never validated for strength",
            theme.text_dim(),
        )));
        if let Some(status) = op_status_line(&wizard.invite_op, "Generating...", app) {
            lines.push(status);
        } else if active {
            lines.push(Line::from(Span::styled(
                "Press Enter to generate the invitation",
                theme.text_dim(),
            )));
        }
    } else {
        lines.push(Line::from(Span::styled(
            "Create the clean room first",
            theme.disabled(),
        )));
    }

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_join_step(app: &App, f: &mut Frame, area: Rect) {
    let theme = &app.theme;
    let wizard = &app.wizard;
    let reached = wizard.step.index() >= WizardStep::Joining.index();

    let border = if wizard.step == WizardStep::Joining {
        theme.border_focused()
    } else {
        theme.border()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title("3. Join Clean Room");
    let inner = block.inner(area);
    f.render_widget(block, area);

    if !reached {
        f.render_widget(
            Paragraph::new(Span::styled(
                "Generate an invite first",
                theme.disabled(),
            )),
            inner,
        );
        return;
    }

    if wizard.step == WizardStep::Joined {
        f.render_widget(
            Paragraph::new(Span::styled(
                "✓ Joined. Peers can now merge privacy-preserving statistics.",
                theme.success(),
            )),
            inner,
        );
        return;
    }

    // Two views of the generated invite next to the paste editor.
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(inner);

    let mut invite_lines: Vec<Line> = Vec::new();
    if let Some(invite) = &wizard.invite {
        for line in invite.lines().take(halves[0].height.saturating_sub(2) as usize) {
            invite_lines.push(Line::from(Span::styled(line.to_string(), theme.text())));
        }
        if let Some(compact) = wizard.invite_compact() {
            invite_lines.push(Line::from(Span::styled(compact, theme.text_dim())));
        }
    }
    let invite_panel = Paragraph::new(invite_lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border())
                .title("Generated Invitation ('c' copies)"),
        );
    f.render_widget(invite_panel, halves[0]);

    let editor_rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(2), Constraint::Length(1)])
        .split(halves[1]);
    f.render_widget(&wizard.join_editor, editor_rows[0]);
    let status = match op_status_line(&wizard.join_op, "Joining...", app) {
        Some(line) => line,
        None => Line::from(Span::styled(
            "Paste the invitation, then Ctrl+S to join",
            theme.text_dim(),
        )),
    };
    f.render_widget(Paragraph::new(status), editor_rows[1]);
}

fn render_controls(app: &App, f: &mut Frame, area: Rect) {
    let theme = &app.theme;
    let wizard = &app.wizard;

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(5)])
        .split(area);

    // Pulsing control card
    let pulsing_style = if wizard.pulsing {
        Style::default().fg(theme.pulsing_active)
    } else {
        Style::default().fg(theme.pulsing_stopped)
    };
    let mut control_lines = vec![
        Line::from(vec![
            Span::styled("Sync Pulsing: ", theme.text()),
            Span::styled(if wizard.pulsing { "ON" } else { "OFF" }, pulsing_style),
        ]),
        Line::from(Span::styled(
            "Periodic privacy-preserving merging between peers",
            theme.text_dim(),
        )),
        Line::from(Span::styled(
            "'p' toggles, 'r' refreshes stats, 'x' exports",
            theme.text_dim(),
        )),
    ];
    if let Some(status) = op_status_line(&wizard.pulsing_op, "Switching...", app) {
        control_lines.push(status);
    }
    let controls = Paragraph::new(control_lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border())
            .title(Span::styled("Federation Controls", theme.title())),
    );
    f.render_widget(controls, rows[0]);

    // Sync stats list
    if wizard.sync_stats.is_empty() {
        let hint = if wizard.pulsing {
            "Waiting for the first poll..."
        } else {
            "No stats yet. Enable pulsing or press 'r'."
        };
        render_empty_state(f, rows[1], "Live Sync Statistics", hint);
        return;
    }

    let items: Vec<ListItem> = wizard
        .sync_stats
        .iter()
        .map(|stat| {
            let status_style = match stat.status.to_lowercase().as_str() {
                "active" | "connected" | "success" => theme.success(),
                "warning" | "pending" => theme.warning(),
                "error" | "failed" => theme.error(),
                _ => theme.info(),
            };
            let mut lines = vec![Line::from(vec![
                Span::styled(stat.timestamp.clone(), theme.text_dim()),
                Span::raw("  "),
                Span::styled(stat.status.clone(), status_style),
                Span::raw("  "),
                Span::styled(format!("merged {}", stat.merged_count), theme.text()),
            ])];
            if let Some(errors) = &stat.errors
                && !errors.is_empty()
            {
                lines.push(Line::from(Span::styled(
                    format!("  errors: {}", errors.join(", ")),
                    theme.error(),
                )));
            }
            ListItem::new(lines)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border())
            .title(Span::styled("Live Sync Statistics", theme.title())),
    );
    f.render_widget(list, rows[1]);
}
