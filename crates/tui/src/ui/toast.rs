//! Toast notification widgets for transient feedback messages.
//!
//! Toasts stack in the bottom-right corner. Each has a unique id, a
//! severity level, and an automatic expiration time (TTL).

use std::time::{Duration, Instant};

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use uuid::Uuid;

use cleanroom_config::Theme;

/// Severity level for toast notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    /// Informational message
    Info,
    /// Success message
    Success,
    /// Warning message
    Warning,
    /// Error message
    Error,
}

impl ToastLevel {
    /// Returns the display label for this level.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Success => "OK",
            Self::Warning => "WARN",
            Self::Error => "ERR",
        }
    }

    /// Returns the TTL (time-to-live) for this level.
    pub fn ttl(&self) -> Duration {
        match self {
            Self::Info | Self::Success | Self::Warning => Duration::from_secs(5),
            Self::Error => Duration::from_secs(10),
        }
    }
}

/// A single toast notification.
#[derive(Debug, Clone)]
pub struct Toast {
    /// Unique identifier for this toast
    pub id: Uuid,
    /// The message to display
    pub message: String,
    /// Severity level
    pub level: ToastLevel,
    /// When this toast was created
    pub created_at: Instant,
    /// Time-to-live before auto-expiry
    pub ttl: Duration,
}

impl Toast {
    /// Creates a new toast with the given message and level.
    pub fn new(message: String, level: ToastLevel) -> Self {
        let ttl = level.ttl();
        Self {
            id: Uuid::new_v4(),
            message,
            level,
            created_at: Instant::now(),
            ttl,
        }
    }

    /// Returns true if this toast has expired (TTL elapsed).
    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= self.ttl
    }

    /// Creates an info toast.
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message.into(), ToastLevel::Info)
    }

    /// Creates a success toast.
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message.into(), ToastLevel::Success)
    }

    /// Creates a warning toast.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message.into(), ToastLevel::Warning)
    }

    /// Creates an error toast.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message.into(), ToastLevel::Error)
    }
}

/// Maximum number of toasts displayed at once.
const MAX_TOASTS: usize = 5;

/// Height of a single rendered toast in rows.
const TOAST_HEIGHT: u16 = 3;

/// Renders all active toasts in the bottom-right corner.
///
/// Toasts stack vertically with the most recent at the bottom. Expired
/// toasts are filtered out before rendering.
pub fn render_toasts(f: &mut Frame, toasts: &[Toast], theme: &Theme) {
    let active: Vec<_> = toasts.iter().filter(|t| !t.is_expired()).collect();

    if active.is_empty() {
        return;
    }

    let active: Vec<_> = if active.len() > MAX_TOASTS {
        let skip_count = active.len() - MAX_TOASTS;
        active.into_iter().skip(skip_count).collect()
    } else {
        active
    };

    let total_height = active.len() as u16 * TOAST_HEIGHT;
    let toast_width = 60;

    let area = f.area();
    if area.height < total_height + 4 || area.width < toast_width + 2 {
        return;
    }

    let toast_area = Rect {
        x: area.width.saturating_sub(toast_width + 2),
        y: area.height.saturating_sub(total_height + 2),
        width: toast_width,
        height: total_height,
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            std::iter::repeat_n(Constraint::Length(TOAST_HEIGHT), active.len())
                .collect::<Vec<_>>(),
        )
        .split(toast_area);

    for (toast, chunk) in active.iter().zip(chunks.iter()) {
        render_single_toast(f, toast, *chunk, theme);
    }
}

fn render_single_toast(f: &mut Frame, toast: &Toast, area: Rect, theme: &Theme) {
    let color = match toast.level {
        ToastLevel::Info => theme.info,
        ToastLevel::Success => theme.success,
        ToastLevel::Warning => theme.warning,
        ToastLevel::Error => theme.error,
    };

    let max_width = area.width.saturating_sub(4) as usize;
    let message: String = if toast.message.chars().count() > max_width {
        let truncated: String = toast
            .message
            .chars()
            .take(max_width.saturating_sub(3))
            .collect();
        format!("{truncated}...")
    } else {
        toast.message.clone()
    };

    let content = Line::from(vec![
        Span::styled(
            format!(" {} ", toast.level.label()),
            Style::default()
                .fg(color)
                .add_modifier(ratatui::style::Modifier::BOLD),
        ),
        Span::raw(message),
    ]);

    let paragraph = Paragraph::new(content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        )
        .wrap(Wrap { trim: false })
        .alignment(Alignment::Left);

    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_expiration() {
        let toast = Toast::info("Test message".to_string());
        assert!(!toast.is_expired(), "Fresh toast should not be expired");

        let mut expired_toast = Toast::info("Test".to_string());
        expired_toast.ttl = Duration::from_millis(1);
        expired_toast.created_at = Instant::now() - Duration::from_secs(1);
        assert!(expired_toast.is_expired(), "Old toast should be expired");
    }

    #[test]
    fn test_toast_level_ttl() {
        assert_eq!(ToastLevel::Info.ttl(), Duration::from_secs(5));
        assert_eq!(ToastLevel::Success.ttl(), Duration::from_secs(5));
        assert_eq!(ToastLevel::Error.ttl(), Duration::from_secs(10));
    }

    #[test]
    fn test_toast_constructors() {
        assert_eq!(Toast::info("i").level, ToastLevel::Info);
        assert_eq!(Toast::success("s").level, ToastLevel::Success);
        assert_eq!(Toast::warning("w").level, ToastLevel::Warning);
        assert_eq!(Toast::error("e").level, ToastLevel::Error);
    }

    #[test]
    fn test_toast_unique_ids() {
        let toast1 = Toast::info("test1");
        let toast2 = Toast::info("test2");
        assert_ne!(toast1.id, toast2.id);
    }
}
