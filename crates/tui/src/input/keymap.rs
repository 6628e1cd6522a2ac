//! Footer key hints per tab and mode.
//!
//! The actual key handling lives in `app::input`; this module carries
//! the short hint list rendered in the footer so the two stay side by
//! side when bindings change.

use crate::app::state::CurrentTab;

/// A single footer hint: key label and action description.
pub type KeyHint = (&'static str, &'static str);

/// Hints shown while a text widget has focus.
pub const EDIT_HINTS: [KeyHint; 3] = [
    ("Esc", "done"),
    ("Tab", "next field"),
    ("Enter", "submit"),
];

/// Hints shown while the search overlay is open.
pub const SEARCH_HINTS: [KeyHint; 3] = [
    ("Esc", "close"),
    ("↑/↓", "move"),
    ("Enter", "select"),
];

/// Global hints appended to every tab's list.
pub const GLOBAL_HINTS: [KeyHint; 4] = [
    ("1-3/←→", "tabs"),
    ("/", "search"),
    ("m", "theme"),
    ("q", "quit"),
];

/// Navigation-mode hints for a tab.
pub fn tab_hints(tab: CurrentTab) -> &'static [KeyHint] {
    match tab {
        CurrentTab::Setup => &[
            ("e", "edit"),
            ("Enter", "submit step"),
            ("s", "schedule"),
            ("p", "pulsing"),
            ("r", "refresh stats"),
            ("c", "copy invite"),
            ("x", "export"),
        ],
        CurrentTab::Ingestion => &[
            ("a", "add file"),
            ("p/P", "push/push all"),
            ("v", "preview"),
            ("d", "remove"),
            ("i", "init project"),
            ("t/c", "targets/conds"),
        ],
        CurrentTab::Exploration => &[
            ("↑/↓", "cohort"),
            ("Enter", "select"),
            ("u/b/p", "metric"),
            ("a", "analyze"),
        ],
    }
}
