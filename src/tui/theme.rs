//! Theme configuration for consistent styling across TUI components.

use ratatui::style::{Color, Modifier, Style};

// 256-color palette entries, readable on both light and dark terminals
const ACCENT: Color = Color::Indexed(212); // pink
const PROMPT: Color = Color::Indexed(240); // dim gray
const SUBDUED: Color = Color::Rgb(151, 151, 151); // #979797
const VERY_SUBDUED: Color = Color::Rgb(60, 60, 60); // #3C3C3C
const TEXT: Color = Color::Rgb(209, 213, 219);
const BORDER: Color = Color::Indexed(99); // violet

/// Theme configuration for TUI components.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Style for titles and prompt labels
    pub title: Style,
    /// Style for the cursor marker and the item under it
    pub cursor: Style,
    /// Style for selected items
    pub selected: Style,
    /// Style for normal, unselected items
    pub unselected: Style,
    /// Style for input placeholders
    pub placeholder: Style,
    /// Style for help text at the bottom
    pub help: Style,
    /// Style for error messages
    pub error: Style,
    /// Style for borders
    pub border: Style,
    /// Style for the current page dot
    pub active_dot: Style,
    /// Style for the other page dots
    pub inactive_dot: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            title: Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            cursor: Style::default().fg(ACCENT),
            selected: Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            unselected: Style::default().fg(TEXT),
            placeholder: Style::default().fg(PROMPT),
            help: Style::default().fg(SUBDUED),
            error: Style::default().fg(Color::Red),
            border: Style::default().fg(BORDER),
            active_dot: Style::default().fg(SUBDUED),
            inactive_dot: Style::default().fg(VERY_SUBDUED),
        }
    }
}
