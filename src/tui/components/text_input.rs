//! Single-line text input with optional masking and validation.

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use tui_input::{Input, backend::crossterm::EventHandler};

use super::{PromptResult, ValidationResult};
use crate::tui::{TerminalApp, theme::Theme};

/// Shown while the input is empty.
pub const PLACEHOLDER: &str = "Type something...";

const MASK_CHAR: char = '•';

/// A text input prompt with optional validation.
pub struct TextInput<'a, V>
where
    V: Fn(&str) -> ValidationResult,
{
    title: &'a str,
    mask: bool,
    validator: Option<V>,
    theme: Theme,
}

impl<'a> TextInput<'a, fn(&str) -> ValidationResult> {
    /// Creates a new text input prompt with the given title.
    #[must_use]
    pub fn new(title: &'a str) -> Self {
        Self {
            title,
            mask: false,
            validator: None,
            theme: Theme::default(),
        }
    }
}

impl<'a, V> TextInput<'a, V>
where
    V: Fn(&str) -> ValidationResult,
{
    /// Hides the typed characters.
    #[must_use]
    pub fn masked(mut self, mask: bool) -> Self {
        self.mask = mask;
        self
    }

    /// Sets the validator function for the input.
    #[must_use]
    pub fn with_validator<NewV>(self, validator: NewV) -> TextInput<'a, NewV>
    where
        NewV: Fn(&str) -> ValidationResult,
    {
        TextInput {
            title: self.title,
            mask: self.mask,
            validator: Some(validator),
            theme: self.theme,
        }
    }

    /// Runs the text input prompt and returns the user's input.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(text))` - User submitted text
    /// - `Ok(None)` - User cancelled with Escape or Ctrl+C
    /// - `Err(_)` - Terminal error occurred
    pub fn prompt(self) -> PromptResult<String> {
        let mut app = TerminalApp::new()?;
        let mut input = Input::default();
        let mut error_message: Option<String> = None;

        loop {
            app.terminal().draw(|frame| {
                self.render(frame, &input, error_message.as_deref());
            })?;

            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }

            match key.code {
                KeyCode::Enter => {
                    let value = input.value().to_string();
                    match self.validator.as_ref().map(|validate| validate(&value)) {
                        Some(ValidationResult::Invalid(msg)) => error_message = Some(msg),
                        Some(ValidationResult::Valid) | None => return Ok(Some(value)),
                    }
                }
                KeyCode::Esc => return Ok(None),
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(None);
                }
                _ => {
                    input.handle_event(&Event::Key(key));
                    error_message = None;
                }
            }
        }
    }

    #[allow(
        clippy::indexing_slicing,
        clippy::arithmetic_side_effects,
        clippy::cast_possible_truncation
    )]
    pub(crate) fn render(&self, frame: &mut Frame, input: &Input, error_message: Option<&str>) {
        let area = centered_rect(60, 8, frame.area());

        frame.render_widget(Clear, area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border);

        let inner_area = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner_area);

        let title_line = Line::from(Span::styled(self.title, self.theme.title));
        frame.render_widget(Paragraph::new(title_line), chunks[0]);

        let cursor = if self.mask {
            input.cursor()
        } else {
            input.visual_cursor()
        };
        let input_width = chunks[1].width.saturating_sub(2);
        let scroll = calculate_scroll(cursor, input_width as usize);

        let text = if input.value().is_empty() {
            Line::from(Span::styled(PLACEHOLDER, self.theme.placeholder))
        } else {
            Line::from(display_value(input.value(), self.mask))
        };

        let input_widget = Paragraph::new(text).scroll((0, scroll as u16)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(self.theme.border),
        );
        frame.render_widget(input_widget, chunks[1]);

        let cursor_x = chunks[1].x + 1 + (cursor - scroll) as u16;
        let cursor_y = chunks[1].y + 1;
        frame.set_cursor_position((cursor_x, cursor_y));

        let help_line = match error_message {
            Some(err) => Line::from(Span::styled(err, self.theme.error)),
            None => Line::from(Span::styled(
                "enter submit · esc cancel",
                self.theme.help,
            )),
        };
        frame.render_widget(Paragraph::new(help_line), chunks[2]);
    }
}

/// What the input box shows for `value`.
fn display_value(value: &str, mask: bool) -> String {
    if mask {
        value.chars().map(|_| MASK_CHAR).collect()
    } else {
        value.to_string()
    }
}

fn calculate_scroll(cursor: usize, width: usize) -> usize {
    if cursor >= width {
        cursor.saturating_sub(width).saturating_add(1)
    } else {
        0
    }
}

#[allow(clippy::indexing_slicing, clippy::arithmetic_side_effects)]
fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .split(area);

    let horizontal = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(vertical[1]);

    horizontal[1]
}
