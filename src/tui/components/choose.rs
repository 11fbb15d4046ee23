//! Paginated single- or multi-selection list.
//!
//! The selection logic lives in [`ChooseState`], a plain state machine driven
//! by [`ChooseEvent`]s. [`Choose`] wraps it with a crossterm event loop and a
//! ratatui view.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::PromptResult;
use crate::{
    error::HookError,
    tui::{TerminalApp, theme::Theme},
};

/// Rows shown per page.
pub const PAGE_SIZE: usize = 10;

/// Input understood by [`ChooseState::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChooseEvent {
    Up,
    Down,
    /// Previous page
    Left,
    /// Next page
    Right,
    /// Select or unselect the item under the cursor
    Toggle,
    SelectAll,
    DeselectAll,
    Confirm,
    Cancel,
    ToggleHelp,
}

impl ChooseEvent {
    /// Maps a key press to a widget event.
    #[must_use]
    pub fn from_key(key: &KeyEvent) -> Option<Self> {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Self::Cancel)
            }
            KeyCode::Up | KeyCode::Char('k') => Some(Self::Up),
            KeyCode::Down | KeyCode::Char('j') => Some(Self::Down),
            KeyCode::Left | KeyCode::Char('h') | KeyCode::PageUp => Some(Self::Left),
            KeyCode::Right | KeyCode::Char('l') | KeyCode::PageDown => Some(Self::Right),
            KeyCode::Enter => Some(Self::Confirm),
            KeyCode::Char(' ' | 'x') | KeyCode::Tab => Some(Self::Toggle),
            KeyCode::Char('a') => Some(Self::SelectAll),
            KeyCode::Char('A') => Some(Self::DeselectAll),
            KeyCode::Char('?') => Some(Self::ToggleHelp),
            KeyCode::Char('q') | KeyCode::Esc => Some(Self::Cancel),
            _ => None,
        }
    }
}

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChooseOutcome {
    /// Indices of the chosen options, in selection order for multi-select.
    Confirmed(Vec<usize>),
    Cancelled,
}

/// Page bookkeeping for the visible slice of the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    pub page: usize,
    pub per_page: usize,
    pub total_pages: usize,
}

impl Paginator {
    fn new(per_page: usize, len: usize) -> Self {
        let per_page = per_page.max(1);
        Self {
            page: 0,
            per_page,
            total_pages: len.div_ceil(per_page).max(1),
        }
    }

    /// `[start, end)` of the current page within a list of `len` items.
    #[must_use]
    pub fn bounds(&self, len: usize) -> (usize, usize) {
        let start = self.page.saturating_mul(self.per_page).min(len);
        let end = start.saturating_add(self.per_page).min(len);
        (start, end)
    }

    #[must_use]
    pub fn items_on_page(&self, len: usize) -> usize {
        let (start, end) = self.bounds(len);
        end.saturating_sub(start)
    }

    fn next_page(&mut self) {
        if self.page.saturating_add(1) < self.total_pages {
            self.page = self.page.saturating_add(1);
        }
    }

    fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1);
    }

    fn last_page(&self) -> usize {
        self.total_pages.saturating_sub(1)
    }
}

#[derive(Debug, Clone)]
struct ChoiceItem {
    text: String,
    selected: bool,
    order: usize,
}

/// Selection state of one choose session.
#[derive(Debug, Clone)]
pub struct ChooseState {
    items: Vec<ChoiceItem>,
    index: usize,
    limit: usize,
    num_selected: usize,
    current_order: usize,
    paginator: Paginator,
    show_help: bool,
    cancelled: bool,
    finished: bool,
}

impl ChooseState {
    /// Starts a session over `options`.
    ///
    /// A `limit` of 0 allows every option. A larger limit is kept as given,
    /// so a single option offered with limit 2 is still multi-select.
    pub fn new<I, S>(options: I, limit: usize) -> Result<Self, HookError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items: Vec<ChoiceItem> = options
            .into_iter()
            .enumerate()
            .map(|(order, text)| ChoiceItem {
                text: text.into(),
                selected: false,
                order,
            })
            .collect();

        if items.is_empty() {
            return Err(HookError::NoOptions);
        }

        let limit = if limit == 0 { items.len() } else { limit };

        Ok(Self {
            paginator: Paginator::new(PAGE_SIZE, items.len()),
            items,
            index: 0,
            limit,
            num_selected: 0,
            current_order: 0,
            show_help: false,
            cancelled: false,
            finished: false,
        })
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit
    }

    #[must_use]
    pub fn is_multi(&self) -> bool {
        self.limit > 1
    }

    #[must_use]
    pub fn num_selected(&self) -> usize {
        self.num_selected
    }

    #[must_use]
    pub fn paginator(&self) -> Paginator {
        self.paginator
    }

    #[must_use]
    pub fn show_help(&self) -> bool {
        self.show_help
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    #[must_use]
    pub fn is_selected(&self, idx: usize) -> bool {
        self.items.get(idx).is_some_and(|item| item.selected)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items on the current page as `(index, text, selected)`.
    pub fn visible(&self) -> impl Iterator<Item = (usize, &str, bool)> {
        let (start, end) = self.paginator.bounds(self.items.len());
        self.items
            .get(start..end)
            .unwrap_or_default()
            .iter()
            .enumerate()
            .map(move |(offset, item)| {
                (start.saturating_add(offset), item.text.as_str(), item.selected)
            })
    }

    /// Applies one event. Returns the outcome once the session terminates;
    /// later events are ignored.
    pub fn update(&mut self, event: ChooseEvent) -> Option<ChooseOutcome> {
        if self.finished {
            return None;
        }

        match event {
            ChooseEvent::Down => self.cursor_down(),
            ChooseEvent::Up => self.cursor_up(),
            ChooseEvent::Right => {
                self.index = self
                    .index
                    .saturating_add(self.paginator.per_page)
                    .min(self.last_index());
                self.paginator.next_page();
            }
            ChooseEvent::Left => {
                self.index = self.index.saturating_sub(self.paginator.per_page);
                self.paginator.prev_page();
            }
            ChooseEvent::SelectAll => self.select_all(),
            ChooseEvent::DeselectAll => self.deselect_all(),
            ChooseEvent::Toggle => self.toggle(),
            ChooseEvent::ToggleHelp => self.show_help = !self.show_help,
            ChooseEvent::Confirm => {
                if self.num_selected == 0 {
                    self.select(self.index);
                }
                self.finished = true;
                return Some(ChooseOutcome::Confirmed(self.selection()));
            }
            ChooseEvent::Cancel => {
                self.cancelled = true;
                self.finished = true;
                return Some(ChooseOutcome::Cancelled);
            }
        }

        None
    }

    fn last_index(&self) -> usize {
        self.items.len().saturating_sub(1)
    }

    fn cursor_down(&mut self) {
        let (_, end) = self.paginator.bounds(self.items.len());

        if self.index >= self.last_index() {
            self.index = 0;
            self.paginator.page = 0;
        } else {
            self.index = self.index.saturating_add(1);
        }

        if self.index >= end {
            self.paginator.next_page();
        }
    }

    fn cursor_up(&mut self) {
        let (start, _) = self.paginator.bounds(self.items.len());

        if self.index == 0 {
            self.index = self.last_index();
            self.paginator.page = self.paginator.last_page();
        } else {
            self.index = self.index.saturating_sub(1);
        }

        if self.index < start {
            self.paginator.prev_page();
        }
    }

    fn select(&mut self, idx: usize) {
        let Some(item) = self.items.get_mut(idx) else {
            return;
        };
        if !item.selected {
            item.selected = true;
            item.order = self.current_order;
            self.num_selected = self.num_selected.saturating_add(1);
            self.current_order = self.current_order.saturating_add(1);
        }
    }

    fn toggle(&mut self) {
        if !self.is_multi() {
            return;
        }

        let selected = self.is_selected(self.index);
        if selected {
            if let Some(item) = self.items.get_mut(self.index) {
                item.selected = false;
                self.num_selected = self.num_selected.saturating_sub(1);
            }
        } else if self.num_selected < self.limit {
            self.select(self.index);
        }
    }

    fn select_all(&mut self) {
        if !self.is_multi() {
            return;
        }

        // stops quietly once the limit is reached
        for idx in 0..self.items.len() {
            if self.num_selected >= self.limit {
                break;
            }
            self.select(idx);
        }
    }

    fn deselect_all(&mut self) {
        if !self.is_multi() {
            return;
        }

        for item in &mut self.items {
            item.selected = false;
            item.order = 0;
        }
        self.num_selected = 0;
        self.current_order = 0;
    }

    /// Selected indices; in selection order when multi-select.
    fn selection(&self) -> Vec<usize> {
        let mut selected: Vec<(usize, usize)> = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.selected)
            .map(|(idx, item)| (item.order, idx))
            .collect();

        if self.is_multi() {
            selected.sort_by_key(|&(order, _)| order);
        }

        selected.into_iter().map(|(_, idx)| idx).collect()
    }
}

/// An option offered by [`Choose`].
#[derive(Debug, Clone)]
pub struct ChooseItem<T> {
    /// The value returned when this item is chosen
    pub value: T,
    /// The label displayed to the user
    pub label: String,
}

impl<T> ChooseItem<T> {
    #[must_use]
    pub fn new(value: T, label: impl Into<String>) -> Self {
        Self {
            value,
            label: label.into(),
        }
    }
}

/// Interactive list prompt.
pub struct Choose<'a, T> {
    title: &'a str,
    items: Vec<ChooseItem<T>>,
    limit: usize,
    theme: Theme,
}

impl<'a, T> Choose<'a, T> {
    /// Creates a prompt; `limit` 0 means no limit, 1 means single choice.
    #[must_use]
    pub fn new(title: &'a str, items: Vec<ChooseItem<T>>, limit: usize) -> Self {
        Self {
            title,
            items,
            limit,
            theme: Theme::default(),
        }
    }

    /// Starts a fresh selection state for this prompt's items.
    pub fn state(&self) -> Result<ChooseState, HookError> {
        ChooseState::new(self.items.iter().map(|item| item.label.clone()), self.limit)
    }

    /// Runs the prompt and returns the chosen values.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(values))` - User confirmed; values are in selection order
    /// - `Ok(None)` - User cancelled
    /// - `Err(_)` - No items, or a terminal error occurred
    pub fn prompt(self) -> PromptResult<Vec<T>> {
        let mut state = self.state()?;
        let mut app = TerminalApp::new()?;

        loop {
            app.terminal().draw(|frame| {
                self.render(frame, &state);
            })?;

            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            let Some(choose_event) = ChooseEvent::from_key(&key) else {
                continue;
            };

            match state.update(choose_event) {
                Some(ChooseOutcome::Confirmed(indices)) => {
                    return Ok(Some(take_in_order(self.items, &indices)));
                }
                Some(ChooseOutcome::Cancelled) => return Ok(None),
                None => {}
            }
        }
    }

    #[allow(
        clippy::indexing_slicing,
        clippy::arithmetic_side_effects,
        clippy::cast_possible_truncation
    )]
    pub(crate) fn render(&self, frame: &mut Frame, state: &ChooseState) {
        let paginator = state.paginator();
        let rows = paginator.per_page.min(state.len()) as u16;
        let pager_rows: u16 = if paginator.total_pages > 1 { 1 } else { 0 };
        let help_lines = help_lines(state);
        let help_rows = help_lines.len() as u16;

        // rows + border + pager + help
        let wanted = rows + 2 + pager_rows + help_rows;
        let height = wanted.min(frame.area().height);
        let area = centered_rect(60, height, frame.area());

        frame.render_widget(Clear, area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border)
            .title(Span::styled(self.title, self.theme.title));

        let inner_area = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::vertical([
            Constraint::Min(1),
            Constraint::Length(pager_rows),
            Constraint::Length(help_rows),
        ])
        .split(inner_area);

        let lines: Vec<Line> = state
            .visible()
            .map(|(idx, text, selected)| self.item_line(state, idx, text, selected))
            .collect();
        frame.render_widget(Paragraph::new(lines), chunks[0]);

        if pager_rows > 0 {
            let dots: Vec<Span> = (0..paginator.total_pages)
                .map(|page| {
                    let style = if page == paginator.page {
                        self.theme.active_dot
                    } else {
                        self.theme.inactive_dot
                    };
                    Span::styled("•", style)
                })
                .collect();
            let mut pager = vec![Span::raw("  ")];
            pager.extend(dots);
            frame.render_widget(Line::from(pager), chunks[1]);
        }

        let help: Vec<Line> = help_lines
            .into_iter()
            .map(|text| Line::from(Span::styled(text, self.theme.help)))
            .collect();
        frame.render_widget(Paragraph::new(help), chunks[2]);
    }

    fn item_line<'t>(
        &self,
        state: &ChooseState,
        idx: usize,
        text: &'t str,
        selected: bool,
    ) -> Line<'t> {
        let is_cursor = idx == state.index();
        let cursor = if is_cursor {
            Span::styled("> ", self.theme.cursor)
        } else {
            Span::raw("  ")
        };

        let label = if state.is_multi() {
            let checkbox = if selected { "[x] " } else { "[ ] " };
            format!("{checkbox}{text}")
        } else {
            text.to_string()
        };

        let style = if selected {
            self.theme.selected
        } else if is_cursor {
            self.theme.cursor
        } else {
            self.theme.unselected
        };

        Line::from(vec![cursor, Span::styled(label, style)])
    }
}

fn help_lines(state: &ChooseState) -> Vec<&'static str> {
    if !state.show_help() {
        return vec!["enter confirm · ? more keys · q quit"];
    }

    let mut lines = vec!["↑/k up · ↓/j down · ←/h prev page · →/l next page"];
    if state.is_multi() {
        lines.push("space/tab/x select · a select all · A deselect all");
    }
    lines.push("enter confirm · ? less · q/esc quit");
    lines
}

/// Moves the values at `indices` out of `items`, in the order given.
fn take_in_order<T>(items: Vec<ChooseItem<T>>, indices: &[usize]) -> Vec<T> {
    let mut values: Vec<Option<T>> = items.into_iter().map(|item| Some(item.value)).collect();
    indices
        .iter()
        .filter_map(|&idx| values.get_mut(idx).and_then(Option::take))
        .collect()
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

#[cfg(test)]
#[path = "choose_tests.rs"]
mod tests;
