//! Terminal prompts built on ratatui.
//!
//! - `TextInput` - Single-line input, optionally masked and validated
//! - `Choose` - Paginated single or multiple selection

mod app;
pub mod components;
mod prompts;
mod theme;

pub use app::TerminalApp;
pub use components::{PromptResult, ValidationResult};
pub use prompts::{choose, choose_many, choose_many_items, choose_one, input, input_with_validator};
pub use theme::Theme;
