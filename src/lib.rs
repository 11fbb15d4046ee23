mod commands;
mod common;
pub mod config;
mod default;
mod error;
pub mod github;
mod logging;
mod repository;
pub mod tui;

pub use commands::{
    CreateArgs, create, create_from_reader, delete, delete_hooks, format_hook_choices,
    hook_from_input, list,
};
pub use common::{PROJECT_NAME, PROJECT_VERSION, print_header};
pub use default::known_events;
pub use error::HookError;
pub use logging::Logging;
pub use repository::{Repository, resolve as resolve_repository};
