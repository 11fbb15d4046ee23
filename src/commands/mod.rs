//! The `list`, `create` and `delete` subcommands.

mod create;
mod delete;
mod list;

use std::io::Read;

use anyhow::Result;

use crate::{error::HookError, github::Hook};

pub use create::{CreateArgs, create, create_from_reader};
pub use delete::{delete, delete_hooks};
pub use list::list;

/// Longest event summary shown before it is cut off.
const MAX_EVENTS_LEN: usize = 23;

/// One line per hook: `"{mark} {id} - {url} ({events})"`.
///
/// `mark` is `✓` for an active hook and `•` otherwise.
#[must_use]
pub fn format_hook_choices(hooks: &[Hook]) -> Vec<String> {
    hooks.iter().map(format_hook_choice).collect()
}

fn format_hook_choice(hook: &Hook) -> String {
    let mark = if hook.active { "✓" } else { "•" };

    let mut events = hook.events.join(", ");
    if events.chars().count() > MAX_EVENTS_LEN {
        events = events.chars().take(MAX_EVENTS_LEN).collect();
        events.push('…');
    }

    format!("{mark} {hook} ({events})")
}

/// Parses a hook definition from JSON.
pub fn hook_from_input<R: Read>(reader: R) -> Result<Hook> {
    let hook: Hook = serde_json::from_reader(reader)
        .map_err(|e| HookError::InvalidInput(e.to_string()))?;
    Ok(hook)
}
