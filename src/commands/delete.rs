use std::io::Write;

use anyhow::{Context, Result};

use super::format_hook_choices;
use crate::{
    github::HookClient,
    repository::Repository,
    tui::{choose_many_items, components::ChooseItem},
};

/// Lets the user pick webhooks on `repo` and deletes them.
pub fn delete<W: Write>(client: &HookClient, repo: &Repository, out: &mut W) -> Result<()> {
    let hooks = client.list(repo)?;

    if hooks.is_empty() {
        writeln!(out, "{repo} has no webhooks")?;
        return Ok(());
    }

    let items: Vec<ChooseItem<u64>> = hooks
        .iter()
        .zip(format_hook_choices(&hooks))
        .filter_map(|(hook, label)| hook.id.map(|id| ChooseItem::new(id, label)))
        .collect();

    let ids = choose_many_items("Webhooks to delete", items).context("error choosing webhooks")?;

    delete_hooks(client, repo, &ids, out)
}

/// Deletes `ids` in order, printing each one first.
pub fn delete_hooks<W: Write>(
    client: &HookClient,
    repo: &Repository,
    ids: &[u64],
    out: &mut W,
) -> Result<()> {
    let mut write_result = Ok(());
    client.delete_all(repo, ids, |id| {
        if write_result.is_ok() {
            write_result = writeln!(out, "Deleting {id}");
        }
    })?;
    write_result?;
    Ok(())
}
