//! High-level prompt functions used by the commands.
//!
//! Unlike the widgets, these turn a cancelled prompt into
//! [`HookError::Cancelled`] so callers can simply use `?`.

use anyhow::{Result, bail};

use super::components::{Choose, ChooseItem, TextInput, ValidationResult};
use crate::error::HookError;

/// Reads one line of text.
///
/// # Arguments
///
/// * `mask` - Hide the typed characters (secrets)
/// * `prompt` - Label shown above the input
pub fn input(mask: bool, prompt: &str) -> Result<String> {
    TextInput::new(prompt)
        .masked(mask)
        .prompt()?
        .ok_or_else(|| HookError::Cancelled.into())
}

/// Like [`input`], but keeps asking until `validator` accepts the value.
///
/// # Example
///
/// ```ignore
/// let url = input_with_validator(false, "Webhook URL", |s: &str| {
///     if s.is_empty() {
///         ValidationResult::Invalid("URL cannot be empty".into())
///     } else {
///         ValidationResult::Valid
///     }
/// })?;
/// ```
pub fn input_with_validator<V>(mask: bool, prompt: &str, validator: V) -> Result<String>
where
    V: Fn(&str) -> ValidationResult,
{
    TextInput::new(prompt)
        .masked(mask)
        .with_validator(validator)
        .prompt()?
        .ok_or_else(|| HookError::Cancelled.into())
}

/// Lets the user pick up to `limit` of `options` (0 means any number).
///
/// Returns the chosen strings in the order they were selected.
pub fn choose<S>(title: &str, options: &[S], limit: usize) -> Result<Vec<String>>
where
    S: AsRef<str>,
{
    let items = options
        .iter()
        .map(|option| ChooseItem::new(option.as_ref().to_string(), option.as_ref()))
        .collect();
    choose_items(title, items, limit)
}

/// Single choice out of `options`.
pub fn choose_one<S>(title: &str, options: &[S]) -> Result<String>
where
    S: AsRef<str>,
{
    match choose(title, options, 1)?.into_iter().next() {
        Some(choice) => Ok(choice),
        None => bail!("no option was selected"),
    }
}

/// Any number of `options`, at least one.
pub fn choose_many<S>(title: &str, options: &[S]) -> Result<Vec<String>>
where
    S: AsRef<str>,
{
    let chosen = choose(title, options, 0)?;
    if chosen.is_empty() {
        bail!("no options were selected");
    }
    Ok(chosen)
}

/// Any number of labelled values, returned in selection order.
pub fn choose_many_items<T>(title: &str, items: Vec<ChooseItem<T>>) -> Result<Vec<T>> {
    choose_items(title, items, 0)
}

fn choose_items<T>(title: &str, items: Vec<ChooseItem<T>>, limit: usize) -> Result<Vec<T>> {
    Choose::new(title, items, limit)
        .prompt()?
        .ok_or_else(|| HookError::Cancelled.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    // The empty-list check runs before the terminal is touched, so these are
    // safe without a tty.

    #[test]
    fn test_choose_empty_is_no_options() {
        let err = choose::<&str>("Pick", &[], 0).unwrap_err();
        assert_eq!(err.downcast_ref::<HookError>(), Some(&HookError::NoOptions));
    }

    #[test]
    fn test_choose_many_items_empty_is_no_options() {
        let err = choose_many_items::<u64>("Hooks", Vec::new()).unwrap_err();
        assert_eq!(err.downcast_ref::<HookError>(), Some(&HookError::NoOptions));
    }
}
