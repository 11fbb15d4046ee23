//! REST access to repository webhooks.

mod client;
mod events;
mod hooks;

pub use client::RestClient;
pub use events::{fetch_events, get_events};
pub use hooks::{ContentType, Hook, HookClient, HookConfig, InsecureSsl};
