//! Catalogue of webhook event names offered when creating a hook.

use anyhow::{Context, Result, bail};
use log::info;
use serde::Deserialize;

use super::client::REQUEST_TIMEOUT_SECS;
use crate::{
    common::user_agent,
    default::{get_embedded_default, known_events},
};

#[derive(Deserialize)]
struct Event {
    name: String,
}

/// Event names to offer: the published catalogue when `refresh` is set,
/// otherwise the list embedded at build time.
pub fn get_events(refresh: bool) -> Result<Vec<String>> {
    if refresh {
        fetch_events(&get_embedded_default("events_url"))
    } else {
        Ok(known_events())
    }
}

/// Downloads the event catalogue at `url` and returns the event names.
pub fn fetch_events(url: &str) -> Result<Vec<String>> {
    info!("Fetching event catalogue from {url}");

    let response = minreq::get(url)
        .with_header("User-Agent", user_agent())
        .with_header("Accept", "application/json")
        .with_timeout(REQUEST_TIMEOUT_SECS)
        .send()
        .with_context(|| format!("Failed to fetch event list from {url}"))?;

    if response.status_code != 200 {
        bail!(
            "Failed to fetch event list from {url}: HTTP {} {}",
            response.status_code,
            response.reason_phrase
        );
    }

    let events: Vec<Event> = response
        .json()
        .context("Event list is not valid JSON")?;

    Ok(events.into_iter().map(|e| e.name).collect())
}
