use std::sync::LazyLock;

use anyhow::anyhow;
use rust_embed::Embed;
use serde_json::Value;

#[derive(Embed)]
#[folder = "resources/"]
#[include = "defaults.json"]
struct Assets;

#[allow(clippy::expect_used)]
static DEFAULTS: LazyLock<Value> = LazyLock::new(|| {
    let file = Assets::get("defaults.json").expect("defaults.json embedded");
    serde_json::from_slice(&file.data).expect("valid defaults.json")
});

#[allow(clippy::expect_used)]
pub fn get_embedded_default(name: &'static str) -> String {
    DEFAULTS
        .get(name)
        .and_then(Value::as_str)
        .map(String::from)
        .ok_or_else(|| anyhow!("missing default: {name}"))
        .expect("embedded default should exist")
}

/// Repository webhook events known at build time.
///
/// Events that only exist for organizations or apps (`installation`,
/// `membership`, `team`, ...) are left out.
pub fn known_events() -> Vec<String> {
    DEFAULTS
        .get("known_events")
        .and_then(Value::as_array)
        .map(|events| {
            events
                .iter()
                .filter_map(Value::as_str)
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}
