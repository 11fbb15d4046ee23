use std::{collections::BTreeMap, env, fs, path::Path};

use anyhow::{Context, Result};
use bon::Builder;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::{common::project_config_dir, default::get_embedded_default};

pub(crate) const CONFIG_FILE_NAME: &str = "config.json";

/// Environment variables consulted for a github.com token, in order.
const GITHUB_TOKEN_VARS: [&str; 2] = ["GH_TOKEN", "GITHUB_TOKEN"];
/// Environment variables consulted for any other host, in order.
const ENTERPRISE_TOKEN_VARS: [&str; 2] = ["GH_ENTERPRISE_TOKEN", "GITHUB_ENTERPRISE_TOKEN"];

/// Per-host settings.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
pub struct HostConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub oauth_token: Option<String>,
    /// Base URL of the REST API when it does not follow the usual layout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub api_url: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub hosts: BTreeMap<String, HostConfig>,
}

impl Config {
    pub(crate) fn load_existing(config_file: &Path) -> Result<Self> {
        let config_string = fs::read_to_string(config_file)
            .with_context(|| format!("Unable to read {}", config_file.display()))?;

        let config: Config = serde_json::from_str(&config_string)
            .context("Unable to deserialize configuration data")?;

        Ok(config)
    }

    pub fn load() -> Result<Self> {
        let config_dir = project_config_dir()?;
        let config_file = config_dir.join(CONFIG_FILE_NAME);

        if config_file.exists() {
            info!("Loading configuration from {}", config_file.display());
            Config::load_existing(&config_file)
        } else {
            //
            // no file means environment-only configuration
            //
            debug!("No configuration at {}", config_file.display());
            Ok(Config::default())
        }
    }

    fn host(&self, host: &str) -> Option<&HostConfig> {
        self.hosts.get(&host.to_ascii_lowercase())
    }

    /// Resolves the token for `host`, environment first, then the config file.
    pub fn token_for_host(&self, host: &str) -> Option<String> {
        self.token_for_host_with(host, |name| env::var(name).ok())
    }

    pub(crate) fn token_for_host_with<F>(&self, host: &str, lookup: F) -> Option<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars: &[&str] = if is_github_host(host) {
            &GITHUB_TOKEN_VARS
        } else {
            &ENTERPRISE_TOKEN_VARS
        };

        vars.iter()
            .filter_map(|name| lookup(name))
            .find(|token| !token.is_empty())
            .or_else(|| {
                self.host(host)
                    .and_then(|h| h.oauth_token.clone())
                    .filter(|token| !token.is_empty())
            })
    }

    /// Base URL of the REST API serving `host`, without a trailing slash.
    pub fn api_url_for_host(&self, host: &str) -> String {
        if let Some(api_url) = self.host(host).and_then(|h| h.api_url.as_deref()) {
            return api_url.trim_end_matches('/').to_string();
        }

        if is_github_host(host) {
            get_embedded_default("github_api_url")
        } else {
            format!("https://{}/api/v3", host.to_ascii_lowercase())
        }
    }
}

/// Host used for `OWNER/REPO` shorthand: `GH_HOST`, else github.com.
pub fn default_host() -> String {
    env::var("GH_HOST")
        .ok()
        .filter(|h| !h.is_empty())
        .unwrap_or_else(|| get_embedded_default("github_host"))
}

pub(crate) fn is_github_host(host: &str) -> bool {
    let host = host.to_ascii_lowercase();
    host == get_embedded_default("github_host") || host == "www.github.com"
}
