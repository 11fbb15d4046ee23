//! Repository webhooks: the `Hook` record and the calls that manage it.

use std::fmt;

use anyhow::{Context, Result};
use bon::Builder;
use derive_more::Display;
use log::info;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::client::RestClient;
use crate::repository::Repository;

/// Payload format GitHub uses when delivering events.
#[derive(Debug, Display, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    #[default]
    #[display("json")]
    Json,
    #[display("form")]
    Form,
}

impl ContentType {
    pub const ALL: [ContentType; 2] = [ContentType::Json, ContentType::Form];
}

/// Whether TLS certificates are verified on delivery.
///
/// On the wire this is the string `"0"` (verify) or `"1"` (skip).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum InsecureSsl {
    #[default]
    Verify,
    Skip,
}

impl InsecureSsl {
    fn as_wire(self) -> &'static str {
        match self {
            Self::Verify => "0",
            Self::Skip => "1",
        }
    }
}

impl From<bool> for InsecureSsl {
    fn from(insecure: bool) -> Self {
        if insecure { Self::Skip } else { Self::Verify }
    }
}

impl Serialize for InsecureSsl {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_wire())
    }
}

impl<'de> Deserialize<'de> for InsecureSsl {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // the API has been seen answering with both "0" and 0
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::String(s) if s == "0" => Ok(Self::Verify),
            serde_json::Value::String(s) if s == "1" => Ok(Self::Skip),
            serde_json::Value::Number(n) if n.as_u64() == Some(0) => Ok(Self::Verify),
            serde_json::Value::Number(n) if n.as_u64() == Some(1) => Ok(Self::Skip),
            other => Err(serde::de::Error::custom(format!(
                "insecure_ssl must be \"0\" or \"1\", got {other}"
            ))),
        }
    }
}

/// Delivery configuration of a hook.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
pub struct HookConfig {
    #[builder(into)]
    pub url: String,
    #[serde(default)]
    #[builder(default)]
    pub content_type: ContentType,
    #[serde(default)]
    #[builder(default)]
    pub insecure_ssl: InsecureSsl,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub secret: Option<String>,
}

/// A webhook registered on a repository.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
pub struct Hook {
    /// Assigned by the server; absent on create requests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default = "default_hook_name")]
    #[builder(default = default_hook_name(), into)]
    pub name: String,
    #[serde(default)]
    #[builder(default)]
    pub active: bool,
    #[serde(default)]
    #[builder(default)]
    pub events: Vec<String>,
    pub config: HookConfig,
}

/// Repository webhooks are always named "web".
pub(crate) fn default_hook_name() -> String {
    "web".to_string()
}

impl Hook {
    /// Copy of the hook suitable for a create request (no id).
    #[must_use]
    pub fn without_id(&self) -> Self {
        Self {
            id: None,
            ..self.clone()
        }
    }
}

impl fmt::Display for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "{id} - {}", self.config.url),
            None => write!(f, "{}", self.config.url),
        }
    }
}

fn hooks_path(repo: &Repository) -> String {
    format!(
        "repos/{}/{}/hooks",
        urlencoding::encode(&repo.owner),
        urlencoding::encode(&repo.name)
    )
}

/// Webhook operations for one API host.
pub struct HookClient {
    client: RestClient,
}

impl HookClient {
    #[must_use]
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }

    pub fn list(&self, repo: &Repository) -> Result<Vec<Hook>> {
        let hooks: Vec<Hook> = self
            .client
            .get(&hooks_path(repo))
            .with_context(|| format!("Failed to list webhooks for {repo}"))?;

        info!("{repo} has {} webhooks", hooks.len());

        Ok(hooks)
    }

    /// Registers `hook` and returns the server's copy of it.
    pub fn create(&self, repo: &Repository, hook: &Hook) -> Result<Hook> {
        let created: Hook = self
            .client
            .post(&hooks_path(repo), &hook.without_id())
            .with_context(|| format!("Failed to create webhook for {repo}"))?;

        info!("created webhook {created} on {repo}");

        Ok(created)
    }

    pub fn delete(&self, repo: &Repository, id: u64) -> Result<()> {
        self.client
            .delete(&format!("{}/{id}", hooks_path(repo)))
            .with_context(|| format!("Failed to delete webhook {id} from {repo}"))?;

        info!("deleted webhook {id} from {repo}");

        Ok(())
    }

    /// Deletes `ids` in order, stopping at the first failure.
    ///
    /// Hooks deleted before the failure stay deleted.
    pub fn delete_all<F>(&self, repo: &Repository, ids: &[u64], mut on_delete: F) -> Result<()>
    where
        F: FnMut(u64),
    {
        for &id in ids {
            on_delete(id);
            self.delete(repo, id)?;
        }
        Ok(())
    }
}
