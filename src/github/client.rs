//! Minimal synchronous REST client for the GitHub API.

use anyhow::{Context, Result};
use log::{debug, info, warn};
use minreq::{Method, Request, Response};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{common::user_agent, config::Config, error::HookError};

pub(crate) const REQUEST_TIMEOUT_SECS: u64 = 30;
const API_VERSION: &str = "2022-11-28";

#[derive(Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// An authenticated client bound to a single API base URL.
#[derive(Clone)]
pub struct RestClient {
    base_url: String,
    token: Option<String>,
}

impl std::fmt::Debug for RestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClient")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.token.is_some())
            .finish()
    }
}

impl RestClient {
    #[must_use]
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, token }
    }

    /// Builds a client for `host` using the configured API URL and token.
    #[must_use]
    pub fn for_host(host: &str, config: &Config) -> Self {
        let token = config.token_for_host(host);
        if token.is_none() {
            warn!("No token found for {host}; requests will be unauthenticated");
        }
        Self::new(config.api_url_for_host(host), token)
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> Request {
        let request = Request::new(method, self.url(path))
            .with_header("User-Agent", user_agent())
            .with_header("Accept", "application/vnd.github+json")
            .with_header("X-GitHub-Api-Version", API_VERSION)
            .with_timeout(REQUEST_TIMEOUT_SECS);

        match &self.token {
            Some(token) => request.with_header("Authorization", format!("token {token}")),
            None => request,
        }
    }

    fn send(&self, request: Request, method: &str, path: &str) -> Result<Response> {
        let url = self.url(path);
        debug!("{method} {url}");

        let response = request
            .send()
            .with_context(|| format!("Failed to connect to {url}"))?;

        info!("{method} {url} -> {}", response.status_code);

        check_status(response)
    }

    /// GETs `path` and decodes the JSON body; an empty body yields `T::default()`.
    pub fn get<T>(&self, path: &str) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        let response = self.send(self.request(Method::Get, path), "GET", path)?;

        if response.as_bytes().is_empty() {
            return Ok(T::default());
        }

        response
            .json()
            .with_context(|| format!("Invalid JSON response from {}", self.url(path)))
    }

    /// POSTs `body` as JSON to `path` and decodes the JSON response.
    pub fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize,
        T: DeserializeOwned + Default,
    {
        let request = self
            .request(Method::Post, path)
            .with_json(body)
            .context("Failed to serialize request body")?;

        let response = self.send(request, "POST", path)?;

        if response.as_bytes().is_empty() {
            return Ok(T::default());
        }

        response
            .json()
            .with_context(|| format!("Invalid JSON response from {}", self.url(path)))
    }

    pub fn delete(&self, path: &str) -> Result<()> {
        self.send(self.request(Method::Delete, path), "DELETE", path)?;
        Ok(())
    }
}

/// Turns non-2xx responses into [`HookError::Http`].
fn check_status(response: Response) -> Result<Response> {
    if (200..300).contains(&response.status_code) {
        return Ok(response);
    }

    let message = serde_json::from_slice::<ApiErrorBody>(response.as_bytes())
        .map(|body| body.message)
        .unwrap_or_else(|_| response.reason_phrase.clone());

    Err(HookError::Http {
        status: response.status_code,
        message,
    }
    .into())
}
