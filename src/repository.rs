//! Resolution of the repository a command operates on.

use std::{env, fmt, process::Command};

use anyhow::{Context, Result};
use log::{debug, info};

use crate::{config::default_host, error::HookError};

/// Remote names tried first, in order, when reading the current checkout.
const PREFERRED_REMOTES: [&str; 3] = ["upstream", "github", "origin"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub host: String,
    pub owner: String,
    pub name: String,
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl Repository {
    #[must_use]
    pub fn new(host: impl Into<String>, owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            host: host.into().to_ascii_lowercase(),
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Parses `OWNER/REPO`, `HOST/OWNER/REPO` or a git remote URL.
    pub fn parse(value: &str) -> Result<Self, HookError> {
        Self::parse_with_host(value, &default_host())
    }

    pub fn parse_with_host(value: &str, host: &str) -> Result<Self, HookError> {
        let value = value.trim();

        if value.contains("://") {
            return Self::from_url(value);
        }

        if let Some((prefix, path)) = value.split_once(':')
            && !prefix.contains('/')
        {
            // scp-like syntax: git@github.com:owner/repo.git
            let remote_host = prefix.rsplit('@').next().unwrap_or(prefix);
            return Self::from_parts(remote_host, path, value);
        }

        let parts: Vec<&str> = value.split('/').collect();
        match parts.as_slice() {
            [owner, name] => Self::build(host, owner, name, value),
            [remote_host, owner, name] => Self::build(remote_host, owner, name, value),
            _ => Err(invalid_format(value)),
        }
    }

    fn from_url(value: &str) -> Result<Self, HookError> {
        let parsed = url::Url::parse(value)
            .map_err(|e| HookError::Repository(format!("invalid remote URL {value}: {e}")))?;

        let host = parsed
            .host_str()
            .ok_or_else(|| HookError::Repository(format!("remote URL has no host: {value}")))?;

        Self::from_parts(host, parsed.path(), value)
    }

    fn from_parts(host: &str, path: &str, original: &str) -> Result<Self, HookError> {
        let path = path.trim_matches('/');
        let path = path.strip_suffix(".git").unwrap_or(path);

        match path.split('/').collect::<Vec<_>>().as_slice() {
            [owner, name] => Self::build(host, owner, name, original),
            _ => Err(invalid_format(original)),
        }
    }

    fn build(host: &str, owner: &str, name: &str, original: &str) -> Result<Self, HookError> {
        if host.is_empty() || owner.is_empty() || name.is_empty() {
            return Err(invalid_format(original));
        }
        Ok(Self::new(host, owner, name))
    }
}

fn invalid_format(value: &str) -> HookError {
    HookError::Repository(format!(
        "expected the \"[HOST/]OWNER/REPO\" format, got \"{value}\""
    ))
}

/// Determines the target repository.
///
/// Tries the `--repo` override, then `GH_REPO`, then the git remotes of the
/// current directory.
pub fn resolve(repo_override: Option<&str>) -> Result<Repository> {
    if let Some(value) = repo_override.filter(|v| !v.is_empty()) {
        debug!("Using repository from --repo: {value}");
        return Ok(Repository::parse(value)?);
    }

    if let Ok(value) = env::var("GH_REPO")
        && !value.is_empty()
    {
        debug!("Using repository from GH_REPO: {value}");
        return Ok(Repository::parse(&value)?);
    }

    current_repository()
}

fn current_repository() -> Result<Repository> {
    let output = Command::new("git")
        .args(["remote", "-v"])
        .output()
        .context("Unable to run git")?;

    if !output.status.success() {
        return Err(HookError::Repository("not a git repository".to_string()).into());
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let remotes = parse_remotes(&stdout);

    let (name, url) = pick_remote(&remotes)
        .ok_or_else(|| HookError::Repository("no git remotes found".to_string()))?;

    info!("Using git remote {name} ({url})");

    Ok(Repository::parse(url)?)
}

/// Parses `git remote -v` output into `(name, url)` pairs, fetch URLs only.
pub(crate) fn parse_remotes(output: &str) -> Vec<(String, String)> {
    output
        .lines()
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            let name = fields.next()?;
            let url = fields.next()?;
            match fields.next() {
                Some("(push)") => None,
                _ => Some((name.to_string(), url.to_string())),
            }
        })
        .collect()
}

pub(crate) fn pick_remote(remotes: &[(String, String)]) -> Option<&(String, String)> {
    PREFERRED_REMOTES
        .iter()
        .find_map(|preferred| remotes.iter().find(|(name, _)| name == preferred))
        .or_else(|| remotes.first())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_owner_repo() {
        let repo = Repository::parse_with_host("octocat/Hello-World", "github.com").unwrap();
        assert_eq!(repo, Repository::new("github.com", "octocat", "Hello-World"));
        assert_eq!(repo.to_string(), "octocat/Hello-World");
    }

    #[test]
    fn test_parse_host_owner_repo() {
        let repo = Repository::parse_with_host("Enterprise.com/lucasmelin/test-repo", "github.com")
            .unwrap();
        assert_eq!(repo.host, "enterprise.com");
        assert_eq!(repo.owner, "lucasmelin");
        assert_eq!(repo.name, "test-repo");
    }

    #[test]
    fn test_parse_https_url() {
        let repo =
            Repository::parse_with_host("https://github.com/octocat/Hello-World.git", "x").unwrap();
        assert_eq!(repo, Repository::new("github.com", "octocat", "Hello-World"));
    }

    #[test]
    fn test_parse_ssh_url() {
        let repo =
            Repository::parse_with_host("ssh://git@enterprise.com/team/tool.git", "x").unwrap();
        assert_eq!(repo, Repository::new("enterprise.com", "team", "tool"));
    }

    #[test]
    fn test_parse_scp_like() {
        let repo = Repository::parse_with_host("git@github.com:octocat/Hello-World.git", "x")
            .unwrap();
        assert_eq!(repo, Repository::new("github.com", "octocat", "Hello-World"));
    }

    #[test]
    fn test_parse_rejects_bad_shapes() {
        for value in ["", "octocat", "a/b/c/d", "/repo", "owner/", "https://github.com/octocat"] {
            let err = Repository::parse_with_host(value, "github.com").unwrap_err();
            assert!(
                matches!(err, HookError::Repository(_)),
                "{value} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_remotes_skips_push_lines() {
        let output = "origin\thttps://github.com/me/fork.git (fetch)\n\
                      origin\thttps://github.com/me/fork.git (push)\n\
                      upstream\tgit@github.com:octocat/Hello-World.git (fetch)\n";
        let remotes = parse_remotes(output);
        assert_eq!(remotes.len(), 2);
        assert_eq!(remotes[0].0, "origin");
        assert_eq!(remotes[1].0, "upstream");
    }

    #[test]
    fn test_pick_remote_prefers_upstream() {
        let remotes = vec![
            ("origin".to_string(), "a".to_string()),
            ("upstream".to_string(), "b".to_string()),
        ];
        assert_eq!(pick_remote(&remotes).map(|(n, _)| n.as_str()), Some("upstream"));
    }

    #[test]
    fn test_pick_remote_falls_back_to_first() {
        let remotes = vec![
            ("mirror".to_string(), "a".to_string()),
            ("backup".to_string(), "b".to_string()),
        ];
        assert_eq!(pick_remote(&remotes).map(|(n, _)| n.as_str()), Some("mirror"));
        assert!(pick_remote(&[]).is_none());
    }
}
