use std::{collections::HashMap, io::Write};

use tempfile::NamedTempFile;

use super::loader::{Config, HostConfig, is_github_host};

fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    move |name| map.get(name).cloned()
}

fn config_with(host: &str, entry: HostConfig) -> Config {
    let mut config = Config::default();
    config.hosts.insert(host.to_string(), entry);
    config
}

#[test]
fn test_config_load_existing_valid() {
    let json = r#"{
        "hosts": {
            "github.com": {
                "user": "user1",
                "oauth_token": "abc123"
            },
            "enterprise.com": {
                "oauth_token": "def456",
                "api_url": "https://enterprise.com/custom/api/"
            }
        }
    }"#;

    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(json.as_bytes()).unwrap();

    let config = Config::load_existing(temp_file.path()).unwrap();

    assert_eq!(config.hosts.len(), 2);
    let github = config.hosts.get("github.com").unwrap();
    assert_eq!(github.user.as_deref(), Some("user1"));
    assert_eq!(github.oauth_token.as_deref(), Some("abc123"));
    assert_eq!(github.api_url, None);
}

#[test]
fn test_config_load_existing_empty_object() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"{}").unwrap();

    let config = Config::load_existing(temp_file.path()).unwrap();
    assert!(config.hosts.is_empty());
}

#[test]
fn test_config_load_existing_invalid_json() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"{ not json").unwrap();

    assert!(Config::load_existing(temp_file.path()).is_err());
}

#[test]
fn test_config_load_missing_file_is_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(Config::load_existing(&dir.path().join("missing.json")).is_err());
}

#[test]
fn test_host_config_builder() {
    let entry = HostConfig::builder()
        .user("octocat")
        .oauth_token("abc123")
        .build();

    assert_eq!(entry.user.as_deref(), Some("octocat"));
    assert_eq!(entry.oauth_token.as_deref(), Some("abc123"));
    assert_eq!(entry.api_url, None);
}

#[test]
fn test_host_config_serialization_skips_empty_fields() {
    let entry = HostConfig::builder().oauth_token("abc123").build();
    let json = serde_json::to_string(&entry).unwrap();

    assert_eq!(json, r#"{"oauth_token":"abc123"}"#);
}

#[test]
fn test_token_prefers_environment() {
    let config = config_with("github.com", HostConfig::builder().oauth_token("file").build());

    let token = config.token_for_host_with("github.com", env_of(&[("GH_TOKEN", "env")]));
    assert_eq!(token.as_deref(), Some("env"));
}

#[test]
fn test_token_github_token_fallback() {
    let config = Config::default();

    let token = config.token_for_host_with("github.com", env_of(&[("GITHUB_TOKEN", "gt")]));
    assert_eq!(token.as_deref(), Some("gt"));
}

#[test]
fn test_token_falls_back_to_file() {
    let config = config_with("github.com", HostConfig::builder().oauth_token("file").build());

    let token = config.token_for_host_with("github.com", env_of(&[]));
    assert_eq!(token.as_deref(), Some("file"));
}

#[test]
fn test_token_ignores_empty_values() {
    let config = config_with("github.com", HostConfig::builder().oauth_token("file").build());

    let token = config.token_for_host_with("github.com", env_of(&[("GH_TOKEN", "")]));
    assert_eq!(token.as_deref(), Some("file"));
}

#[test]
fn test_token_enterprise_uses_enterprise_variables() {
    let config = Config::default();
    let env = env_of(&[("GH_TOKEN", "public"), ("GH_ENTERPRISE_TOKEN", "mock_token")]);

    let token = config.token_for_host_with("enterprise.com", env);
    assert_eq!(token.as_deref(), Some("mock_token"));
}

#[test]
fn test_token_missing_everywhere() {
    let config = Config::default();
    assert_eq!(config.token_for_host_with("github.com", env_of(&[])), None);
}

#[test]
fn test_api_url_for_github() {
    let config = Config::default();
    assert_eq!(config.api_url_for_host("github.com"), "https://api.github.com");
    assert_eq!(config.api_url_for_host("GitHub.com"), "https://api.github.com");
}

#[test]
fn test_api_url_for_enterprise() {
    let config = Config::default();
    assert_eq!(
        config.api_url_for_host("enterprise.com"),
        "https://enterprise.com/api/v3"
    );
}

#[test]
fn test_api_url_override_trims_trailing_slash() {
    let config = config_with(
        "enterprise.com",
        HostConfig::builder()
            .api_url("http://127.0.0.1:8080/")
            .build(),
    );
    assert_eq!(
        config.api_url_for_host("enterprise.com"),
        "http://127.0.0.1:8080"
    );
}

#[test]
fn test_is_github_host() {
    assert!(is_github_host("github.com"));
    assert!(is_github_host("GITHUB.COM"));
    assert!(!is_github_host("enterprise.com"));
}
