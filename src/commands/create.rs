use std::{
    fs::File,
    io::{self, BufReader, Read, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Args;
use log::debug;
use url::Url;

use super::hook_from_input;
use crate::{
    github::{ContentType, Hook, HookClient, HookConfig, InsecureSsl, get_events},
    repository::Repository,
    tui::{ValidationResult, choose_many, choose_one, input, input_with_validator},
};

const STDIN_PATH: &str = "-";

#[derive(Args, Debug, Default, Clone)]
pub struct CreateArgs {
    /// Download the current event list instead of using the built-in one
    #[arg(long)]
    pub refresh_events: bool,

    /// Read the hook definition from a JSON file ("-" for stdin) instead of prompting
    #[arg(long, value_name = "FILE")]
    pub input: Option<PathBuf>,
}

/// Creates a webhook on `repo`, either from `--input` or interactively.
pub fn create<W: Write>(
    args: &CreateArgs,
    client: &HookClient,
    repo: &Repository,
    out: &mut W,
) -> Result<()> {
    match &args.input {
        Some(path) if path.as_os_str() == STDIN_PATH => {
            create_from_reader(client, repo, io::stdin().lock(), out)
        }
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Unable to open {}", path.display()))?;
            create_from_reader(client, repo, BufReader::new(file), out)
        }
        None => {
            writeln!(out, "Creating new webhook for {}", repo.name)?;
            let hook = prompt_hook(args.refresh_events)?;
            submit(client, repo, &hook, out)
        }
    }
}

/// Creates the hook described by the JSON in `reader`, without prompting.
pub fn create_from_reader<R: Read, W: Write>(
    client: &HookClient,
    repo: &Repository,
    reader: R,
    out: &mut W,
) -> Result<()> {
    let hook = hook_from_input(reader)?;
    submit(client, repo, &hook, out)
}

fn submit<W: Write>(client: &HookClient, repo: &Repository, hook: &Hook, out: &mut W) -> Result<()> {
    let created = client.create(repo, hook)?;
    writeln!(out, "successfully created hook {created}")?;
    Ok(())
}

fn prompt_hook(refresh_events: bool) -> Result<Hook> {
    let url = input_with_validator(false, "Webhook URL: ", validate_url)
        .context("error entering webhook URL")?;

    let events = get_events(refresh_events)?;
    let events = choose_many("Events to receive", &events).context("error choosing events")?;

    let secret = input(true, "Webhook secret (optional): ")
        .context("error entering webhook secret")?;

    let content_types = ContentType::ALL.map(|content_type| content_type.to_string());
    let content_type = choose_one("Content Type", &content_types)
        .context("error choosing content type")?;
    let content_type = if content_type == ContentType::Form.to_string() {
        ContentType::Form
    } else {
        ContentType::Json
    };

    let insecure_ssl = choose_bool("Insecure SSL").context("error choosing insecure SSL option")?;
    let active = choose_bool("Webhook Active").context("error choosing webhook active option")?;

    let hook = Hook::builder()
        .active(active)
        .events(events)
        .config(
            HookConfig::builder()
                .url(url)
                .content_type(content_type)
                .insecure_ssl(InsecureSsl::from(insecure_ssl))
                .maybe_secret(non_empty(secret))
                .build(),
        )
        .build();

    debug!(
        "hook to create: {} ({} events, active: {})",
        hook.config.url,
        hook.events.len(),
        hook.active
    );

    Ok(hook)
}

fn choose_bool(title: &str) -> Result<bool> {
    Ok(choose_one(title, &["true", "false"])? == "true")
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

fn validate_url(value: &str) -> ValidationResult {
    match Url::parse(value.trim()) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => ValidationResult::Valid,
        Ok(url) => ValidationResult::Invalid(format!("unsupported scheme \"{}\"", url.scheme())),
        Err(e) => ValidationResult::Invalid(format!("not a valid URL: {e}")),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;
    use crate::{
        error::HookError,
        github::{RestClient, tests::mock_server::MockServer},
    };

    const CREATED: &str = r#"{
      "id": 12345678,
      "name": "web",
      "active": true,
      "events": ["push", "pull_request"],
      "config": {"url": "https://example.com/webhook", "content_type": "json", "insecure_ssl": "0"}
    }"#;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("https://example.com/hook").is_valid());
        assert!(validate_url("http://localhost:8080").is_valid());
        assert!(!validate_url("").is_valid());
        assert!(!validate_url("example.com").is_valid());
        assert!(!validate_url("ftp://example.com").is_valid());
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(String::new()), None);
        assert_eq!(non_empty("x".to_string()), Some("x".to_string()));
    }

    #[test]
    fn test_create_from_reader_posts_hook() {
        let server = MockServer::start(vec![(201, CREATED)]);
        let client = HookClient::new(RestClient::new(server.base_url(), Some("t".to_string())));
        let repo = Repository::new("github.com", "octo", "hello");
        let input = r#"{
          "id": 99,
          "active": true,
          "events": ["push", "pull_request"],
          "config": {"url": "https://example.com/webhook"}
        }"#;

        let mut out = Vec::new();
        create_from_reader(&client, &repo, input.as_bytes(), &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "successfully created hook 12345678 - https://example.com/webhook\n"
        );

        let recorded = server.finish();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].method, "POST");
        assert_eq!(recorded[0].url, "/repos/octo/hello/hooks");

        let body: Value = serde_json::from_str(&recorded[0].body).unwrap();
        assert_eq!(body.get("id"), None);
        assert_eq!(body["name"], "web");
        assert_eq!(body["active"], true);
        assert_eq!(body["config"]["content_type"], "json");
        assert_eq!(body["config"]["insecure_ssl"], "0");
    }

    #[test]
    fn test_create_from_reader_rejects_bad_json_without_request() {
        let client = HookClient::new(RestClient::new("http://127.0.0.1:9", None));
        let repo = Repository::new("github.com", "octo", "hello");

        let mut out = Vec::new();
        let err = create_from_reader(&client, &repo, "[1, 2".as_bytes(), &mut out).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<HookError>(),
            Some(HookError::InvalidInput(_))
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn test_create_with_missing_input_file() {
        let dir = tempfile::tempdir().unwrap();
        let args = CreateArgs {
            refresh_events: false,
            input: Some(dir.path().join("missing.json")),
        };
        let client = HookClient::new(RestClient::new("http://127.0.0.1:9", None));
        let repo = Repository::new("github.com", "octo", "hello");

        let err = create(&args, &client, &repo, &mut Vec::new()).unwrap_err();
        assert!(err.to_string().contains("missing.json"));
    }

    #[test]
    fn test_create_with_input_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hook.json");
        std::fs::write(&path, r#"{"events": ["push"], "config": {"url": "https://example.com/webhook"}}"#)
            .unwrap();

        let server = MockServer::start(vec![(201, CREATED)]);
        let client = HookClient::new(RestClient::new(server.base_url(), None));
        let repo = Repository::new("github.com", "octo", "hello");
        let args = CreateArgs {
            refresh_events: false,
            input: Some(path),
        };

        let mut out = Vec::new();
        create(&args, &client, &repo, &mut out).unwrap();

        let recorded = server.finish();
        let body: Value = serde_json::from_str(&recorded[0].body).unwrap();
        assert_eq!(body["events"], serde_json::json!(["push"]));
        assert_eq!(body["active"], false);
    }
}
