use std::io::Write;

use anyhow::Result;

use super::format_hook_choices;
use crate::{github::HookClient, repository::Repository};

/// Prints one line per webhook on `repo`.
pub fn list<W: Write>(client: &HookClient, repo: &Repository, out: &mut W) -> Result<()> {
    let hooks = client.list(repo)?;

    if hooks.is_empty() {
        writeln!(out, "{repo} has no webhooks")?;
        return Ok(());
    }

    for line in format_hook_choices(&hooks) {
        writeln!(out, "{line}")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::{RestClient, tests::mock_server::MockServer};

    const TWO_HOOKS: &str = r#"[
      {"id": 1, "name": "web", "active": true, "events": ["push"],
       "config": {"url": "https://a.example", "content_type": "json", "insecure_ssl": "0"}},
      {"id": 2, "name": "web", "active": false, "events": ["issues", "fork"],
       "config": {"url": "https://b.example", "content_type": "form", "insecure_ssl": "1"}}
    ]"#;

    fn run(reply: (u16, &str)) -> (Result<()>, String) {
        let server = MockServer::start(vec![reply]);
        let client = HookClient::new(RestClient::new(server.base_url(), None));
        let repo = Repository::new("github.com", "octo", "hello");

        let mut out = Vec::new();
        let result = list(&client, &repo, &mut out);
        server.finish();
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_list_prints_each_hook() {
        let (result, out) = run((200, TWO_HOOKS));
        result.unwrap();
        assert_eq!(
            out,
            "✓ 1 - https://a.example (push)\n• 2 - https://b.example (issues, fork)\n"
        );
    }

    #[test]
    fn test_list_without_hooks() {
        let (result, out) = run((200, "[]"));
        result.unwrap();
        assert_eq!(out, "octo/hello has no webhooks\n");
    }

    #[test]
    fn test_list_propagates_http_error() {
        let (result, out) = run((404, r#"{"message": "Not Found"}"#));
        assert!(result.is_err());
        assert!(out.is_empty());
    }
}
