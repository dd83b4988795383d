//! GitHub metadata source for the server.

use gitgrade_core::{GitGradeError, MetadataSource, RawRepository, RepoSlug};
use reqwest::blocking::Client;

/// Blocking GitHub REST client.
///
/// A `reqwest::blocking::Client` must not be created or dropped on the async
/// runtime, so one is built per fetch; callers run `fetch` inside
/// `actix_web::web::block`.
#[derive(Debug, Clone)]
pub struct GitHubApiClient {
    base_url: String,
    token: Option<String>,
    user_agent: String,
}

impl GitHubApiClient {
    /// Build a client against an explicit API base URL.
    pub fn new(
        base_url: impl Into<String>,
        token: Option<String>,
        user_agent: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            token: token.filter(|token| !token.trim().is_empty()),
            user_agent: user_agent.into(),
        }
    }

    /// Build a GitHub API client from environment variables.
    #[cfg_attr(test, allow(dead_code))]
    pub fn from_env() -> Self {
        let base_url = std::env::var("GITHUB_API_URL")
            .unwrap_or_else(|_| "https://api.github.com".to_string());
        let token = std::env::var("GITHUB_TOKEN").ok();
        let user_agent =
            std::env::var("GITHUB_USER_AGENT").unwrap_or_else(|_| "gitgrade-server".to_string());
        Self::new(base_url, token, user_agent)
    }
}

impl MetadataSource for GitHubApiClient {
    fn fetch(&self, slug: &RepoSlug) -> gitgrade_core::Result<RawRepository> {
        let url = format!(
            "{}/repos/{}/{}",
            self.base_url.trim_end_matches('/'),
            slug.owner,
            slug.name
        );
        let client = Client::new();
        let mut request = client
            .get(url)
            .header("User-Agent", &self.user_agent)
            .header("Accept", "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let response = request
            .send()
            .map_err(|err| GitGradeError::Retrieval(format!("github request failed: {err}")))?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            return Err(GitGradeError::Retrieval(format!(
                "github api error ({status}): {}",
                body.trim()
            )));
        }
        let value: serde_json::Value = response.json().map_err(|err| {
            GitGradeError::Retrieval(format!("github response decode failed: {err}"))
        })?;
        RawRepository::from_value(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::Method::GET;
    use httpmock::MockServer;

    #[test]
    fn fetch_sends_user_agent_and_token() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/repos/octo/demo")
                .header("user-agent", "gitgrade-tests")
                .header("authorization", "Bearer gh-token");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"name":"demo","stargazers_count":7,"topics":["a"]}"#);
        });
        let client = GitHubApiClient::new(
            server.base_url(),
            Some("gh-token".to_string()),
            "gitgrade-tests",
        );
        let slug = RepoSlug::new("octo", "demo").expect("slug");
        let raw = client.fetch(&slug).expect("fetch");
        mock.assert();
        assert_eq!(raw.stargazers_count, Some(7));
        assert_eq!(raw.topics, Some(vec!["a".to_string()]));
    }

    #[test]
    fn fetch_maps_failures_to_retrieval() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/repos/octo/demo");
            then.status(403).body("rate limited");
        });
        let client = GitHubApiClient::new(server.base_url(), None, "gitgrade-tests");
        let slug = RepoSlug::new("octo", "demo").expect("slug");
        let err = client.fetch(&slug).unwrap_err();
        assert!(err.is_retrieval());
        assert!(err.to_string().contains("rate limited"));
    }
}
