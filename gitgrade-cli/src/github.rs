//! GitHub REST client used to fetch repository metadata.

use std::time::Duration;

use clap::Args;
use gitgrade_core::{GitGradeError, RawRepository, RepoSlug};
use reqwest::Client;

use crate::CliResult;

const DEFAULT_API_URL: &str = "https://api.github.com";
const USER_AGENT: &str = concat!("gitgrade-cli/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT_SECS: u64 = 20;

/// CLI arguments controlling metadata retrieval.
#[derive(Args, Clone, Debug)]
pub struct FetchArgs {
    /// Base URL of the GitHub REST API.
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,
    /// Token used to authenticate API requests.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,
    /// Maximum number of concurrent requests.
    #[arg(short = 'j', long, default_value_t = 5)]
    pub concurrency: usize,
}

/// Async client for the `GET /repos/{owner}/{repo}` endpoint.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl GitHubClient {
    /// Build a client against `base_url`.
    pub fn new(base_url: &str, token: Option<String>) -> CliResult<Self> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err("api url cannot be empty".into());
        }
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            base_url,
            token: token.filter(|token| !token.trim().is_empty()),
        })
    }

    /// Build a client from parsed CLI arguments.
    #[cfg_attr(test, allow(dead_code))]
    pub fn from_args(args: &FetchArgs) -> CliResult<Self> {
        Self::new(&args.api_url, args.token.clone())
    }

    /// Fetch raw metadata for a repository.
    ///
    /// Transport failures and non-success statuses are retrieval errors; a
    /// payload with structurally wrong fields is invalid input.
    pub async fn fetch_repository(&self, slug: &RepoSlug) -> gitgrade_core::Result<RawRepository> {
        let url = format!("{}/repos/{}/{}", self.base_url, slug.owner, slug.name);
        let mut request = self
            .client
            .get(url)
            .header("Accept", "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let response = request
            .send()
            .await
            .map_err(|err| GitGradeError::Retrieval(format!("github request failed: {err}")))?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GitGradeError::Retrieval(format!(
                "github api error ({status}): {}",
                body.trim()
            )));
        }
        let value: serde_json::Value = response.json().await.map_err(|err| {
            GitGradeError::Retrieval(format!("github response decode failed: {err}"))
        })?;
        log::debug!("fetched metadata for {slug}");
        RawRepository::from_value(value)
    }
}
