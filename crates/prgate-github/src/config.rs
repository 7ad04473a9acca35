//! Repository coordinates and REST endpoint URLs.

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Page size for list endpoints (GitHub's maximum).
pub const PER_PAGE: u32 = 100;

/// GitHub adapter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubConfig {
    /// REST API base URL
    pub api_url: String,
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repository: String,
    /// Access token; anonymous requests are heavily rate limited
    #[serde(skip_serializing)]
    pub token: Option<String>,
    /// Pause before each merge request
    pub merge_delay: Duration,
}

impl GithubConfig {
    /// Create config for a repository on github.com
    pub fn new(owner: &str, repository: &str) -> Self {
        GithubConfig {
            api_url: DEFAULT_API_URL.to_string(),
            owner: owner.to_string(),
            repository: repository.to_string(),
            token: None,
            merge_delay: Duration::ZERO,
        }
    }

    /// Point at a different API host (GitHub Enterprise, test server)
    pub fn with_api_url(mut self, api_url: &str) -> Self {
        self.api_url = api_url.trim_end_matches('/').to_string();
        self
    }

    /// Set authentication token
    pub fn with_token(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }

    pub fn with_merge_delay(mut self, delay: Duration) -> Self {
        self.merge_delay = delay;
        self
    }

    fn repo_url(&self) -> String {
        format!("{}/repos/{}/{}", self.api_url, self.owner, self.repository)
    }

    /// Open pull requests, one page.
    pub fn pull_requests_url(&self, page: u32) -> String {
        format!(
            "{}/pulls?state=open&per_page={PER_PAGE}&page={page}",
            self.repo_url()
        )
    }

    /// Changed files of one pull request, one page.
    pub fn pull_request_files_url(&self, number: u64, page: u32) -> String {
        format!(
            "{}/pulls/{number}/files?per_page={PER_PAGE}&page={page}",
            self.repo_url()
        )
    }

    pub fn merge_url(&self, number: u64) -> String {
        format!("{}/pulls/{number}/merge", self.repo_url())
    }
}
