//! GitHub REST client
//!
//! Implements [`PullRequestSource`] and [`MergeClient`] for a single
//! repository. File lists are fetched concurrently; merges run one at a
//! time in the order they are requested.

use async_trait::async_trait;
use futures::future::try_join_all;
use prgate_core::{
    emit_pull_requests_fetched, MergeClient, MergeOutcome, PrGateError, PullRequest,
    PullRequestSource,
};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::config::{GithubConfig, PER_PAGE};
use crate::error::{GithubError, Result};
use crate::wire::{assemble_pull_request, parse_merge_response, ApiFile, ApiPullRequest};

const USER_AGENT: &str = concat!("prgate/", env!("CARGO_PKG_VERSION"));
const API_VERSION: &str = "2022-11-28";

/// GitHub client for one repository
pub struct GithubClient {
    config: GithubConfig,
    http_client: reqwest::Client,
}

impl GithubClient {
    /// Create a new client. Fails only if the token is not a valid header value.
    pub fn new(config: GithubConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert("X-GitHub-Api-Version", HeaderValue::from_static(API_VERSION));
        if let Some(token) = &config.token {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| GithubError::InvalidToken(e.to_string()))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(GithubClient {
            config,
            http_client,
        })
    }

    pub fn config(&self) -> &GithubConfig {
        &self.config
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!(url = %url, "GET");
        let response = self.http_client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GithubError::Status {
                status: status.as_u16(),
                url: url.to_string(),
                body,
            });
        }
        Ok(response.json::<T>().await?)
    }

    /// Follow `page=1,2,...` until a short page comes back.
    async fn get_all_pages<T, F>(&self, url_for_page: F) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
        F: Fn(u32) -> String,
    {
        let mut items = Vec::new();
        let mut page = 1;
        loop {
            let batch: Vec<T> = self.get_json(&url_for_page(page)).await?;
            let done = batch.len() < PER_PAGE as usize;
            items.extend(batch);
            if done {
                return Ok(items);
            }
            page += 1;
        }
    }

    /// List open pull requests without their files.
    pub async fn list_open_pull_requests(&self) -> Result<Vec<ApiPullRequest>> {
        self.get_all_pages(|page| self.config.pull_requests_url(page))
            .await
    }

    /// List changed files of one pull request, including removed ones.
    pub async fn list_files(&self, number: u64) -> Result<Vec<ApiFile>> {
        self.get_all_pages(|page| self.config.pull_request_files_url(number, page))
            .await
    }

    /// Open pull requests with their (non-removed) files.
    pub async fn fetch_open_pull_requests(&self) -> Result<Vec<PullRequest>> {
        let listed = self.list_open_pull_requests().await?;
        let files = try_join_all(listed.iter().map(|pr| self.list_files(pr.number))).await?;
        Ok(listed
            .into_iter()
            .zip(files)
            .map(|(pr, files)| assemble_pull_request(pr, files))
            .collect())
    }

    /// `PUT .../merge`. Refusals come back as an unmerged outcome.
    pub async fn merge_pull_request(&self, number: u64) -> Result<MergeOutcome> {
        if !self.config.merge_delay.is_zero() {
            tokio::time::sleep(self.config.merge_delay).await;
        }
        let url = self.config.merge_url(number);
        debug!(url = %url, "PUT");
        let response = self.http_client.put(&url).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        let outcome = parse_merge_response(status, &url, &body)?;
        info!(number, status, merged = outcome.merged, "merge response");
        Ok(outcome)
    }
}

#[async_trait]
impl PullRequestSource for GithubClient {
    async fn open_pull_requests(&self) -> prgate_core::Result<Vec<PullRequest>> {
        let prs = self
            .fetch_open_pull_requests()
            .await
            .map_err(|e| PrGateError::Source(e.to_string()))?;
        emit_pull_requests_fetched(prs.len());
        Ok(prs)
    }
}

#[async_trait]
impl MergeClient for GithubClient {
    async fn merge(&self, number: u64) -> prgate_core::Result<MergeOutcome> {
        self.merge_pull_request(number)
            .await
            .map_err(|e| PrGateError::Merge {
                number,
                message: e.to_string(),
            })
    }
}
