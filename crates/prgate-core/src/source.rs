//! Where pull requests come from.

use async_trait::async_trait;

use crate::domain::{PullRequest, Result};

/// Yields the open pull requests of the submission repository.
///
/// Implementations own transport concerns; each returned PR already carries
/// its changed-file list with removed files excluded.
#[async_trait]
pub trait PullRequestSource: Send + Sync {
    async fn open_pull_requests(&self) -> Result<Vec<PullRequest>>;
}

/// Fixed list of pull requests, e.g. loaded from a JSON fixture.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    pull_requests: Vec<PullRequest>,
}

impl StaticSource {
    pub fn new(pull_requests: Vec<PullRequest>) -> Self {
        Self { pull_requests }
    }

    /// Parse a JSON array of pull requests.
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(Self::new(serde_json::from_str(raw)?))
    }
}

#[async_trait]
impl PullRequestSource for StaticSource {
    async fn open_pull_requests(&self) -> Result<Vec<PullRequest>> {
        Ok(self.pull_requests.clone())
    }
}
