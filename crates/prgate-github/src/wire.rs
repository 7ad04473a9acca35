//! REST payload shapes and their conversion into domain models.
//!
//! Only the fields the validator reads are modelled; serde ignores the
//! rest of GitHub's (large) payloads.

use chrono::{DateTime, Utc};
use prgate_core::{MergeOutcome, PullRequest};
use serde::Deserialize;

use crate::error::{GithubError, Result};

#[derive(Debug, Clone, Deserialize)]
pub struct ApiUser {
    pub login: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiLabel {
    pub name: String,
}

/// Element of `GET /repos/{owner}/{repo}/pulls`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiPullRequest {
    pub number: u64,
    pub title: String,
    pub user: ApiUser,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub labels: Vec<ApiLabel>,
}

/// Element of `GET /repos/{owner}/{repo}/pulls/{number}/files`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiFile {
    pub filename: String,
    pub status: String,
}

impl ApiFile {
    pub fn is_removed(&self) -> bool {
        self.status == "removed"
    }
}

/// Combine a listed PR with its changed files. Deleted files are dropped.
pub fn assemble_pull_request(pr: ApiPullRequest, files: Vec<ApiFile>) -> PullRequest {
    PullRequest {
        number: pr.number,
        title: pr.title,
        author_id: pr.user.login,
        created_at: pr.created_at,
        labels: pr.labels.into_iter().map(|l| l.name).collect(),
        files: files
            .into_iter()
            .filter(|f| !f.is_removed())
            .map(|f| f.filename)
            .collect(),
    }
}

/// Interpret the body of `PUT .../merge`.
///
/// GitHub answers refusals (405, 409) with `{"message": ...}`, which maps
/// onto an unmerged [`MergeOutcome`]. Only bodies that are not JSON at all
/// are errors.
pub fn parse_merge_response(status: u16, url: &str, body: &str) -> Result<MergeOutcome> {
    if body.trim().is_empty() {
        return Ok(MergeOutcome {
            message: format!("empty response (status {status})"),
            ..MergeOutcome::default()
        });
    }
    match serde_json::from_str::<MergeOutcome>(body) {
        Ok(outcome) => Ok(outcome),
        Err(_) if !(200..300).contains(&status) => Err(GithubError::Status {
            status,
            url: url.to_string(),
            body: body.to_string(),
        }),
        Err(e) => Err(e.into()),
    }
}
