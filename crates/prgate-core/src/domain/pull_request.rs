//! Pull request snapshot handed to the validator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An open pull request as fetched from the hosting API.
///
/// Fetched once per run and never mutated by the validator. `files` holds
/// the raw, forward-slash-delimited repository paths of every changed file
/// that was not removed by the PR.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PullRequest {
    /// PR number within the repository.
    pub number: u64,

    /// PR title, expected to look like `[Tag] yy-mm-dd`.
    pub title: String,

    /// Platform login of the author.
    pub author_id: String,

    /// Creation instant.
    pub created_at: DateTime<Utc>,

    /// Label names attached to the PR.
    #[serde(default)]
    pub labels: Vec<String>,

    /// Raw changed-file paths.
    #[serde(default)]
    pub files: Vec<String>,
}

impl PullRequest {
    /// Whether any label equals `name`, ignoring case.
    pub fn has_label(&self, name: &str) -> bool {
        let wanted = name.to_lowercase();
        self.labels.iter().any(|l| l.to_lowercase() == wanted)
    }
}
