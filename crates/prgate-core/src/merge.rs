//! Merge decision.
//!
//! Only passing verdicts are sent to the [`MergeClient`]. A transport error
//! from the client is recorded as an unmerged [`MergeOutcome`] carrying the
//! error message; it never turns a passing verdict into a rejection.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{Result, ValidationVerdict};
use crate::obs;
use crate::reporting::PullRequestReport;

/// Response of the merge endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Merge commit SHA, empty when nothing was merged.
    #[serde(default)]
    pub sha: String,
    #[serde(default)]
    pub merged: bool,
    #[serde(default)]
    pub message: String,
}

impl MergeOutcome {
    /// Outcome recorded in dry-run mode instead of calling the endpoint.
    pub fn dry_run(passed: bool) -> Self {
        Self {
            sha: String::new(),
            merged: passed,
            message: "dry run: merge skipped".to_string(),
        }
    }

    /// Outcome for a verdict that was not sent to the endpoint.
    pub fn not_attempted() -> Self {
        Self::default()
    }

    /// Outcome for a merge call that failed in transport.
    pub fn transport_error(error: &dyn std::fmt::Display) -> Self {
        Self {
            sha: String::new(),
            merged: false,
            message: error.to_string(),
        }
    }
}

/// Calls the hosting API's merge endpoint.
#[async_trait]
pub trait MergeClient: Send + Sync {
    async fn merge(&self, number: u64) -> Result<MergeOutcome>;
}

/// Merge every passing verdict, in order.
///
/// With `dry_run` set the client is never called and each verdict gets
/// [`MergeOutcome::dry_run`].
pub async fn merge_passing(
    verdicts: Vec<ValidationVerdict>,
    client: &dyn MergeClient,
    dry_run: bool,
) -> Vec<PullRequestReport> {
    let mut reports = Vec::with_capacity(verdicts.len());
    for verdict in verdicts {
        let number = verdict.pull_request.number;
        let merge = if dry_run {
            MergeOutcome::dry_run(verdict.passed)
        } else if !verdict.passed {
            MergeOutcome::not_attempted()
        } else {
            match client.merge(number).await {
                Ok(outcome) => {
                    obs::emit_merge_attempted(number, outcome.merged, &outcome.message);
                    outcome
                }
                Err(e) => {
                    obs::emit_merge_error(number, &e);
                    MergeOutcome::transport_error(&e)
                }
            }
        };
        reports.push(PullRequestReport { verdict, merge });
    }
    reports
}
