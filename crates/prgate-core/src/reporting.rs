//! Run report: per-PR outcomes grouped into successful / rejected / failed.
//!
//! The report is plain data; rendering it into a chat message is left to the
//! host. [`write_run_report`] persists it as pretty JSON next to a SHA-256
//! digest so downstream tooling can detect tampering.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::directory::UserDirectory;
use crate::domain::{PrGateError, Result, ValidationVerdict};
use crate::merge::MergeOutcome;
use crate::obs;

pub const REPORT_SCHEMA_VERSION: &str = "1.0";
const REPORT_FILE: &str = "run_report.json";
const DIGEST_FILE: &str = "run_report.digest";

/// Verdict plus what happened at the merge endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PullRequestReport {
    pub verdict: ValidationVerdict,
    pub merge: MergeOutcome,
}

/// Report bucket of one pull request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportBucket {
    /// Merged.
    Successful,
    /// Failed validation.
    Rejected,
    /// Passed validation but was not merged.
    Failed,
}

impl PullRequestReport {
    pub fn bucket(&self) -> ReportBucket {
        if self.merge.merged {
            ReportBucket::Successful
        } else if !self.verdict.passed {
            ReportBucket::Rejected
        } else {
            ReportBucket::Failed
        }
    }
}

/// Summary of one validate → merge run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunReport {
    pub schema_version: String,
    pub generated_at: DateTime<Utc>,
    pub dry_run: bool,
    pub total: usize,
    /// Author names per bucket, sorted.
    pub successful: Vec<String>,
    pub rejected: Vec<String>,
    pub failed: Vec<String>,
    pub pull_requests: Vec<PullRequestReport>,
}

impl RunReport {
    /// Group `reports` into buckets, naming authors through `directory`
    /// (falling back to the login for unknown authors).
    pub fn build(
        reports: Vec<PullRequestReport>,
        directory: &dyn UserDirectory,
        generated_at: DateTime<Utc>,
        dry_run: bool,
    ) -> Self {
        let mut successful = Vec::new();
        let mut rejected = Vec::new();
        let mut failed = Vec::new();

        for report in &reports {
            let author = &report.verdict.pull_request.author_id;
            let name = directory.lookup(author).unwrap_or_else(|| author.clone());
            match report.bucket() {
                ReportBucket::Successful => successful.push(name),
                ReportBucket::Rejected => rejected.push(name),
                ReportBucket::Failed => failed.push(name),
            }
        }
        successful.sort();
        rejected.sort();
        failed.sort();

        obs::emit_run_summary(reports.len(), successful.len(), rejected.len(), failed.len());

        Self {
            schema_version: REPORT_SCHEMA_VERSION.to_string(),
            generated_at,
            dry_run,
            total: reports.len(),
            successful,
            rejected,
            failed,
            pull_requests: reports,
        }
    }

    /// Reports in the given bucket, in run order.
    pub fn in_bucket(&self, bucket: ReportBucket) -> impl Iterator<Item = &PullRequestReport> {
        self.pull_requests
            .iter()
            .filter(move |r| r.bucket() == bucket)
    }
}

fn digest_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Persist `<dir>/run_report.json` and `<dir>/run_report.digest`.
pub fn write_run_report(report: &RunReport, dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;

    let path = dir.join(REPORT_FILE);
    let json = serde_json::to_vec_pretty(report)?;
    std::fs::write(&path, &json)?;
    std::fs::write(dir.join(DIGEST_FILE), digest_hex(&json).as_bytes())?;

    Ok(path)
}

/// Read `<dir>/run_report.json` and verify it against its digest.
pub fn read_run_report(dir: &Path) -> Result<RunReport> {
    let json = std::fs::read(dir.join(REPORT_FILE))?;
    let expected = std::fs::read_to_string(dir.join(DIGEST_FILE))?;
    let actual = digest_hex(&json);
    if expected.trim() != actual {
        return Err(PrGateError::DigestMismatch {
            expected: expected.trim().to_string(),
            actual,
        });
    }
    Ok(serde_json::from_slice(&json)?)
}
