//! Rule results and the per-PR verdict.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::pull_request::PullRequest;

/// Identity of a validation rule, in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleId {
    UserId,
    TitleFormat,
    TitleDate,
    Labels,
    FileNoSpecial,
    FileFirstcharNotDigit,
    FilePath,
    FileExtension,
    FileFormat,
    FilePrefixConsistency,
    FileUsername,
}

impl RuleId {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::UserId => "user_id",
            Self::TitleFormat => "title_format",
            Self::TitleDate => "title_date",
            Self::Labels => "labels",
            Self::FileNoSpecial => "file_no_special",
            Self::FileFirstcharNotDigit => "file_firstchar_not_digit",
            Self::FilePath => "file_path",
            Self::FileExtension => "file_extension",
            Self::FileFormat => "file_format",
            Self::FilePrefixConsistency => "file_prefix_consistency",
            Self::FileUsername => "file_username",
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one executed rule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RuleResult {
    /// Which rule ran.
    pub rule: RuleId,
    /// Whether it passed.
    pub passed: bool,
    /// Human-readable explanation; empty when passed.
    pub reason: String,
}

impl RuleResult {
    pub fn pass(rule: RuleId) -> Self {
        Self {
            rule,
            passed: true,
            reason: String::new(),
        }
    }

    pub fn fail(rule: RuleId, reason: impl Into<String>) -> Self {
        Self {
            rule,
            passed: false,
            reason: reason.into(),
        }
    }
}

/// The outcome of validating one pull request.
///
/// # Invariants
///
/// `results` holds only the rules that actually ran, in catalog order.
/// `passed` is the conjunction of their outcomes; a skipped rule is
/// always downstream of a recorded failure, so it never flips the verdict.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationVerdict {
    pub pull_request: PullRequest,
    pub passed: bool,
    pub results: Vec<RuleResult>,
}

impl ValidationVerdict {
    /// Results of rules that failed.
    pub fn failures(&self) -> impl Iterator<Item = &RuleResult> {
        self.results.iter().filter(|r| !r.passed)
    }

    /// Reasons of failed rules, in catalog order.
    pub fn reasons(&self) -> Vec<&str> {
        self.failures().map(|r| r.reason.as_str()).collect()
    }

    /// Result for a specific rule, if it ran.
    pub fn result(&self, rule: RuleId) -> Option<&RuleResult> {
        self.results.iter().find(|r| r.rule == rule)
    }
}
