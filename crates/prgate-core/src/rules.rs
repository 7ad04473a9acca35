//! Submission rule catalog.
//!
//! Each rule is a [`RuleSpec`]: the flags it requires, the flag it grants
//! when it passes, and a predicate dispatched by [`check_rule`]. The order
//! of [`RULE_TABLE`] is the evaluation order; a rule may only depend on
//! flags granted by rules earlier in the table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::{FolderRule, TitleDatePolicy, ValidationPolicy};
use crate::dates;
use crate::domain::verdict::RuleId;
use crate::domain::{CommitFile, PullRequest};

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Gate granted by a passing rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Flag {
    UserId,
    Title,
    FileSpecial,
    FileFormat,
}

/// Static metadata of one rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleSpec {
    pub id: RuleId,
    /// Flags that must all be granted before the rule runs.
    pub requires: &'static [Flag],
    /// Flag granted when the rule passes.
    pub grants: Option<Flag>,
}

/// Every rule, in evaluation order.
pub const RULE_TABLE: [RuleSpec; 11] = [
    RuleSpec {
        id: RuleId::UserId,
        requires: &[],
        grants: Some(Flag::UserId),
    },
    RuleSpec {
        id: RuleId::TitleFormat,
        requires: &[Flag::UserId],
        grants: Some(Flag::Title),
    },
    RuleSpec {
        id: RuleId::TitleDate,
        requires: &[Flag::Title, Flag::UserId],
        grants: None,
    },
    RuleSpec {
        id: RuleId::Labels,
        requires: &[Flag::UserId],
        grants: None,
    },
    RuleSpec {
        id: RuleId::FileNoSpecial,
        requires: &[Flag::UserId],
        grants: Some(Flag::FileSpecial),
    },
    RuleSpec {
        id: RuleId::FileFirstcharNotDigit,
        requires: &[Flag::FileSpecial],
        grants: None,
    },
    RuleSpec {
        id: RuleId::FilePath,
        requires: &[Flag::FileSpecial],
        grants: None,
    },
    RuleSpec {
        id: RuleId::FileExtension,
        requires: &[Flag::FileSpecial],
        grants: None,
    },
    RuleSpec {
        id: RuleId::FileFormat,
        requires: &[Flag::FileSpecial],
        grants: Some(Flag::FileFormat),
    },
    RuleSpec {
        id: RuleId::FilePrefixConsistency,
        requires: &[Flag::FileFormat],
        grants: None,
    },
    RuleSpec {
        id: RuleId::FileUsername,
        requires: &[Flag::FileFormat],
        grants: None,
    },
];

// ---------------------------------------------------------------------------
// Predicates
// ---------------------------------------------------------------------------

/// Everything a rule may look at.
pub struct RuleInput<'a> {
    pub pull_request: &'a PullRequest,
    pub files: &'a [CommitFile],
    /// Author display name, resolved once per pass.
    pub display_name: Option<&'a str>,
    pub policy: &'a ValidationPolicy,
    pub now: DateTime<Utc>,
}

/// Run one rule. Returns the rejection reason, or `None` if it passed.
pub fn check_rule(id: RuleId, input: &RuleInput<'_>) -> Option<String> {
    match id {
        RuleId::UserId => match input.display_name {
            Some(_) => None,
            None => Some(format!(
                "unknown user id '{}'",
                input.pull_request.author_id
            )),
        },
        RuleId::TitleFormat => {
            if input.policy.title.is_match(&input.pull_request.title) {
                None
            } else {
                Some(format!(
                    "title '{}' does not match the required format",
                    input.pull_request.title
                ))
            }
        }
        RuleId::TitleDate => check_title_date(input),
        RuleId::Labels => {
            let name = input.display_name.unwrap_or_default();
            if input.pull_request.has_label(name) {
                None
            } else {
                Some(format!("no label matches the author name '{name}'"))
            }
        }
        RuleId::FileNoSpecial => offenders(
            input,
            "file names contain whitespace or special characters",
            |f| input.policy.forbidden.is_match(&f.file_name()),
            CommitFile::file_name,
        ),
        RuleId::FileFirstcharNotDigit => offenders(
            input,
            "file names start with a digit but carry no numeric prefix marker",
            |f| f.starts_with_digit() && !f.has_marker(),
            CommitFile::file_name,
        ),
        RuleId::FilePath => check_file_path(input),
        RuleId::FileExtension => offenders(
            input,
            "file extensions are not allowed",
            |f| {
                !f.extension
                    .as_ref()
                    .is_some_and(|ext| input.policy.extensions.contains(&ext.to_lowercase()))
            },
            CommitFile::file_name,
        ),
        RuleId::FileFormat => {
            let delimiter = input.policy.delimiter.as_str();
            offenders(
                input,
                &format!("file names are not in '<problem>{delimiter}<name>' format"),
                |f| !is_two_part(&f.base, delimiter),
                CommitFile::file_name,
            )
        }
        RuleId::FilePrefixConsistency => offenders(
            input,
            "numeric prefix marker does not match a leading problem number",
            |f| f.has_marker() != f.starts_with_digit(),
            CommitFile::to_path,
        ),
        RuleId::FileUsername => {
            let name = input.display_name.unwrap_or_default();
            let delimiter = input.policy.delimiter.as_str();
            offenders(
                input,
                &format!("file names do not end with the author name '{name}'"),
                |f| {
                    f.base
                        .rsplit(delimiter)
                        .next()
                        .map(|token| token.to_lowercase() != name.to_lowercase())
                        .unwrap_or(true)
                },
                CommitFile::file_name,
            )
        }
    }
}

fn check_title_date(input: &RuleInput<'_>) -> Option<String> {
    let policy = input.policy;
    let pr = input.pull_request;
    let Some(date) = dates::encoded_date(&pr.title) else {
        return Some(format!("title '{}' does not end with a valid yy-mm-dd date", pr.title));
    };

    match policy.title_date {
        TitleDatePolicy::Yesterday => {
            if dates::is_yesterday(date, input.now, policy.timezone) {
                None
            } else {
                let today = dates::local_date(input.now, policy.timezone);
                Some(format!(
                    "title date {} is not the day before {}",
                    date.format("%y-%m-%d"),
                    today.format("%y-%m-%d")
                ))
            }
        }
        TitleDatePolicy::SubmissionWindow => {
            if dates::within_submission_window(
                date,
                pr.created_at,
                policy.timezone,
                policy.due_window,
            ) {
                None
            } else {
                Some(format!(
                    "pull request was created outside the submission window of {}",
                    date.format("%y-%m-%d")
                ))
            }
        }
    }
}

fn check_file_path(input: &RuleInput<'_>) -> Option<String> {
    match &input.policy.folders {
        FolderRule::Allowed(folders) => offenders(
            input,
            "files are not in an allowed folder",
            |f| {
                !(f.dirs.len() == 2 && folders.contains(&f.dirs[1].to_lowercase()))
            },
            CommitFile::to_path,
        ),
        FolderRule::CurrentWeek { suffix } => {
            let created = dates::local_date(input.pull_request.created_at, input.policy.timezone);
            let week = dates::week_number(created, input.policy.cohort_start);
            let expected = format!("{week}{suffix}").to_lowercase();
            offenders(
                input,
                &format!("files are not in the current week folder '{week}{suffix}'"),
                |f| !(f.dirs.len() == 2 && f.dirs[1].to_lowercase() == expected),
                CommitFile::to_path,
            )
        }
    }
}

/// Exactly two non-empty parts when split on `delimiter`.
fn is_two_part(base: &str, delimiter: &str) -> bool {
    let parts: Vec<&str> = base.split(delimiter).collect();
    parts.len() == 2 && parts.iter().all(|p| !p.is_empty())
}

/// Collect offending files in input order and format a reason, or `None`
/// when no file offends. An empty file list never offends.
fn offenders(
    input: &RuleInput<'_>,
    message: &str,
    offends: impl Fn(&CommitFile) -> bool,
    label: impl Fn(&CommitFile) -> String,
) -> Option<String> {
    let bad: Vec<String> = input.files.iter().filter(|f| offends(*f)).map(label).collect();
    if bad.is_empty() {
        None
    } else {
        Some(format_reason(message, &bad, input.policy.max_reported_files))
    }
}

/// `message (a, b, c...)`, listing at most `max` items. With `max == 0`
/// only the message is kept.
pub fn format_reason(message: &str, items: &[String], max: usize) -> String {
    if max == 0 {
        message.to_string()
    } else if items.len() > max {
        format!("{message} ({}...)", items[..max].join(", "))
    } else {
        format!("{message} ({})", items.join(", "))
    }
}
