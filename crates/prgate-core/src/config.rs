//! Validator configuration.
//!
//! [`ValidatorConfig`] is the serde/TOML-facing shape with defaults for every
//! field. [`ValidationPolicy`] is the compiled form the rules run against:
//! regexes built, sets lowercased, timezone resolved. Compiling is the only
//! step that can fail; evaluation never does.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use chrono::{Duration, FixedOffset, NaiveDate};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::domain::{PrGateError, Result};

/// Characters that may not appear in a submitted file name.
pub const DEFAULT_FORBIDDEN_PATTERN: &str = r#"[\s#%&{}\\/<>*!?$'":@+`|=]+"#;

/// `[<tag>] yy-mm-dd`, matched case-insensitively.
pub const DEFAULT_TITLE_PATTERN: &str = r"^\[[^\]]+\]\s+\d{2}-\d{2}-\d{2}\s*$";

/// Korea Standard Time.
pub const DEFAULT_UTC_OFFSET_MINUTES: i32 = 9 * 60;

/// Title day 00:00 until 08:59:59 of the following day.
pub const DEFAULT_DUE_WINDOW_SECS: i64 = 33 * 3600 - 1;

/// How a file name may carry the numeric-prefix marker.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PrefixMarker {
    /// A leading digit is itself the marker; nothing is stripped.
    ///
    /// In this mode `file_firstchar_not_digit` and
    /// `file_prefix_consistency` always pass.
    #[default]
    Implicit,
    /// A literal tag such as `B_` that is stripped before parsing.
    Literal { tag: String },
}

/// Which destination folders `file_path` accepts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum FolderPolicy {
    /// Second path segment must be one of `folders` (case-insensitive).
    Allowed { folders: Vec<String> },
    /// Second path segment must be `<week><suffix>` for the PR's cohort week.
    CurrentWeek { suffix: String },
}

impl Default for FolderPolicy {
    fn default() -> Self {
        Self::Allowed {
            folders: ["baekjoon", "programmers", "leetcode", "swea"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// How `title_date` decides whether the encoded date is acceptable.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TitleDatePolicy {
    /// Encoded date must be yesterday relative to the evaluation instant.
    #[default]
    Yesterday,
    /// PR must have been created within the due window after the encoded date.
    SubmissionWindow,
}

/// File/TOML representation of the validator settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Regex rejecting whitespace and special characters in file names.
    pub forbidden_pattern: String,
    /// Regex every title must match from its first character
    /// (case-insensitive).
    pub title_pattern: String,
    pub title_date: TitleDatePolicy,
    /// Allowed file extensions (case-insensitive).
    pub allowed_extensions: Vec<String>,
    pub folder_policy: FolderPolicy,
    /// Separator between problem name and author name.
    pub filename_delimiter: String,
    pub numeric_prefix: PrefixMarker,
    /// How many offending files a rejection reason lists before `...`.
    pub max_reported_files: usize,
    /// First day of week 1.
    pub cohort_start: NaiveDate,
    /// Length of the submission window in seconds.
    pub due_window_secs: i64,
    /// Cohort timezone as an offset from UTC.
    pub utc_offset_minutes: i32,
    /// Platform login → display name.
    pub members: BTreeMap<String, String>,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            forbidden_pattern: DEFAULT_FORBIDDEN_PATTERN.to_string(),
            title_pattern: DEFAULT_TITLE_PATTERN.to_string(),
            title_date: TitleDatePolicy::default(),
            allowed_extensions: [
                "cpp", "c", "py", "java", "js", "h", "ts", "kt", "kts", "rb", "swift",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            folder_policy: FolderPolicy::default(),
            filename_delimiter: "_".to_string(),
            numeric_prefix: PrefixMarker::default(),
            max_reported_files: 3,
            cohort_start: NaiveDate::from_ymd_opt(2023, 3, 6).unwrap_or(NaiveDate::MIN),
            due_window_secs: DEFAULT_DUE_WINDOW_SECS,
            utc_offset_minutes: DEFAULT_UTC_OFFSET_MINUTES,
            members: BTreeMap::new(),
        }
    }
}

impl ValidatorConfig {
    /// Parse a TOML document; missing keys take their defaults.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Read and parse a TOML config file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// Compile into the form the rules run against.
    pub fn compile(&self) -> Result<ValidationPolicy> {
        ValidationPolicy::from_config(self)
    }
}

/// Folder rule after lowercasing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FolderRule {
    Allowed(BTreeSet<String>),
    CurrentWeek { suffix: String },
}

/// Compiled validator settings.
#[derive(Debug, Clone)]
pub struct ValidationPolicy {
    pub forbidden: Regex,
    pub title: Regex,
    pub title_date: TitleDatePolicy,
    pub extensions: BTreeSet<String>,
    pub folders: FolderRule,
    pub delimiter: String,
    pub prefix_marker: PrefixMarker,
    pub max_reported_files: usize,
    pub cohort_start: NaiveDate,
    pub due_window: Duration,
    pub timezone: FixedOffset,
}

impl ValidationPolicy {
    pub fn from_config(config: &ValidatorConfig) -> Result<Self> {
        let forbidden =
            Regex::new(&config.forbidden_pattern).map_err(|source| PrGateError::InvalidPattern {
                field: "forbidden_pattern",
                source,
            })?;
        let title = RegexBuilder::new(&format!("^(?:{})", config.title_pattern))
            .case_insensitive(true)
            .build()
            .map_err(|source| PrGateError::InvalidPattern {
                field: "title_pattern",
                source,
            })?;

        if config.filename_delimiter.is_empty() {
            return Err(PrGateError::InvalidConfig(
                "filename_delimiter must not be empty".to_string(),
            ));
        }
        if let PrefixMarker::Literal { tag } = &config.numeric_prefix {
            if tag.is_empty() {
                return Err(PrGateError::InvalidConfig(
                    "numeric_prefix literal tag must not be empty".to_string(),
                ));
            }
        }
        let due_window = Duration::try_seconds(config.due_window_secs)
            .filter(|d| *d >= Duration::zero())
            .ok_or_else(|| {
                PrGateError::InvalidConfig(format!(
                    "due_window_secs out of range: {}",
                    config.due_window_secs
                ))
            })?;

        let timezone = config
            .utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| {
                PrGateError::InvalidConfig(format!(
                    "utc_offset_minutes out of range: {}",
                    config.utc_offset_minutes
                ))
            })?;

        let folders = match &config.folder_policy {
            FolderPolicy::Allowed { folders } => {
                FolderRule::Allowed(folders.iter().map(|f| f.to_lowercase()).collect())
            }
            FolderPolicy::CurrentWeek { suffix } => FolderRule::CurrentWeek {
                suffix: suffix.clone(),
            },
        };

        Ok(Self {
            forbidden,
            title,
            title_date: config.title_date,
            extensions: config
                .allowed_extensions
                .iter()
                .map(|e| e.to_lowercase())
                .collect(),
            folders,
            delimiter: config.filename_delimiter.clone(),
            prefix_marker: config.numeric_prefix.clone(),
            max_reported_files: config.max_reported_files,
            cohort_start: config.cohort_start,
            due_window,
            timezone,
        })
    }
}
