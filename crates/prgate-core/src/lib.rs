//! prgate Core Library
//!
//! Validation engine for study-group pull request submissions: path
//! decomposition, the ordered rule catalog, the per-PR validation pass,
//! and the merge/report collaborators built around it.

pub mod config;
pub mod dates;
pub mod directory;
pub mod domain;
pub mod merge;
pub mod obs;
pub mod path;
pub mod reporting;
pub mod rules;
pub mod session;
pub mod source;
pub mod telemetry;

pub use config::{
    FolderPolicy, FolderRule, PrefixMarker, TitleDatePolicy, ValidationPolicy, ValidatorConfig,
};
pub use dates::{encoded_date, is_yesterday, week_number, within_submission_window};
pub use directory::{StaticDirectory, UserDirectory};
pub use domain::{
    CommitFile, PrGateError, PullRequest, Result, RuleId, RuleResult, ValidationVerdict,
};
pub use merge::{merge_passing, MergeClient, MergeOutcome};
pub use path::PathParser;
pub use reporting::{
    read_run_report, write_run_report, PullRequestReport, ReportBucket, RunReport,
};
pub use rules::{Flag, RuleSpec, RULE_TABLE};
pub use session::{evaluate, EvalContext, Validator};
pub use source::{PullRequestSource, StaticSource};
pub use obs::{
    emit_merge_attempted, emit_merge_error, emit_pull_requests_fetched, emit_run_summary,
    emit_validation_finished, PullRequestSpan,
};
pub use telemetry::init_tracing;

/// prgate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
