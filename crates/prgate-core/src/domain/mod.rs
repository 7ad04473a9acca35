//! Domain models for prgate.
//!
//! Canonical definitions for the core entities:
//! - `PullRequest`: Immutable snapshot of an open pull request
//! - `CommitFile`: Parsed decomposition of a changed file path
//! - `RuleResult` / `ValidationVerdict`: Outcome of one validation pass

pub mod commit_file;
pub mod error;
pub mod pull_request;
pub mod verdict;

// Re-export main types and errors
pub use commit_file::CommitFile;
pub use error::{PrGateError, Result};
pub use pull_request::PullRequest;
pub use verdict::{RuleId, RuleResult, ValidationVerdict};
