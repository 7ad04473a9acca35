//! Structured observability hooks for the validate → merge → report run.
//!
//! Events are emitted at `info!` (failures of individual rules at `debug!`,
//! transport problems at `warn!`). Every event carries an `event` field so
//! JSON log pipelines can filter on it.

use tracing::{debug, info, warn};

use crate::domain::ValidationVerdict;

/// RAII guard that enters a PR-scoped span for the duration of a pass.
pub struct PullRequestSpan {
    _span: tracing::span::EnteredSpan,
}

impl PullRequestSpan {
    pub fn enter(number: u64) -> Self {
        let span = tracing::info_span!("prgate.pull_request", number = number);
        Self {
            _span: span.entered(),
        }
    }
}

/// Emit event: open pull requests fetched from the source.
pub fn emit_pull_requests_fetched(count: usize) {
    info!(event = "source.fetched", count = count);
}

/// Emit event: one validation pass finished.
///
/// `table_len` is the size of the rule catalog; the difference to the
/// executed results is the number of skipped rules.
pub fn emit_validation_finished(verdict: &ValidationVerdict, table_len: usize) {
    let executed = verdict.results.len();
    for failure in verdict.failures() {
        debug!(
            event = "validation.rule_failed",
            number = verdict.pull_request.number,
            rule = %failure.rule,
            reason = %failure.reason,
        );
    }
    info!(
        event = "validation.finished",
        number = verdict.pull_request.number,
        author = %verdict.pull_request.author_id,
        passed = verdict.passed,
        executed = executed,
        skipped = table_len.saturating_sub(executed),
    );
}

/// Emit event: merge endpoint answered.
pub fn emit_merge_attempted(number: u64, merged: bool, message: &str) {
    info!(event = "merge.attempted", number = number, merged = merged, message = %message);
}

/// Emit event: merge call failed in transport (warning level).
pub fn emit_merge_error(number: u64, error: &dyn std::fmt::Display) {
    warn!(event = "merge.error", number = number, error = %error);
}

/// Emit event: run summary by bucket.
pub fn emit_run_summary(total: usize, successful: usize, rejected: usize, failed: usize) {
    info!(
        event = "run.summary",
        total = total,
        successful = successful,
        rejected = rejected,
        failed = failed,
    );
}
