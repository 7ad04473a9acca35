//! Validation pass over one pull request.
//!
//! [`evaluate`] is the whole engine: it walks [`RULE_TABLE`] once, skipping
//! rules whose prerequisite flags are not granted, and folds the executed
//! results into a [`ValidationVerdict`]. It is a pure function of its
//! arguments. [`Validator`] bundles the policy and directory for hosts and
//! adds structured logging around each pass.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use crate::config::ValidationPolicy;
use crate::directory::UserDirectory;
use crate::domain::{CommitFile, PullRequest, RuleResult, ValidationVerdict};
use crate::obs;
use crate::path::PathParser;
use crate::rules::{check_rule, Flag, RuleInput, RULE_TABLE};

/// Settings and clock for one validation pass.
#[derive(Debug, Clone, Copy)]
pub struct EvalContext<'a> {
    pub policy: &'a ValidationPolicy,
    /// Instant that "yesterday" is measured from.
    pub now: DateTime<Utc>,
}

/// Per-PR accumulator. Lives only inside [`evaluate`].
struct ValidationSession<'a> {
    input: RuleInput<'a>,
    flags: BTreeSet<Flag>,
    results: Vec<RuleResult>,
}

impl<'a> ValidationSession<'a> {
    fn new(input: RuleInput<'a>) -> Self {
        Self {
            input,
            flags: BTreeSet::new(),
            results: Vec::with_capacity(RULE_TABLE.len()),
        }
    }

    fn run(mut self) -> ValidationVerdict {
        for spec in RULE_TABLE {
            if !spec.requires.iter().all(|f| self.flags.contains(f)) {
                continue;
            }
            let result = match check_rule(spec.id, &self.input) {
                None => RuleResult::pass(spec.id),
                Some(reason) => RuleResult::fail(spec.id, reason),
            };
            if result.passed {
                if let Some(flag) = spec.grants {
                    self.flags.insert(flag);
                }
            }
            self.results.push(result);
        }

        let passed = self.results.iter().all(|r| r.passed);
        ValidationVerdict {
            pull_request: self.input.pull_request.clone(),
            passed,
            results: self.results,
        }
    }
}

/// Validate one pull request against its parsed files.
pub fn evaluate(
    pr: &PullRequest,
    files: &[CommitFile],
    directory: &dyn UserDirectory,
    ctx: EvalContext<'_>,
) -> ValidationVerdict {
    let display_name = directory.lookup(&pr.author_id);
    let input = RuleInput {
        pull_request: pr,
        files,
        display_name: display_name.as_deref(),
        policy: ctx.policy,
        now: ctx.now,
    };
    ValidationSession::new(input).run()
}

/// Policy + directory bundle used by hosts.
pub struct Validator<D> {
    policy: ValidationPolicy,
    parser: PathParser,
    directory: D,
}

impl<D: UserDirectory> Validator<D> {
    pub fn new(policy: ValidationPolicy, directory: D) -> Self {
        let parser = PathParser::new(policy.prefix_marker.clone());
        Self {
            policy,
            parser,
            directory,
        }
    }

    pub fn policy(&self) -> &ValidationPolicy {
        &self.policy
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    /// Parse the PR's files and evaluate it as of `now`.
    pub fn validate(&self, pr: &PullRequest, now: DateTime<Utc>) -> ValidationVerdict {
        let _span = obs::PullRequestSpan::enter(pr.number);
        let files = self.parser.parse_all(&pr.files);
        let verdict = evaluate(
            pr,
            &files,
            &self.directory,
            EvalContext {
                policy: &self.policy,
                now,
            },
        );
        obs::emit_validation_finished(&verdict, RULE_TABLE.len());
        verdict
    }

    /// Validate every PR in order.
    pub fn validate_all(&self, prs: &[PullRequest], now: DateTime<Utc>) -> Vec<ValidationVerdict> {
        prs.iter().map(|pr| self.validate(pr, now)).collect()
    }
}
