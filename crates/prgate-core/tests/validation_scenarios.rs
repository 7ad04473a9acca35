//! End-to-end validation passes over realistic submissions.

use chrono::{DateTime, Utc};
use prgate_core::{
    evaluate, EvalContext, FolderPolicy, PathParser, PrefixMarker, PullRequest, RuleId,
    StaticDirectory, TitleDatePolicy, UserDirectory, ValidationPolicy, ValidationVerdict,
    Validator, ValidatorConfig,
};

fn utc(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .expect("parse RFC3339")
        .with_timezone(&Utc)
}

/// 2023-03-22 10:00 KST, so "yesterday" is 23-03-21.
fn now() -> DateTime<Utc> {
    utc("2023-03-22T01:00:00Z")
}

fn config() -> ValidatorConfig {
    ValidatorConfig {
        folder_policy: FolderPolicy::Allowed {
            folders: vec!["problems".to_string()],
        },
        allowed_extensions: vec!["cpp".to_string(), "py".to_string()],
        max_reported_files: 3,
        ..ValidatorConfig::default()
    }
}

fn directory() -> StaticDirectory {
    StaticDirectory::new().with_member("alice", "Alice")
}

fn submission(author: &str, files: &[&str]) -> PullRequest {
    PullRequest {
        number: 12,
        title: "[Tag] 23-03-21".to_string(),
        author_id: author.to_string(),
        created_at: utc("2023-03-21T11:00:00Z"),
        labels: vec!["Alice".to_string()],
        files: files.iter().map(|f| f.to_string()).collect(),
    }
}

fn run(config: &ValidatorConfig, pr: &PullRequest) -> ValidationVerdict {
    let policy = config.compile().expect("compile config");
    Validator::new(policy, directory()).validate(pr, now())
}

fn executed(verdict: &ValidationVerdict) -> Vec<RuleId> {
    verdict.results.iter().map(|r| r.rule).collect()
}

// ---- Submissions ----

#[test]
fn well_formed_submission_passes_every_rule() {
    let pr = submission("alice", &["teamfolder/problems/1000_alice.cpp"]);
    let verdict = run(&config(), &pr);

    assert!(verdict.passed, "reasons: {:?}", verdict.reasons());
    assert_eq!(verdict.results.len(), 11);
    assert!(verdict.results.iter().all(|r| r.passed && r.reason.is_empty()));
}

#[test]
fn unknown_author_stops_after_user_id() {
    let pr = submission("mallory", &["teamfolder/problems/1000_alice.cpp"]);
    let verdict = run(&config(), &pr);

    assert!(!verdict.passed);
    assert_eq!(verdict.results.len(), 1);
    assert_eq!(verdict.results[0].rule, RuleId::UserId);
    assert!(!verdict.results[0].passed);
    assert!(verdict.results[0].reason.contains("mallory"));
}

#[test]
fn extension_reason_lists_all_without_ellipsis() {
    let pr = submission(
        "alice",
        &[
            "teamfolder/problems/1000_alice.txt",
            "teamfolder/problems/1001_alice.docx",
        ],
    );
    let verdict = run(&config(), &pr);

    let ext = verdict.result(RuleId::FileExtension).expect("extension rule ran");
    assert!(!ext.passed);
    assert!(ext.reason.contains("1000_alice.txt, 1001_alice.docx"));
    assert!(!ext.reason.contains("..."));
    assert!(!verdict.passed);
}

#[test]
fn special_characters_truncate_after_three() {
    let pr = submission(
        "alice",
        &[
            "teamfolder/problems/1000 alice.cpp",
            "teamfolder/problems/1001 alice.cpp",
            "teamfolder/problems/1002!alice.cpp",
            "teamfolder/problems/1003#alice.cpp",
            "teamfolder/problems/1004@alice.cpp",
        ],
    );
    let verdict = run(&config(), &pr);

    let special = verdict.result(RuleId::FileNoSpecial).expect("rule ran");
    assert!(!special.passed);
    assert!(special
        .reason
        .ends_with("(1000 alice.cpp, 1001 alice.cpp, 1002!alice.cpp...)"));
    assert!(!special.reason.contains("1003#alice.cpp"));
}

// ---- Gating properties ----

#[test]
fn failed_no_special_gates_off_all_file_shape_rules() {
    let pr = submission("alice", &["teamfolder/problems/1000 alice.cpp"]);
    let verdict = run(&config(), &pr);

    let ran = executed(&verdict);
    for gated in [
        RuleId::FileFirstcharNotDigit,
        RuleId::FilePath,
        RuleId::FileExtension,
        RuleId::FileFormat,
        RuleId::FilePrefixConsistency,
        RuleId::FileUsername,
    ] {
        assert!(!ran.contains(&gated), "{gated} should have been skipped");
    }
    assert_eq!(
        ran,
        vec![
            RuleId::UserId,
            RuleId::TitleFormat,
            RuleId::TitleDate,
            RuleId::Labels,
            RuleId::FileNoSpecial
        ]
    );
}

#[test]
fn failed_format_gates_off_prefix_and_username() {
    let pr = submission("alice", &["teamfolder/problems/1000.cpp"]);
    let verdict = run(&config(), &pr);

    let ran = executed(&verdict);
    assert!(ran.contains(&RuleId::FileFormat));
    assert!(!ran.contains(&RuleId::FilePrefixConsistency));
    assert!(!ran.contains(&RuleId::FileUsername));
    assert!(ran.contains(&RuleId::FileExtension));
    assert!(!verdict.passed);
}

#[test]
fn wrong_author_name_in_file_fails_username_only() {
    let pr = submission("alice", &["teamfolder/problems/1000_bob.cpp"]);
    let verdict = run(&config(), &pr);

    assert_eq!(verdict.results.len(), 11);
    let failed: Vec<RuleId> = verdict.failures().map(|r| r.rule).collect();
    assert_eq!(failed, vec![RuleId::FileUsername]);
    assert!(verdict.reasons()[0].contains("1000_bob.cpp"));
}

#[test]
fn missing_label_is_reported() {
    let mut pr = submission("alice", &["teamfolder/problems/1000_alice.cpp"]);
    pr.labels = vec!["week-3".to_string()];
    let verdict = run(&config(), &pr);

    let labels = verdict.result(RuleId::Labels).unwrap();
    assert!(!labels.passed);
    assert!(labels.reason.contains("Alice"));
}

#[test]
fn stale_title_date_fails() {
    let mut pr = submission("alice", &["teamfolder/problems/1000_alice.cpp"]);
    pr.title = "[Tag] 23-03-19".to_string();
    let verdict = run(&config(), &pr);

    assert!(!verdict.result(RuleId::TitleDate).unwrap().passed);
    assert!(!verdict.passed);
}

#[test]
fn impossible_title_date_fails_without_panicking() {
    let mut pr = submission("alice", &["teamfolder/problems/1000_alice.cpp"]);
    pr.title = "[Tag] 23-02-30".to_string();
    let verdict = run(&config(), &pr);

    let date = verdict.result(RuleId::TitleDate).unwrap();
    assert!(!date.passed);
    assert!(date.reason.contains("yy-mm-dd"));
}

#[test]
fn wrong_folder_depth_is_rejected() {
    let pr = submission(
        "alice",
        &["problems/1000_alice.cpp", "a/problems/extra/1001_alice.cpp"],
    );
    let verdict = run(&config(), &pr);

    let path = verdict.result(RuleId::FilePath).unwrap();
    assert!(!path.passed);
    assert!(path.reason.contains("problems/1000_alice.cpp"));
    assert!(path.reason.contains("a/problems/extra/1001_alice.cpp"));
}

#[test]
fn folder_and_extension_match_case_insensitively() {
    let pr = submission("alice", &["teamfolder/PROBLEMS/1000_alice.CPP"]);
    let verdict = run(&config(), &pr);
    assert!(verdict.passed, "reasons: {:?}", verdict.reasons());
}

// ---- Edge-case policies ----

#[test]
fn empty_file_list_passes_file_rules_vacuously() {
    let pr = submission("alice", &[]);
    let verdict = run(&config(), &pr);

    assert_eq!(verdict.results.len(), 11);
    assert!(verdict.passed);
}

#[test]
fn multi_dot_name_uses_last_extension() {
    let pr = submission("alice", &["teamfolder/problems/1000_alice.test.cpp"]);
    let verdict = run(&config(), &pr);

    assert!(verdict.result(RuleId::FileExtension).unwrap().passed);
    // base is "1000_alice.test", whose last token is "alice.test"
    assert!(!verdict.result(RuleId::FileUsername).unwrap().passed);
}

#[test]
fn literal_marker_required_for_numeric_names() {
    let config = ValidatorConfig {
        numeric_prefix: PrefixMarker::Literal {
            tag: "B_".to_string(),
        },
        ..config()
    };

    let plain = run(&config, &submission("alice", &["t/problems/1000_alice.cpp"]));
    let first = plain.result(RuleId::FileFirstcharNotDigit).unwrap();
    assert!(!first.passed);
    assert!(first.reason.contains("1000_alice.cpp"));

    let marked = run(&config, &submission("alice", &["t/problems/B_1000_alice.cpp"]));
    assert!(marked.passed, "reasons: {:?}", marked.reasons());

    let named = run(&config, &submission("alice", &["t/problems/HelloWorld_alice.cpp"]));
    assert!(named.passed, "reasons: {:?}", named.reasons());
}

#[test]
fn marker_without_problem_number_fails_prefix_consistency() {
    let config = ValidatorConfig {
        numeric_prefix: PrefixMarker::Literal {
            tag: "B_".to_string(),
        },
        ..config()
    };
    let verdict = run(&config, &submission("alice", &["t/problems/B_hello_alice.cpp"]));

    let failed: Vec<RuleId> = verdict.failures().map(|r| r.rule).collect();
    assert_eq!(failed, vec![RuleId::FilePrefixConsistency]);
    assert!(verdict.reasons()[0].contains("t/problems/B_hello_alice.cpp"));
    assert!(!verdict.passed);
}

#[test]
fn implicit_marker_never_fails_digit_rules() {
    for file in ["t/problems/1000_alice.cpp", "t/problems/hello_alice.cpp"] {
        let verdict = run(&config(), &submission("alice", &[file]));
        assert!(verdict.result(RuleId::FileFirstcharNotDigit).unwrap().passed);
        assert!(verdict.result(RuleId::FilePrefixConsistency).unwrap().passed);
    }
}

#[test]
fn zero_max_reported_files_omits_the_listing() {
    let config = ValidatorConfig {
        max_reported_files: 0,
        ..config()
    };
    let verdict = run(&config, &submission("alice", &["t/problems/1000_alice.txt"]));

    let ext = verdict.result(RuleId::FileExtension).unwrap();
    assert!(!ext.passed);
    assert!(!ext.reason.contains("..."));
    assert!(!ext.reason.contains('('));
}

// ---- Configurable variants ----

#[test]
fn custom_title_pattern_must_match_from_the_start() {
    let config = ValidatorConfig {
        title_pattern: r"\[Baekjoon\] \d{2}-\d{2}-\d{2}".to_string(),
        ..config()
    };
    let mut pr = submission("alice", &["t/problems/1000_alice.cpp"]);
    pr.title = "[Baekjoon] 23-03-21".to_string();
    assert!(run(&config, &pr).passed);

    pr.title = "RE: not a submission [Baekjoon] 23-03-21".to_string();
    let verdict = run(&config, &pr);
    assert!(!verdict.result(RuleId::TitleFormat).unwrap().passed);
    assert!(verdict.result(RuleId::TitleDate).is_none());
    assert!(!verdict.passed);
}

#[test]
fn current_week_folder_policy() {
    let config = ValidatorConfig {
        folder_policy: FolderPolicy::CurrentWeek {
            suffix: "주차".to_string(),
        },
        cohort_start: chrono::NaiveDate::from_ymd_opt(2023, 3, 6).unwrap(),
        ..config()
    };

    // created 2023-03-21 KST → week 3
    let ok = run(&config, &submission("alice", &["Baekjoon/3주차/1000_alice.cpp"]));
    assert!(ok.passed, "reasons: {:?}", ok.reasons());

    let wrong = run(&config, &submission("alice", &["Baekjoon/2주차/1000_alice.cpp"]));
    let path = wrong.result(RuleId::FilePath).unwrap();
    assert!(!path.passed);
    assert!(path.reason.contains("3주차"));
}

#[test]
fn submission_window_policy_uses_created_at() {
    let config = ValidatorConfig {
        title_date: TitleDatePolicy::SubmissionWindow,
        ..config()
    };
    let mut pr = submission("alice", &["t/problems/1000_alice.cpp"]);

    // 2023-03-22 08:30 KST, inside the window of 23-03-21
    pr.created_at = utc("2023-03-21T23:30:00Z");
    assert!(run(&config, &pr).passed);

    // 2023-03-22 09:30 KST, past the window
    pr.created_at = utc("2023-03-22T00:30:00Z");
    let late = run(&config, &pr);
    assert!(!late.result(RuleId::TitleDate).unwrap().passed);
}

// ---- Purity ----

struct FakeDirectory;

impl UserDirectory for FakeDirectory {
    fn lookup(&self, id: &str) -> Option<String> {
        (id == "alice").then(|| "alice".to_string())
    }
}

#[test]
fn evaluate_accepts_injected_directory_and_is_idempotent() {
    let policy: ValidationPolicy = config().compile().unwrap();
    let pr = submission("alice", &["teamfolder/problems/1000_alice.cpp", "x/y z.cpp"]);
    let files = PathParser::new(policy.prefix_marker.clone()).parse_all(&pr.files);
    let ctx = EvalContext {
        policy: &policy,
        now: now(),
    };

    let first = evaluate(&pr, &files, &FakeDirectory, ctx);
    let second = evaluate(&pr, &files, &FakeDirectory, ctx);

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_vec(&first).unwrap(),
        serde_json::to_vec(&second).unwrap()
    );
    assert!(!first.passed);
}
