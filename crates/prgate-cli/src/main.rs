//! prgate - Pull Request Submission Gate CLI
//!
//! Validates study-group pull requests against the submission convention
//! and merges the ones that pass.
//!
//! ## Commands
//!
//! - `run`: fetch open PRs from GitHub, validate, merge, write a run report
//! - `check`: validate PRs from a JSON file without any network access
//! - `parse`: show how file paths decompose into folder, prefix and name

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use prgate_core::{
    merge_passing, write_run_report, MergeClient, PathParser, PullRequestSource, ReportBucket,
    RunReport, StaticDirectory, StaticSource, ValidationVerdict, Validator, ValidatorConfig,
};
use prgate_github::{GithubClient, GithubConfig, DEFAULT_API_URL};
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "prgate")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Validate and merge study-group pull request submissions", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch open pull requests, validate them and merge the passing ones
    Run {
        /// Validator config (TOML); built-in defaults when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,

        #[command(flatten)]
        github: GithubArgs,

        /// Validate and report without calling the merge endpoint
        #[arg(long)]
        skip_merge: bool,

        /// Directory for run_report.json and its digest
        #[arg(long, default_value = ".prgate")]
        report_dir: PathBuf,
    },

    /// Validate pull requests from a JSON file (array of pull requests)
    Check {
        /// Validator config (TOML); built-in defaults when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// JSON file with the pull requests to validate
        #[arg(short, long)]
        input: PathBuf,

        /// Evaluate as of this RFC 3339 instant instead of the current time
        #[arg(long)]
        now: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Show how file paths are decomposed
    Parse {
        /// Validator config (TOML); only the numeric prefix setting is used
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Repository-relative file paths
        #[arg(required = true)]
        paths: Vec<String>,
    },
}

#[derive(Args)]
struct GithubArgs {
    /// Repository owner
    #[arg(long, env = "GITHUB_OWNER")]
    owner: String,

    /// Repository name (`owner/name` is accepted as well)
    #[arg(long, env = "GITHUB_REPOSITORY")]
    repository: String,

    /// Access token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// REST API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Pause before each merge request, in milliseconds
    #[arg(long, default_value_t = 0)]
    merge_delay_ms: u64,
}

impl GithubArgs {
    fn to_config(&self) -> GithubConfig {
        let repository = self
            .repository
            .rsplit_once('/')
            .map(|(_, name)| name)
            .unwrap_or(&self.repository);
        let config = GithubConfig::new(&self.owner, repository)
            .with_api_url(&self.api_url)
            .with_merge_delay(Duration::from_millis(self.merge_delay_ms));
        match &self.token {
            Some(token) => config.with_token(token),
            None => config,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    prgate_core::init_tracing(cli.json, level);

    match cli.command {
        Commands::Run {
            config,
            github,
            skip_merge,
            report_dir,
        } => cmd_run(config.as_deref(), &github, skip_merge, &report_dir).await,
        Commands::Check {
            config,
            input,
            now,
            format,
        } => cmd_check(config.as_deref(), &input, now.as_deref(), format).await,
        Commands::Parse { config, paths } => cmd_parse(config.as_deref(), &paths),
    }
}

fn load_config(path: Option<&Path>) -> Result<ValidatorConfig> {
    match path {
        Some(path) => ValidatorConfig::load(path)
            .with_context(|| format!("Failed to load config {:?}", path)),
        None => Ok(ValidatorConfig::default()),
    }
}

fn build_validator(config: &ValidatorConfig) -> Result<Validator<StaticDirectory>> {
    let policy = config.compile().context("Invalid validator config")?;
    let directory = StaticDirectory::from_members(config.members.clone());
    if directory.is_empty() {
        tracing::warn!("no members configured; every pull request will be rejected");
    }
    Ok(Validator::new(policy, directory))
}

fn parse_now(raw: Option<&str>) -> Result<DateTime<Utc>> {
    match raw {
        Some(raw) => Ok(DateTime::parse_from_rfc3339(raw)
            .with_context(|| format!("Invalid --now value '{}'", raw))?
            .with_timezone(&Utc)),
        None => Ok(Utc::now()),
    }
}

/// Fetch → validate → merge → bucket.
async fn run_pipeline(
    validator: &Validator<StaticDirectory>,
    source: &dyn PullRequestSource,
    merger: &dyn MergeClient,
    now: DateTime<Utc>,
    skip_merge: bool,
) -> Result<RunReport> {
    let prs = source
        .open_pull_requests()
        .await
        .context("Failed to fetch pull requests")?;
    info!(count = prs.len(), skip_merge, "validating pull requests");

    let verdicts = validator.validate_all(&prs, now);
    let reports = merge_passing(verdicts, merger, skip_merge).await;
    Ok(RunReport::build(
        reports,
        validator.directory(),
        now,
        skip_merge,
    ))
}

async fn cmd_run(
    config_path: Option<&Path>,
    github: &GithubArgs,
    skip_merge: bool,
    report_dir: &Path,
) -> Result<()> {
    let config = load_config(config_path)?;
    let validator = build_validator(&config)?;
    let client = GithubClient::new(github.to_config()).context("Failed to create GitHub client")?;

    let report = run_pipeline(&validator, &client, &client, Utc::now(), skip_merge).await?;
    let path = write_run_report(&report, report_dir).context("Failed to write run report")?;

    print!("{}", render_report(&report));
    println!("Report written to {:?}", path);
    Ok(())
}

async fn cmd_check(
    config_path: Option<&Path>,
    input: &Path,
    now: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let config = load_config(config_path)?;
    let validator = build_validator(&config)?;
    let now = parse_now(now)?;

    let raw = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read {:?}", input))?;
    let source = StaticSource::from_json(&raw).context("Failed to parse pull requests")?;
    let prs = source.open_pull_requests().await?;
    let verdicts = validator.validate_all(&prs, now);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&verdicts)?),
        OutputFormat::Text => {
            for verdict in &verdicts {
                print!("{}", render_verdict(verdict));
            }
        }
    }

    let rejected = verdicts.iter().filter(|v| !v.passed).count();
    if rejected > 0 {
        bail!("{} of {} pull requests rejected", rejected, verdicts.len());
    }
    Ok(())
}

fn cmd_parse(config_path: Option<&Path>, paths: &[String]) -> Result<()> {
    let config = load_config(config_path)?;
    let parser = PathParser::new(config.numeric_prefix);
    for file in parser.parse_all(paths) {
        println!("{}", file.to_path());
        println!("  dirs:      {}", file.dirs.join(" / "));
        println!("  prefix:    {:?}", file.prefix);
        println!("  base:      {}", file.base);
        println!("  extension: {:?}", file.extension);
    }
    Ok(())
}

fn render_verdict(verdict: &ValidationVerdict) -> String {
    let pr = &verdict.pull_request;
    let mut out = format!(
        "#{} {} ({}): {}\n",
        pr.number,
        pr.title,
        pr.author_id,
        if verdict.passed { "PASS" } else { "FAIL" }
    );
    for failure in verdict.failures() {
        out.push_str(&format!("  - {}: {}\n", failure.rule, failure.reason));
    }
    out
}

fn render_report(report: &RunReport) -> String {
    let mut out = format!(
        "{} pull requests{}\n",
        report.total,
        if report.dry_run { " (dry run)" } else { "" }
    );
    for (label, names, bucket) in [
        ("Merged", &report.successful, ReportBucket::Successful),
        ("Rejected", &report.rejected, ReportBucket::Rejected),
        ("Merge failed", &report.failed, ReportBucket::Failed),
    ] {
        out.push_str(&format!("{}: {}\n", label, names.join(", ")));
        for entry in report.in_bucket(bucket) {
            match bucket {
                ReportBucket::Rejected => out.push_str(&render_verdict(&entry.verdict)),
                ReportBucket::Failed => out.push_str(&format!(
                    "  #{}: {}\n",
                    entry.verdict.pull_request.number, entry.merge.message
                )),
                ReportBucket::Successful => {}
            }
        }
    }
    out
}
