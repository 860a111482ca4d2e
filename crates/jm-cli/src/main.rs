use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use dotenvy::dotenv;
use jm_common::{
    api::{RankInput, RankedJobsResponse},
    config::{ConfigError, EngineConfig},
    logging::{init_tracing_subscriber, install_tracing_panic_hook},
    matching::{collect_facet_options, JobMatchEngine, RankRequest, SessionNotices},
    JobPosting,
};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{error, info, warn};

#[derive(Debug, Parser)]
#[command(
    name = "jm-cli",
    about = "Filter, score and rank job postings for a candidate"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Rank a job list against filters and a candidate profile
    Rank(RankArgs),
    /// List the distinct facet values present in a job list
    Facets(FacetsArgs),
}

#[derive(Debug, Args)]
struct RankArgs {
    /// Single JSON document with jobs, profile, criteria and pendingJobId
    #[arg(long, conflicts_with = "jobs")]
    input: Option<PathBuf>,

    /// JSON array of job postings
    #[arg(long, required_unless_present = "input")]
    jobs: Option<PathBuf>,

    /// Candidate profile JSON
    #[arg(long)]
    profile: Option<PathBuf>,

    /// Filter criteria JSON
    #[arg(long)]
    criteria: Option<PathBuf>,

    /// Job the user started applying to; pinned to the top when still listed
    #[arg(long, env = "JM_PENDING_JOB_ID")]
    pending_job_id: Option<String>,

    /// File recording notices already shown in this session
    #[arg(long, env = "JM_NOTICE_LEDGER")]
    notice_ledger: Option<PathBuf>,

    /// Evaluation time (RFC 3339); defaults to the current time
    #[arg(long)]
    now: Option<String>,

    /// Engine config JSON; JM_* variables still override it
    #[arg(long, env = "JM_CONFIG")]
    config: Option<PathBuf>,

    #[arg(long)]
    pretty: bool,
}

#[derive(Debug, Args)]
struct FacetsArgs {
    /// JSON array of job postings
    #[arg(long)]
    jobs: PathBuf,

    #[arg(long)]
    pretty: bool,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid --now timestamp {value:?}: {source}")]
    Timestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to encode output: {0}")]
    Output(#[source] serde_json::Error),
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let raw = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| CliError::Json {
        path: path.display().to_string(),
        source,
    })
}

fn render<T: Serialize>(value: &T, pretty: bool) -> Result<String, CliError> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    rendered.map_err(CliError::Output)
}

fn parse_now(value: Option<&str>) -> Result<DateTime<Utc>, CliError> {
    let Some(value) = value else {
        return Ok(Utc::now());
    };
    DateTime::parse_from_rfc3339(value.trim())
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|source| CliError::Timestamp {
            value: value.to_string(),
            source,
        })
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig, CliError> {
    let base = match path {
        Some(path) => EngineConfig::from_json_file(path)?,
        None => EngineConfig::default(),
    };
    Ok(base.with_overrides(|key| std::env::var(key).ok())?)
}

/// Assembles the ranking input from `--input` or the per-part files.
/// `--pending-job-id` wins over a pendingJobId in the input document.
fn load_input(args: &RankArgs) -> Result<RankInput, CliError> {
    let mut input = match &args.input {
        Some(path) => read_json::<RankInput>(path)?,
        None => RankInput::default(),
    };

    if let Some(path) = &args.jobs {
        input.jobs = read_json::<Vec<JobPosting>>(path)?;
    }
    if let Some(path) = &args.profile {
        input.profile = read_json(path)?;
    }
    if let Some(path) = &args.criteria {
        input.criteria = read_json(path)?;
    }
    if let Some(id) = &args.pending_job_id {
        input.pending_job_id = Some(id.clone());
    }

    Ok(input)
}

/// A missing ledger file starts a fresh session.
fn load_notices(path: Option<&Path>) -> Result<SessionNotices, CliError> {
    match path {
        Some(path) if path.exists() => read_json(path),
        _ => Ok(SessionNotices::new()),
    }
}

fn save_notices(path: &Path, notices: &SessionNotices) -> Result<(), CliError> {
    let body = render(notices, true)?;
    fs::write(path, body).map_err(|source| CliError::Write {
        path: path.display().to_string(),
        source,
    })
}

fn run_rank(args: &RankArgs) -> Result<String, CliError> {
    let config = load_config(args.config.as_deref())?;
    let input = load_input(args)?;
    let now = parse_now(args.now.as_deref())?;
    let mut notices = load_notices(args.notice_ledger.as_deref())?;

    let engine = JobMatchEngine::new(config);
    let ranked = engine.rank_jobs(
        RankRequest {
            jobs: &input.jobs,
            profile: input.profile.as_ref(),
            criteria: &input.criteria,
            pending_job_id: input.pending_job_id.as_deref(),
            now,
        },
        &mut notices,
    );

    if ranked.assembled.should_clear_pending() {
        warn!(
            pending_job_id = input.pending_job_id.as_deref().unwrap_or_default(),
            "pending application is no longer listed"
        );
    }

    if let Some(path) = &args.notice_ledger {
        save_notices(path, &notices)?;
    }

    render(&RankedJobsResponse::from(ranked), args.pretty)
}

fn run_facets(args: &FacetsArgs) -> Result<String, CliError> {
    let jobs: Vec<JobPosting> = read_json(&args.jobs)?;
    info!(jobs = jobs.len(), "collecting facet options");
    render(&collect_facet_options(&jobs), args.pretty)
}

fn run(cli: Cli) -> Result<String, CliError> {
    match cli.command {
        Command::Rank(args) => run_rank(&args),
        Command::Facets(args) => run_facets(&args),
    }
}

fn main() {
    dotenv().ok();
    init_tracing_subscriber("jm-cli");
    install_tracing_panic_hook(env!("CARGO_PKG_NAME"));

    let cli = Cli::parse();
    match run(cli) {
        Ok(output) => println!("{output}"),
        Err(err) => {
            error!(error = %err, "jm-cli failed");
            eprintln!("jm-cli failed: {err}");
            std::process::exit(1);
        }
    }
}
