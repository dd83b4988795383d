#![deny(missing_docs)]
//! GitGrade command-line interface.
//!
//! Fetches repository metadata, grades it and renders the resulting reports.

mod github;

use chrono::{DateTime, Utc};
use clap::{ArgGroup, Args, Parser, Subcommand, ValueEnum};
use github::{FetchArgs, GitHubClient};
use gitgrade_core::{
    AnalysisReport, ExportDocument, ProfileSource, RawRepository, RepoSlug, assemble,
    category_table, export_file_name, render_json, render_markdown, resolve_report,
};
use std::fmt::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

pub(crate) type CliResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[derive(Parser)]
#[command(name = "gitgrade", version, about = "GitGrade CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone)]
#[command(group(
    ArgGroup::new("source")
        .required(true)
        .args(&["file", "url"])
))]
struct RepoSourceArgs {
    /// File containing repository URLs (one per line).
    #[arg(short, long)]
    file: Option<PathBuf>,
    /// Single repository URL or `owner/name`.
    #[arg(long)]
    url: Option<String>,
}

#[derive(Args, Clone)]
struct ClockArgs {
    /// Reference instant (RFC 3339) to grade against instead of the current time.
    #[arg(long)]
    now: Option<DateTime<Utc>>,
}

impl ClockArgs {
    fn resolve(&self) -> DateTime<Utc> {
        self.now.unwrap_or_else(Utc::now)
    }
}

#[derive(Args, Clone)]
struct OutputArgs {
    /// Output format for report data.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Write the report to a file instead of stdout.
    #[arg(long = "report-output")]
    report_output: Option<PathBuf>,
    /// Also write one export document per repository into this directory.
    #[arg(long = "export-dir")]
    export_dir: Option<PathBuf>,
}

#[derive(ValueEnum, Copy, Clone, Debug, Eq, PartialEq)]
enum OutputFormat {
    Text,
    Json,
    Markdown,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch and grade repositories from a URL or a file of URLs.
    Analyze {
        #[command(flatten)]
        source: RepoSourceArgs,
        #[command(flatten)]
        fetch: FetchArgs,
        #[command(flatten)]
        clock: ClockArgs,
        #[command(flatten)]
        report: OutputArgs,
    },
    /// Grade a repository metadata record stored in a local JSON file.
    Score {
        /// Path to the JSON metadata record.
        #[arg(short, long)]
        input: PathBuf,
        #[command(flatten)]
        clock: ClockArgs,
        #[command(flatten)]
        report: OutputArgs,
    },
    /// List the scored categories.
    Categories,
}

#[cfg(not(test))]
#[tokio::main]
async fn main() -> CliResult<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            source,
            fetch,
            clock,
            report,
        } => {
            let slugs = load_slugs(&source).await?;
            let client = GitHubClient::from_args(&fetch)?;
            run_analyze(slugs, client, fetch.concurrency, clock.resolve(), report).await?
        }
        Commands::Score {
            input,
            clock,
            report,
        } => run_score(&input, clock.resolve(), report).await?,
        Commands::Categories => print!("{}", render_categories()),
    }

    Ok(())
}

#[cfg(test)]
fn main() {}

async fn run_analyze(
    slugs: Vec<RepoSlug>,
    client: GitHubClient,
    concurrency: usize,
    now: DateTime<Utc>,
    report: OutputArgs,
) -> CliResult<()> {
    if slugs.is_empty() {
        println!("No repositories found to analyze.");
        return Ok(());
    }

    let client = Arc::new(client);
    let concurrency = if concurrency == 0 { 1 } else { concurrency };
    let semaphore = Arc::new(Semaphore::new(concurrency));
    let mut tasks = JoinSet::new();

    for (index, slug) in slugs.into_iter().enumerate() {
        let permit = semaphore.clone().acquire_owned().await?;
        let client = client.clone();
        tasks.spawn(async move {
            let _permit = permit;
            let fetched = client.fetch_repository(&slug).await;
            let result =
                resolve_report(&slug, fetched, now).map_err(|err| format!("{slug}: {err}"));
            (index, result)
        });
    }

    let mut outcomes = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(outcome) => outcomes.push(outcome),
            Err(err) => return Err(format!("analysis task failed: {err}").into()),
        }
    }
    outcomes.sort_by_key(|(index, _)| *index);

    let mut reports = Vec::new();
    let mut failures = Vec::new();
    for (_, outcome) in outcomes {
        match outcome {
            Ok(report) => reports.push(report),
            Err(message) => failures.push(message),
        }
    }

    emit_reports(&reports, &report).await?;
    if failures.is_empty() {
        return Ok(());
    }
    for failure in &failures {
        log::error!("{failure}");
        eprintln!("error: {failure}");
    }
    Err(format!("{} of the repositories could not be analyzed", failures.len()).into())
}

async fn run_score(input: &Path, now: DateTime<Utc>, report: OutputArgs) -> CliResult<()> {
    let contents = tokio::fs::read_to_string(input).await?;
    let raw = RawRepository::from_json(&contents)?;
    let analysis = assemble(raw, now);
    emit_reports(&[analysis], &report).await
}

async fn load_slugs(source: &RepoSourceArgs) -> CliResult<Vec<RepoSlug>> {
    if let Some(file) = &source.file {
        return load_repo_urls(file)
            .await?
            .iter()
            .map(|url| RepoSlug::parse(url).map_err(Into::into))
            .collect();
    }
    if let Some(url) = &source.url {
        return Ok(vec![RepoSlug::parse(url)?]);
    }
    Err("no repository source provided".into())
}

async fn load_repo_urls(path: &Path) -> CliResult<Vec<String>> {
    let contents = tokio::fs::read_to_string(path).await?;
    let urls = contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect();
    Ok(urls)
}

async fn emit_reports(reports: &[AnalysisReport], output: &OutputArgs) -> CliResult<()> {
    if let Some(dir) = &output.export_dir {
        for path in write_exports(reports, dir).await? {
            eprintln!("Export written to {}", path.display());
        }
    }
    let contents = match output.format {
        OutputFormat::Text => render_text(reports),
        OutputFormat::Json => render_json(reports)?,
        OutputFormat::Markdown => render_markdown(reports),
    };
    emit_output(output, contents).await
}

async fn write_exports(reports: &[AnalysisReport], dir: &Path) -> CliResult<Vec<PathBuf>> {
    tokio::fs::create_dir_all(dir).await?;
    let mut written = Vec::with_capacity(reports.len());
    for report in reports {
        let name = export_file_name(
            &report.repository.owner,
            &report.repository.name,
            report.generated_at,
        );
        let path = dir.join(name);
        let document = render_json(&ExportDocument::from(report))?;
        tokio::fs::write(&path, document).await?;
        written.push(path);
    }
    Ok(written)
}

async fn emit_output(output: &OutputArgs, contents: String) -> CliResult<()> {
    if let Some(path) = &output.report_output {
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, contents).await?;
        println!("Report written to {}", path.display());
    } else {
        print!("{contents}");
    }
    Ok(())
}

fn render_text(reports: &[AnalysisReport]) -> String {
    let mut output = String::new();
    for report in reports {
        let repo = &report.repository;
        let _ = writeln!(
            output,
            "{}  grade {}  score {}/100",
            repo.full_name(),
            report.grade,
            report.overall_score
        );
        if report.profile_source == ProfileSource::Fallback {
            let _ = writeln!(output, "  (metadata unavailable, fallback profile used)");
        }
        let _ = writeln!(
            output,
            "  {} | {} stars | {} forks | {} open issues",
            repo.primary_language, repo.star_count, repo.fork_count, repo.open_issue_count
        );
        let _ = writeln!(output, "  Scores:");
        for (category, score) in report.category_scores.iter() {
            let _ = writeln!(output, "    {:<15} {score:>3}", category.label());
        }
        let _ = writeln!(output, "  Strengths:");
        for strength in &report.insights.strengths {
            let _ = writeln!(output, "    + {strength}");
        }
        let _ = writeln!(output, "  Improvements:");
        for improvement in &report.insights.improvements {
            let _ = writeln!(output, "    - {improvement}");
        }
        let _ = writeln!(output, "  Roadmap:");
        for (index, item) in report.roadmap.iter().enumerate() {
            let _ = writeln!(
                output,
                "    {}. [{} priority / {} impact] {}",
                index + 1,
                item.priority,
                item.impact,
                item.title
            );
        }
        let metrics = &report.metrics;
        let _ = writeln!(
            output,
            "  Commits: {} | Contributors: ~{} | Issue response: {} | Complexity: {}",
            metrics.commit_frequency_label,
            metrics.contributor_estimate,
            metrics.issue_response_label,
            metrics.complexity_label
        );
        let _ = writeln!(output);
    }
    output
}

fn render_categories() -> String {
    let mut output = String::new();
    for row in category_table() {
        let _ = writeln!(
            output,
            "{:<15} {:<14} {:<10} {}",
            row.key, row.label, row.short_label, row.icon
        );
    }
    output
}
