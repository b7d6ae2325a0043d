//! `newsletter` command line tool
//!
//! Run with: cargo run -- --help

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate};
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use newsletter_rs::config::{DEFAULT_API_BASE, TOKEN_ENV};
use newsletter_rs::github::{parse_repo_slug, repo_url};
use newsletter_rs::{
    DEFAULT_BATCH_SIZE, Entry, GithubClient, GithubConfig, GithubSelection, IssueQuery, IssueSort,
    IssueState, LinkStyle, NewsletterConfig, NewsletterError, NewsletterKind, RenderOptions,
    Result, build_dataset, collect_github_records, extract_entries, plan_layout, read_dataset,
    render_newsletter, write_dataset, write_newsletter,
};

#[derive(Parser, Debug)]
#[command(
    name = "newsletter",
    version,
    about = "Generate newsletters and post datasets from front matter documents and GitHub issues"
)]
struct Cli {
    /// Enable debug logging (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a newsletter document from GitHub issues or an existing source
    Generate(GenerateArgs),
    /// Build a JSON dataset from a directory of newsletter documents
    Dataset(DatasetArgs),
    /// Build a JSON dataset from GitHub issues and pull requests
    Fetch(FetchArgs),
    /// Print the layout placement of every entry in a document
    Plan(PlanArgs),
}

#[derive(Args, Debug)]
struct GitHubArgs {
    /// GitHub personal access token
    #[arg(short = 't', long, env = TOKEN_ENV, hide_env_values = true)]
    token: Option<String>,

    /// GitHub API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_BASE)]
    api_base: String,
}

impl GitHubArgs {
    fn client(&self) -> Result<GithubClient> {
        let config = match self.token.as_deref().filter(|t| !t.is_empty()) {
            Some(token) => GithubConfig::with_token(token),
            None => GithubConfig::default(),
        };
        GithubClient::new(config.api_base(self.api_base.as_str()))
    }
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// GitHub repository (owner/name)
    #[arg(long, required_unless_present = "source", conflicts_with = "source")]
    repo: Option<String>,

    /// Newsletter document or JSON dataset to re-render
    #[arg(long)]
    source: Option<PathBuf>,

    /// Newsletter type (blog or mosaic)
    #[arg(long = "type", default_value = "blog")]
    kind: NewsletterKind,

    /// Newsletter title
    #[arg(long, default_value = "Newsletter")]
    title: String,

    /// Issue date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    date: Option<String>,

    /// Number of posts to include
    #[arg(long, default_value_t = 12)]
    count: usize,

    /// Entries per batched grid group
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    batch_size: usize,

    /// Link to repository issue pages (blog type only)
    #[arg(long)]
    internal: bool,

    /// Output file; stdout when omitted
    #[arg(long)]
    output: Option<PathBuf>,

    #[command(flatten)]
    github: GitHubArgs,
}

#[derive(Args, Debug)]
struct DatasetArgs {
    /// Directory of newsletter documents
    #[arg(short, long, default_value = "_newsletters")]
    dir: PathBuf,

    /// Output JSON file
    #[arg(short, long, default_value = "newsletter_dataset.json")]
    output: PathBuf,

    /// Maximum number of posts (0 means no limit)
    #[arg(short, long)]
    limit: Option<usize>,
}

#[derive(Args, Debug)]
struct FetchArgs {
    /// Repository owner
    owner: String,

    /// Repository name
    repo: String,

    /// Maximum number of posts
    #[arg(short, long, default_value_t = 6)]
    limit: usize,

    /// Output JSON file
    #[arg(short, long, default_value = "github_dataset.json")]
    output: PathBuf,

    /// Leave out plain issues
    #[arg(long)]
    no_issues: bool,

    /// Leave out pull requests
    #[arg(long)]
    no_pulls: bool,

    /// Only items updated after this RFC 3339 timestamp
    #[arg(short, long)]
    since: Option<String>,

    #[command(flatten)]
    github: GitHubArgs,
}

#[derive(Args, Debug)]
struct PlanArgs {
    /// Newsletter document
    file: PathBuf,

    /// Entries per batched grid group
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    batch_size: usize,

    /// Print the plan as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Generate(args) => generate(args).await?,
        Command::Dataset(args) => dataset(args)?,
        Command::Fetch(args) => fetch(args).await?,
        Command::Plan(args) => plan(args)?,
    }

    Ok(())
}

fn validate_date(date: &str) -> Result<()> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|e| NewsletterError::InvalidArgument(format!("date '{}': {}", date, e)))
}

fn load_source(path: &Path) -> Result<Vec<Entry>> {
    if path.extension().is_some_and(|ext| ext == "json") {
        let records = read_dataset(path)?;
        return Ok(records.iter().map(|r| r.to_entry()).collect());
    }
    let content = fs::read_to_string(path)?;
    let extraction = extract_entries(&content);
    info!(
        file = %path.display(),
        strategy = %extraction.strategy,
        entries = extraction.entries.len(),
        "loaded source document"
    );
    Ok(extraction.entries)
}

async fn generate(args: GenerateArgs) -> Result<()> {
    if let Some(date) = &args.date {
        validate_date(date)?;
    }

    let mut entries = match (&args.repo, &args.source) {
        (Some(slug), _) => {
            let (owner, repo) = parse_repo_slug(slug)?;
            let links = if args.internal && args.kind == NewsletterKind::Blog {
                LinkStyle::Internal(repo_url(&owner, &repo))
            } else {
                if args.internal {
                    warn!("--internal only applies to blog newsletters, using public links");
                }
                LinkStyle::Public
            };

            info!("Fetching posts from {}/{}", owner, repo);
            let query = IssueQuery::new(owner, repo)
                .state(IssueState::Open)
                .sort(IssueSort::Created)
                .limit(args.count);
            let items = args.github.client()?.fetch_issues(&query).await?;
            if items.is_empty() {
                return Err(NewsletterError::NotFound(format!("no posts in {}", slug)));
            }
            items.iter().map(|item| item.to_entry(&links)).collect()
        }
        (None, Some(path)) => load_source(path)?,
        (None, None) => {
            return Err(NewsletterError::InvalidArgument(
                "either --repo or --source is required".into(),
            ));
        }
    };
    entries.truncate(args.count);
    info!("Found {} posts", entries.len());

    let config = NewsletterConfig {
        kind: args.kind,
        title: args.title,
        date: args.date,
        batch_size: args.batch_size,
    };
    let plan = plan_layout(entries, config.batch_size)?;
    let content = render_newsletter(&plan, &RenderOptions::from_config(&config));

    match &args.output {
        Some(path) => write_newsletter(path, &content)?,
        None => print!("{}", content),
    }
    Ok(())
}

fn dataset(args: DatasetArgs) -> Result<()> {
    let dataset = build_dataset(&args.dir, args.limit)?;
    if dataset.files.is_empty() {
        info!("No newsletter documents in {}, nothing to do", args.dir.display());
    }
    write_dataset(&args.output, &dataset.records)?;
    info!(
        documents = dataset.files.len(),
        found = dataset.entries_found(),
        written = dataset.records.len(),
        "dataset complete"
    );
    Ok(())
}

async fn fetch(args: FetchArgs) -> Result<()> {
    if let Some(since) = &args.since {
        DateTime::parse_from_rfc3339(since)
            .map_err(|e| NewsletterError::InvalidArgument(format!("since '{}': {}", since, e)))?;
    }
    if args.github.token.is_none() {
        warn!(
            "No GitHub token, the anonymous rate limit applies (set {} or pass --token)",
            TOKEN_ENV
        );
    }

    let selection = GithubSelection {
        include_issues: !args.no_issues,
        include_pulls: !args.no_pulls,
        limit: args.limit,
    };
    let repository = format!("{}/{}", args.owner, args.repo);

    let items = if selection.include_issues || selection.include_pulls {
        let mut query = IssueQuery::new(args.owner.as_str(), args.repo.as_str())
            .state(IssueState::All)
            .sort(IssueSort::Updated)
            .limit(args.limit.saturating_mul(2));
        if let Some(since) = &args.since {
            query = query.since(since.as_str());
        }
        info!("Fetching issues and pull requests from {}", repository);
        args.github.client()?.fetch_issues(&query).await?
    } else {
        info!("Both issues and pull requests excluded, nothing to fetch");
        Vec::new()
    };

    let dataset = collect_github_records(&items, &repository, &selection);
    write_dataset(&args.output, &dataset.records)?;
    info!(
        total = dataset.records.len(),
        issues = dataset.issues,
        pulls = dataset.pulls,
        "GitHub dataset complete"
    );
    Ok(())
}

fn plan(args: PlanArgs) -> Result<()> {
    let content = fs::read_to_string(&args.file)?;
    let extraction = extract_entries(&content);
    let plan = plan_layout(extraction.entries, args.batch_size)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(plan.entries())?);
        return Ok(());
    }

    for (i, entry) in plan.entries().iter().enumerate() {
        let placement = entry.placement.map(|p| p.as_str()).unwrap_or("-");
        println!("{:>3}  {:<7}  {}", i + 1, placement, entry.title);
    }
    let stats = plan.stats();
    info!(
        strategy = %extraction.strategy,
        featured = stats.featured,
        single = stats.single,
        batched = stats.batched,
        "layout planned"
    );
    Ok(())
}
