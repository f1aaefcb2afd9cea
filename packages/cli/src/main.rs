//! trendscope: what's trending under a hashtag.
//!
//! `analyze` runs a live scrape job and summarizes it; `replay` re-analyzes
//! a dataset saved with `--save-raw`, e.g. at a different minimum-likes
//! setting, without scraping again.

mod config;
mod report;

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use trends::{
    build_analysis, generate_insight, normalize_term, AnalysisResult, ApifySource, ScrapeSource,
    TrendAnalyzer,
};

use config::Config;
use report::{OutputFormat, SortOrder};

#[derive(Parser)]
#[command(name = "trendscope", version, about = "Discover what's trending under an Instagram hashtag")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scrape a hashtag and analyze the results
    Analyze(AnalyzeArgs),
    /// Analyze a dataset saved with `analyze --save-raw`
    Replay(ReplayArgs),
}

#[derive(Args)]
struct AnalyzeArgs {
    /// Hashtag to search, with or without the leading '#'
    term: String,

    #[command(flatten)]
    output: OutputArgs,

    /// Write the raw scrape items to this file
    #[arg(long)]
    save_raw: Option<PathBuf>,

    /// Skip the language model insight
    #[arg(long)]
    no_insight: bool,

    /// Max results per matched hashtag page
    #[arg(long)]
    results_limit: Option<u32>,

    /// Max hashtag pages matched by the search
    #[arg(long)]
    search_limit: Option<u32>,

    /// Seconds between job status checks
    #[arg(long)]
    poll_interval: Option<u64>,
}

#[derive(Args)]
struct ReplayArgs {
    /// JSON file written by `analyze --save-raw`
    file: PathBuf,

    /// Hashtag the dataset was scraped for
    #[arg(long)]
    term: String,

    #[command(flatten)]
    output: OutputArgs,

    /// Generate the language model insight
    #[arg(long)]
    insight: bool,
}

#[derive(Args)]
struct OutputArgs {
    /// Drop posts with fewer likes (ignored if it would drop every post)
    #[arg(long, default_value_t = 0)]
    min_likes: u64,

    /// Order of the post cards
    #[arg(long, value_enum, default_value_t = SortOrder::Likes)]
    sort: SortOrder,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the report.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "warn,trendscope=info,trends=info,apify_client=info,llm_client=info".into()
            }),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    match cli.command {
        Command::Analyze(args) => analyze(&config, args).await,
        Command::Replay(args) => replay(&config, args).await,
    }
}

async fn analyze(config: &Config, args: AnalyzeArgs) -> Result<()> {
    let term = normalize_term(&args.term)?;

    let mut limits = config.search_limits;
    if let Some(results_limit) = args.results_limit {
        limits.results_limit = results_limit;
    }
    if let Some(search_limit) = args.search_limit {
        limits.search_limit = search_limit;
    }

    let mut client = config.apify_client()?;
    if let Some(secs) = args.poll_interval {
        client = client.with_poll_interval(Duration::from_secs(secs));
    }
    let source = ApifySource::new(client, limits);
    let min_likes = args.output.min_likes;

    tracing::info!(term = %term, min_likes, "Analyzing hashtag");

    let (outcome, result) = if args.no_insight {
        let outcome = source.scrape(&term).await.context("Scrape job failed")?;
        let result = build_analysis(&term, &outcome.items, Some(outcome.status), min_likes);
        (outcome, result)
    } else {
        let llm = config.llm_client()?;
        TrendAnalyzer::new(source, llm)
            .analyze(&term, min_likes)
            .await
            .context("Trend analysis failed")?
    };

    if let Some(path) = &args.save_raw {
        save_items(path, &outcome.items)?;
    }

    print_result(&result, &args.output)
}

async fn replay(config: &Config, args: ReplayArgs) -> Result<()> {
    let term = normalize_term(&args.term)?;
    let raw = std::fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let items: Value = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not valid JSON", args.file.display()))?;

    let result = build_analysis(&term, &items, None, args.output.min_likes);
    let result = if args.insight {
        let llm = config.llm_client()?;
        let insight = generate_insight(&llm, &result)
            .await
            .context("Insight generation failed")?;
        result.with_insight(insight)
    } else {
        result
    };

    print_result(&result, &args.output)
}

fn save_items(path: &Path, items: &Value) -> Result<()> {
    let json = serde_json::to_string_pretty(items)?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), "Saved raw scrape items");
    Ok(())
}

fn print_result(result: &AnalysisResult, output: &OutputArgs) -> Result<()> {
    match output.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(result)?),
        OutputFormat::Text => {
            let width = console::Term::stdout()
                .size_checked()
                .map(|(_, cols)| cols as usize)
                .unwrap_or(120);
            print!("{}", report::render(result, output.sort, width));
        }
    }
    Ok(())
}
