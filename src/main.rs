//! Post-Harvest main entry point
//!
//! Command-line interface for the paginated blog crawler.

use anyhow::Context;
use clap::Parser;
use post_harvest::config::{ClientConfig, CrawlConfig};
use post_harvest::crawler::Coordinator;
use post_harvest::extract::{BloggerPageExtractor, BloggerRecordExtractor};
use post_harvest::output::write_records;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use url::Url;

/// Post-Harvest: crawl a paginated blog and export posts to CSV
///
/// Crawls the blog starting at BASE_URL, following "older posts" pagination,
/// extracts title, embedded video URL, and tags from every post, and writes
/// the result to OUTPUT as CSV.
#[derive(Parser, Debug)]
#[command(name = "post-harvest")]
#[command(version = "1.0.0")]
#[command(about = "Crawl a paginated blog and export posts to CSV", long_about = None)]
struct Cli {
    /// Base URL of the blog to crawl (e.g. https://example.blogspot.com)
    #[arg(value_name = "BASE_URL")]
    base_url: String,

    /// Path of the CSV file to write (e.g. posts.csv)
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Number of concurrent workers fetching post pages
    #[arg(long, default_value_t = 5)]
    workers: usize,

    /// Capacity of the bounded work and results queues
    #[arg(long, default_value_t = 100)]
    queue_capacity: usize,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let seed = Url::parse(&cli.base_url)
        .with_context(|| format!("invalid base URL: {}", cli.base_url))?;

    let crawl_config = CrawlConfig {
        workers: cli.workers,
        queue_capacity: cli.queue_capacity,
        ..CrawlConfig::default()
    };

    let coordinator = Coordinator::new(
        &ClientConfig::default(),
        crawl_config,
        BloggerPageExtractor::new(),
        BloggerRecordExtractor::new(),
    )
    .context("failed to build HTTP client")?;

    let report = coordinator.run(seed).await.context("crawl failed")?;

    write_records(&report.records, &cli.output)
        .with_context(|| format!("error writing to {}", cli.output.display()))?;

    tracing::info!(
        "Crawling completed in {:.2?}. Total posts: {}",
        report.elapsed,
        report.records.len()
    );

    Ok(())
}

/// Sets up the tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("post_harvest=info,warn"),
            1 => EnvFilter::new("post_harvest=debug,info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
