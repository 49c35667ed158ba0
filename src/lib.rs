//! Post-Harvest: a pipelined blog crawler with CSV export
//!
//! This crate crawls a paginated blog, follows "older posts" pagination links,
//! extracts one record per post page (title, embedded video URL, tags), and
//! writes the collected records to a CSV file.
//!
//! The pipeline has three stages coordinated through two bounded queues:
//! - a crawl frontier that discovers post URLs and spawns a branch per
//!   pagination link
//! - a fixed-size worker pool that fetches post pages and extracts records
//! - a single collector that drains results into memory for the CSV sink

pub mod config;
pub mod crawler;
pub mod extract;
pub mod model;
pub mod output;

use thiserror::Error;

/// Main error type for Post-Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("fetch error: {0}")]
    Fetch(#[from] crawler::FetchError),

    #[error("extract error: {0}")]
    Extract(#[from] extract::ExtractError),

    #[error("output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("collector task failed: {0}")]
    Collector(String),
}

/// Result type alias for Post-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

// Re-export commonly used types
pub use config::{ClientConfig, CrawlConfig};
pub use crawler::{Coordinator, CrawlReport, FetchedPage, Fetcher};
pub use extract::{PageExtractor, PageLinks, RecordExtractor};
pub use model::Record;
pub use output::write_records;
