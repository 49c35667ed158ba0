//! Crawl pipeline: fetcher, frontier, worker pool, and coordinator

pub mod coordinator;
pub mod fetcher;
pub mod frontier;
pub mod worker;

pub use coordinator::{Coordinator, CrawlReport};
pub use fetcher::{FetchError, FetchedPage, Fetcher};
pub use frontier::Frontier;
