//! Extraction interfaces consumed by the crawl pipeline
//!
//! The pipeline itself is site-agnostic: the frontier asks a [`PageExtractor`]
//! for post links and the pagination link, and workers ask a
//! [`RecordExtractor`] for a record. The Blogger-specific selector
//! implementations live in [`blogger`].

pub mod blogger;

use crate::model::Record;
use scraper::Html;
use thiserror::Error;
use url::Url;

pub use blogger::{BloggerPageExtractor, BloggerRecordExtractor};

/// Errors raised when an otherwise-valid document lacks expected structure
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("missing {element} on post page")]
    Missing { element: &'static str },
}

/// Links discovered on one listing page
#[derive(Debug, Clone, Default)]
pub struct PageLinks {
    /// Absolute URLs of the post pages listed on this page
    pub items: Vec<Url>,

    /// Absolute URL of the next (older) listing page, if any
    pub next_page: Option<Url>,
}

/// Extracts post links and the pagination link from a listing page
pub trait PageExtractor: Send + Sync {
    /// Returns the post URLs and optional next-page URL found in `document`,
    /// with relative links resolved against `page_url`
    fn extract_links(&self, document: &Html, page_url: &Url) -> PageLinks;
}

/// Extracts one record from a post page
pub trait RecordExtractor: Send + Sync {
    /// Builds a [`Record`] from `document`, or reports the missing structure
    fn extract_record(&self, document: &Html) -> Result<Record, ExtractError>;
}
