//! Pipeline wiring and lifecycle
//!
//! The coordinator owns the pipeline's two bounded queues and enforces the
//! close ordering that keeps the run deadlock-free:
//!
//! 1. the work queue closes when the seed branch and every spawned branch
//!    have exited (frontier sender group fully dropped)
//! 2. workers observe the closed, drained work queue and exit
//! 3. the results queue closes when the last worker drops its sender
//! 4. the collector drains the closed results queue and returns the records
//!
//! Closing in any other order would either lose items or leave a consumer
//! blocked forever.

use crate::config::{ClientConfig, CrawlConfig};
use crate::crawler::frontier::Frontier;
use crate::crawler::worker::{spawn_collector, spawn_workers};
use crate::crawler::Fetcher;
use crate::extract::{PageExtractor, RecordExtractor};
use crate::model::Record;
use crate::{HarvestError, Result};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, Mutex};
use url::Url;

/// Outcome of a completed crawl
#[derive(Debug)]
pub struct CrawlReport {
    /// Records in arrival order (not discovery order)
    pub records: Vec<Record>,

    /// Listing pages fetched successfully
    pub pages_crawled: usize,

    /// Post pages that failed to fetch or extract and were skipped
    pub items_failed: usize,

    /// Wall-clock duration of the crawl
    pub elapsed: Duration,
}

/// Runs the crawl pipeline: frontier -> worker pool -> collector
pub struct Coordinator<P, R> {
    config: CrawlConfig,
    fetcher: Arc<Fetcher>,
    page_extractor: Arc<P>,
    record_extractor: Arc<R>,
}

impl<P, R> Coordinator<P, R>
where
    P: PageExtractor + 'static,
    R: RecordExtractor + 'static,
{
    /// Creates a coordinator with the given configuration and extractors
    pub fn new(
        client_config: &ClientConfig,
        config: CrawlConfig,
        page_extractor: P,
        record_extractor: R,
    ) -> Result<Self> {
        let fetcher = Arc::new(Fetcher::new(client_config)?);
        Ok(Self {
            config,
            fetcher,
            page_extractor: Arc::new(page_extractor),
            record_extractor: Arc::new(record_extractor),
        })
    }

    /// Crawls from the seed URL until discovery and processing complete
    pub async fn run(&self, seed: Url) -> Result<CrawlReport> {
        let start = Instant::now();
        tracing::info!("starting crawl from {}", seed);

        let (work_tx, work_rx) = mpsc::channel::<Url>(self.config.queue_capacity);
        let (results_tx, results_rx) = mpsc::channel::<Record>(self.config.queue_capacity);

        let pages_crawled = Arc::new(AtomicUsize::new(0));
        let items_failed = Arc::new(AtomicUsize::new(0));

        // Producer group: the seed branch takes ownership of the only work
        // sender and hands clones to the branches it spawns.
        let frontier = Frontier::new(
            Arc::clone(&self.fetcher),
            Arc::clone(&self.page_extractor),
            self.config.max_concurrent_branches,
            Arc::clone(&pages_crawled),
        );
        frontier.crawl(seed, work_tx);

        // Worker group: the only results senders live inside the workers.
        let mut workers = spawn_workers(
            self.config.workers,
            Arc::clone(&self.fetcher),
            Arc::clone(&self.record_extractor),
            Arc::new(Mutex::new(work_rx)),
            results_tx,
            Arc::clone(&items_failed),
        );

        let collector = spawn_collector(results_rx);

        // Workers finish only after the frontier has closed the work queue,
        // so reaping them here is the producer barrier and the worker barrier
        // in one strict sequence.
        while let Some(joined) = workers.join_next().await {
            if let Err(error) = joined {
                tracing::error!("worker task failed: {}", error);
            }
        }

        let records = collector
            .await
            .map_err(|error| HarvestError::Collector(error.to_string()))?;

        let report = CrawlReport {
            records,
            pages_crawled: pages_crawled.load(Ordering::Relaxed),
            items_failed: items_failed.load(Ordering::Relaxed),
            elapsed: start.elapsed(),
        };

        tracing::info!(
            "crawl finished: {} pages, {} records, {} items skipped in {:.2?}",
            report.pages_crawled,
            report.records.len(),
            report.items_failed,
            report.elapsed
        );

        Ok(report)
    }
}
