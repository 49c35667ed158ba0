//! Crawl frontier: the producer side of the pipeline
//!
//! Each listing page is handled by one branch task: fetch the page, push the
//! discovered post URLs onto the bounded work queue, then spawn a new branch
//! for the "older posts" link and end without waiting for it. A branch whose
//! page has no pagination link is terminal.
//!
//! Two guards bound the fan-out:
//! - a semaphore caps how many branches fetch listing pages at once
//! - a shared visited set cuts pagination cycles, so a next-page link back to
//!   an already-seen page never spawns a second branch
//!
//! Completion signaling is ownership-based: every branch owns a clone of the
//! work-queue sender, so the queue closes exactly when the last branch exits.

use crate::crawler::Fetcher;
use crate::extract::PageExtractor;
use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, Semaphore};
use url::Url;

/// Shared frontier state, cloned into every branch task
pub struct Frontier<P> {
    fetcher: Arc<Fetcher>,
    extractor: Arc<P>,
    visited: Arc<Mutex<HashSet<String>>>,
    branch_permits: Arc<Semaphore>,
    pages_crawled: Arc<AtomicUsize>,
}

impl<P> Clone for Frontier<P> {
    fn clone(&self) -> Self {
        Self {
            fetcher: Arc::clone(&self.fetcher),
            extractor: Arc::clone(&self.extractor),
            visited: Arc::clone(&self.visited),
            branch_permits: Arc::clone(&self.branch_permits),
            pages_crawled: Arc::clone(&self.pages_crawled),
        }
    }
}

impl<P: PageExtractor + 'static> Frontier<P> {
    pub fn new(
        fetcher: Arc<Fetcher>,
        extractor: Arc<P>,
        max_concurrent_branches: usize,
        pages_crawled: Arc<AtomicUsize>,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            visited: Arc::new(Mutex::new(HashSet::new())),
            branch_permits: Arc::new(Semaphore::new(max_concurrent_branches.max(1))),
            pages_crawled,
        }
    }

    /// Starts the crawl by spawning the seed branch
    ///
    /// Takes the work sender by value: once the seed branch and every branch
    /// it transitively spawned have exited, all sender clones are dropped and
    /// the work queue closes.
    pub fn crawl(&self, seed: Url, work_tx: mpsc::Sender<Url>) {
        self.mark_visited(&seed);
        self.spawn_branch(seed, work_tx);
    }

    /// Spawns a detached branch task for one listing page
    fn spawn_branch(&self, page_url: Url, work_tx: mpsc::Sender<Url>) {
        let frontier = self.clone();
        tokio::spawn(frontier.crawl_branch(page_url, work_tx));
    }

    /// One branch: Fetching -> Discovering -> { Recursing, Terminal }
    ///
    /// Boxed because a branch spawns further branches of the same future type.
    fn crawl_branch(
        self,
        page_url: Url,
        work_tx: mpsc::Sender<Url>,
    ) -> Pin<Box<dyn Future<Output = ()> + Send>> {
        Box::pin(async move {
            // Permit scope covers fetch and discovery; spawned children
            // acquire their own permits.
            let _permit = match self.branch_permits.clone().acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => return,
            };

            // Fetching. A failed listing page terminates this branch only.
            let page = match self.fetcher.fetch(&page_url).await {
                Ok(page) => page,
                Err(error) => {
                    tracing::warn!("error crawling page {}: {}", page_url, error);
                    return;
                }
            };
            self.pages_crawled.fetch_add(1, Ordering::Relaxed);

            // Discovering. The document is parsed and dropped inside this
            // block: scraper's Html is not Send and must not live across an
            // await point.
            let links = {
                let document = page.document();
                self.extractor.extract_links(&document, &page_url)
            };

            for item in links.items {
                tracing::debug!("found post: {}", item);
                // Blocks when the queue is full: backpressure while workers
                // catch up. Send fails only if all workers are gone.
                if work_tx.send(item).await.is_err() {
                    tracing::warn!("work queue closed, abandoning branch for {}", page_url);
                    return;
                }
            }

            match links.next_page {
                Some(next) if self.mark_visited(&next) => {
                    tracing::debug!("found next page: {}", next);
                    self.spawn_branch(next, work_tx.clone());
                }
                Some(next) => {
                    tracing::debug!("next page {} already visited, stopping", next);
                }
                None => {
                    tracing::debug!("no more pages after {}", page_url);
                }
            }
        })
    }

    /// Records a listing page as visited; returns false if it already was
    fn mark_visited(&self, url: &Url) -> bool {
        self.visited
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(url.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::extract::PageLinks;
    use scraper::Html;

    struct NoopExtractor;

    impl PageExtractor for NoopExtractor {
        fn extract_links(&self, _document: &Html, _page_url: &Url) -> PageLinks {
            PageLinks::default()
        }
    }

    fn test_frontier() -> Frontier<NoopExtractor> {
        let fetcher = Arc::new(Fetcher::new(&ClientConfig::default()).unwrap());
        Frontier::new(
            fetcher,
            Arc::new(NoopExtractor),
            4,
            Arc::new(AtomicUsize::new(0)),
        )
    }

    #[test]
    fn test_mark_visited_detects_repeats() {
        let frontier = test_frontier();
        let url = Url::parse("https://example.com/page/2").unwrap();
        assert!(frontier.mark_visited(&url));
        assert!(!frontier.mark_visited(&url));
    }

    #[test]
    fn test_mark_visited_distinguishes_urls() {
        let frontier = test_frontier();
        let first = Url::parse("https://example.com/page/2").unwrap();
        let second = Url::parse("https://example.com/page/3").unwrap();
        assert!(frontier.mark_visited(&first));
        assert!(frontier.mark_visited(&second));
    }
}
