//! Worker pool and result collector: the consumer side of the pipeline
//!
//! A fixed number of workers share the work-queue receiver behind an async
//! mutex. Each worker loops: pull a post URL, fetch the page, extract a
//! record, push it to the results queue. Fetch or extract failures are logged
//! and skipped; they never abort the worker, and a worker exits only when the
//! work queue is closed and drained.
//!
//! The results queue mirrors the work queue's ownership scheme: each worker
//! owns a results-sender clone, so the queue closes exactly when the last
//! worker exits and the single collector task drains to completion.

use crate::crawler::Fetcher;
use crate::extract::RecordExtractor;
use crate::model::Record;
use crate::HarvestError;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio::task::{JoinHandle, JoinSet};
use url::Url;

/// Work-queue receiver shared by all workers
pub(crate) type SharedWorkQueue = Arc<Mutex<mpsc::Receiver<Url>>>;

/// Spawns `count` workers onto a JoinSet
///
/// The results sender is moved in and cloned once per worker; when the last
/// worker exits, the results queue closes.
pub(crate) fn spawn_workers<R: RecordExtractor + 'static>(
    count: usize,
    fetcher: Arc<Fetcher>,
    extractor: Arc<R>,
    work_rx: SharedWorkQueue,
    results_tx: mpsc::Sender<Record>,
    items_failed: Arc<AtomicUsize>,
) -> JoinSet<()> {
    let mut workers = JoinSet::new();
    for id in 0..count.max(1) {
        workers.spawn(run_worker(
            id,
            Arc::clone(&fetcher),
            Arc::clone(&extractor),
            Arc::clone(&work_rx),
            results_tx.clone(),
            Arc::clone(&items_failed),
        ));
    }
    workers
}

/// One worker loop: consume post URLs until the work queue closes
async fn run_worker<R: RecordExtractor>(
    id: usize,
    fetcher: Arc<Fetcher>,
    extractor: Arc<R>,
    work_rx: SharedWorkQueue,
    results_tx: mpsc::Sender<Record>,
    items_failed: Arc<AtomicUsize>,
) {
    loop {
        // Lock only to dequeue; processing runs with the lock released so
        // other workers can pull items concurrently.
        let item = { work_rx.lock().await.recv().await };
        let Some(url) = item else {
            break;
        };

        match process_item(&fetcher, extractor.as_ref(), &url).await {
            Ok(record) => {
                if results_tx.send(record).await.is_err() {
                    tracing::warn!("results queue closed, worker {} stopping", id);
                    break;
                }
            }
            Err(error) => {
                items_failed.fetch_add(1, Ordering::Relaxed);
                tracing::warn!("error extracting data from {}: {}", url, error);
            }
        }
    }
    tracing::debug!("worker {} exiting, work queue drained", id);
}

/// Fetches one post page and extracts its record
async fn process_item<R: RecordExtractor>(
    fetcher: &Fetcher,
    extractor: &R,
    url: &Url,
) -> Result<Record, HarvestError> {
    let page = fetcher.fetch(url).await?;
    // Parse and extract inside one block: Html is not Send and must be
    // dropped before the next await point.
    let record = {
        let document = page.document();
        extractor.extract_record(&document)?
    };
    Ok(record)
}

/// Spawns the single collector task
///
/// Drains the results queue into arrival-ordered memory until the queue
/// closes. Being the only writer, it needs no synchronization beyond the
/// queue itself.
pub(crate) fn spawn_collector(mut results_rx: mpsc::Receiver<Record>) -> JoinHandle<Vec<Record>> {
    tokio::spawn(async move {
        let mut records = Vec::new();
        while let Some(record) = results_rx.recv().await {
            records.push(record);
        }
        records
    })
}
