use crate::crawlers::dispatch::RequestReceiver;
use crate::error::{CrawlError, FetchError};
use crate::fetch::Fetcher;
use crate::results::{FetchResult, Request};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;

/// A fixed set of worker tasks pulling from one request queue
pub(crate) struct WorkerPool {
    handles: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Spawns `workers` tasks. Each runs until the request queue closes or the
    /// result receiver is dropped.
    pub fn spawn(
        workers: usize,
        fetcher: Arc<dyn Fetcher>,
        requests: RequestReceiver,
        results: mpsc::UnboundedSender<FetchResult>,
        fetch_timeout: Option<Duration>,
    ) -> Self {
        let requests = Arc::new(Mutex::new(requests));
        let handles = (0..workers)
            .map(|worker_id| {
                spawn_worker(
                    worker_id,
                    Arc::clone(&fetcher),
                    Arc::clone(&requests),
                    results.clone(),
                    fetch_timeout,
                )
            })
            .collect();

        Self { handles }
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Waits for every worker to exit
    pub async fn join(self) {
        for (worker_id, handle) in self.handles.into_iter().enumerate() {
            if let Err(e) = handle.await {
                ::log::error!("Worker {} terminated abnormally: {}", worker_id, e);
            }
        }
    }
}

fn spawn_worker(
    worker_id: usize,
    fetcher: Arc<dyn Fetcher>,
    requests: Arc<Mutex<RequestReceiver>>,
    results: mpsc::UnboundedSender<FetchResult>,
    fetch_timeout: Option<Duration>,
) -> JoinHandle<()> {
    ::log::trace!("Spawning worker {}", worker_id);

    tokio::spawn(async move {
        while let Some(request) = next_request(worker_id, &requests).await {
            let result = process_request(worker_id, &fetcher, request, fetch_timeout).await;
            if let Err(e) = results.send(result) {
                ::log::warn!(
                    "Worker {} could not deliver result for {}: controller is gone",
                    worker_id,
                    e.0.url
                );
                break;
            }
        }
        ::log::debug!("Worker {} shutting down - request queue closed", worker_id);
    })
}

async fn next_request(worker_id: usize, requests: &Arc<Mutex<RequestReceiver>>) -> Option<Request> {
    // The lock only guards the receive; it is released before the fetch starts
    let request = requests.lock().await.recv().await;
    if let Some(request) = &request {
        ::log::trace!(
            "Worker {} picked up {} at depth {}",
            worker_id,
            request.url,
            request.remaining_depth
        );
    }
    request
}

/// Turns one request into exactly one result. Never fails: errors become data.
pub(crate) async fn process_request(
    worker_id: usize,
    fetcher: &Arc<dyn Fetcher>,
    request: Request,
    fetch_timeout: Option<Duration>,
) -> FetchResult {
    if request.remaining_depth <= 0 {
        ::log::debug!(
            "Worker {} not fetching {}: depth {} exhausted",
            worker_id,
            request.url,
            request.remaining_depth
        );
        let error = CrawlError::DepthExceeded {
            url: request.url.clone(),
            depth: request.remaining_depth,
        };
        return FetchResult::failed(request, error);
    }

    let started = std::time::Instant::now();
    let url = request.url.clone();
    let task_fetcher = Arc::clone(fetcher);
    let task = tokio::task::spawn_blocking(move || task_fetcher.fetch(&url));

    let joined = match fetch_timeout {
        Some(limit) => match tokio::time::timeout(limit, task).await {
            Ok(joined) => joined,
            Err(_) => {
                // The blocking call keeps running detached; its output is discarded
                ::log::warn!("Worker {} timed out fetching {}", worker_id, request.url);
                return fetch_failed(request, FetchError::Timeout(limit));
            }
        },
        None => task.await,
    };

    match joined {
        Ok(Ok(page)) => {
            ::log::debug!(
                "Worker {} fetched {} in {:.2} seconds ({} links)",
                worker_id,
                request.url,
                started.elapsed().as_secs_f64(),
                page.links.len()
            );
            FetchResult::page(request, page)
        }
        Ok(Err(cause)) => {
            ::log::debug!("Worker {} failed to fetch {}: {}", worker_id, request.url, cause);
            fetch_failed(request, cause)
        }
        Err(e) if e.is_panic() => {
            ::log::error!("Fetcher panicked on {} (worker {})", request.url, worker_id);
            let cause = FetchError::Panicked(request.url.clone());
            fetch_failed(request, cause)
        }
        Err(e) => {
            let cause = FetchError::Other(format!("fetch task cancelled: {}", e));
            fetch_failed(request, cause)
        }
    }
}

fn fetch_failed(request: Request, cause: FetchError) -> FetchResult {
    let error = CrawlError::FetchFailed {
        url: request.url.clone(),
        cause,
    };
    FetchResult::failed(request, error)
}
