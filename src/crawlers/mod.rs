//! The concurrent, depth-bounded crawl.
//!
//! A [`Crawler`] wires three pieces together:
//!
//! * a worker pool of `workers` tokio tasks that turn requests into results,
//! * a dispatcher that queues requests for the pool and counts what is in flight,
//! * a frontier controller that consumes results, dedups links through its
//!   visited set and stops when nothing is left in flight.
//!
//! The visited set and the counter live only in the controller loop, so no
//! lock protects them. The two channels are the only shared structures.

mod dispatch;
mod frontier;
mod pool;

#[cfg(test)]
mod tests;

use crate::config::CrawlConfig;
use crate::error::{Error, Result};
use crate::fetch::Fetcher;
use crate::filter::{LinkFilter, LinkFilterConfig};
use crate::report::{ConsoleReporter, CrawlSummary, Reporter};
use dispatch::{Dispatcher, request_channel};
use frontier::Frontier;
use pool::WorkerPool;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Default number of concurrent workers
pub const DEFAULT_WORKERS: usize = 4;

/// Builder and entry point for one crawl from a single seed
pub struct Crawler {
    seed: String,
    max_depth: i64,
    fetcher: Arc<dyn Fetcher>,
    workers: usize,
    fetch_timeout: Option<Duration>,
    request_capacity: Option<usize>,
    filter: LinkFilterConfig,
    reporter: Box<dyn Reporter>,
}

impl Crawler {
    /// A crawl of `seed` with `max_depth` levels, reporting to stdout
    pub fn new(seed: impl Into<String>, max_depth: i64, fetcher: impl Fetcher + 'static) -> Self {
        Self::with_shared_fetcher(seed, max_depth, Arc::new(fetcher))
    }

    pub fn with_shared_fetcher(
        seed: impl Into<String>,
        max_depth: i64,
        fetcher: Arc<dyn Fetcher>,
    ) -> Self {
        Self {
            seed: seed.into(),
            max_depth,
            fetcher,
            workers: DEFAULT_WORKERS,
            fetch_timeout: None,
            request_capacity: None,
            filter: LinkFilterConfig::default(),
            reporter: Box::new(ConsoleReporter::new()),
        }
    }

    /// Build a crawler, including its fetcher, from a configuration
    pub fn from_config(config: &CrawlConfig) -> Result<Self> {
        config.validate()?;
        let fetcher = config.fetcher.build()?;

        let mut crawler = Self::with_shared_fetcher(&config.seed, config.max_depth, fetcher)
            .with_workers(config.workers)
            .with_filter(config.filter.clone());
        crawler.fetch_timeout = config.fetch_timeout();
        crawler.request_capacity = config.request_capacity;
        Ok(crawler)
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Abandon any fetch that takes longer than `timeout`
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = Some(timeout);
        self
    }

    /// Bound the request queue to `capacity` pending requests
    pub fn with_request_capacity(mut self, capacity: usize) -> Self {
        self.request_capacity = Some(capacity);
        self
    }

    pub fn with_filter(mut self, filter: LinkFilterConfig) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_reporter(mut self, reporter: impl Reporter + 'static) -> Self {
        self.reporter = Box::new(reporter);
        self
    }

    /// Runs the crawl and returns once no request is left in flight
    pub async fn run(self) -> Result<CrawlSummary> {
        if self.workers == 0 {
            return Err(Error::InvalidWorkerCount(self.workers));
        }
        if self.request_capacity == Some(0) {
            return Err(Error::Config("request capacity must be at least 1".into()));
        }
        let filter = if self.filter.is_empty() {
            None
        } else {
            Some(LinkFilter::new(&self.filter, &self.seed)?)
        };

        ::log::info!(
            "Starting crawl of {} with {} workers (max depth {})",
            self.seed,
            self.workers,
            self.max_depth
        );

        let (request_tx, request_rx) = request_channel(self.request_capacity);
        let (result_tx, mut result_rx) = mpsc::unbounded_channel();

        let pool = WorkerPool::spawn(
            self.workers,
            self.fetcher,
            request_rx,
            result_tx,
            self.fetch_timeout,
        );
        ::log::debug!("Spawned {} workers", pool.len());

        let mut frontier = Frontier::new(Dispatcher::new(request_tx), filter, self.reporter);
        frontier.seed(&self.seed, self.max_depth);
        let outcome = frontier.run(&mut result_rx).await;

        pool.join().await;
        outcome
    }

    /// Runs the crawl on a fresh multi-threaded runtime, blocking the caller.
    ///
    /// Must not be called from inside an async context.
    pub fn run_blocking(self) -> Result<CrawlSummary> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(Error::Runtime)?;
        let outcome = runtime.block_on(self.run());
        // Fetches abandoned by a timeout may still be blocking; don't wait for them
        runtime.shutdown_background();
        outcome
    }
}
