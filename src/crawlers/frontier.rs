use crate::crawlers::dispatch::Dispatcher;
use crate::error::{CrawlError, Error, Result};
use crate::filter::LinkFilter;
use crate::report::{CrawlSummary, Reporter};
use crate::results::{FetchResult, Request};
use std::collections::HashSet;
use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CrawlState {
    /// Requests are still in flight
    Running,
    /// Nothing is in flight; the crawl is finished
    Done,
}

/// Single owner of the visited set and the in-flight counter.
///
/// Consumes results one at a time, decides which links become new requests
/// and when the crawl is complete.
pub(crate) struct Frontier {
    visited: HashSet<String>,
    dispatcher: Dispatcher,
    filter: Option<LinkFilter>,
    reporter: Box<dyn Reporter>,
    summary: CrawlSummary,
}

impl Frontier {
    pub fn new(
        dispatcher: Dispatcher,
        filter: Option<LinkFilter>,
        reporter: Box<dyn Reporter>,
    ) -> Self {
        Self {
            visited: HashSet::new(),
            dispatcher,
            filter,
            reporter,
            summary: CrawlSummary::default(),
        }
    }

    /// Marks the seed visited and submits it with the full depth budget
    pub fn seed(&mut self, url: &str, max_depth: i64) {
        ::log::info!("Seeding crawl with {} (max depth {})", url, max_depth);
        self.visited.insert(url.to_string());
        self.dispatcher.submit(Request::new(url, max_depth));
    }

    pub fn state(&self) -> CrawlState {
        if self.dispatcher.in_flight() == 0 {
            CrawlState::Done
        } else {
            CrawlState::Running
        }
    }

    pub fn in_flight(&self) -> usize {
        self.dispatcher.in_flight()
    }

    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    /// Applies one result: settle its unit of work, report it, enqueue new links
    pub fn process(&mut self, result: FetchResult) -> CrawlState {
        self.dispatcher.complete();
        self.reporter.report(&result);

        match &result.outcome {
            Err(CrawlError::DepthExceeded { .. }) => self.summary.depth_exceeded += 1,
            Err(CrawlError::FetchFailed { .. }) => self.summary.failed += 1,
            Ok(page) => {
                self.summary.fetched += 1;
                for link in &page.links {
                    self.discover(link, result.remaining_depth - 1);
                }
            }
        }

        self.state()
    }

    fn discover(&mut self, link: &str, remaining_depth: i64) {
        if self.is_visited(link) {
            self.summary.links_duplicate += 1;
            return;
        }
        if let Some(filter) = &self.filter {
            if !filter.allows(link) {
                ::log::debug!("Link filter rejected: {}", link);
                self.summary.links_filtered += 1;
                return;
            }
        }

        // Marked before submission so a second sighting can never enqueue it again
        self.visited.insert(link.to_string());
        self.summary.links_enqueued += 1;
        self.dispatcher.submit(Request::new(link, remaining_depth));
    }

    /// Drives the crawl to completion. Dropping `self` afterwards closes the
    /// request queue, which lets the workers exit.
    pub async fn run(
        mut self,
        results: &mut mpsc::UnboundedReceiver<FetchResult>,
    ) -> Result<CrawlSummary> {
        let started = std::time::Instant::now();

        while self.state() == CrawlState::Running {
            let Some(result) = results.recv().await else {
                ::log::error!(
                    "Result channel closed with {} request(s) in flight",
                    self.in_flight()
                );
                return Err(Error::PoolClosed {
                    in_flight: self.in_flight(),
                });
            };
            self.process(result);
        }

        ::log::debug!(
            "Frontier done after {} request(s), {} URL(s) visited",
            self.dispatcher.dispatched(),
            self.visited.len()
        );
        self.summary.elapsed = started.elapsed();
        Ok(self.summary)
    }
}
