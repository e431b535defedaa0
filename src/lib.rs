//! A concurrent, depth-bounded crawler.
//!
//! Starting from one seed URL, a fixed pool of workers fetches pages through a
//! pluggable [`Fetcher`], while a single controller loop dedups discovered links,
//! enforces the depth budget and stops exactly when no work is outstanding.
//!
//! ```no_run
//! use frontier_crawl::fetch::CannedFetcher;
//!
//! let summary = frontier_crawl::crawl("http://golang.org/", 4, CannedFetcher::go_tour(), 4)?;
//! assert_eq!(summary.fetched, 5);
//! # Ok::<(), frontier_crawl::Error>(())
//! ```
//!
//! The `demos/` directory holds a small local site (`demos/site/`) and a JSON
//! link graph with a matching config (`demos/graph.json`, `demos/crawl.json`)
//! to point the `frontier-crawl` binary at.

pub mod config;
pub mod crawlers;
pub mod error;
pub mod fetch;
pub mod filter;
pub mod parsers;
pub mod report;
pub mod results;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::{CrawlConfig, FetcherConfig};
pub use crawlers::Crawler;
pub use error::{CrawlError, Error, FetchError, Result};
pub use fetch::Fetcher;
pub use report::{CrawlSummary, Reporter};
pub use results::{FetchResult, Page, Request};

/// Crawls from `seed` with `workers` concurrent workers, printing one line per
/// result, and returns once the crawl is complete.
///
/// Blocks the calling thread; inside an async context use [`Crawler::run`].
pub fn crawl<F: Fetcher + 'static>(
    seed: &str,
    max_depth: i64,
    fetcher: F,
    workers: usize,
) -> Result<CrawlSummary> {
    Crawler::new(seed, max_depth, fetcher)
        .with_workers(workers)
        .run_blocking()
}
