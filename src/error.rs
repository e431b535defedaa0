use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

/// Failure reported by a [`Fetcher`](crate::fetch::Fetcher) for a single URL.
///
/// Fetch errors are data: they travel inside a [`FetchResult`](crate::results::FetchResult)
/// and never abort a crawl.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum FetchError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("io error reading {path}: {message}")]
    Io { path: String, message: String },

    #[error("unsupported url: {0}")]
    UnsupportedUrl(String),

    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("fetcher panicked while fetching {0}")]
    Panicked(String),

    #[error("{0}")]
    Other(String),
}

/// Terminal, non-retried outcome for one request that did not produce a page.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum CrawlError {
    #[error("depth exceeded: {url}")]
    DepthExceeded { url: String, depth: i64 },

    #[error("fetch failed: {url}: {cause}")]
    FetchFailed { url: String, cause: FetchError },
}

/// Setup and infrastructure failures. These are the only errors a crawl returns as `Err`.
#[derive(Error, Debug)]
pub enum Error {
    #[error("worker count must be at least 1, got {0}")]
    InvalidWorkerCount(usize),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid link pattern: {0}")]
    Regex(#[from] regex::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("failed to start async runtime: {0}")]
    Runtime(std::io::Error),

    #[error("worker pool closed with {in_flight} request(s) still in flight")]
    PoolClosed { in_flight: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
