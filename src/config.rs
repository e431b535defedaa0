use crate::crawlers::DEFAULT_WORKERS;
use crate::error::{Error, Result};
use crate::fetch::{CannedFetcher, FileFetcher, Fetcher};
use crate::filter::LinkFilterConfig;
use crate::parsers::text::TextParserOptions;
use crate::results::Page;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Configuration for one crawl
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlConfig {
    /// URL to start crawling from
    pub seed: String,

    /// Depth budget of the seed; links found at depth `d` are requested at `d - 1`
    #[serde(default = "default_max_depth")]
    pub max_depth: i64,

    /// Number of concurrent workers
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Give up on a single fetch after this many seconds (no limit when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fetch_timeout_secs: Option<u64>,

    /// Bound on queued requests (unbounded when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_capacity: Option<usize>,

    /// Which discovered links to follow
    #[serde(default)]
    pub filter: LinkFilterConfig,

    /// Where pages come from
    #[serde(default)]
    pub fetcher: FetcherConfig,
}

/// Source of pages for a crawl
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FetcherConfig {
    /// Local files reached through `file://` URLs
    Filesystem {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        root: Option<PathBuf>,

        /// Keep paragraph breaks in the content of text files
        #[serde(default)]
        preserve_paragraphs: bool,
    },

    /// An inline URL graph
    Canned { pages: HashMap<String, Page> },

    /// A URL graph stored in a separate JSON file
    GraphFile { path: PathBuf },

    /// The built-in golang.org demo graph
    GoTour,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        FetcherConfig::Filesystem {
            root: None,
            preserve_paragraphs: false,
        }
    }
}

impl FetcherConfig {
    pub fn build(&self) -> Result<Arc<dyn Fetcher>> {
        let fetcher: Arc<dyn Fetcher> = match self {
            FetcherConfig::Filesystem {
                root,
                preserve_paragraphs,
            } => {
                let mut fetcher = FileFetcher::new().with_text_options(TextParserOptions {
                    preserve_paragraphs: *preserve_paragraphs,
                });
                if let Some(root) = root {
                    fetcher = fetcher.with_root(root);
                }
                Arc::new(fetcher)
            }
            FetcherConfig::Canned { pages } => Arc::new(CannedFetcher::from_pages(pages.clone())),
            FetcherConfig::GraphFile { path } => Arc::new(CannedFetcher::from_file(path)?),
            FetcherConfig::GoTour => Arc::new(CannedFetcher::go_tour()),
        };
        Ok(fetcher)
    }
}

fn default_max_depth() -> i64 {
    4
}

fn default_workers() -> usize {
    DEFAULT_WORKERS
}

impl CrawlConfig {
    /// Create a new configuration with default values
    pub fn new(seed: &str) -> Self {
        Self {
            seed: seed.to_string(),
            max_depth: default_max_depth(),
            workers: default_workers(),
            fetch_timeout_secs: None,
            request_capacity: None,
            filter: LinkFilterConfig::default(),
            fetcher: FetcherConfig::default(),
        }
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn fetch_timeout(&self) -> Option<Duration> {
        self.fetch_timeout_secs.map(Duration::from_secs)
    }

    /// Reject values no crawl can run with
    pub fn validate(&self) -> Result<()> {
        if self.seed.is_empty() {
            return Err(Error::Config("seed must not be empty".into()));
        }
        if self.workers == 0 {
            return Err(Error::InvalidWorkerCount(self.workers));
        }
        if self.request_capacity == Some(0) {
            return Err(Error::Config("request capacity must be at least 1".into()));
        }
        if self.fetch_timeout_secs == Some(0) {
            return Err(Error::Config("fetch timeout must be at least 1 second".into()));
        }
        Ok(())
    }
}
