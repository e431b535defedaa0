//! End-to-end crawl scenarios against in-memory link graphs.
//!
//! Results from different workers interleave arbitrarily, so these tests assert
//! sets and counts, never a global order.


use crate::error::FetchError;
use crate::fetch::{CannedFetcher, Fetcher};
use crate::results::{FetchResult, Page};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Wraps a fetcher and records every URL it is asked for
#[derive(Clone)]
pub(super) struct RecordingFetcher {
    inner: Arc<dyn Fetcher>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl RecordingFetcher {
    pub fn new(inner: impl Fetcher + 'static) -> Self {
        Self {
            inner: Arc::new(inner),
            calls: Arc::default(),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_counts(&self) -> HashMap<String, usize> {
        let mut counts = HashMap::new();
        for url in self.calls() {
            *counts.entry(url).or_insert(0) += 1;
        }
        counts
    }

    pub fn sorted_calls(&self) -> Vec<String> {
        let mut calls = self.calls();
        calls.sort();
        calls
    }
}

impl Fetcher for RecordingFetcher {
    fn fetch(&self, url: &str) -> Result<Page, FetchError> {
        self.calls.lock().unwrap().push(url.to_string());
        self.inner.fetch(url)
    }
}

/// Builds a canned graph where each page's content is its own URL
pub(super) fn graph(edges: &[(&str, &[&str])]) -> CannedFetcher {
    edges
        .iter()
        .fold(CannedFetcher::new(), |fetcher, (url, links)| {
            fetcher.with_page(url, url, links)
        })
}

/// `(url, remaining_depth)` of every successful result, sorted
pub(super) fn fetched(results: &[FetchResult]) -> Vec<(String, i64)> {
    let mut found = results
        .iter()
        .filter(|r| r.is_ok())
        .map(|r| (r.url.clone(), r.remaining_depth))
        .collect::<Vec<_>>();
    found.sort();
    found
}
