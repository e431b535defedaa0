use crate::error::{FetchError, Result};
use crate::fetch::Fetcher;
use crate::results::Page;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// A fetcher that answers from an in-memory URL graph.
///
/// Unknown URLs fail with [`FetchError::NotFound`].
#[derive(Debug, Clone, Default)]
pub struct CannedFetcher {
    pages: HashMap<String, Page>,
}

impl CannedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pages(pages: HashMap<String, Page>) -> Self {
        Self { pages }
    }

    /// Add a page to the graph
    pub fn with_page(mut self, url: &str, content: &str, links: &[&str]) -> Self {
        let links = links.iter().map(|l| l.to_string()).collect();
        self.pages.insert(url.to_string(), Page::new(content, links));
        self
    }

    /// Load a graph from a JSON object of `{ "<url>": { "content": "...", "links": [...] } }`
    pub fn from_json(json: &str) -> Result<Self> {
        let pages: HashMap<String, Page> = serde_json::from_str(json)?;
        Ok(Self { pages })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// The small golang.org graph used by the Go tour's crawler exercise.
    /// `http://golang.org/cmd/` is linked but missing, and one link sits past depth 4.
    pub fn go_tour() -> Self {
        Self::new()
            .with_page(
                "http://golang.org/",
                "The Go Programming Language",
                &["http://golang.org/pkg/", "http://golang.org/cmd/"],
            )
            .with_page(
                "http://golang.org/pkg/",
                "Packages",
                &[
                    "http://golang.org/",
                    "http://golang.org/cmd/",
                    "http://golang.org/pkg/fmt/",
                    "http://golang.org/pkg/os/",
                ],
            )
            .with_page(
                "http://golang.org/pkg/fmt/",
                "Package fmt",
                &["http://golang.org/", "http://golang.org/pkg/"],
            )
            .with_page(
                "http://golang.org/pkg/os/user/",
                "Package user",
                &[
                    "http://golang.org/",
                    "http://golang.org/pkg/",
                    "http://golang.org/pkg/os/",
                    "http://golang.org/pkg/os/user/user.go",
                ],
            )
            .with_page(
                "http://golang.org/pkg/os/",
                "Package os",
                &[
                    "http://golang.org/",
                    "http://golang.org/pkg/",
                    "http://golang.org/pkg/os/user/",
                ],
            )
    }
}

impl Fetcher for CannedFetcher {
    fn fetch(&self, url: &str) -> std::result::Result<Page, FetchError> {
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(url.to_string()))
    }
}
