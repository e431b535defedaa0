//! The fetch capability consumed by the crawler.
//!
//! A [`Fetcher`] is synchronous: given a URL it returns the page content and the
//! links found on it, or a [`FetchError`]. Workers run it on tokio's blocking
//! pool, so implementations may block freely, but they must tolerate being called
//! concurrently for different URLs.

mod canned;
mod file;

pub use canned::CannedFetcher;
pub use file::FileFetcher;

use crate::error::FetchError;
use crate::results::Page;
use std::sync::Arc;

pub trait Fetcher: Send + Sync {
    /// Fetch `url`, returning its content and the URLs it links to
    fn fetch(&self, url: &str) -> Result<Page, FetchError>;
}

impl<F: Fetcher + ?Sized> Fetcher for Arc<F> {
    fn fetch(&self, url: &str) -> Result<Page, FetchError> {
        (**self).fetch(url)
    }
}

impl<F: Fetcher + ?Sized> Fetcher for Box<F> {
    fn fetch(&self, url: &str) -> Result<Page, FetchError> {
        (**self).fetch(url)
    }
}
