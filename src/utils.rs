use crate::error::{Error, Result};
use std::path::Path;
use url::Url;

/// Resolves a (possibly relative) link against the page it appeared on.
///
/// Same-page anchors and `mailto:`/`tel:`/`javascript:`/`data:` targets are dropped,
/// and fragments are stripped so `page.html#a` and `page.html#b` dedup to one URL.
pub fn resolve_link(base: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty()
        || href.starts_with('#')
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("javascript:")
        || href.starts_with("data:")
    {
        return None;
    }

    match base.join(href) {
        Ok(mut url) => {
            url.set_fragment(None);
            Some(url.to_string())
        }
        Err(e) => {
            ::log::debug!("Failed to join '{}' with base '{}': {}", href, base, e);
            None
        }
    }
}

/// Turns a CLI seed into a URL: URLs pass through, anything else is a local path
pub fn seed_to_url(seed: &str) -> Result<String> {
    if let Ok(url) = Url::parse(seed) {
        // A bare Windows drive letter parses as a one-letter scheme
        if url.scheme().len() > 1 {
            return Ok(url.to_string());
        }
    }

    let path = Path::new(seed).canonicalize()?;
    Url::from_file_path(&path)
        .map(|url| url.to_string())
        .map_err(|_| Error::Config(format!("cannot turn '{}' into a file URL", seed)))
}
