use crate::error::FetchError;
use crate::fetch::Fetcher;
use crate::parsers::{self, text::TextParserOptions};
use crate::results::Page;
use crate::utils::resolve_link;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use url::Url;

/// Fetches `file://` URLs from the local disk.
///
/// HTML pages yield their body text and resolved links, text files yield their
/// content only, and asset files yield an empty page.
#[derive(Debug, Clone, Default)]
pub struct FileFetcher {
    root: Option<PathBuf>,
    text_options: TextParserOptions,
}

impl FileFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse to read anything outside `root`
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        // Compare canonical paths so symlinks and `..` cannot escape the root
        self.root = Some(root.canonicalize().unwrap_or(root));
        self
    }

    pub fn with_text_options(mut self, options: TextParserOptions) -> Self {
        self.text_options = options;
        self
    }

    fn resolve_path(&self, url: &Url) -> Result<PathBuf, FetchError> {
        if url.scheme() != "file" {
            return Err(FetchError::UnsupportedUrl(url.to_string()));
        }
        let path = url
            .to_file_path()
            .map_err(|_| FetchError::UnsupportedUrl(url.to_string()))?;

        let Some(root) = &self.root else {
            return Ok(path);
        };
        match path.canonicalize() {
            Ok(canonical) if canonical.starts_with(root) => Ok(canonical),
            Ok(_) => Err(FetchError::UnsupportedUrl(url.to_string())),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(FetchError::NotFound(url.to_string())),
            Err(e) => Err(io_error(&path, e)),
        }
    }
}

fn io_error(path: &std::path::Path, e: std::io::Error) -> FetchError {
    FetchError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    }
}

impl Fetcher for FileFetcher {
    fn fetch(&self, url: &str) -> Result<Page, FetchError> {
        let parsed = Url::parse(url).map_err(|_| FetchError::UnsupportedUrl(url.to_string()))?;
        let path = self.resolve_path(&parsed)?;

        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(FetchError::NotFound(url.to_string()));
            }
            Err(e) => return Err(io_error(&path, e)),
        };
        let source = String::from_utf8_lossy(&bytes);

        let parsed_page = parsers::parse_from_url(&source, url, &self.text_options);
        let links = parsed_page
            .links
            .iter()
            .filter_map(|href| resolve_link(&parsed, href))
            .collect::<Vec<_>>();

        ::log::debug!("Read {} ({} bytes, {} links)", url, bytes.len(), links.len());

        Ok(Page::new(parsed_page.content, links))
    }
}
