use crate::error::CrawlError;
use serde::{Deserialize, Serialize};

/// A unit of work: fetch `url` with the given depth budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Request {
    pub url: String,

    /// May be zero or negative; such requests are answered without fetching.
    pub remaining_depth: i64,
}

impl Request {
    pub fn new(url: impl Into<String>, remaining_depth: i64) -> Self {
        Self {
            url: url.into(),
            remaining_depth,
        }
    }
}

/// What a successful fetch returns.
///
/// Deserializes only from a JSON object; both fields may be omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "serde_json::Map<String, serde_json::Value>")]
pub struct Page {
    /// Extracted content of the page
    pub content: String,

    /// Linked URLs, in the order they appear on the page
    pub links: Vec<String>,
}

/// Field layout of a serialized [`Page`]
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct PageFields {
    #[serde(default)]
    content: String,
    #[serde(default)]
    links: Vec<String>,
}

impl TryFrom<serde_json::Map<String, serde_json::Value>> for Page {
    type Error = serde_json::Error;

    fn try_from(map: serde_json::Map<String, serde_json::Value>) -> Result<Self, Self::Error> {
        let fields: PageFields = serde_json::from_value(serde_json::Value::Object(map))?;
        Ok(Page::new(fields.content, fields.links))
    }
}

impl Page {
    pub fn new(content: impl Into<String>, links: Vec<String>) -> Self {
        Self {
            content: content.into(),
            links,
        }
    }
}

/// Exactly one of these is produced for every request a worker consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchResult {
    pub url: String,
    pub remaining_depth: i64,
    pub outcome: Result<Page, CrawlError>,
}

impl FetchResult {
    pub fn page(request: Request, page: Page) -> Self {
        Self {
            url: request.url,
            remaining_depth: request.remaining_depth,
            outcome: Ok(page),
        }
    }

    pub fn failed(request: Request, error: CrawlError) -> Self {
        Self {
            url: request.url,
            remaining_depth: request.remaining_depth,
            outcome: Err(error),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn error(&self) -> Option<&CrawlError> {
        self.outcome.as_ref().err()
    }

    /// Page content, empty when the request failed
    pub fn content(&self) -> &str {
        match &self.outcome {
            Ok(page) => &page.content,
            Err(_) => "",
        }
    }

    /// Discovered links, empty when the request failed
    pub fn links(&self) -> &[String] {
        match &self.outcome {
            Ok(page) => &page.links,
            Err(_) => &[],
        }
    }
}
