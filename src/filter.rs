use crate::error::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

/// Which discovered links the crawl is allowed to follow
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkFilterConfig {
    /// Regex patterns a link must match (if empty, every link is included unless excluded)
    #[serde(default)]
    pub include_patterns: Vec<String>,

    /// Regex patterns that reject a link (these take precedence over include patterns)
    #[serde(default)]
    pub exclude_patterns: Vec<String>,

    /// Only follow links on the seed's host
    #[serde(default)]
    pub same_host: bool,
}

impl LinkFilterConfig {
    /// True when the config admits every link, so no filter needs to be built
    pub fn is_empty(&self) -> bool {
        self.include_patterns.is_empty() && self.exclude_patterns.is_empty() && !self.same_host
    }
}

/// Compiled form of [`LinkFilterConfig`], scoped to one crawl's seed
#[derive(Debug)]
pub struct LinkFilter {
    include_regexes: Vec<Regex>,
    exclude_regexes: Vec<Regex>,
    /// `Some(host)` when restricted to the seed host; the inner `None` is a host-less seed
    required_host: Option<Option<String>>,
}

impl LinkFilter {
    pub fn new(config: &LinkFilterConfig, seed: &str) -> Result<Self> {
        let include_regexes = config
            .include_patterns
            .iter()
            .map(|p| Regex::new(p))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let exclude_regexes = config
            .exclude_patterns
            .iter()
            .map(|p| Regex::new(p))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let required_host = if config.same_host {
            let seed_url = Url::parse(seed)?;
            Some(seed_url.host_str().map(str::to_string))
        } else {
            None
        };

        Ok(Self {
            include_regexes,
            exclude_regexes,
            required_host,
        })
    }

    /// Decide whether a discovered link may be enqueued
    pub fn allows(&self, link: &str) -> bool {
        if let Some(required) = &self.required_host {
            let host = Url::parse(link).ok().map(|u| u.host_str().map(str::to_string));
            if host.as_ref() != Some(required) {
                return false;
            }
        }

        if self.exclude_regexes.iter().any(|re| re.is_match(link)) {
            return false;
        }

        self.include_regexes.is_empty() || self.include_regexes.iter().any(|re| re.is_match(link))
    }
}
