use clap::Parser;
use frontier_crawl::{CrawlConfig, FetcherConfig};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "frontier-crawl")]
#[command(about = "Concurrent depth-bounded crawler over local files or canned link graphs")]
#[command(
    after_help = "Try it on the bundled demos:\n  frontier-crawl demos/site/index.html --depth 3\n  frontier-crawl --config demos/crawl.json"
)]
#[command(version)]
pub struct Args {
    /// Seed URL or local file path (optional when a config file provides one)
    pub seed: Option<String>,

    /// Path to a JSON crawl configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Depth budget of the seed
    #[arg(short, long, allow_negative_numbers = true)]
    pub depth: Option<i64>,

    /// Number of concurrent workers
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Crawl a JSON link graph instead of the filesystem
    #[arg(long, conflicts_with = "go_tour")]
    pub graph: Option<PathBuf>,

    /// Crawl the built-in golang.org demo graph
    #[arg(long)]
    pub go_tour: bool,

    /// Per-fetch timeout in seconds
    #[arg(long)]
    pub fetch_timeout: Option<u64>,

    /// Bound on queued requests
    #[arg(long)]
    pub request_capacity: Option<usize>,

    /// Only follow links matching this regex (repeatable)
    #[arg(long = "include")]
    pub include_patterns: Vec<String>,

    /// Never follow links matching this regex (repeatable)
    #[arg(long = "exclude")]
    pub exclude_patterns: Vec<String>,

    /// Only follow links on the seed's host
    #[arg(long)]
    pub same_host: bool,

    /// Keep paragraph breaks when reading local text files
    #[arg(long)]
    pub preserve_paragraphs: bool,

    /// Print one JSON object per result
    #[arg(long)]
    pub json: bool,
}

impl Args {
    /// Layer command-line values over a base configuration
    pub fn apply(&self, config: &mut CrawlConfig) {
        if let Some(depth) = self.depth {
            config.max_depth = depth;
        }
        if let Some(workers) = self.workers {
            config.workers = workers;
        }
        if let Some(secs) = self.fetch_timeout {
            config.fetch_timeout_secs = Some(secs);
        }
        if let Some(capacity) = self.request_capacity {
            config.request_capacity = Some(capacity);
        }
        if let Some(path) = &self.graph {
            config.fetcher = FetcherConfig::GraphFile { path: path.clone() };
        }
        if self.go_tour {
            config.fetcher = FetcherConfig::GoTour;
        }
        if self.preserve_paragraphs {
            if let FetcherConfig::Filesystem {
                preserve_paragraphs,
                ..
            } = &mut config.fetcher
            {
                *preserve_paragraphs = true;
            }
        }
        config
            .filter
            .include_patterns
            .extend(self.include_patterns.iter().cloned());
        config
            .filter
            .exclude_patterns
            .extend(self.exclude_patterns.iter().cloned());
        config.filter.same_host |= self.same_host;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let args = Args::parse_from([
            "frontier-crawl",
            "http://a/",
            "--depth",
            "-1",
            "-w",
            "2",
            "--go-tour",
            "--exclude",
            "pdf$",
        ]);
        let mut config = CrawlConfig::new("http://a/");
        args.apply(&mut config);

        assert_eq!(config.max_depth, -1);
        assert_eq!(config.workers, 2);
        assert_eq!(config.fetcher, FetcherConfig::GoTour);
        assert_eq!(config.filter.exclude_patterns, vec!["pdf$"]);
        assert!(!config.filter.same_host);
    }

    #[test]
    fn test_preserve_paragraphs_only_affects_filesystem() {
        let args = Args::parse_from(["frontier-crawl", "site/index.html", "--preserve-paragraphs"]);
        let mut config = CrawlConfig::new("site/index.html");
        args.apply(&mut config);
        assert_eq!(
            config.fetcher,
            FetcherConfig::Filesystem {
                root: None,
                preserve_paragraphs: true
            }
        );

        let args = Args::parse_from(["frontier-crawl", "--go-tour", "--preserve-paragraphs"]);
        let mut config = CrawlConfig::new("http://golang.org/");
        args.apply(&mut config);
        assert_eq!(config.fetcher, FetcherConfig::GoTour);
    }

    #[test]
    fn test_graph_conflicts_with_go_tour() {
        let parsed =
            Args::try_parse_from(["frontier-crawl", "--graph", "g.json", "--go-tour"]);
        assert!(parsed.is_err());
    }
}
