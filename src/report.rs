use crate::results::FetchResult;
use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::mpsc;

/// Receives every terminal result of a crawl, exactly once, from the controller loop
pub trait Reporter: Send {
    fn report(&mut self, result: &FetchResult);
}

impl<R: Reporter + ?Sized> Reporter for Box<R> {
    fn report(&mut self, result: &FetchResult) {
        (**self).report(result)
    }
}

/// Writes one line per result to stdout
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleReporter {
    json: bool,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit one JSON object per line instead of human-readable text
    pub fn json() -> Self {
        Self { json: true }
    }

    pub fn format_line(&self, result: &FetchResult) -> String {
        if self.json {
            return serde_json::to_string(result).unwrap_or_else(|e| {
                ::log::warn!("Failed to serialize result for {}: {}", result.url, e);
                format!("{{\"url\":{:?}}}", result.url)
            });
        }

        match &result.outcome {
            Ok(page) => format!(
                "found: {} {:?} [{}]",
                single_line(&result.url),
                page.content,
                result.remaining_depth
            ),
            Err(e) => single_line(&e.to_string()),
        }
    }
}

/// Escapes line breaks so one result always prints as one line
fn single_line(text: &str) -> String {
    if !text.contains(['\n', '\r']) {
        return text.to_string();
    }
    text.replace('\r', "\\r").replace('\n', "\\n")
}

impl Reporter for ConsoleReporter {
    fn report(&mut self, result: &FetchResult) {
        let line = self.format_line(result);
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        if let Err(e) = writeln!(handle, "{}", line) {
            ::log::error!("Failed to write result for {}: {}", result.url, e);
        }
    }
}

/// Keeps every result in memory; clones share the same buffer
#[derive(Debug, Default, Clone)]
pub struct MemoryReporter {
    results: Arc<Mutex<Vec<FetchResult>>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn results(&self) -> Vec<FetchResult> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<FetchResult>> {
        // A panic elsewhere must not hide the results gathered so far
        self.results.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Reporter for MemoryReporter {
    fn report(&mut self, result: &FetchResult) {
        self.lock().push(result.clone());
    }
}

/// Streams results into a channel as they are consumed
#[derive(Debug)]
pub struct ChannelReporter {
    tx: mpsc::UnboundedSender<FetchResult>,
}

impl ChannelReporter {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<FetchResult>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Reporter for ChannelReporter {
    fn report(&mut self, result: &FetchResult) {
        if self.tx.send(result.clone()).is_err() {
            ::log::trace!("Result receiver dropped, discarding {}", result.url);
        }
    }
}

/// Counters gathered by the frontier over one crawl
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CrawlSummary {
    /// Requests that produced a page
    pub fetched: usize,
    /// Requests whose fetch returned an error
    pub failed: usize,
    /// Requests answered without fetching because the depth budget ran out
    pub depth_exceeded: usize,
    /// Newly discovered links submitted as requests
    pub links_enqueued: usize,
    /// Links skipped because they were already visited
    pub links_duplicate: usize,
    /// Links rejected by the link filter
    pub links_filtered: usize,
    pub elapsed: Duration,
}

impl CrawlSummary {
    /// Total results consumed, which equals total requests dispatched
    pub fn requests(&self) -> usize {
        self.fetched + self.failed + self.depth_exceeded
    }

    pub fn log_summary(&self) {
        ::log::info!(
            "Crawl complete - {} request(s) in {:.2} seconds",
            self.requests(),
            self.elapsed.as_secs_f64()
        );
        ::log::info!(
            "Fetched: {}, failed: {}, depth exceeded: {}",
            self.fetched,
            self.failed,
            self.depth_exceeded
        );
        ::log::debug!(
            "Links enqueued: {}, duplicate: {}, filtered: {}",
            self.links_enqueued,
            self.links_duplicate,
            self.links_filtered
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CrawlError, FetchError};
    use crate::results::{Page, Request};

    fn found() -> FetchResult {
        FetchResult::page(
            Request::new("http://golang.org/", 4),
            Page::new("The Go Programming Language", vec![]),
        )
    }

    fn not_found() -> FetchResult {
        let url = "http://golang.org/cmd/".to_string();
        FetchResult::failed(
            Request::new(url.clone(), 3),
            CrawlError::FetchFailed {
                url: url.clone(),
                cause: FetchError::NotFound(url),
            },
        )
    }

    #[test]
    fn test_console_line_escapes_line_breaks() {
        let reporter = ConsoleReporter::new();
        let failed = FetchResult::failed(
            Request::new("http://a/", 2),
            CrawlError::FetchFailed {
                url: "http://a/".to_string(),
                cause: FetchError::Other("502 Bad Gateway\n<html>upstream</html>".to_string()),
            },
        );
        let line = reporter.format_line(&failed);
        assert_eq!(line.lines().count(), 1);
        assert_eq!(
            line,
            r"fetch failed: http://a/: 502 Bad Gateway\n<html>upstream</html>"
        );

        let fetched = FetchResult::page(
            Request::new("http://a/\r\nb", 1),
            Page::new("two\nlines", vec![]),
        );
        let line = reporter.format_line(&fetched);
        assert_eq!(line.lines().count(), 1);
        assert_eq!(line, r#"found: http://a/\r\nb "two\nlines" [1]"#);
    }

    #[test]
    fn test_console_lines() {
        let reporter = ConsoleReporter::new();
        assert_eq!(
            reporter.format_line(&found()),
            "found: http://golang.org/ \"The Go Programming Language\" [4]"
        );
        assert_eq!(
            reporter.format_line(&not_found()),
            "fetch failed: http://golang.org/cmd/: not found: http://golang.org/cmd/"
        );
    }

    #[test]
    fn test_console_json_lines() {
        let line = ConsoleReporter::json().format_line(&found());
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["url"], "http://golang.org/");
        assert_eq!(value["remaining_depth"], 4);
        assert_eq!(value["outcome"]["Ok"]["content"], "The Go Programming Language");

        let line = ConsoleReporter::json().format_line(&not_found());
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert!(value["outcome"]["Err"]["FetchFailed"].is_object());
    }

    #[test]
    fn test_memory_reporter_clones_share_results() {
        let reporter = MemoryReporter::new();
        let mut handle = reporter.clone();
        handle.report(&found());
        handle.report(&not_found());
        assert_eq!(reporter.len(), 2);
        assert!(reporter.results()[0].is_ok());
    }

    #[tokio::test]
    async fn test_channel_reporter_streams() {
        let (mut reporter, mut rx) = ChannelReporter::new();
        reporter.report(&found());
        drop(reporter);
        assert_eq!(rx.recv().await.unwrap().url, "http://golang.org/");
        assert!(rx.recv().await.is_none());
    }

    #[test]
    fn test_summary_requests() {
        let summary = CrawlSummary {
            fetched: 5,
            failed: 1,
            depth_exceeded: 1,
            ..CrawlSummary::default()
        };
        assert_eq!(summary.requests(), 7);
    }
}
