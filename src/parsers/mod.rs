pub mod html;
pub mod text;

use text::TextParserOptions;

/// How the content behind a URL should be interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserType {
    /// HTML document: text and links are extracted
    Html,
    /// Plain text: content only, never links
    Text,
    /// Images, stylesheets, scripts, fonts and other assets
    Other,
}

const TEXT_EXTENSIONS: &[&str] = &[".txt", ".md", ".yaml", ".yml"];

const ASSET_EXTENSIONS: &[&str] = &[
    ".jpg", ".jpeg", ".png", ".gif", ".ico", ".svg", ".css", ".js", ".woff", ".woff2", ".ttf",
    ".eot", ".pdf",
];

impl ParserType {
    /// Determines the parser type from the path component of a URL
    pub fn from_url(url: &str) -> Self {
        // Query strings and fragments don't change the kind of document
        let path = url.split(['?', '#']).next().unwrap_or(url).to_ascii_lowercase();

        if TEXT_EXTENSIONS.iter().any(|ext| path.ends_with(ext)) {
            ::log::trace!("Classifying as Text: {}", url);
            ParserType::Text
        } else if ASSET_EXTENSIONS.iter().any(|ext| path.ends_with(ext)) {
            ::log::trace!("Classifying as Other: {}", url);
            ParserType::Other
        } else {
            ::log::trace!("Classifying as HTML: {}", url);
            ParserType::Html
        }
    }

    pub fn should_extract_links(&self) -> bool {
        matches!(self, ParserType::Html)
    }
}

/// Result of parsing content
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseResult {
    pub content: String,
    /// Raw link targets as written in the document
    pub links: Vec<String>,
}

impl ParseResult {
    pub fn new(content: String, links: Vec<String>) -> Self {
        Self { content, links }
    }

    pub fn content_only(content: String) -> Self {
        Self {
            content,
            links: Vec::new(),
        }
    }
}

/// Parse `content` according to the type implied by `url`
pub fn parse_from_url(content: &str, url: &str, text_options: &TextParserOptions) -> ParseResult {
    match ParserType::from_url(url) {
        ParserType::Html => html::parse(content),
        ParserType::Text => text::parse_with_options(content, text_options),
        ParserType::Other => ParseResult::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parser_type_from_url() {
        assert_eq!(ParserType::from_url("file:///site/index.html"), ParserType::Html);
        assert_eq!(ParserType::from_url("https://example.com/docs/"), ParserType::Html);
        assert_eq!(ParserType::from_url("file:///site/notes.txt"), ParserType::Text);
        assert_eq!(ParserType::from_url("file:///site/README.MD"), ParserType::Text);
        assert_eq!(ParserType::from_url("file:///site/logo.png?v=2"), ParserType::Other);
        assert!(!ParserType::from_url("file:///site/style.css").should_extract_links());
    }

    #[test]
    fn test_parse_from_url() {
        let html = r#"<html><body><p>Hello, world!</p><a href="b.html">Link</a></body></html>"#;
        let options = TextParserOptions::default();
        let result = parse_from_url(html, "file:///site/a.html", &options);
        assert_eq!(result.content, "Hello, world! Link");
        assert_eq!(result.links, vec!["b.html".to_string()]);

        let result = parse_from_url("Line 1\nLine 2", "file:///site/a.txt", &options);
        assert_eq!(result.content, "Line 1 Line 2");
        assert!(result.links.is_empty());

        let result = parse_from_url("\u{89}PNG", "file:///site/a.png", &options);
        assert_eq!(result, ParseResult::default());
    }
}
