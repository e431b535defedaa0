use crate::parsers::ParseResult;

/// Configuration options for text parsing
#[derive(Debug, Clone, Copy, Default)]
pub struct TextParserOptions {
    /// Keep blank-line separated paragraphs, joined by exactly one empty line
    pub preserve_paragraphs: bool,
}

/// Parses plain text into a single whitespace-normalized line
pub fn parse(text: &str) -> ParseResult {
    parse_with_options(text, &TextParserOptions::default())
}

pub fn parse_with_options(text: &str, options: &TextParserOptions) -> ParseResult {
    let paragraphs = split_into_paragraphs(text);
    let separator = if options.preserve_paragraphs { "\n\n" } else { " " };
    ParseResult::content_only(paragraphs.join(separator))
}

/// Splits text on blank lines, normalizing whitespace inside each paragraph
pub fn split_into_paragraphs(text: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                paragraphs.push(current.join(" "));
                current.clear();
            }
        } else {
            current.extend(line.split_whitespace());
        }
    }
    if !current.is_empty() {
        paragraphs.push(current.join(" "));
    }

    paragraphs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_into_paragraphs() {
        assert!(split_into_paragraphs("").is_empty());
        assert!(split_into_paragraphs("  \n\t\n").is_empty());
        assert_eq!(
            split_into_paragraphs("Line 1a\n  Line   1b\n\n\n\nLine 2"),
            vec!["Line 1a Line 1b", "Line 2"]
        );
    }

    #[test]
    fn test_preserve_paragraphs() {
        let text = "Paragraph 1.\n\n\n\nParagraph 2.\n\n\nParagraph 3.";
        assert_eq!(parse(text).content, "Paragraph 1. Paragraph 2. Paragraph 3.");

        let options = TextParserOptions {
            preserve_paragraphs: true,
        };
        assert_eq!(
            parse_with_options(text, &options).content,
            "Paragraph 1.\n\nParagraph 2.\n\nParagraph 3."
        );
    }

    #[test]
    fn test_text_never_yields_links() {
        let result = parse("see https://example.com for details");
        assert_eq!(result.content, "see https://example.com for details");
        assert!(result.links.is_empty());
    }
}
