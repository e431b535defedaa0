use crate::parsers::ParseResult;
use scraper::{Html, Selector};
use std::sync::LazyLock;

static BODY: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("body").expect("static selector is valid"));
static ANCHOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("static selector is valid"));

/// Parses an HTML document into whitespace-normalized body text and its `<a href>` targets
pub fn parse(html: &str) -> ParseResult {
    let doc = Html::parse_document(html);

    let text = doc
        .select(&BODY)
        .flat_map(|n| n.text())
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ");

    let links = doc
        .select(&ANCHOR)
        .filter_map(|e| e.value().attr("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty())
        .map(str::to_string)
        .collect::<Vec<String>>();

    ::log::debug!("HTML parser found {} links", links.len());

    ParseResult::new(text, links)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_links_keep_document_order() {
        let html = r#"
            <html><head><title>T</title></head>
            <body>
              <a href="/second">2</a>
              <a href="first.html">1</a>
              <a>no target</a>
              <a href="  ">blank</a>
              <a href="/second">again</a>
            </body></html>"#;
        let result = parse(html);
        assert_eq!(result.links, vec!["/second", "first.html", "/second"]);
    }

    #[test]
    fn test_text_is_whitespace_normalized() {
        let html = "<body>\n  <h1>Title</h1>\n\n  <p>some   text\n here</p></body>";
        assert_eq!(parse(html).content, "Title some text here");
    }
}
