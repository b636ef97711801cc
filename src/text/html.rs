// src/text/html.rs
// =============================================================================
// This module turns a page's HTML into two things:
// - the plain text a reader would see
// - the absolute URLs of every link on the page, in document order
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (even badly broken HTML, like a browser would)
// - Decodes entities such as &amp; for us
// - Supports CSS selectors for finding elements
//
// Nothing in here returns an error. A page we can't make sense of simply
// has no text and no links.
// =============================================================================

use scraper::{Html, Node, Selector};
use std::collections::HashSet;
use url::Url;

// Elements whose contents never show up as page text
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// The useful parts of one HTML page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedPage {
    /// Visible text, whitespace collapsed to single spaces
    pub text: String,
    /// Absolute http(s) link targets, first occurrence order, no duplicates
    pub links: Vec<String>,
}

/// Extracts text and links from HTML
///
/// `page_url` is the URL the HTML came from; relative hrefs are resolved
/// against it.
pub fn normalize(html: &str, page_url: &str) -> NormalizedPage {
    let document = Html::parse_document(html);

    NormalizedPage {
        text: extract_text(&document),
        links: extract_links(&document, page_url),
    }
}

// Collects every text node that isn't inside script/style/etc.
//
// Comments are separate nodes in the DOM, so they are skipped for free.
fn extract_text(document: &Html) -> String {
    let mut raw = String::new();

    for node in document.root_element().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };

        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| HIDDEN_ELEMENTS.contains(&el.name()))
        });

        if !hidden {
            raw.push_str(&text.text);
            // Adjacent blocks like <p>a</p><p>b</p> must not glue words together
            raw.push(' ');
        }
    }

    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn extract_links(document: &Html, page_url: &str) -> Vec<String> {
    let mut links = Vec::new();

    let Ok(base) = Url::parse(page_url) else {
        return links;
    };
    let Ok(selector) = Selector::parse("a[href]") else {
        return links;
    };

    // Order matters to the crawler, so the set only answers "seen before?"
    let mut seen = HashSet::new();
    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        if let Some(absolute_url) = resolve_link(&base, href) {
            if seen.insert(absolute_url.clone()) {
                links.push(absolute_url);
            }
        }
    }

    links
}

// Resolves a link (possibly relative) to an absolute http(s) URL
//
// Examples:
//   base = "https://example.com/page"
//   href = "/docs"              -> Some("https://example.com/docs")
//   href = "https://other.com"  -> Some("https://other.com/")
//   href = "#top"               -> None (same page)
//   href = "mailto:me@x.org"    -> None (not a web page)
fn resolve_link(base: &Url, href: &str) -> Option<String> {
    let href = href.trim();

    if href.is_empty()
        || href.starts_with('#')
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("javascript:")
    {
        return None;
    }

    // Also resolves protocol-relative links like "//cdn.example.com/x"
    let url = base.join(href).ok()?;
    match url.scheme() {
        "http" | "https" => Some(url.to_string()),
        _ => None,
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is `let ... else`?
//    - `let Node::Text(text) = node.value() else { continue; };`
//    - If the pattern matches, `text` is bound for the rest of the loop body
//    - If not, the else branch runs and must leave the block
//
// 2. Why check ancestors() for hidden elements?
//    - The text inside <script> is a text node like any other
//    - Only its parent element tells us it is code, not prose
//
// 3. Why does HashSet::insert return a bool?
//    - true means the value was new
//    - `if seen.insert(x) { links.push(x) }` keeps the first copy only and
//      preserves document order, which a plain HashSet would lose
//
// 4. Why does Url::join do the resolving?
//    - It follows the same rules a browser does for "../", "//host" and
//      query-only links, so we don't reimplement them
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_skips_script_style_and_comments() {
        let html = r#"
            <html>
              <head><style>body { color: red; }</style></head>
              <body>
                <h1>Hello</h1>
                <!-- not shown -->
                <script>var hidden = 1;</script>
                <p>brave   new
                   world</p>
              </body>
            </html>
        "#;
        let page = normalize(html, "https://example.com/");
        assert_eq!(page.text, "Hello brave new world");
    }

    #[test]
    fn test_text_decodes_entities() {
        let page = normalize("<p>fish &amp; chips</p>", "https://example.com/");
        assert_eq!(page.text, "fish & chips");
    }

    #[test]
    fn test_blocks_do_not_glue_words() {
        let page = normalize("<p>one</p><p>two</p>", "https://example.com/");
        assert_eq!(page.text, "one two");
    }

    #[test]
    fn test_links_resolved_in_document_order() {
        let html = r#"
            <a href="https://rust-lang.org">Rust</a>
            <a href="/docs">Docs</a>
            <a href="../about">About</a>
        "#;
        let page = normalize(html, "https://example.com/page/");
        assert_eq!(
            page.links,
            vec![
                "https://rust-lang.org/",
                "https://example.com/docs",
                "https://example.com/about",
            ]
        );
    }

    #[test]
    fn test_duplicate_links_kept_once() {
        let html = r#"<a href="/a">1</a><a href="/b">2</a><a href="/a">3</a>"#;
        let page = normalize(html, "https://example.com/");
        assert_eq!(page.links, vec!["https://example.com/a", "https://example.com/b"]);
    }

    #[test]
    fn test_skips_non_web_links() {
        let html = r##"
            <a href="#section">Anchor</a>
            <a href="mailto:test@example.com">Email</a>
            <a href="javascript:void(0)">JS</a>
            <a href="ftp://example.com/file">FTP</a>
            <a>No href</a>
        "##;
        let page = normalize(html, "https://example.com/");
        assert!(page.links.is_empty());
    }

    #[test]
    fn test_malformed_html_is_best_effort() {
        let page = normalize("<div><p>unclosed <b>bold <a href='/x'>link", "https://example.com/");
        assert_eq!(page.text, "unclosed bold link");
        assert_eq!(page.links, vec!["https://example.com/x"]);
    }

    #[test]
    fn test_bad_base_url_yields_no_links() {
        let page = normalize(r#"<a href="/docs">Docs</a>"#, "not a url");
        assert_eq!(page.text, "Docs");
        assert!(page.links.is_empty());
    }
}
