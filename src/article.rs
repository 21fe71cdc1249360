use anyhow::{anyhow, Result};
use kuchiki::traits::TendrilSink;
use kuchiki::NodeRef;

/// Readable view of a fetched page.
#[derive(Debug, Clone)]
pub struct Article {
    pub title: String,
    pub content: String,
}

/// Collaborator boundary for readability extraction: raw HTML plus the base
/// URL in, title and content HTML out. The heuristics behind an
/// implementation are deliberately outside this crate's scope.
pub trait ContentExtractor {
    fn extract(&self, html: &str, url: &str) -> Result<Article>;
}

/// Thin kuchiki-based extractor: document title from `<title>`, `og:title`
/// or the first `<h1>`, content from the first of `<article>`, `<main>`,
/// `<body>` that carries text.
#[derive(Debug, Clone, Default)]
pub struct ReadableExtractor;

impl ContentExtractor for ReadableExtractor {
    fn extract(&self, html: &str, url: &str) -> Result<Article> {
        let document = kuchiki::parse_html().one(html);
        let title = extract_title(&document).unwrap_or_else(|| url.to_string());
        let content =
            extract_content(&document).ok_or_else(|| anyhow!("no readable content found"))?;
        Ok(Article { title, content })
    }
}

fn extract_title(document: &NodeRef) -> Option<String> {
    if let Ok(node) = document.select_first("title") {
        let text = node.text_contents().trim().to_string();
        if !text.is_empty() {
            return Some(text);
        }
    }
    if let Ok(node) = document.select_first(r#"meta[property="og:title"]"#) {
        let attributes = node.attributes.borrow();
        if let Some(content) = attributes.get("content") {
            let text = content.trim().to_string();
            if !text.is_empty() {
                return Some(text);
            }
        }
    }
    if let Ok(node) = document.select_first("h1") {
        let text = node.text_contents().trim().to_string();
        if !text.is_empty() {
            return Some(text);
        }
    }
    None
}

fn extract_content(document: &NodeRef) -> Option<String> {
    for selector in ["article", "main", "body"] {
        if let Ok(node) = document.select_first(selector) {
            if node.text_contents().trim().is_empty() {
                continue;
            }
            return Some(node.as_node().to_string());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_document_title_and_article_element() {
        let html = concat!(
            "<html><head><title>A Story</title></head>",
            "<body><nav>menu</nav>",
            "<article><p>The actual article text.</p></article>",
            "</body></html>"
        );
        let article = ReadableExtractor
            .extract(html, "https://example.com/story")
            .unwrap();
        assert_eq!(article.title, "A Story");
        assert!(article.content.contains("The actual article text."));
        assert!(!article.content.contains("menu"));
    }

    #[test]
    fn falls_back_to_og_title_then_h1() {
        let html = concat!(
            r#"<html><head><meta property="og:title" content="Open Graph Title"></head>"#,
            "<body><p>text</p></body></html>"
        );
        let article = ReadableExtractor.extract(html, "https://x").unwrap();
        assert_eq!(article.title, "Open Graph Title");

        let html = "<html><body><h1>Heading Title</h1><p>text</p></body></html>";
        let article = ReadableExtractor.extract(html, "https://x").unwrap();
        assert_eq!(article.title, "Heading Title");
    }

    #[test]
    fn url_stands_in_for_a_missing_title() {
        let html = "<html><body><p>just text</p></body></html>";
        let article = ReadableExtractor
            .extract(html, "https://example.com/untitled")
            .unwrap();
        assert_eq!(article.title, "https://example.com/untitled");
    }

    #[test]
    fn body_is_the_content_fallback() {
        let html = "<html><body><p>fallback content</p></body></html>";
        let article = ReadableExtractor.extract(html, "https://x").unwrap();
        assert!(article.content.contains("fallback content"));
    }

    #[test]
    fn pages_without_text_are_rejected() {
        let article = ReadableExtractor.extract("", "https://x");
        assert!(article.is_err());
    }
}
