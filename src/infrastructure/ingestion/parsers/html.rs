//! HTML document parser

use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};

use crate::domain::ingestion::{
    DocumentMetadata, DocumentParser, ParsedDocument, ParserInput, RawDocument,
};
use crate::domain::DomainError;

/// Parser for HTML files and fetched web pages
#[derive(Debug, Clone, Default)]
pub struct HtmlParser;

impl HtmlParser {
    /// Create a new HTML parser
    pub fn new() -> Self {
        Self
    }

    fn extract_title(document: &Html) -> Option<String> {
        let title_selector = Selector::parse("title").ok()?;
        document
            .select(&title_selector)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|s| !s.is_empty())
    }

    fn extract_text(document: &Html) -> String {
        let body = Selector::parse("body")
            .ok()
            .and_then(|sel| document.select(&sel).next());

        let text = match body {
            Some(body) => Self::extract_element_text(&body),
            None => Self::extract_element_text(&document.root_element()),
        };

        Self::normalize_text(&text)
    }

    fn extract_element_text(element: &ElementRef) -> String {
        let mut text = String::new();

        for node in element.children() {
            if let Some(el) = ElementRef::wrap(node) {
                let tag_name = el.value().name();

                if matches!(tag_name, "script" | "style" | "noscript" | "head") {
                    continue;
                }

                if is_line_break(tag_name) && !text.is_empty() && !text.ends_with('\n') {
                    text.push('\n');
                }

                text.push_str(&Self::extract_element_text(&el));

                if is_block(tag_name) {
                    text.push('\n');
                }
            } else if let Some(txt) = node.value().as_text() {
                text.push_str(txt);
            }
        }

        text
    }

    fn normalize_text(text: &str) -> String {
        let lines: Vec<&str> = text
            .lines()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty())
            .collect();

        lines.join("\n")
    }
}

fn is_block(tag_name: &str) -> bool {
    matches!(
        tag_name,
        "p" | "div" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6"
    )
}

fn is_line_break(tag_name: &str) -> bool {
    is_block(tag_name) || matches!(tag_name, "br" | "li" | "tr" | "td" | "th")
}

#[async_trait]
impl DocumentParser for HtmlParser {
    fn supported_extensions(&self) -> &[&str] {
        &["html", "htm"]
    }

    async fn parse(&self, input: ParserInput) -> Result<ParsedDocument, DomainError> {
        let source_id = input.source_id;
        let raw_content = input
            .content
            .into_text()
            .map_err(|e| DomainError::document(&source_id, e.to_string()))?;

        let document = Html::parse_document(&raw_content);

        let content = Self::extract_text(&document);
        let mut metadata = DocumentMetadata::new().with_mime_type("text/html");

        if let Some(title) = Self::extract_title(&document) {
            metadata = metadata.with_title(title);
        }

        Ok(ParsedDocument::new(RawDocument::new(content, source_id), metadata))
    }
}
