//! Plain text document parser

use async_trait::async_trait;

use crate::domain::ingestion::{
    DocumentMetadata, DocumentParser, ParsedDocument, ParserInput, RawDocument,
};
use crate::domain::DomainError;

/// Parser for plain text and Markdown files
#[derive(Debug, Clone, Default)]
pub struct PlainTextParser;

impl PlainTextParser {
    /// Create a new plain text parser
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DocumentParser for PlainTextParser {
    fn supported_extensions(&self) -> &[&str] {
        &["txt", "text", "md", "markdown"]
    }

    async fn parse(&self, input: ParserInput) -> Result<ParsedDocument, DomainError> {
        let source_id = input.source_id;
        let content = input
            .content
            .into_text()
            .map_err(|e| DomainError::document(&source_id, e.to_string()))?;

        // Line-anchored boundary detection expects `\n` line breaks
        let content = content.replace("\r\n", "\n");

        Ok(ParsedDocument::new(
            RawDocument::new(content, source_id),
            DocumentMetadata::new().with_mime_type("text/plain"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_parse_text_content() {
        let parser = PlainTextParser::new();
        let input = ParserInput::from_text("ARTICLE 1\nSubject-matter", "gdpr.txt");

        let result = parser.parse(input).await.unwrap();

        assert_eq!(result.document.text(), "ARTICLE 1\nSubject-matter");
        assert_eq!(result.document.source_id(), "gdpr.txt");
        assert_eq!(result.metadata.mime_type, Some("text/plain".to_string()));
    }

    #[tokio::test]
    async fn test_parse_bytes_content() {
        let parser = PlainTextParser::new();
        let input = ParserInput::from_bytes(b"Hello from bytes".to_vec(), "bytes.txt");

        let result = parser.parse(input).await.unwrap();

        assert_eq!(result.document.text(), "Hello from bytes");
    }

    #[tokio::test]
    async fn test_parse_normalizes_crlf() {
        let parser = PlainTextParser::new();
        let input = ParserInput::from_text("Intro\r\nARTICLE 2\r\nScope", "windows.txt");

        let result = parser.parse(input).await.unwrap();

        assert_eq!(result.document.text(), "Intro\nARTICLE 2\nScope");
    }

    #[tokio::test]
    async fn test_parse_invalid_utf8_names_source() {
        let parser = PlainTextParser::new();
        let input = ParserInput::from_bytes(vec![0xff, 0xfe], "broken.txt");

        let err = parser.parse(input).await.unwrap_err();

        match err {
            DomainError::Document { source_id, .. } => assert_eq!(source_id, "broken.txt"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_supports_file() {
        let parser = PlainTextParser::new();
        assert!(parser.supports_file("document.txt"));
        assert!(parser.supports_file("document.TXT"));
        assert!(parser.supports_file("document.text"));
        assert!(parser.supports_file("notes.md"));
        assert!(!parser.supports_file("page.html"));
    }
}
