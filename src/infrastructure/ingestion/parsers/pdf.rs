//! PDF document parser
//!
//! Extracts the text layer with pdf-extract. Scanned, image-only files have
//! no text layer and are rejected rather than indexed as empty documents.

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ingestion::{
    DocumentMetadata, DocumentParser, ParsedDocument, ParserInput, RawDocument,
};
use crate::domain::DomainError;

/// Parser for PDF files such as the official GDPR text
#[derive(Debug, Clone, Default)]
pub struct PdfParser;

impl PdfParser {
    /// Create a new PDF parser
    pub fn new() -> Self {
        Self
    }

    /// Trim every line and collapse runs of blank lines into one
    ///
    /// Boundary detection is line-anchored, so indented article headings
    /// must start at column zero.
    fn clean_text(text: &str) -> String {
        text.lines()
            .map(str::trim)
            .fold(Vec::new(), |mut acc: Vec<&str>, line| {
                if !line.is_empty() || acc.last().is_some_and(|l| !l.is_empty()) {
                    acc.push(line);
                }
                acc
            })
            .join("\n")
            .trim()
            .to_string()
    }

    /// First substantial line among the opening few
    fn extract_title(text: &str) -> Option<String> {
        text.lines()
            .take(5)
            .map(str::trim)
            .find(|line| {
                (10..=200).contains(&line.chars().count())
                    && !line.starts_with("http")
                    && !line.chars().all(|c| c.is_numeric() || c.is_whitespace())
            })
            .map(str::to_string)
    }
}

#[async_trait]
impl DocumentParser for PdfParser {
    fn supported_extensions(&self) -> &[&str] {
        &["pdf"]
    }

    async fn parse(&self, input: ParserInput) -> Result<ParsedDocument, DomainError> {
        let source_id = input.source_id;
        let bytes = input.content.into_bytes();

        // pdf-extract is CPU-bound and may panic on malformed files
        let extracted =
            tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
                .await
                .map_err(|e| {
                    DomainError::document(&source_id, format!("PDF extraction aborted: {}", e))
                })?
                .map_err(|e| {
                    DomainError::document(&source_id, format!("Failed to extract PDF text: {}", e))
                })?;

        let content = Self::clean_text(&extracted);

        if content.is_empty() {
            return Err(DomainError::document(
                &source_id,
                "PDF contains no extractable text (may be image-only)",
            ));
        }

        debug!("Extracted {} characters from {}", content.len(), source_id);

        let mut metadata = DocumentMetadata::new().with_mime_type("application/pdf");
        if let Some(title) = Self::extract_title(&content) {
            metadata = metadata.with_title(title);
        }

        Ok(ParsedDocument::new(RawDocument::new(content, source_id), metadata))
    }
}
