//! Document parser trait and types

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use super::document::RawDocument;
use crate::domain::DomainError;

/// Content input for document parsing
#[derive(Debug, Clone)]
pub enum ParserContent {
    /// Text content (already decoded)
    Text(String),
    /// Binary content (needs decoding)
    Bytes(Vec<u8>),
}

impl ParserContent {
    /// Create text content
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text(content.into())
    }

    /// Create binary content
    pub fn bytes(content: impl Into<Vec<u8>>) -> Self {
        Self::Bytes(content.into())
    }

    /// Get content as raw bytes
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Self::Text(s) => s.into_bytes(),
            Self::Bytes(b) => b,
        }
    }

    /// Get content as text, decoding bytes as UTF-8 if necessary
    pub fn into_text(self) -> Result<String, DomainError> {
        match self {
            Self::Text(s) => Ok(s),
            Self::Bytes(b) => String::from_utf8(b)
                .map_err(|e| DomainError::validation(format!("Invalid UTF-8: {}", e))),
        }
    }
}

/// Input for document parsing
#[derive(Debug, Clone)]
pub struct ParserInput {
    /// Document content (text or bytes)
    pub content: ParserContent,
    /// Identifier of the origin (file path, URL)
    pub source_id: String,
}

impl ParserInput {
    /// Create input from text content
    pub fn from_text(content: impl Into<String>, source_id: impl Into<String>) -> Self {
        Self {
            content: ParserContent::text(content),
            source_id: source_id.into(),
        }
    }

    /// Create input from binary content
    pub fn from_bytes(content: impl Into<Vec<u8>>, source_id: impl Into<String>) -> Self {
        Self {
            content: ParserContent::bytes(content),
            source_id: source_id.into(),
        }
    }
}

/// Metadata extracted from a document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Document title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// MIME type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

impl DocumentMetadata {
    /// Create empty metadata
    pub fn new() -> Self {
        Self::default()
    }

    /// Set title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set MIME type
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }
}

/// Result of parsing a document
#[derive(Debug, Clone)]
pub struct ParsedDocument {
    /// Extracted plain text
    pub document: RawDocument,
    /// Extracted metadata
    pub metadata: DocumentMetadata,
}

impl ParsedDocument {
    pub fn new(document: RawDocument, metadata: DocumentMetadata) -> Self {
        Self { document, metadata }
    }
}

/// Trait for document parsers
#[async_trait]
pub trait DocumentParser: Send + Sync + Debug {
    /// Get supported file extensions (e.g., ["txt", "text"])
    fn supported_extensions(&self) -> &[&str];

    /// Parse a document and extract plain text and metadata
    async fn parse(&self, input: ParserInput) -> Result<ParsedDocument, DomainError>;

    /// Check if this parser supports a given filename
    fn supports_file(&self, filename: &str) -> bool {
        let ext = filename
            .rsplit('.')
            .next()
            .map(|s| s.to_lowercase())
            .unwrap_or_default();

        self.supported_extensions()
            .iter()
            .any(|e| e.eq_ignore_ascii_case(&ext))
    }
}
