//! Raw documents and the sections cut out of them

use serde::{Deserialize, Serialize};

/// Maximum number of characters kept from a section's first line
pub const MAX_HEADER_CHARS: usize = 50;

/// A document's full extracted text, tagged with where it came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDocument {
    text: String,
    source_id: String,
}

impl RawDocument {
    pub fn new(text: impl Into<String>, source_id: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source_id: source_id.into(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn source_id(&self) -> &str {
        &self.source_id
    }
}

/// A slice of a document between two structural boundaries
///
/// `start` and `end` are byte offsets of the trimmed `text` within the
/// parent document, so `document.text()[start..end] == text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section<'a> {
    pub text: &'a str,
    pub header: String,
    pub source_id: &'a str,
    pub start: usize,
    pub end: usize,
}

impl<'a> Section<'a> {
    /// Build a section from the untrimmed interval `[start, end)` of `document`
    pub fn from_interval(document: &'a RawDocument, start: usize, end: usize) -> Self {
        let raw = &document.text()[start..end];
        let leading = raw.len() - raw.trim_start().len();
        let text = raw.trim();

        Self {
            text,
            header: section_header(text),
            source_id: document.source_id(),
            start: start + leading,
            end: start + leading + text.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// First line of `text`, cut to [`MAX_HEADER_CHARS`] characters
pub fn section_header(text: &str) -> String {
    let first_line = text.split('\n').next().unwrap_or_default();
    let first_line = first_line.strip_suffix('\r').unwrap_or(first_line);

    first_line.chars().take(MAX_HEADER_CHARS).collect()
}
