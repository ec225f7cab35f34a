//! Validation helpers for ingestion

use serde::{Deserialize, Serialize};

/// Supported document formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParserType {
    PlainText,
    Html,
    Pdf,
}

/// Detect parser type from filename extension
///
/// Markdown is read as plain text: its headings and article markers survive
/// untouched, which is what the boundary detector needs.
pub fn detect_parser_from_filename(filename: &str) -> Option<ParserType> {
    let (_, ext) = filename.rsplit_once('.')?;

    match ext.to_lowercase().as_str() {
        "txt" | "text" | "md" | "markdown" => Some(ParserType::PlainText),
        "html" | "htm" => Some(ParserType::Html),
        "pdf" => Some(ParserType::Pdf),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_parser_from_filename() {
        assert_eq!(
            detect_parser_from_filename("gdpr.txt"),
            Some(ParserType::PlainText)
        );
        assert_eq!(
            detect_parser_from_filename("GDPR.TXT"),
            Some(ParserType::PlainText)
        );
        assert_eq!(
            detect_parser_from_filename("notes.md"),
            Some(ParserType::PlainText)
        );
        assert_eq!(
            detect_parser_from_filename("eur-lex.html"),
            Some(ParserType::Html)
        );
        assert_eq!(
            detect_parser_from_filename("CELEX_32016R0679_EN.PDF"),
            Some(ParserType::Pdf)
        );
        assert_eq!(detect_parser_from_filename("contract.docx"), None);
        assert_eq!(detect_parser_from_filename("README"), None);
    }
}
