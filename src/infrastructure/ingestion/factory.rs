//! Factory for creating parsers

use std::sync::Arc;

use crate::domain::ingestion::{detect_parser_from_filename, DocumentParser, ParserType};

use super::parsers::{HtmlParser, PdfParser, PlainTextParser};

/// Factory for creating document parsers
#[derive(Debug, Default)]
pub struct ParserFactory;

impl ParserFactory {
    /// Create a parser for the given type
    pub fn create(parser_type: ParserType) -> Arc<dyn DocumentParser> {
        match parser_type {
            ParserType::PlainText => Arc::new(PlainTextParser::new()),
            ParserType::Html => Arc::new(HtmlParser::new()),
            ParserType::Pdf => Arc::new(PdfParser::new()),
        }
    }

    /// Create the parser matching a filename, if the format is supported
    pub fn for_filename(filename: &str) -> Option<Arc<dyn DocumentParser>> {
        detect_parser_from_filename(filename).map(Self::create)
    }

    /// Get a list of all supported file extensions
    pub fn supported_extensions() -> Vec<&'static str> {
        vec!["txt", "text", "md", "markdown", "html", "htm", "pdf"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parser_factory_plain_text() {
        let parser = ParserFactory::create(ParserType::PlainText);
        assert!(parser.supports_file("gdpr.txt"));
    }

    #[test]
    fn test_parser_factory_html() {
        let parser = ParserFactory::create(ParserType::Html);
        assert!(parser.supports_file("gdpr.html"));
    }

    #[test]
    fn test_parser_factory_pdf() {
        let parser = ParserFactory::create(ParserType::Pdf);
        assert!(parser.supports_file("CELEX_32016R0679_EN.pdf"));
    }

    #[test]
    fn test_parser_for_filename() {
        assert!(ParserFactory::for_filename("gdpr.md").is_some());
        assert!(ParserFactory::for_filename("gdpr.pdf").is_some());
        assert!(ParserFactory::for_filename("gdpr.docx").is_none());
    }

    #[test]
    fn test_supported_extensions_have_parsers() {
        for ext in ParserFactory::supported_extensions() {
            let filename = format!("file.{}", ext);
            let parser = ParserFactory::for_filename(&filename).unwrap();
            assert!(parser.supports_file(&filename));
        }
    }
}
