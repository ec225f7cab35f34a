//! Legal-structure boundary detector

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::ingestion::BoundaryDetector;

/// Headers that open a new legal unit at the start of a line:
/// `ARTICLE 5`, `Section 2a`, `4.1`, `(3)`.
///
/// Keywords match ASCII case-insensitively; `\d` and `\w` stay Unicode-aware.
static LEGAL_HEADER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^(?:(?i-u:article)\s+\d+|(?i-u:section)\s+\w+|\d+\.\d+|\(\d+\))")
        .expect("legal header pattern is valid")
});

/// Detects article, section, numbered-clause and paragraph headers
#[derive(Debug, Clone, Copy, Default)]
pub struct LegalBoundaryDetector;

impl LegalBoundaryDetector {
    pub fn new() -> Self {
        Self
    }
}

impl BoundaryDetector for LegalBoundaryDetector {
    fn find_boundaries(&self, text: &str) -> Vec<usize> {
        LEGAL_HEADER_PATTERN
            .find_iter(text)
            .map(|m| m.start())
            .collect()
    }

    fn name(&self) -> &'static str {
        "legal"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boundaries(text: &str) -> Vec<usize> {
        LegalBoundaryDetector::new().find_boundaries(text)
    }

    #[test]
    fn test_no_headers() {
        assert!(boundaries("Plain prose without any structure.").is_empty());
        assert!(boundaries("").is_empty());
    }

    #[test]
    fn test_article_headers() {
        let text = "ARTICLE 5\nPrinciples\nARTICLE 6\nLawfulness";
        assert_eq!(boundaries(text), vec![0, text.find("ARTICLE 6").unwrap()]);
    }

    #[test]
    fn test_keywords_are_case_insensitive() {
        let text = "Article 1\nfoo\nsection IV\nbar\nSECTION 2\nbaz";
        assert_eq!(
            boundaries(text),
            vec![
                0,
                text.find("section IV").unwrap(),
                text.find("SECTION 2").unwrap()
            ]
        );
    }

    #[test]
    fn test_numbered_and_parenthesised_clauses() {
        let text = "Intro\n4.1 Scope\n(2) Member States\n(a) not a boundary";
        assert_eq!(
            boundaries(text),
            vec![text.find("4.1").unwrap(), text.find("(2)").unwrap()]
        );
    }

    #[test]
    fn test_headers_must_start_a_line() {
        let text = "as laid down in Article 6 and Section 3 of 2.1";
        assert!(boundaries(text).is_empty());
    }

    #[test]
    fn test_article_requires_a_number() {
        assert!(boundaries("ARTICLE\nARTICLES 12").is_empty());
    }

    #[test]
    fn test_offsets_after_multibyte_text() {
        let text = "Präambel über Daten\nARTICLE 1\nGegenstand";
        let offsets = boundaries(text);

        assert_eq!(offsets, vec![text.find("ARTICLE 1").unwrap()]);
        assert!(text.is_char_boundary(offsets[0]));
    }

    #[test]
    fn test_crlf_line_endings() {
        let text = "Intro\r\nARTICLE 2\r\nMaterial scope";
        assert_eq!(boundaries(text), vec![7]);
    }
}
