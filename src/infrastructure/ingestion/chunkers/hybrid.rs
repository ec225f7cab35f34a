//! Hybrid legal chunking strategy
//!
//! Documents are first cut into sections at legal-structure boundaries, then
//! every section is split into bounded, overlapping windows. Each chunk keeps
//! the header of the section it came from.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::ingestion::{
    BoundaryDetector, Chunk, ChunkMetadata, ChunkingConfig, ChunkingStrategy, RawDocument,
};
use crate::domain::DomainError;

use crate::infrastructure::ingestion::segmenter::StructuralSegmenter;
use crate::infrastructure::ingestion::splitter::RecursiveCharacterSplitter;

/// Structure-aware chunker for legal texts
#[derive(Debug, Clone)]
pub struct HybridLegalChunker {
    segmenter: StructuralSegmenter,
    splitter: RecursiveCharacterSplitter,
}

impl HybridLegalChunker {
    /// Create a chunker using the legal boundary grammar
    pub fn new(config: ChunkingConfig) -> Self {
        Self {
            segmenter: StructuralSegmenter::default(),
            splitter: RecursiveCharacterSplitter::new(config),
        }
    }

    /// Substitute the boundary grammar
    pub fn with_detector(mut self, detector: Arc<dyn BoundaryDetector>) -> Self {
        self.segmenter = StructuralSegmenter::new(detector);
        self
    }

    pub fn config(&self) -> &ChunkingConfig {
        self.splitter.config()
    }

    /// Chunk a single document, numbering chunks from `first_index`
    fn split_document(&self, document: &RawDocument, first_index: usize) -> Vec<Chunk> {
        let text = document.text();
        let mut chunks = Vec::new();

        for section in self.segmenter.segment(document) {
            for span in self.splitter.split(section.text) {
                let start = section.start + span.start;
                let end = section.start + span.end;

                chunks.push(Chunk::new(
                    &text[start..end],
                    ChunkMetadata::new(
                        section.source_id,
                        section.header.as_str(),
                        first_index + chunks.len(),
                        start,
                        end,
                    ),
                ));
            }
        }

        debug!(
            source = document.source_id(),
            chunks = chunks.len(),
            "Chunked document"
        );

        chunks
    }
}

impl Default for HybridLegalChunker {
    fn default() -> Self {
        Self::new(ChunkingConfig::default())
    }
}

impl ChunkingStrategy for HybridLegalChunker {
    fn split_documents(&self, documents: &[RawDocument]) -> Result<Vec<Chunk>, DomainError> {
        let mut chunks = Vec::new();

        for document in documents {
            let document_chunks = self.split_document(document, chunks.len());
            chunks.extend(document_chunks);
        }

        info!(
            "Hybrid chunking: processed {} context-aware chunks",
            chunks.len()
        );

        Ok(chunks)
    }

    fn name(&self) -> &'static str {
        "hybrid_legal"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ingestion::{FixedBoundaryDetector, MAX_HEADER_CHARS};

    fn chunker(chunk_size: usize, chunk_overlap: usize) -> HybridLegalChunker {
        HybridLegalChunker::new(ChunkingConfig::new(chunk_size, chunk_overlap).unwrap())
    }

    fn gdpr_excerpt() -> String {
        let mut text = String::from("REGULATION (EU) 2016/679 on the protection of natural persons\n");
        for article in 1..=6 {
            text.push_str(&format!("ARTICLE {}\n", article));
            for paragraph in 1..=4 {
                text.push_str(&format!(
                    "({}) The controller shall be responsible for, and be able to demonstrate \
                     compliance with, paragraph {} of Article {}.\n",
                    paragraph, paragraph, article
                ));
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_intro_and_two_articles() {
        let doc = RawDocument::new(
            "Intro text.\nARTICLE 1\nData must be processed lawfully.\nARTICLE 2\nConsent is required.",
            "gdpr.txt",
        );

        let chunks = HybridLegalChunker::default()
            .split_documents(&[doc])
            .unwrap();

        assert_eq!(chunks.len(), 3);

        let headers: Vec<&str> = chunks
            .iter()
            .map(|c| c.metadata.section_header.as_str())
            .collect();
        assert_eq!(headers, vec!["Intro text.", "ARTICLE 1", "ARTICLE 2"]);

        assert_eq!(chunks[0].content, "Intro text.");
        assert_eq!(chunks[1].content, "ARTICLE 1\nData must be processed lawfully.");
        assert_eq!(chunks[2].content, "ARTICLE 2\nConsent is required.");

        for chunk in &chunks {
            assert_eq!(
                chunk.metadata.description,
                format!("Part of {}", chunk.metadata.section_header)
            );
            assert_eq!(chunk.metadata.source, "gdpr.txt");
        }
    }

    #[test]
    fn test_empty_document_yields_no_chunks() {
        let chunks = HybridLegalChunker::default()
            .split_documents(&[RawDocument::new("", "empty.txt")])
            .unwrap();

        assert!(chunks.is_empty());
    }

    #[test]
    fn test_no_documents() {
        let chunks = HybridLegalChunker::default().split_documents(&[]).unwrap();
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_single_character_document() {
        let chunks = HybridLegalChunker::default()
            .split_documents(&[RawDocument::new("x", "tiny.txt")])
            .unwrap();

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].content, "x");
        assert_eq!(chunks[0].metadata.section_header, "x");
    }

    #[test]
    fn test_whitespace_section_yields_no_chunks() {
        let chunker = HybridLegalChunker::default()
            .with_detector(Arc::new(FixedBoundaryDetector::new(vec![5, 8])));

        let chunks = chunker
            .split_documents(&[RawDocument::new("Alpha   Omega", "doc")])
            .unwrap();

        let contents: Vec<&str> = chunks.iter().map(|c| c.content.as_str()).collect();
        assert_eq!(contents, vec!["Alpha", "Omega"]);
    }

    #[test]
    fn test_size_bound_and_metadata() {
        let text = gdpr_excerpt();
        let chunks = chunker(200, 50)
            .split_documents(&[RawDocument::new(text.as_str(), "gdpr.txt")])
            .unwrap();

        assert!(chunks.len() > 6);

        for (i, chunk) in chunks.iter().enumerate() {
            assert!(chunk.len() <= 200);
            assert!(!chunk.is_empty());
            assert_eq!(chunk.index(), i);
            assert!(chunk.metadata.section_header.chars().count() <= MAX_HEADER_CHARS);
            assert_eq!(
                chunk.metadata.description,
                format!("Part of {}", chunk.metadata.section_header)
            );
            assert_eq!(&text[chunk.metadata.start..chunk.metadata.end], chunk.content);
        }
    }

    #[test]
    fn test_intro_header_is_truncated() {
        let text = gdpr_excerpt();
        let chunks = HybridLegalChunker::default()
            .split_documents(&[RawDocument::new(text.as_str(), "gdpr.txt")])
            .unwrap();

        assert_eq!(
            chunks[0].metadata.section_header,
            "REGULATION (EU) 2016/679 on the protection of natu"
        );
    }

    #[test]
    fn test_paragraph_markers_start_sections() {
        let text = gdpr_excerpt();
        let chunks = HybridLegalChunker::default()
            .split_documents(&[RawDocument::new(text.as_str(), "gdpr.txt")])
            .unwrap();

        // Intro, then per article one header section and four paragraph sections
        assert_eq!(chunks.len(), 1 + 6 * 5);
        assert_eq!(chunks[1].content, "ARTICLE 1");
        assert!(chunks[2].metadata.section_header.starts_with("(1) The controller"));
    }

    #[test]
    fn test_overlap_bound_within_sections() {
        let text = "ARTICLE 17\n".to_string()
            + &"The data subject shall have the right to obtain erasure without undue delay. ".repeat(12);
        let chunks = chunker(150, 40)
            .split_documents(&[RawDocument::new(text.as_str(), "gdpr.txt")])
            .unwrap();

        assert!(chunks.len() > 2);

        for pair in chunks.windows(2) {
            let (a, b) = (&pair[0].metadata, &pair[1].metadata);
            assert_eq!(a.section_header, b.section_header);

            let shared = if b.start < a.end {
                text[b.start..a.end].chars().count()
            } else {
                0
            };
            assert!(shared <= 40);
            assert!(a.start < b.start);
        }
    }

    #[test]
    fn test_ordering_across_documents() {
        let docs = vec![
            RawDocument::new("ARTICLE 1\nFirst.\nARTICLE 2\nSecond.", "a.txt"),
            RawDocument::new("Section A\nThird.", "b.txt"),
        ];

        let chunks = HybridLegalChunker::default().split_documents(&docs).unwrap();

        let labels: Vec<(&str, &str)> = chunks
            .iter()
            .map(|c| (c.metadata.source.as_str(), c.metadata.section_header.as_str()))
            .collect();

        assert_eq!(
            labels,
            vec![
                ("a.txt", "ARTICLE 1"),
                ("a.txt", "ARTICLE 2"),
                ("b.txt", "Section A")
            ]
        );
        assert_eq!(chunks[2].index(), 2);
    }

    #[test]
    fn test_deterministic_output() {
        let docs = vec![RawDocument::new(gdpr_excerpt(), "gdpr.txt")];
        let chunker = chunker(180, 60);

        assert_eq!(
            chunker.split_documents(&docs).unwrap(),
            chunker.split_documents(&docs).unwrap()
        );
    }

    #[test]
    fn test_chunks_cover_document_text() {
        let text = gdpr_excerpt();
        let chunks = chunker(90, 30)
            .split_documents(&[RawDocument::new(text.as_str(), "gdpr.txt")])
            .unwrap();

        for (i, c) in text.char_indices() {
            if c.is_whitespace() {
                continue;
            }
            assert!(
                chunks
                    .iter()
                    .any(|chunk| chunk.metadata.start <= i && i < chunk.metadata.end),
                "byte {} not covered",
                i
            );
        }
    }

    #[test]
    fn test_name() {
        assert_eq!(HybridLegalChunker::default().name(), "hybrid_legal");
    }
}
