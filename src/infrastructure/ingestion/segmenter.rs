//! Structural segmentation of documents into sections

use std::sync::Arc;

use crate::domain::ingestion::{BoundaryDetector, RawDocument, Section};

use super::boundary::LegalBoundaryDetector;

/// Cuts documents into sections at the offsets reported by a [`BoundaryDetector`]
#[derive(Debug, Clone)]
pub struct StructuralSegmenter {
    detector: Arc<dyn BoundaryDetector>,
}

impl StructuralSegmenter {
    pub fn new(detector: Arc<dyn BoundaryDetector>) -> Self {
        Self { detector }
    }

    pub fn detector_name(&self) -> &'static str {
        self.detector.name()
    }

    /// Sorted, duplicate-free offsets `{0} ∪ matches ∪ {len}`
    pub fn boundaries(&self, text: &str) -> Vec<usize> {
        let mut offsets = Vec::with_capacity(2);
        offsets.push(0);
        offsets.extend(
            self.detector
                .find_boundaries(text)
                .into_iter()
                .filter(|offset| *offset <= text.len() && text.is_char_boundary(*offset)),
        );
        offsets.push(text.len());

        offsets.sort_unstable();
        offsets.dedup();
        offsets
    }

    /// One section per adjacent boundary pair, in document order
    ///
    /// Sections whose trimmed text is empty are kept; an empty document has a
    /// single collapsed boundary and yields no sections.
    pub fn segment<'a>(&self, document: &'a RawDocument) -> Vec<Section<'a>> {
        self.boundaries(document.text())
            .windows(2)
            .map(|pair| Section::from_interval(document, pair[0], pair[1]))
            .collect()
    }
}

impl Default for StructuralSegmenter {
    fn default() -> Self {
        Self::new(Arc::new(LegalBoundaryDetector::new()))
    }
}
