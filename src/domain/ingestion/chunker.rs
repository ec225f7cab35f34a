//! Chunking strategy trait and types

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use super::document::RawDocument;
use crate::domain::DomainError;

/// Default maximum chunk length in characters
pub const DEFAULT_CHUNK_SIZE: usize = 1200;
/// Default overlap between consecutive chunks in characters
pub const DEFAULT_CHUNK_OVERLAP: usize = 300;

/// Configuration for chunking
///
/// Only constructible through [`ChunkingConfig::new`], which rejects
/// `chunk_size == 0` and `chunk_overlap >= chunk_size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChunkingConfig {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl ChunkingConfig {
    /// Create a validated chunking configuration
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self, DomainError> {
        if chunk_size == 0 {
            return Err(DomainError::configuration(
                "chunk_size must be greater than 0",
            ));
        }

        if chunk_overlap >= chunk_size {
            return Err(DomainError::configuration(format!(
                "chunk_overlap ({}) must be less than chunk_size ({})",
                chunk_overlap, chunk_size
            )));
        }

        Ok(Self {
            chunk_size,
            chunk_overlap,
        })
    }

    /// Maximum chunk length in characters
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Characters shared between consecutive chunks of a section
    pub fn chunk_overlap(&self) -> usize {
        self.chunk_overlap
    }
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
        }
    }
}

/// Traceability metadata stamped on every chunk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    /// Source id of the originating document
    pub source: String,
    /// First line of the originating section
    pub section_header: String,
    /// Always `"Part of {section_header}"`
    pub description: String,
    /// Position of this chunk in the flattened output (0-based)
    pub chunk_index: usize,
    /// Byte offset of the chunk text in the source document
    pub start: usize,
    /// Byte offset one past the chunk text in the source document
    pub end: usize,
}

impl ChunkMetadata {
    /// Create metadata for a chunk of the section labelled `section_header`
    pub fn new(
        source: impl Into<String>,
        section_header: impl Into<String>,
        chunk_index: usize,
        start: usize,
        end: usize,
    ) -> Self {
        let section_header = section_header.into();
        let description = format!("Part of {}", section_header);

        Self {
            source: source.into(),
            section_header,
            description,
            chunk_index,
            start,
            end,
        }
    }
}

/// A chunk of text extracted from a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Chunk content
    pub content: String,
    /// Chunk metadata
    pub metadata: ChunkMetadata,
}

impl Chunk {
    /// Create a new chunk
    pub fn new(content: impl Into<String>, metadata: ChunkMetadata) -> Self {
        Self {
            content: content.into(),
            metadata,
        }
    }

    /// Get the chunk index
    pub fn index(&self) -> usize {
        self.metadata.chunk_index
    }

    /// Get the content length in characters
    pub fn len(&self) -> usize {
        self.content.chars().count()
    }

    /// Check if the chunk is empty
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Trait for chunking strategies
pub trait ChunkingStrategy: Send + Sync + Debug {
    /// Split documents into one flat, ordered list of chunks
    fn split_documents(&self, documents: &[RawDocument]) -> Result<Vec<Chunk>, DomainError>;

    /// Get the strategy name
    fn name(&self) -> &'static str;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    /// Mock chunking strategy: one chunk per non-empty document
    #[derive(Debug)]
    pub struct MockChunkingStrategy {
        error: Mutex<Option<String>>,
    }

    impl MockChunkingStrategy {
        pub fn new() -> Self {
            Self {
                error: Mutex::new(None),
            }
        }

        pub fn with_error(self, error: impl Into<String>) -> Self {
            *self.error.lock().unwrap() = Some(error.into());
            self
        }
    }

    impl Default for MockChunkingStrategy {
        fn default() -> Self {
            Self::new()
        }
    }

    impl ChunkingStrategy for MockChunkingStrategy {
        fn split_documents(&self, documents: &[RawDocument]) -> Result<Vec<Chunk>, DomainError> {
            if let Some(error) = self.error.lock().unwrap().take() {
                return Err(DomainError::internal(error));
            }

            Ok(documents
                .iter()
                .filter(|doc| !doc.text().is_empty())
                .enumerate()
                .map(|(i, doc)| {
                    Chunk::new(
                        doc.text(),
                        ChunkMetadata::new(doc.source_id(), "mock", i, 0, doc.text().len()),
                    )
                })
                .collect())
        }

        fn name(&self) -> &'static str {
            "mock"
        }
    }
}
