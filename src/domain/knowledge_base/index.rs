//! Vector index trait and its record types

use std::fmt::Debug;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::ingestion::Chunk;
use crate::domain::DomainError;

/// A chunk stored alongside its embedding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexedChunk {
    pub chunk: Chunk,
    pub vector: Vec<f32>,
}

impl IndexedChunk {
    pub fn new(chunk: Chunk, vector: Vec<f32>) -> Self {
        Self { chunk, vector }
    }
}

/// A retrieved chunk with its similarity to the query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub chunk: Chunk,
    /// Cosine similarity, higher is more similar
    pub score: f32,
}

impl SearchResult {
    pub fn new(chunk: Chunk, score: f32) -> Self {
        Self { chunk, score }
    }

    pub fn content(&self) -> &str {
        &self.chunk.content
    }

    pub fn section_header(&self) -> &str {
        &self.chunk.metadata.section_header
    }
}

/// Similarity-searchable store of embedded chunks
#[async_trait]
pub trait VectorIndex: Send + Sync + Debug {
    /// Add embedded chunks, returning how many were stored
    async fn add(&self, entries: Vec<IndexedChunk>) -> Result<usize, DomainError>;

    /// The `k` entries most similar to `query`, best first
    async fn search(&self, query: &[f32], k: usize) -> Result<Vec<SearchResult>, DomainError>;

    /// Number of stored entries
    async fn len(&self) -> usize;

    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Get the index type
    fn index_type(&self) -> &'static str;
}
