//! In-memory vector index searched by exhaustive cosine similarity

use std::cmp::Ordering;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::embedding::cosine_similarity;
use crate::domain::knowledge_base::{IndexedChunk, SearchResult, VectorIndex};
use crate::domain::DomainError;

use super::snapshot::IndexSnapshot;

/// Vector index kept entirely in memory for the lifetime of a session
#[derive(Debug, Clone, Default)]
pub struct InMemoryVectorIndex {
    entries: Arc<RwLock<Vec<IndexedChunk>>>,
}

impl InMemoryVectorIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dimensionality of stored vectors, if any are stored
    pub async fn dimensions(&self) -> Option<usize> {
        self.entries.read().await.first().map(|e| e.vector.len())
    }

    /// Copy of the stored entries, tagged with the embedding model
    pub async fn snapshot(&self, model: &str) -> IndexSnapshot {
        IndexSnapshot::new(model, self.entries.read().await.clone())
    }

    /// Rebuild an index from a snapshot, re-checking vector dimensions
    pub async fn from_snapshot(snapshot: IndexSnapshot) -> Result<Self, DomainError> {
        let index = Self::new();
        index.add(snapshot.entries).await?;
        Ok(index)
    }
}

fn check_dimensions(expected: usize, actual: usize) -> Result<(), DomainError> {
    if expected != actual {
        return Err(DomainError::provider(
            "in_memory",
            format!("Vector dimension mismatch: index holds {}, got {}", expected, actual),
        ));
    }
    Ok(())
}

#[async_trait]
impl VectorIndex for InMemoryVectorIndex {
    async fn add(&self, entries: Vec<IndexedChunk>) -> Result<usize, DomainError> {
        let mut stored = self.entries.write().await;

        let expected = stored
            .first()
            .or_else(|| entries.first())
            .map(|e| e.vector.len());

        if let Some(expected) = expected {
            if expected == 0 {
                return Err(DomainError::provider("in_memory", "Cannot index empty vectors"));
            }
            for entry in &entries {
                check_dimensions(expected, entry.vector.len())?;
            }
        }

        let count = entries.len();
        stored.extend(entries);

        Ok(count)
    }

    async fn search(&self, query: &[f32], k: usize) -> Result<Vec<SearchResult>, DomainError> {
        let stored = self.entries.read().await;

        if let Some(first) = stored.first() {
            check_dimensions(first.vector.len(), query.len())?;
        }

        let mut scored: Vec<(usize, f32)> = stored
            .iter()
            .enumerate()
            .map(|(idx, entry)| (idx, cosine_similarity(query, &entry.vector)))
            .collect();

        // Stable sort keeps insertion order among equal scores
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

        Ok(scored
            .into_iter()
            .take(k)
            .map(|(idx, score)| SearchResult::new(stored[idx].chunk.clone(), score))
            .collect())
    }

    async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    fn index_type(&self) -> &'static str {
        "in_memory"
    }
}
