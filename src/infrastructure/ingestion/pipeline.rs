//! Knowledge base build pipeline: chunk, embed, index

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::domain::embedding::{EmbeddingProvider, EmbeddingRequest};
use crate::domain::ingestion::{ChunkingStrategy, RawDocument};
use crate::domain::knowledge_base::{IndexedChunk, VectorIndex};
use crate::domain::DomainError;

/// Number of chunk texts sent per embedding request
pub const EMBEDDING_BATCH_SIZE: usize = 64;

/// Counts reported after a build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BuildSummary {
    pub documents: usize,
    pub chunks: usize,
}

/// Turns reference documents into a searchable vector index
#[derive(Debug, Clone)]
pub struct KnowledgeBaseBuilder {
    chunker: Arc<dyn ChunkingStrategy>,
    embedder: Arc<dyn EmbeddingProvider>,
    index: Arc<dyn VectorIndex>,
    model: String,
    batch_size: usize,
}

impl KnowledgeBaseBuilder {
    /// Create a builder embedding with the provider's default model
    pub fn new(
        chunker: Arc<dyn ChunkingStrategy>,
        embedder: Arc<dyn EmbeddingProvider>,
        index: Arc<dyn VectorIndex>,
    ) -> Self {
        let model = embedder.default_model().to_string();

        Self {
            chunker,
            embedder,
            index,
            model,
            batch_size: EMBEDDING_BATCH_SIZE,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn index(&self) -> Arc<dyn VectorIndex> {
        Arc::clone(&self.index)
    }

    /// Chunk, embed and index `documents`
    ///
    /// Every batch is embedded before anything is added, so a failed build
    /// leaves the index untouched.
    pub async fn build(&self, documents: &[RawDocument]) -> Result<BuildSummary, DomainError> {
        let chunks = self.chunker.split_documents(documents)?;
        let total = chunks.len();

        info!(
            chunker = self.chunker.name(),
            documents = documents.len(),
            chunks = total,
            "Building knowledge base"
        );

        let mut remaining = chunks.into_iter().peekable();
        let mut entries: Vec<IndexedChunk> = Vec::with_capacity(total);

        while remaining.peek().is_some() {
            let batch: Vec<_> = remaining.by_ref().take(self.batch_size).collect();
            let texts = batch.iter().map(|c| c.content.clone()).collect();

            let vectors = self
                .embedder
                .embed(EmbeddingRequest::batch(&self.model, texts))
                .await?
                .into_vectors();

            if vectors.len() != batch.len() {
                return Err(DomainError::provider(
                    self.embedder.provider_name(),
                    format!(
                        "Embedding count mismatch: expected {}, got {}",
                        batch.len(),
                        vectors.len()
                    ),
                ));
            }

            entries.extend(
                batch
                    .into_iter()
                    .zip(vectors)
                    .map(|(chunk, vector)| IndexedChunk::new(chunk, vector)),
            );
            debug!("Embedded {}/{} chunks", entries.len(), total);
        }

        let indexed = self.index.add(entries).await?;

        Ok(BuildSummary {
            documents: documents.len(),
            chunks: indexed,
        })
    }
}
