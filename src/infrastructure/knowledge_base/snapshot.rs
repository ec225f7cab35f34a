//! On-disk snapshot of an embedded knowledge base
//!
//! Embedding the reference corpus is the expensive step, so it is done once
//! by `gdpr-advisor build` and reloaded by later analyses.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::knowledge_base::IndexedChunk;
use crate::domain::DomainError;

/// Serialized contents of a vector index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexSnapshot {
    /// Embedding model the vectors were produced with
    pub model: String,
    pub created_at: DateTime<Utc>,
    pub entries: Vec<IndexedChunk>,
}

impl IndexSnapshot {
    pub fn new(model: impl Into<String>, entries: Vec<IndexedChunk>) -> Self {
        Self {
            model: model.into(),
            created_at: Utc::now(),
            entries,
        }
    }

    /// Write the snapshot as JSON, creating parent directories
    pub async fn save(&self, path: &Path) -> Result<(), DomainError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                DomainError::internal(format!("Cannot create {}: {}", parent.display(), e))
            })?;
        }

        let json = serde_json::to_vec(self)
            .map_err(|e| DomainError::internal(format!("Failed to serialize index: {}", e)))?;

        // Readers never see a half-written file
        let tmp = path.with_extension("tmp");
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|e| DomainError::internal(format!("Cannot write {}: {}", tmp.display(), e)))?;
        tokio::fs::rename(&tmp, path)
            .await
            .map_err(|e| DomainError::internal(format!("Cannot write {}: {}", path.display(), e)))
    }

    /// Read a snapshot, or `None` when no file exists at `path`
    pub async fn load(path: &Path) -> Result<Option<Self>, DomainError> {
        let json = match tokio::fs::read(path).await {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(DomainError::internal(format!(
                    "Cannot read {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        serde_json::from_slice(&json).map(Some).map_err(|e| {
            DomainError::document(path.display().to_string(), format!("Corrupt index file: {}", e))
        })
    }

    /// Fail unless the snapshot was embedded with `model`
    pub fn ensure_model(&self, model: &str) -> Result<(), DomainError> {
        if self.model != model {
            return Err(DomainError::configuration(format!(
                "Knowledge base was embedded with {} but {} is configured; rebuild it",
                self.model, model
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ingestion::{Chunk, ChunkMetadata};

    fn entry(header: &str, vector: Vec<f32>) -> IndexedChunk {
        let chunk = Chunk::new(header, ChunkMetadata::new("gdpr.pdf", header, 0, 0, header.len()));
        IndexedChunk::new(chunk, vector)
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("gdpr_index.json");
        let snapshot = IndexSnapshot::new(
            "text-embedding-3-small",
            vec![entry("ARTICLE 5", vec![0.5, -0.25]), entry("ARTICLE 6", vec![1.0, 0.0])],
        );

        snapshot.save(&path).await.unwrap();
        let loaded = IndexSnapshot::load(&path).await.unwrap().unwrap();

        assert_eq!(loaded, snapshot);
        assert!(!path.with_extension("tmp").exists());
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();

        let loaded = IndexSnapshot::load(&dir.path().join("missing.json")).await.unwrap();

        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn test_load_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gdpr_index.json");
        std::fs::write(&path, "{\"model\":").unwrap();

        let err = IndexSnapshot::load(&path).await.unwrap_err();

        assert!(matches!(err, DomainError::Document { .. }));
    }

    #[test]
    fn test_ensure_model() {
        let snapshot = IndexSnapshot::new("text-embedding-3-small", Vec::new());

        assert!(snapshot.ensure_model("text-embedding-3-small").is_ok());
        assert!(matches!(
            snapshot.ensure_model("text-embedding-3-large"),
            Err(DomainError::Configuration { .. })
        ));
    }
}
