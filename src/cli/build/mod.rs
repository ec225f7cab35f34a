//! Build command - embeds the reference corpus once and saves the index

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::Args;
use tracing::info;

use crate::domain::embedding::EmbeddingProvider;
use crate::domain::ingestion::ChunkingConfig;
use crate::domain::knowledge_base::VectorIndex;
use crate::infrastructure::ingestion::{
    BuildSummary, DocumentLoader, HybridLegalChunker, KnowledgeBaseBuilder,
};
use crate::infrastructure::knowledge_base::{IndexSnapshot, InMemoryVectorIndex};

/// Arguments for the build command
#[derive(Args, Clone)]
pub struct BuildArgs {
    /// Folder containing GDPR reference documents
    pub folder: PathBuf,

    /// Where to save the index (overrides knowledge_base.index_path)
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Maximum chunk length in characters (overrides config)
    #[arg(long)]
    pub chunk_size: Option<usize>,

    /// Characters shared between consecutive chunks (overrides config)
    #[arg(long)]
    pub chunk_overlap: Option<usize>,
}

/// Run the build command
pub async fn run(args: BuildArgs) -> anyhow::Result<()> {
    let config = super::bootstrap()?;
    let chunking = config.chunking_config(args.chunk_size, args.chunk_overlap)?;
    let output = args
        .output
        .unwrap_or_else(|| config.knowledge_base.index_path.clone());

    let embedder = super::embedding_provider(&config)?;
    let (_, summary) = build_and_save(
        embedder,
        &config.embedding.model,
        chunking,
        &args.folder,
        &output,
    )
    .await?;

    let mut stdout = std::io::stdout().lock();
    writeln!(
        stdout,
        "Indexed {} chunks from {} documents into {}",
        summary.chunks,
        summary.documents,
        output.display()
    )?;

    Ok(())
}

/// Chunk and embed every document in `folder`, then save the index to `output`
pub async fn build_and_save(
    embedder: Arc<dyn EmbeddingProvider>,
    model: &str,
    chunking: ChunkingConfig,
    folder: &Path,
    output: &Path,
) -> anyhow::Result<(InMemoryVectorIndex, BuildSummary)> {
    let corpus = DocumentLoader::new().load_folder(folder).await?;
    let index = InMemoryVectorIndex::new();

    let summary = KnowledgeBaseBuilder::new(
        Arc::new(HybridLegalChunker::new(chunking)),
        embedder,
        Arc::new(index.clone()),
    )
    .with_model(model)
    .build(&corpus)
    .await
    .context("Failed to build knowledge base")?;

    index
        .snapshot(model)
        .await
        .save(output)
        .await
        .with_context(|| format!("Failed to save knowledge base to {}", output.display()))?;

    info!(
        documents = summary.documents,
        chunks = summary.chunks,
        "Saved knowledge base to {}",
        output.display()
    );

    Ok((index, summary))
}

/// Reload the saved index at `index_path`, or build it from `folder` when
/// there is none yet or `rebuild` is set
pub async fn load_or_build(
    embedder: Arc<dyn EmbeddingProvider>,
    model: &str,
    chunking: ChunkingConfig,
    index_path: &Path,
    folder: Option<&Path>,
    rebuild: bool,
) -> anyhow::Result<InMemoryVectorIndex> {
    if !rebuild {
        if let Some(snapshot) = IndexSnapshot::load(index_path).await? {
            snapshot.ensure_model(model)?;
            let index = InMemoryVectorIndex::from_snapshot(snapshot).await?;

            info!(
                chunks = index.len().await,
                "Loaded knowledge base from {}",
                index_path.display()
            );
            return Ok(index);
        }
    }

    let folder = folder.with_context(|| {
        format!(
            "No knowledge base at {}: pass a reference folder or run `gdpr-advisor build <folder>`",
            index_path.display()
        )
    })?;

    let (index, _) = build_and_save(embedder, model, chunking, folder, index_path).await?;
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::embedding::MockEmbeddingProvider;

    const MODEL: &str = "text-embedding-3-small";

    fn corpus() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("gdpr.txt"),
            "ARTICLE 6\nLawfulness of processing.\n\nARTICLE 17\nRight to erasure.",
        )
        .unwrap();
        dir
    }

    #[tokio::test]
    async fn test_build_and_save_writes_snapshot() {
        let folder = corpus();
        let output = folder.path().join("data").join("gdpr_index.json");

        let (index, summary) = build_and_save(
            Arc::new(MockEmbeddingProvider::new(32)),
            MODEL,
            ChunkingConfig::default(),
            folder.path(),
            &output,
        )
        .await
        .unwrap();

        assert_eq!(summary.documents, 1);
        assert_eq!(summary.chunks, 2);
        let snapshot = IndexSnapshot::load(&output).await.unwrap().unwrap();
        assert_eq!(snapshot.model, MODEL);
        assert_eq!(snapshot.entries.len(), index.len().await);
    }

    #[tokio::test]
    async fn test_load_or_build_reuses_saved_index() {
        let folder = corpus();
        let index_path = folder.path().join("gdpr_index.json");

        let built = load_or_build(
            Arc::new(MockEmbeddingProvider::new(32)),
            MODEL,
            ChunkingConfig::default(),
            &index_path,
            Some(folder.path()),
            false,
        )
        .await
        .unwrap();

        // A failing embedder proves nothing is embedded again
        let reloaded = load_or_build(
            Arc::new(MockEmbeddingProvider::new(32).with_error("no network")),
            MODEL,
            ChunkingConfig::default(),
            &index_path,
            None,
            false,
        )
        .await
        .unwrap();

        assert_eq!(reloaded.len().await, built.len().await);
        assert_eq!(reloaded.dimensions().await, Some(32));
    }

    #[tokio::test]
    async fn test_load_or_build_rebuild_replaces_index() {
        let folder = corpus();
        let index_path = folder.path().join("gdpr_index.json");
        IndexSnapshot::new(MODEL, Vec::new()).save(&index_path).await.unwrap();

        let index = load_or_build(
            Arc::new(MockEmbeddingProvider::new(16)),
            MODEL,
            ChunkingConfig::default(),
            &index_path,
            Some(folder.path()),
            true,
        )
        .await
        .unwrap();

        assert_eq!(index.len().await, 2);
        let saved = IndexSnapshot::load(&index_path).await.unwrap().unwrap();
        assert_eq!(saved.entries.len(), 2);
    }

    #[tokio::test]
    async fn test_load_or_build_rejects_other_model() {
        let folder = corpus();
        let index_path = folder.path().join("gdpr_index.json");
        IndexSnapshot::new("text-embedding-3-large", Vec::new())
            .save(&index_path)
            .await
            .unwrap();

        let result = load_or_build(
            Arc::new(MockEmbeddingProvider::new(16)),
            MODEL,
            ChunkingConfig::default(),
            &index_path,
            Some(folder.path()),
            false,
        )
        .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_load_or_build_without_index_or_folder() {
        let dir = tempfile::tempdir().unwrap();

        let err = load_or_build(
            Arc::new(MockEmbeddingProvider::new(16)),
            MODEL,
            ChunkingConfig::default(),
            &dir.path().join("gdpr_index.json"),
            None,
            false,
        )
        .await
        .unwrap_err();

        assert!(err.to_string().contains("gdpr-advisor build"));
    }
}
