//! Chunk command - splits reference documents and prints the chunks

use std::io::Write;
use std::path::PathBuf;

use clap::{Args, ValueEnum};
use tracing::info;

use crate::domain::ingestion::{Chunk, ChunkingStrategy};
use crate::infrastructure::ingestion::{DocumentLoader, HybridLegalChunker};

/// Output format for printed chunks
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One JSON object per line
    Json,
    /// Human-readable blocks
    Text,
}

/// Arguments for the chunk command
#[derive(Args, Clone)]
pub struct ChunkArgs {
    /// Folder containing GDPR reference documents
    pub folder: PathBuf,

    /// Maximum chunk length in characters (overrides config)
    #[arg(long)]
    pub chunk_size: Option<usize>,

    /// Characters shared between consecutive chunks (overrides config)
    #[arg(long)]
    pub chunk_overlap: Option<usize>,

    #[arg(long, value_enum, default_value = "json")]
    pub format: OutputFormat,
}

/// Run the chunk command
pub async fn run(args: ChunkArgs) -> anyhow::Result<()> {
    let config = super::bootstrap()?;
    let chunking = config.chunking_config(args.chunk_size, args.chunk_overlap)?;

    let documents = DocumentLoader::new().load_folder(&args.folder).await?;
    let chunks = HybridLegalChunker::new(chunking).split_documents(&documents)?;

    info!(
        "Chunked {} documents into {} chunks (size {}, overlap {})",
        documents.len(),
        chunks.len(),
        chunking.chunk_size(),
        chunking.chunk_overlap()
    );

    let stdout = std::io::stdout();
    write_chunks(&mut stdout.lock(), &chunks, args.format)
}

pub fn write_chunks(out: &mut impl Write, chunks: &[Chunk], format: OutputFormat) -> anyhow::Result<()> {
    for chunk in chunks {
        match format {
            OutputFormat::Json => {
                serde_json::to_writer(&mut *out, chunk)?;
                writeln!(out)?;
            }
            OutputFormat::Text => {
                let meta = &chunk.metadata;
                writeln!(
                    out,
                    "--- chunk {} | {} | {} [{}..{}] ---",
                    meta.chunk_index, meta.source, meta.section_header, meta.start, meta.end
                )?;
                writeln!(out, "{}\n", chunk.content)?;
            }
        }
    }

    out.flush()?;
    Ok(())
}
