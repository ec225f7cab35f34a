//! CLI module for the GDPR advisor
//!
//! Provides subcommands:
//! - `chunk`: split a folder of GDPR reference documents and print the chunks
//! - `build`: embed the reference documents once and save the index
//! - `analyze`: check a privacy policy against the saved (or freshly built) index

pub mod analyze;
pub mod build;
pub mod chunk;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::domain::EmbeddingProvider;
use crate::infrastructure::embedding::OpenAiEmbeddingProvider;
use crate::infrastructure::llm::HttpClient;
use crate::infrastructure::logging;

/// GDPR compliance advisor - legal-structure-aware chunking and gap analysis
#[derive(Parser)]
#[command(name = "gdpr-advisor")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Chunk the reference documents in a folder
    Chunk(chunk::ChunkArgs),

    /// Embed the reference documents in a folder and save the index
    Build(build::BuildArgs),

    /// Analyze a privacy policy for GDPR compliance gaps
    Analyze(analyze::AnalyzeArgs),
}

/// Load `.env` and configuration, then start logging
fn bootstrap() -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    logging::init_logging(&config.logging);

    Ok(config)
}

/// Embedding client for the configured OpenAI-compatible endpoint
fn embedding_provider(config: &AppConfig) -> anyhow::Result<Arc<dyn EmbeddingProvider>> {
    Ok(Arc::new(OpenAiEmbeddingProvider::with_base_url(
        HttpClient::new(),
        config.embedding.resolve_api_key()?,
        &config.embedding.base_url,
    )))
}
