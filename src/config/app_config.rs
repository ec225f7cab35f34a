use std::path::PathBuf;

use serde::Deserialize;

use crate::domain::ingestion::{ChunkingConfig, DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE};
use crate::domain::DomainError;
use crate::infrastructure::embedding::{DEFAULT_EMBEDDING_BASE_URL, DEFAULT_EMBEDDING_MODEL};
use crate::infrastructure::llm::{DEFAULT_LLM_BASE_URL, DEFAULT_LLM_MODEL};
use crate::infrastructure::services::{AnalysisSettings, DEFAULT_MAX_DOCUMENT_CHARS, DEFAULT_TOP_K};

/// Environment variables consulted when no API key is configured
const EMBEDDING_API_KEY_ENV: &str = "OPENAI_API_KEY";
const LLM_API_KEY_ENV: &str = "GROQ_API_KEY";

pub const DEFAULT_INDEX_PATH: &str = "data/gdpr_index.json";

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub chunking: ChunkingSettings,
    pub embedding: EmbeddingSettings,
    pub llm: LlmSettings,
    pub retrieval: RetrievalSettings,
    pub knowledge_base: KnowledgeBaseSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChunkingSettings {
    pub chunk_size: usize,
    pub chunk_overlap: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EmbeddingSettings {
    pub base_url: String,
    pub api_key: Option<String>,
    pub model: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    pub base_url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: f32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RetrievalSettings {
    pub top_k: usize,
    pub max_document_chars: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KnowledgeBaseSettings {
    /// Where `build` saves the embedded corpus and `analyze` reloads it
    pub index_path: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for ChunkingSettings {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
        }
    }
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_EMBEDDING_BASE_URL.to_string(),
            api_key: None,
            model: DEFAULT_EMBEDDING_MODEL.to_string(),
        }
    }
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_LLM_BASE_URL.to_string(),
            api_key: None,
            model: DEFAULT_LLM_MODEL.to_string(),
            temperature: 0.0,
        }
    }
}

impl Default for RetrievalSettings {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            max_document_chars: DEFAULT_MAX_DOCUMENT_CHARS,
        }
    }
}

impl Default for KnowledgeBaseSettings {
    fn default() -> Self {
        Self {
            index_path: PathBuf::from(DEFAULT_INDEX_PATH),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Validated chunking parameters, with optional command-line overrides
    pub fn chunking_config(
        &self,
        chunk_size: Option<usize>,
        chunk_overlap: Option<usize>,
    ) -> Result<ChunkingConfig, DomainError> {
        ChunkingConfig::new(
            chunk_size.unwrap_or(self.chunking.chunk_size),
            chunk_overlap.unwrap_or(self.chunking.chunk_overlap),
        )
    }

    /// Analysis settings, with an optional `top_k` override
    pub fn analysis_settings(&self, top_k: Option<usize>) -> Result<AnalysisSettings, DomainError> {
        let top_k = top_k.unwrap_or(self.retrieval.top_k);

        if top_k == 0 {
            return Err(DomainError::configuration("top_k must be greater than zero"));
        }

        Ok(AnalysisSettings {
            model: self.llm.model.clone(),
            temperature: self.llm.temperature,
            top_k,
            max_document_chars: self.retrieval.max_document_chars,
        })
    }
}

impl EmbeddingSettings {
    pub fn resolve_api_key(&self) -> Result<String, DomainError> {
        resolve_api_key(self.api_key.as_deref(), EMBEDDING_API_KEY_ENV, "embedding")
    }
}

impl LlmSettings {
    pub fn resolve_api_key(&self) -> Result<String, DomainError> {
        resolve_api_key(self.api_key.as_deref(), LLM_API_KEY_ENV, "llm")
    }
}

fn resolve_api_key(configured: Option<&str>, env_var: &str, section: &str) -> Result<String, DomainError> {
    configured
        .filter(|key| !key.is_empty())
        .map(str::to_string)
        .or_else(|| std::env::var(env_var).ok().filter(|key| !key.is_empty()))
        .ok_or_else(|| {
            DomainError::configuration(format!(
                "No API key for {}: set {}.api_key or {}",
                section, section, env_var
            ))
        })
}
