//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, ChunkingSettings, EmbeddingSettings, KnowledgeBaseSettings, LlmSettings, LogFormat,
    LoggingConfig, RetrievalSettings, DEFAULT_INDEX_PATH,
};
