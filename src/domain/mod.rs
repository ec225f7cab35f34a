//! Domain layer - Core business logic and entities

pub mod compliance;
pub mod embedding;
pub mod error;
pub mod ingestion;
pub mod knowledge_base;
pub mod llm;

pub use compliance::{CompliancePrompt, ComplianceReport, PromptTemplate, TemplateError};
pub use embedding::{cosine_similarity, EmbeddingProvider, EmbeddingRequest, EmbeddingResponse};
pub use error::DomainError;
pub use ingestion::{
    BoundaryDetector, Chunk, ChunkMetadata, ChunkingConfig, ChunkingStrategy, DocumentParser,
    RawDocument, Section,
};
pub use knowledge_base::{IndexedChunk, SearchResult, VectorIndex};
pub use llm::{LlmProvider, LlmRequest, LlmResponse, Message, MessageRole};
