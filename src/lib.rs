//! GDPR compliance advisor
//!
//! Retrieval-augmented GDPR gap analysis for privacy policies:
//! - Hybrid legal chunking: structural segmentation on Article, Section and
//!   clause headers followed by bounded recursive splitting with overlap
//! - Folder and URL loading for plain text, Markdown, HTML and PDF
//! - In-memory vector index over OpenAI-compatible embeddings, saved to disk
//!   once and reloaded without re-embedding
//! - Compliance analysis through an OpenAI-compatible chat model (Groq by default)

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;
