//! Document ingestion domain types and traits
//!
//! This module provides:
//! - `RawDocument` and `Section`, the chunker's input and intermediate form
//! - `BoundaryDetector` trait for locating legal-structure boundaries
//! - `ChunkingStrategy` trait for splitting documents into chunks
//! - `DocumentParser` trait for turning files and pages into plain text

pub mod boundary;
pub mod chunker;
pub mod document;
pub mod parser;
pub mod validation;

// Re-export main types
pub use boundary::BoundaryDetector;
pub use chunker::{
    Chunk, ChunkMetadata, ChunkingConfig, ChunkingStrategy, DEFAULT_CHUNK_OVERLAP,
    DEFAULT_CHUNK_SIZE,
};
pub use document::{section_header, RawDocument, Section, MAX_HEADER_CHARS};
pub use parser::{DocumentMetadata, DocumentParser, ParsedDocument, ParserContent, ParserInput};
pub use validation::{detect_parser_from_filename, ParserType};

// Re-export mocks for testing
#[cfg(test)]
pub use boundary::mock::FixedBoundaryDetector;
#[cfg(test)]
pub use chunker::mock::MockChunkingStrategy;
