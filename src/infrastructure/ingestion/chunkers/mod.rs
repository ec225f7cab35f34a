//! Chunking strategy implementations

mod hybrid;

pub use hybrid::HybridLegalChunker;
