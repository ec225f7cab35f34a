//! Knowledge base domain: the vector index holding embedded chunks

mod index;

pub use index::{IndexedChunk, SearchResult, VectorIndex};
