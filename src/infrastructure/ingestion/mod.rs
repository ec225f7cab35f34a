//! Document ingestion infrastructure
//!
//! Loading and parsing reference documents, hybrid legal chunking
//! (structural segmentation followed by recursive splitting) and the
//! pipeline that embeds chunks into a vector index.

pub mod boundary;
pub mod chunkers;
pub mod factory;
pub mod loader;
pub mod parsers;
pub mod pipeline;
pub mod segmenter;
pub mod splitter;

pub use boundary::LegalBoundaryDetector;
pub use chunkers::HybridLegalChunker;
pub use factory::ParserFactory;
pub use loader::{DocumentLoader, UrlFetcher};
pub use parsers::{HtmlParser, PdfParser, PlainTextParser};
pub use pipeline::{BuildSummary, KnowledgeBaseBuilder, EMBEDDING_BATCH_SIZE};
pub use segmenter::StructuralSegmenter;
pub use splitter::{RecursiveCharacterSplitter, TextSpan, DEFAULT_SEPARATORS};
