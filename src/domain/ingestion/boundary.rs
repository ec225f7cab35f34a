//! Structural boundary detection

use std::fmt::Debug;

/// Locates the start offsets of structural units in a document
///
/// Implementations return byte offsets into `text`, ascending, each on a
/// `char` boundary. Duplicates are allowed; the segmenter collapses them.
pub trait BoundaryDetector: Send + Sync + Debug {
    fn find_boundaries(&self, text: &str) -> Vec<usize>;

    /// Get the grammar name
    fn name(&self) -> &'static str;
}
