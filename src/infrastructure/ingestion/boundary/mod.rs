//! Boundary detector implementations

mod legal;

pub use legal::LegalBoundaryDetector;
