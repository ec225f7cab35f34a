//! Infrastructure services

mod compliance_service;

pub use compliance_service::{
    AnalysisSettings, ComplianceAnalyzer, DEFAULT_MAX_DOCUMENT_CHARS, DEFAULT_TOP_K,
};
