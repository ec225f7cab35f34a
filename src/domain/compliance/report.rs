//! Result of a compliance analysis

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::knowledge_base::SearchResult;

/// The model's analysis together with the passages it was grounded on
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceReport {
    /// Generated analysis text
    pub analysis: String,
    /// Retrieved reference chunks, best match first
    pub sources: Vec<SearchResult>,
    /// Model that produced the analysis
    pub model: String,
    pub generated_at: DateTime<Utc>,
}

impl ComplianceReport {
    pub fn new(analysis: impl Into<String>, sources: Vec<SearchResult>, model: impl Into<String>) -> Self {
        Self {
            analysis: analysis.into(),
            sources,
            model: model.into(),
            generated_at: Utc::now(),
        }
    }

    /// Section headers of the retrieved sources, in rank order
    pub fn source_headers(&self) -> Vec<&str> {
        self.sources.iter().map(SearchResult::section_header).collect()
    }
}
