//! Compliance analysis service - retrieval-augmented GDPR gap analysis

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::compliance::{CompliancePrompt, ComplianceReport, ANALYSIS_QUESTION_PREFIX};
use crate::domain::embedding::{EmbeddingProvider, EmbeddingRequest};
use crate::domain::knowledge_base::{SearchResult, VectorIndex};
use crate::domain::llm::{LlmProvider, LlmRequest};
use crate::domain::DomainError;
use crate::infrastructure::llm::DEFAULT_LLM_MODEL;

pub const DEFAULT_TOP_K: usize = 3;
pub const DEFAULT_MAX_DOCUMENT_CHARS: usize = 2000;

/// Tunables for a single analysis
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisSettings {
    /// Chat model asked for the analysis
    pub model: String,
    pub temperature: f32,
    /// Number of reference chunks retrieved as context
    pub top_k: usize,
    /// Characters of the user document included in the question
    pub max_document_chars: usize,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_LLM_MODEL.to_string(),
            temperature: 0.0,
            top_k: DEFAULT_TOP_K,
            max_document_chars: DEFAULT_MAX_DOCUMENT_CHARS,
        }
    }
}

/// Answers "where does this policy fall short of the GDPR?" from an indexed corpus
#[derive(Debug, Clone)]
pub struct ComplianceAnalyzer {
    embedder: Arc<dyn EmbeddingProvider>,
    embedding_model: String,
    index: Arc<dyn VectorIndex>,
    llm: Arc<dyn LlmProvider>,
    prompt: CompliancePrompt,
    settings: AnalysisSettings,
}

impl ComplianceAnalyzer {
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        index: Arc<dyn VectorIndex>,
        llm: Arc<dyn LlmProvider>,
    ) -> Self {
        let embedding_model = embedder.default_model().to_string();

        Self {
            embedder,
            embedding_model,
            index,
            llm,
            prompt: CompliancePrompt::default(),
            settings: AnalysisSettings::default(),
        }
    }

    /// Embed queries with `model`; must match the model used to build the index
    pub fn with_embedding_model(mut self, model: impl Into<String>) -> Self {
        self.embedding_model = model.into();
        self
    }

    pub fn with_prompt(mut self, prompt: CompliancePrompt) -> Self {
        self.prompt = prompt;
        self
    }

    pub fn with_settings(mut self, settings: AnalysisSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &AnalysisSettings {
        &self.settings
    }

    /// Build the question asked about `user_text`, truncated by characters
    pub fn question_for(&self, user_text: &str) -> String {
        let excerpt: String = user_text.chars().take(self.settings.max_document_chars).collect();
        format!("{}{}", ANALYSIS_QUESTION_PREFIX, excerpt)
    }

    /// Reference chunks most similar to `query`, best first
    pub async fn retrieve(&self, query: &str) -> Result<Vec<SearchResult>, DomainError> {
        let vector = self
            .embedder
            .embed(EmbeddingRequest::single(&self.embedding_model, query))
            .await?
            .into_vectors()
            .into_iter()
            .next()
            .ok_or_else(|| {
                DomainError::provider(self.embedder.provider_name(), "No embedding returned for query")
            })?;

        self.index.search(&vector, self.settings.top_k).await
    }

    /// Analyze a privacy policy for GDPR compliance gaps
    pub async fn analyze(&self, user_text: &str) -> Result<ComplianceReport, DomainError> {
        if user_text.trim().is_empty() {
            return Err(DomainError::validation("Document to analyze is empty"));
        }

        let question = self.question_for(user_text);
        let sources = self.retrieve(&question).await?;

        debug!(
            retrieved = sources.len(),
            headers = ?sources.iter().map(SearchResult::section_header).collect::<Vec<_>>(),
            "Retrieved GDPR context"
        );

        let context = sources
            .iter()
            .map(SearchResult::content)
            .collect::<Vec<_>>()
            .join("\n\n");

        let prompt = self.prompt.render(&context, &question)?;

        let request = LlmRequest::builder()
            .user(prompt)
            .temperature(self.settings.temperature)
            .build();

        let response = self.llm.chat(&self.settings.model, request).await?;

        info!(
            provider = self.llm.provider_name(),
            model = %self.settings.model,
            sources = sources.len(),
            "Compliance analysis complete"
        );

        Ok(ComplianceReport::new(
            response.content(),
            sources,
            self.settings.model.clone(),
        ))
    }
}
