//! Embedding request types

use serde::{Deserialize, Serialize};

/// Request to embed a batch of texts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingRequest {
    /// Model to use for embedding
    model: String,
    /// Texts to embed, answered in the same order
    input: Vec<String>,
}

impl EmbeddingRequest {
    /// Create a request for multiple texts
    pub fn batch(model: impl Into<String>, texts: Vec<String>) -> Self {
        Self {
            model: model.into(),
            input: texts,
        }
    }

    /// Create a request for a single text
    pub fn single(model: impl Into<String>, text: impl Into<String>) -> Self {
        Self::batch(model, vec![text.into()])
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn inputs(&self) -> &[String] {
        &self.input
    }

    pub fn len(&self) -> usize {
        self.input.len()
    }

    pub fn is_empty(&self) -> bool {
        self.input.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_request() {
        let request = EmbeddingRequest::single("text-embedding-3-small", "ARTICLE 7");

        assert_eq!(request.model(), "text-embedding-3-small");
        assert_eq!(request.inputs(), &["ARTICLE 7".to_string()]);
        assert_eq!(request.len(), 1);
    }

    #[test]
    fn test_batch_serializes_as_openai_input() {
        let request = EmbeddingRequest::batch("m", vec!["a".into(), "b".into()]);
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json, serde_json::json!({"model": "m", "input": ["a", "b"]}));
    }
}
