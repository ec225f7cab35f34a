//! Embedding provider trait definition

use async_trait::async_trait;
use std::fmt::Debug;

use super::{EmbeddingRequest, EmbeddingResponse};
use crate::domain::DomainError;

/// Turns texts into fixed-length vectors
#[async_trait]
pub trait EmbeddingProvider: Send + Sync + Debug {
    /// Generate one embedding per input, in input order
    async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse, DomainError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;

    /// Get the default model for this provider
    fn default_model(&self) -> &'static str;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::domain::embedding::Embedding;

    /// Bag-of-words hashing embedder: texts sharing words get similar vectors
    #[derive(Debug)]
    pub struct MockEmbeddingProvider {
        dimensions: usize,
        error: Option<String>,
        fail_after: Option<usize>,
        calls: AtomicUsize,
    }

    impl MockEmbeddingProvider {
        pub fn new(dimensions: usize) -> Self {
            Self {
                dimensions,
                error: None,
                fail_after: None,
                calls: AtomicUsize::new(0),
            }
        }

        pub fn with_error(mut self, error: impl Into<String>) -> Self {
            self.error = Some(error.into());
            self
        }

        /// Succeed for the first `calls` requests, then fail with `error`
        pub fn with_error_after(mut self, calls: usize, error: impl Into<String>) -> Self {
            self.fail_after = Some(calls);
            self.with_error(error)
        }

        pub fn vector_for(&self, text: &str) -> Vec<f32> {
            let mut vector = vec![0.0; self.dimensions];

            for word in text
                .split(|c: char| !c.is_alphanumeric())
                .filter(|w| !w.is_empty())
            {
                let hash = word
                    .to_lowercase()
                    .bytes()
                    .fold(17u64, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64));
                vector[(hash % self.dimensions as u64) as usize] += 1.0;
            }

            vector
        }
    }

    #[async_trait]
    impl EmbeddingProvider for MockEmbeddingProvider {
        async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse, DomainError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);

            if let Some(ref error) = self.error {
                if self.fail_after.is_none_or(|after| call >= after) {
                    return Err(DomainError::provider("mock", error));
                }
            }

            let embeddings = request
                .inputs()
                .iter()
                .enumerate()
                .map(|(idx, text)| Embedding::new(idx, self.vector_for(text)))
                .collect();

            Ok(EmbeddingResponse::new(request.model(), embeddings))
        }

        fn provider_name(&self) -> &'static str {
            "mock"
        }

        fn default_model(&self) -> &'static str {
            "mock-embedding"
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::domain::embedding::cosine_similarity;

        #[tokio::test]
        async fn test_mock_provider_batch_input() {
            let provider = MockEmbeddingProvider::new(64);
            let request = EmbeddingRequest::batch("mock-embedding", vec!["Hello".into(), "World".into()]);

            let response = provider.embed(request).await.unwrap();

            assert_eq!(response.embeddings().len(), 2);
            assert_eq!(response.embeddings()[1].dimensions(), 64);
        }

        #[tokio::test]
        async fn test_mock_provider_error() {
            let provider = MockEmbeddingProvider::new(8).with_error("API error");
            let request = EmbeddingRequest::single("mock-embedding", "Hello");

            assert!(provider.embed(request).await.is_err());
        }

        #[test]
        fn test_shared_words_are_similar() {
            let provider = MockEmbeddingProvider::new(256);
            let consent = provider.vector_for("consent of the data subject");
            let query = provider.vector_for("data subject consent");
            let unrelated = provider.vector_for("territorial scope");

            assert!(cosine_similarity(&consent, &query) > cosine_similarity(&consent, &unrelated));
        }
    }
}
