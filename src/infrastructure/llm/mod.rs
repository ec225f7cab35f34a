//! LLM provider implementations

mod http_client;
mod openai;

pub use http_client::{HttpClient, HttpClientTrait};
pub use openai::{OpenAiProvider, DEFAULT_LLM_BASE_URL, DEFAULT_LLM_MODEL};

#[cfg(test)]
pub use http_client::mock::MockHttpClient;
