//! Embedding configuration: trait and env-based implementation.

use anyhow::Result;
use std::env;

/// Default embedding model; the index must be queried with the same model it was built with.
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-ada-002";

/// Embedding service configuration interface.
pub trait EmbeddingConfig: Send + Sync {
    /// API key for the OpenAI-compatible embedding endpoint (OPENAI_API_KEY).
    fn api_key(&self) -> &str;
    /// Optional base URL for OpenAI-compatible endpoints (OPENAI_BASE_URL).
    fn base_url(&self) -> Option<&str>;
    /// Optional HTTP proxy for embedding requests (OPENAI_PROXY).
    fn proxy(&self) -> Option<&str>;
    /// Embedding model name (EMBEDDING_MODEL).
    fn model(&self) -> &str;
}

/// Embedding config loaded from environment variables.
#[derive(Debug, Clone)]
pub struct EnvEmbeddingConfig {
    pub openai_api_key: String,
    pub openai_base_url: Option<String>,
    pub openai_proxy: Option<String>,
    pub embedding_model: String,
}

impl EmbeddingConfig for EnvEmbeddingConfig {
    fn api_key(&self) -> &str {
        &self.openai_api_key
    }
    fn base_url(&self) -> Option<&str> {
        self.openai_base_url.as_deref().filter(|s| !s.is_empty())
    }
    fn proxy(&self) -> Option<&str> {
        self.openai_proxy.as_deref().filter(|s| !s.is_empty())
    }
    fn model(&self) -> &str {
        &self.embedding_model
    }
}

impl EnvEmbeddingConfig {
    /// Load from environment variables.
    pub fn from_env() -> Result<Self> {
        let openai_api_key = env::var("OPENAI_API_KEY").unwrap_or_default();
        let openai_base_url = env::var("OPENAI_BASE_URL")
            .ok()
            .filter(|s| !s.trim().is_empty());
        let openai_proxy = env::var("OPENAI_PROXY")
            .or_else(|_| env::var("openai_proxy"))
            .ok()
            .filter(|s| !s.trim().is_empty());
        let embedding_model = env::var("EMBEDDING_MODEL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.to_string());
        Ok(Self {
            openai_api_key,
            openai_base_url,
            openai_proxy,
            embedding_model,
        })
    }

    /// Validate config: an API key is required before any embedding call.
    pub fn validate(&self) -> Result<()> {
        if self.openai_api_key.trim().is_empty() {
            anyhow::bail!("OPENAI_API_KEY is required for embeddings. Set it in .env or environment.");
        }
        Ok(())
    }
}
