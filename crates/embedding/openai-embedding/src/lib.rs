//! # OpenAI Embedding Service
//!
//! Implementation of the `EmbeddingService` trait on top of OpenAI's embeddings API
//! (or any OpenAI-compatible endpoint via a custom base URL).
//!
//! ## Example
//!
//! ```rust,no_run
//! use openai_embedding::OpenAIEmbedding;
//! use embedding::EmbeddingService;
//!
//! async fn example() -> Result<(), anyhow::Error> {
//!     let service = OpenAIEmbedding::new("sk-...".to_string(), "text-embedding-ada-002".to_string());
//!     let embedding = service.embed("Hello world").await?;
//!     println!("Embedding dimension: {}", embedding.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration
//!
//! - **API Key**: OPENAI_API_KEY (falls back to the environment when empty)
//! - **Model**: EMBEDDING_MODEL, default `text-embedding-ada-002`
//! - **Base URL** (optional): OPENAI_BASE_URL
//! - **Proxy** (optional): OPENAI_PROXY
//!
//! ## Failure behavior
//!
//! Request failures and timeouts are returned as errors. Nothing is retried here;
//! the caller decides what to do with an upstream failure.

use anyhow::Context;
use async_openai::{config::OpenAIConfig, types::CreateEmbeddingRequestArgs, Client};
use async_trait::async_trait;
use embedding::{EmbeddingConfig, EmbeddingService};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Timeout for a single embed request (connect + request + response).
const EMBED_TIMEOUT: Duration = Duration::from_secs(30);
/// Timeout for a batch request; longer than single embed due to larger payload.
const EMBED_BATCH_TIMEOUT: Duration = Duration::from_secs(60);
const LOG_PREVIEW_LEN: usize = 200;

/// OpenAI embedding service. Holds the async-openai client and model name.
#[derive(Debug, Clone)]
pub struct OpenAIEmbedding {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAIEmbedding {
    /// Creates a new OpenAI embedding service.
    ///
    /// If `api_key` is empty the OPENAI_API_KEY environment variable is used.
    pub fn new(api_key: String, model: String) -> Self {
        Self::new_with_base_url(api_key, model, None)
    }

    /// Creates a new service with an optional OpenAI-compatible base URL.
    pub fn new_with_base_url(api_key: String, model: String, base_url: Option<&str>) -> Self {
        let client = Client::with_config(Self::openai_config(api_key, base_url));
        Self { client, model }
    }

    /// Builds the service from an [`EmbeddingConfig`], including the optional proxy.
    pub fn from_config(config: &dyn EmbeddingConfig) -> Result<Self, anyhow::Error> {
        let mut client = Client::with_config(Self::openai_config(
            config.api_key().to_string(),
            config.base_url(),
        ));
        if let Some(proxy) = config.proxy() {
            let http_client = reqwest::Client::builder()
                .proxy(reqwest::Proxy::all(proxy).context("Invalid OPENAI_PROXY url")?)
                .build()
                .context("Build HTTP client for embeddings")?;
            client = client.with_http_client(http_client);
        }
        Ok(Self {
            client,
            model: config.model().to_string(),
        })
    }

    /// Returns the embedding model name (for tests and diagnostics).
    pub fn model(&self) -> &str {
        &self.model
    }

    fn openai_config(api_key: String, base_url: Option<&str>) -> OpenAIConfig {
        let api_key = if api_key.is_empty() {
            std::env::var("OPENAI_API_KEY").unwrap_or_default()
        } else {
            api_key
        };
        let mut config = OpenAIConfig::new().with_api_key(api_key);
        if let Some(url) = base_url.filter(|s| !s.is_empty()) {
            config = config.with_api_base(url);
        }
        config
    }
}

/// Truncates text for logs on a char boundary.
fn preview(text: &str) -> String {
    match text.char_indices().nth(LOG_PREVIEW_LEN) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

impl OpenAIEmbedding {
    /// Sends one embeddings request bounded by `timeout` and returns the vectors in
    /// input order. `op` names the call in logs and errors.
    async fn request(
        &self,
        inputs: Vec<&str>,
        timeout: Duration,
        op: &'static str,
    ) -> Result<Vec<Vec<f32>>, anyhow::Error> {
        let expected = inputs.len();
        let request = CreateEmbeddingRequestArgs::default()
            .model(self.model.clone())
            .input(inputs)
            .build()?;

        let embeddings = self.client.embeddings();
        let response = tokio::time::timeout(timeout, embeddings.create(request))
            .await
            .map_err(|_| {
                warn!(op, timeout_secs = timeout.as_secs(), "embeddings request timed out");
                anyhow::anyhow!("{} timed out after {} seconds", op, timeout.as_secs())
            })?
            .map_err(|e| {
                warn!(op, error = %e, "embeddings request failed");
                anyhow::Error::new(e).context(op)
            })?;

        let mut data = response.data;
        data.sort_by_key(|item| item.index);
        if data.len() != expected {
            warn!(op, expected, got = data.len(), "embeddings response count mismatch");
            anyhow::bail!("{}: expected {} embeddings, got {}", op, expected, data.len());
        }
        Ok(data.into_iter().map(|item| item.embedding).collect())
    }
}

#[async_trait]
impl EmbeddingService for OpenAIEmbedding {
    /// Embeds one text.
    ///
    /// # Errors
    ///
    /// Missing or invalid API key, network failure, rate limit or quota errors, an
    /// empty response, or no answer within 30 seconds.
    #[instrument(skip(self, text), fields(model = %self.model, text_len = text.len()))]
    async fn embed(&self, text: &str) -> Result<Vec<f32>, anyhow::Error> {
        debug!(text_preview = %preview(text), "embed request");
        let embedding = self
            .request(vec![text], EMBED_TIMEOUT, "embed")
            .await?
            .pop()
            .ok_or_else(|| anyhow::anyhow!("No embedding in response"))?;
        info!(dimension = embedding.len(), "step: embed done");
        Ok(embedding)
    }

    /// Embeds all texts in one request; the batch timeout is 60 seconds. Empty input
    /// returns an empty result without calling the API.
    #[instrument(skip(self, texts), fields(model = %self.model, batch_size = texts.len()))]
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, anyhow::Error> {
        if texts.is_empty() {
            return Ok(vec![]);
        }
        let inputs: Vec<&str> = texts.iter().map(String::as_str).collect();
        let embeddings = self
            .request(inputs, EMBED_BATCH_TIMEOUT, "embed_batch")
            .await?;
        info!(
            count = embeddings.len(),
            dimension = embeddings.first().map(Vec::len).unwrap_or(0),
            "step: embed_batch done"
        );
        Ok(embeddings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        let long = "é".repeat(LOG_PREVIEW_LEN + 5);
        let p = preview(&long);
        assert!(p.ends_with("..."));
        assert_eq!(p.chars().count(), LOG_PREVIEW_LEN + 3);
        assert_eq!(preview("short"), "short");
    }
}
