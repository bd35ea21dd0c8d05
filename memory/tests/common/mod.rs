//! Shared test utilities for memory integration tests.
//!
//! Provides deterministic embedding services so retrieval tests never call an
//! external API.

use async_trait::async_trait;
use embedding::EmbeddingService;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Embedding service with a fixed lookup table. Texts not in the table get a
/// 26-dimension letter-frequency vector. Counts every call.
#[allow(dead_code)]
#[derive(Default)]
pub struct MockEmbeddingService {
    table: HashMap<String, Vec<f32>>,
    calls: AtomicUsize,
}

#[allow(dead_code)]
impl MockEmbeddingService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, text: &str, embedding: Vec<f32>) -> Self {
        self.table.insert(text.to_string(), embedding);
        self
    }

    /// Number of embed / embed_batch calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn vector_for(&self, text: &str) -> Vec<f32> {
        if let Some(v) = self.table.get(text) {
            return v.clone();
        }
        let mut v = vec![0.0; 26];
        for c in text.chars().filter(|c| c.is_ascii_alphabetic()) {
            v[(c.to_ascii_lowercase() as u8 - b'a') as usize] += 1.0;
        }
        v
    }
}

#[async_trait]
impl EmbeddingService for MockEmbeddingService {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, anyhow::Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.vector_for(text))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, anyhow::Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(texts.iter().map(|t| self.vector_for(t)).collect())
    }
}

/// Embedding service that always fails, like an upstream API outage.
#[allow(dead_code)]
pub struct FailingEmbeddingService;

#[async_trait]
impl EmbeddingService for FailingEmbeddingService {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>, anyhow::Error> {
        Err(anyhow::anyhow!("upstream embedding API unavailable"))
    }

    async fn embed_batch(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>, anyhow::Error> {
        Err(anyhow::anyhow!("upstream embedding API unavailable"))
    }
}
