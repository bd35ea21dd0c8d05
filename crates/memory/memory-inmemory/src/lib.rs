//! # In-Memory Vector Store
//!
//! This crate provides an in-memory implementation of the `VectorStore` trait.
//!
//! ## InMemoryVectorStore
//!
//! Process-lifetime index for tests, development and sessions that do not need
//! recall across restarts.
//!
//! **Limitations**:
//! - Data is lost on restart
//! - Semantic search is a linear scan over all records
//!
//! ## Example
//!
//! ```rust
//! use memory_core::{VectorRecord, VectorStore};
//! use memory_inmemory::InMemoryVectorStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), anyhow::Error> {
//!     let store = InMemoryVectorStore::new("memory1");
//!     store
//!         .add(vec![VectorRecord::new(0, "User: hi\nBot: hello", vec![1.0, 0.0])])
//!         .await?;
//!     assert_eq!(store.count().await?, 1);
//!     Ok(())
//! }
//! ```
//!
//! ## Thread Safety
//!
//! Records live behind `Arc<RwLock<>>`; clones share the same index.

use async_trait::async_trait;
use memory_core::{cosine_similarity, top_k_by_score, VectorRecord, VectorStore};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// In-memory vector store. Records are kept ordered by id, which is storage order.
#[derive(Debug, Clone)]
pub struct InMemoryVectorStore {
    collection: String,
    records: Arc<RwLock<BTreeMap<u64, VectorRecord>>>,
}

impl InMemoryVectorStore {
    /// Creates a new empty store for the named collection.
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            records: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    /// Returns the number of records in the store.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Returns true if the store is empty.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for InMemoryVectorStore {
    fn default() -> Self {
        Self::new("default")
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    fn collection(&self) -> &str {
        &self.collection
    }

    /// Inserts all records or none: duplicate ids are checked before anything is written.
    async fn add(&self, records: Vec<VectorRecord>) -> Result<(), anyhow::Error> {
        let mut stored = self.records.write().await;
        for (i, record) in records.iter().enumerate() {
            if stored.contains_key(&record.id) || records[..i].iter().any(|r| r.id == record.id) {
                anyhow::bail!(
                    "duplicate id {} in collection {}",
                    record.id,
                    self.collection
                );
            }
        }
        let added = records.len();
        for record in records {
            stored.insert(record.id, record);
        }
        debug!(collection = %self.collection, added, total = stored.len(), "in-memory store add");
        Ok(())
    }

    async fn count(&self) -> Result<usize, anyhow::Error> {
        Ok(self.len().await)
    }

    async fn peek(&self, limit: usize) -> Result<Vec<VectorRecord>, anyhow::Error> {
        let stored = self.records.read().await;
        Ok(stored.values().take(limit).cloned().collect())
    }

    /// Linear scan: scores every record by cosine similarity and keeps the top `limit`.
    async fn semantic_search(
        &self,
        query_embedding: &[f32],
        limit: usize,
    ) -> Result<Vec<(f32, VectorRecord)>, anyhow::Error> {
        let stored = self.records.read().await;
        let scored: Vec<(f32, VectorRecord)> = stored
            .values()
            .map(|record| {
                (
                    cosine_similarity(query_embedding, &record.embedding),
                    record.clone(),
                )
            })
            .collect();
        Ok(top_k_by_score(scored, limit))
    }
}
