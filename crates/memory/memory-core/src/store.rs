//! # Vector Store
//!
//! The `VectorStore` trait is the narrow interface to the similarity index used by
//! retrieval memory. Persistence location and on-disk format belong to the
//! implementation.
//!
//! ## Implementations
//!
//! - **InMemoryVectorStore** (`memory-inmemory`): process-lifetime index
//! - **SQLiteVectorStore** (`memory-sqlite`): persisted index, survives restarts
//!
//! ## Ordering
//!
//! `peek` returns records in storage order (ascending id). `semantic_search` returns
//! `(score, record)` pairs sorted from most to least similar.

use async_trait::async_trait;

use crate::types::VectorRecord;

/// Similarity index over documents in one named collection.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Name of the collection this store reads and writes.
    fn collection(&self) -> &str;

    /// Inserts records. Fails if any id already exists in the collection.
    async fn add(&self, records: Vec<VectorRecord>) -> Result<(), anyhow::Error>;

    /// Number of records currently in the collection.
    async fn count(&self) -> Result<usize, anyhow::Error>;

    /// Returns up to `limit` records in storage order, without ranking.
    async fn peek(&self, limit: usize) -> Result<Vec<VectorRecord>, anyhow::Error>;

    /// Returns the `limit` records closest to `query_embedding`, most similar first.
    async fn semantic_search(
        &self,
        query_embedding: &[f32],
        limit: usize,
    ) -> Result<Vec<(f32, VectorRecord)>, anyhow::Error>;
}
