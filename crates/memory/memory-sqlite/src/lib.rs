//! # SQLite Vector Store
//!
//! This crate provides an SQLite-based implementation of the `VectorStore` trait.
//!
//! ## SQLiteVectorStore
//!
//! Persistent storage for retrieval memory documents and their embeddings. Several
//! named collections can share one database file.
//!
//! **Advantages**:
//! - Persistent storage (data survives restarts, so id counters resume from the count)
//! - No external database required
//!
//! **Limitations**:
//! - Semantic search loads every embedding of the collection and scans linearly
//!
//! ## Example
//!
//! ```rust,no_run
//! use memory_core::{VectorRecord, VectorStore};
//! use memory_sqlite::SQLiteVectorStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), anyhow::Error> {
//!     let store = SQLiteVectorStore::open(".memorydb/memory.db", "memory1").await?;
//!     let next_id = store.count().await? as u64;
//!     store
//!         .add(vec![VectorRecord::new(next_id, "User: hi\nBot: hello", vec![1.0, 0.0])])
//!         .await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Database Schema
//!
//! ```sql
//! CREATE TABLE memory_documents (
//!     collection TEXT NOT NULL,
//!     id INTEGER NOT NULL,
//!     document TEXT NOT NULL,
//!     embedding BLOB NOT NULL,
//!     created_at TEXT NOT NULL,
//!     PRIMARY KEY (collection, id)
//! );
//! ```

use async_trait::async_trait;
use chrono::Utc;
use memory_core::{cosine_similarity, top_k_by_score, VectorRecord, VectorStore};
use sqlx::{sqlite::SqliteConnectOptions, Row, SqlitePool};
use std::path::Path;
use tracing::{debug, info, instrument};

/// SQLite-based vector store bound to one collection.
#[derive(Clone)]
pub struct SQLiteVectorStore {
    pool: SqlitePool,
    collection: String,
}

impl SQLiteVectorStore {
    /// Opens (creating if missing) the database file and binds the store to `collection`.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created, the connection
    /// fails or schema initialization fails.
    pub async fn open(
        database_path: impl AsRef<Path>,
        collection: impl Into<String>,
    ) -> Result<Self, anyhow::Error> {
        let database_path = database_path.as_ref();
        if let Some(parent) = database_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let options = SqliteConnectOptions::new()
            .create_if_missing(true)
            .filename(database_path);

        let pool = SqlitePool::connect_with(options).await?;

        let store = Self {
            pool,
            collection: collection.into(),
        };
        store.init_schema().await?;

        info!(
            path = %database_path.display(),
            collection = %store.collection,
            "step: sqlite vector store opened"
        );
        Ok(store)
    }

    /// Creates the documents table; idempotent.
    async fn init_schema(&self) -> Result<(), anyhow::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS memory_documents (
                collection TEXT NOT NULL,
                id INTEGER NOT NULL,
                document TEXT NOT NULL,
                embedding BLOB NOT NULL,
                created_at TEXT NOT NULL,
                PRIMARY KEY (collection, id)
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Converts a database row to a VectorRecord.
    ///
    /// Embeddings are stored little-endian, 4 bytes per float.
    fn row_to_record(row: &sqlx::sqlite::SqliteRow) -> Result<VectorRecord, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let document: String = row.try_get("document")?;
        let blob: Vec<u8> = row.try_get("embedding")?;

        if blob.len() % 4 != 0 {
            return Err(sqlx::Error::Decode(Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "embedding blob length is not a multiple of 4",
            ))));
        }

        let embedding = blob
            .chunks_exact(4)
            .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect();

        Ok(VectorRecord {
            id: id as u64,
            document,
            embedding,
        })
    }

    fn embedding_to_blob(embedding: &[f32]) -> Vec<u8> {
        embedding.iter().flat_map(|f| f.to_le_bytes()).collect()
    }
}

#[async_trait]
impl VectorStore for SQLiteVectorStore {
    fn collection(&self) -> &str {
        &self.collection
    }

    /// Inserts all records in one transaction; a duplicate id rolls back the batch.
    #[instrument(skip(self, records), fields(collection = %self.collection, count = records.len()))]
    async fn add(&self, records: Vec<VectorRecord>) -> Result<(), anyhow::Error> {
        let created_at = Utc::now().to_rfc3339();
        let mut tx = self.pool.begin().await?;

        for record in &records {
            sqlx::query(
                r#"
                INSERT INTO memory_documents (collection, id, document, embedding, created_at)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )
            .bind(&self.collection)
            .bind(record.id as i64)
            .bind(&record.document)
            .bind(Self::embedding_to_blob(&record.embedding))
            .bind(&created_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        debug!("sqlite store add committed");
        Ok(())
    }

    async fn count(&self) -> Result<usize, anyhow::Error> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM memory_documents WHERE collection = ?1")
                .bind(&self.collection)
                .fetch_one(&self.pool)
                .await?;
        Ok(count as usize)
    }

    async fn peek(&self, limit: usize) -> Result<Vec<VectorRecord>, anyhow::Error> {
        let rows = sqlx::query(
            "SELECT id, document, embedding FROM memory_documents WHERE collection = ?1 ORDER BY id ASC LIMIT ?2",
        )
        .bind(&self.collection)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| Self::row_to_record(row).map_err(Into::into))
            .collect()
    }

    /// Loads every embedding of the collection and ranks by cosine similarity.
    #[instrument(skip(self, query_embedding), fields(collection = %self.collection, dimension = query_embedding.len()))]
    async fn semantic_search(
        &self,
        query_embedding: &[f32],
        limit: usize,
    ) -> Result<Vec<(f32, VectorRecord)>, anyhow::Error> {
        let rows = sqlx::query(
            "SELECT id, document, embedding FROM memory_documents WHERE collection = ?1 ORDER BY id ASC",
        )
        .bind(&self.collection)
        .fetch_all(&self.pool)
        .await?;

        let mut scored = Vec::with_capacity(rows.len());
        for row in &rows {
            let record = Self::row_to_record(row)?;
            scored.push((cosine_similarity(query_embedding, &record.embedding), record));
        }

        let results = top_k_by_score(scored, limit);
        debug!(scanned = rows.len(), returned = results.len(), "sqlite semantic_search done");
        Ok(results)
    }
}
