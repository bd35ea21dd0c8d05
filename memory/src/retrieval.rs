//! # Retrieval Memory
//!
//! Stores every past turn as a document with an embedding in a [`VectorStore`] and
//! recalls the turns most similar to a new utterance.
//!
//! ## Identifiers
//!
//! Each document gets the next id from a monotonic counter. The counter starts at the
//! store's current count, so a persisted collection keeps growing across restarts
//! without reusing ids. It is an [`AtomicU64`], so one instance can be shared.
//!
//! ## Cold start
//!
//! While the collection holds fewer than `top_k` documents, `query` returns all of
//! them in storage order without embedding the query: ranking that few points is not
//! meaningful.
//!
//! ## External Interactions
//!
//! - **EmbeddingService**: one batch call per `add`, one call per ranked `query`
//! - **VectorStore**: count, peek and semantic search
//!
//! Failures from either are returned as distinct [`MemoryError`] variants and are
//! never retried here.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use embedding::EmbeddingService;
use memory_core::{
    decode_document, encode_document, MemoryError, Result, Turn, VectorRecord, VectorStore,
};
use tracing::{debug, info, instrument};

/// Similarity recall over all stored turns of one collection.
pub struct RetrievalMemory {
    store: Arc<dyn VectorStore>,
    embedding_service: Arc<dyn EmbeddingService>,
    top_k: usize,
    next_id: AtomicU64,
}

fn validate_top_k(top_k: usize) -> Result<()> {
    if top_k == 0 {
        return Err(MemoryError::Configuration(
            "top_k must be at least 1".to_string(),
        ));
    }
    Ok(())
}

impl RetrievalMemory {
    /// Opens retrieval memory over `store`, starting the id counter at its count.
    ///
    /// # Errors
    ///
    /// - [`MemoryError::Configuration`] if `top_k` is 0
    /// - [`MemoryError::Store`] if the store count cannot be read
    #[instrument(skip(store, embedding_service), fields(collection = %store.collection()))]
    pub async fn open(
        store: Arc<dyn VectorStore>,
        embedding_service: Arc<dyn EmbeddingService>,
        top_k: usize,
    ) -> Result<Self> {
        validate_top_k(top_k)?;
        let count = store.count().await.map_err(MemoryError::Store)?;
        info!(count, "step: retrieval memory opened");
        Ok(Self {
            store,
            embedding_service,
            top_k,
            next_id: AtomicU64::new(count as u64),
        })
    }

    /// Embeds and stores `documents`, assigning consecutive ids. Returns the ids.
    ///
    /// Nothing is stored and the counter does not move if embedding fails.
    #[instrument(skip(self, documents), fields(collection = %self.store.collection(), count = documents.len()))]
    pub async fn add(&self, documents: &[String]) -> Result<Vec<u64>> {
        if documents.is_empty() {
            return Ok(vec![]);
        }

        let embeddings = self
            .embedding_service
            .embed_batch(documents)
            .await
            .map_err(MemoryError::Embedding)?;
        if embeddings.len() != documents.len() {
            return Err(MemoryError::Embedding(anyhow::anyhow!(
                "expected {} embeddings, got {}",
                documents.len(),
                embeddings.len()
            )));
        }

        let n = documents.len() as u64;
        let first = self.next_id.fetch_add(n, Ordering::SeqCst);
        let records: Vec<VectorRecord> = documents
            .iter()
            .zip(embeddings)
            .enumerate()
            .map(|(i, (document, embedding))| {
                VectorRecord::new(first + i as u64, document.clone(), embedding)
            })
            .collect();
        let ids: Vec<u64> = records.iter().map(|r| r.id).collect();

        if let Err(e) = self.store.add(records).await {
            // give the ids back unless another add reserved ids after ours
            let _ = self
                .next_id
                .compare_exchange(first + n, first, Ordering::SeqCst, Ordering::SeqCst);
            return Err(MemoryError::Store(e));
        }

        info!(first_id = first, "step: retrieval memory add done");
        Ok(ids)
    }

    /// Encodes a turn in the two-line document format and stores it.
    pub async fn add_turn(&self, turn: &Turn) -> Result<u64> {
        let ids = self.add(&[encode_document(turn)]).await?;
        ids.into_iter()
            .next()
            .ok_or_else(|| MemoryError::Store(anyhow::anyhow!("no id assigned")))
    }

    /// Recalls documents for `query_text` using the configured `top_k`.
    pub async fn query(&self, query_text: &str) -> Result<Vec<String>> {
        self.query_top_k(query_text, self.top_k).await
    }

    /// Recalls up to `top_k` documents, most similar first.
    ///
    /// With fewer than `top_k` documents stored, returns every document in storage
    /// order instead. An empty store yields an empty list.
    #[instrument(skip(self, query_text), fields(collection = %self.store.collection(), query_len = query_text.len()))]
    pub async fn query_top_k(&self, query_text: &str, top_k: usize) -> Result<Vec<String>> {
        validate_top_k(top_k)?;
        let count = self.store.count().await.map_err(MemoryError::Store)?;

        if count < top_k {
            let records = self.store.peek(count).await.map_err(MemoryError::Store)?;
            debug!(count, "retrieval memory cold start, returning all documents");
            return Ok(records.into_iter().map(|r| r.document).collect());
        }

        let query_embedding = self
            .embedding_service
            .embed(query_text)
            .await
            .map_err(MemoryError::Embedding)?;
        let scored = self
            .store
            .semantic_search(&query_embedding, top_k)
            .await
            .map_err(MemoryError::Store)?;

        info!(
            count,
            returned = scored.len(),
            best_score = scored.first().map(|(s, _)| *s).unwrap_or(0.0),
            "step: retrieval memory query done"
        );
        Ok(scored.into_iter().map(|(_, r)| r.document).collect())
    }

    /// Recalls and decodes turns for `query_text`.
    ///
    /// # Errors
    ///
    /// [`MemoryError::Format`] if a recalled document is not a valid two-line turn.
    pub async fn query_turns(&self, query_text: &str) -> Result<Vec<Turn>> {
        self.query(query_text)
            .await?
            .iter()
            .map(|document| decode_document(document).map_err(MemoryError::from))
            .collect()
    }

    /// Number of documents currently in the collection.
    pub async fn count(&self) -> Result<usize> {
        self.store.count().await.map_err(MemoryError::Store)
    }

    /// Id the next added document will receive.
    pub fn next_id(&self) -> u64 {
        self.next_id.load(Ordering::SeqCst)
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    pub fn collection(&self) -> &str {
        self.store.collection()
    }
}

impl std::fmt::Debug for RetrievalMemory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetrievalMemory")
            .field("collection", &self.store.collection())
            .field("top_k", &self.top_k)
            .field("next_id", &self.next_id())
            .finish()
    }
}
