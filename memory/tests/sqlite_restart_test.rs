//! Tests for RetrievalMemory over the SQLite vector store across restarts.
//!
//! Each test writes turns, drops every handle, then reopens the same database file
//! and checks that ids continue from the persisted count and turns decode losslessly.

mod common;

use std::path::Path;
use std::sync::Arc;

use common::MockEmbeddingService;
use memory::{RetrievalMemory, Turn};
use memory_sqlite::SQLiteVectorStore;

async fn open(path: &Path, collection: &str, top_k: usize) -> RetrievalMemory {
    let store = SQLiteVectorStore::open(path, collection).await.unwrap();
    RetrievalMemory::open(Arc::new(store), Arc::new(MockEmbeddingService::new()), top_k)
        .await
        .unwrap()
}

/// **Test: Reopening the database continues ids after the persisted count.**
#[tokio::test]
async fn reopen_continues_ids_after_persisted_count() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("memory.db");

    {
        let memory = open(&path, "memory1", 5).await;
        assert_eq!(memory.next_id(), 0);
        assert_eq!(
            memory.add_turn(&Turn::new("my name is Ada", "hi Ada")).await.unwrap(),
            0
        );
        assert_eq!(
            memory
                .add_turn(&Turn::new("two\nlines", "a \\ backslash\nand more"))
                .await
                .unwrap(),
            1
        );
    }

    let memory = open(&path, "memory1", 5).await;
    assert_eq!(memory.count().await.unwrap(), 2);
    assert_eq!(memory.next_id(), 2);

    let id = memory.add_turn(&Turn::new("again", "ok")).await.unwrap();
    assert_eq!(id, 2);
    assert_eq!(memory.count().await.unwrap(), 3);
    assert_eq!(memory.next_id(), 3);

    // below top_k: every stored turn comes back in id order, decoded as written
    let turns = memory.query_turns("anything").await.unwrap();
    assert_eq!(
        turns,
        vec![
            Turn::new("my name is Ada", "hi Ada"),
            Turn::new("two\nlines", "a \\ backslash\nand more"),
            Turn::new("again", "ok"),
        ]
    );
}

/// **Test: After a restart with a full index, recall embeds the query and returns top_k turns.**
#[tokio::test]
async fn reopened_index_answers_similarity_queries() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("memory.db");

    {
        let memory = open(&path, "memory1", 1).await;
        memory.add_turn(&Turn::new("a", "b")).await.unwrap();
        memory.add_turn(&Turn::new("c", "d")).await.unwrap();
    }

    let memory = open(&path, "memory1", 1).await;
    assert_eq!(memory.next_id(), 2);
    let turns = memory.query_turns("c").await.unwrap();
    assert_eq!(turns.len(), 1);
}

/// **Test: Each collection in the same file keeps its own id sequence.**
#[tokio::test]
async fn collections_in_one_file_count_separately() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("memory.db");

    {
        let memory = open(&path, "memory1", 3).await;
        memory.add_turn(&Turn::new("hi", "hello")).await.unwrap();
    }

    let other = open(&path, "memory2", 3).await;
    assert_eq!(other.next_id(), 0);
    assert_eq!(other.add_turn(&Turn::new("x", "y")).await.unwrap(), 0);

    let first = open(&path, "memory1", 3).await;
    assert_eq!(first.next_id(), 1);
    assert_eq!(first.count().await.unwrap(), 1);
}
