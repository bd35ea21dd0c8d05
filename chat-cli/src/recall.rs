//! The `recall` subcommand: query the retrieval index without chatting.

use anyhow::{Context, Result};
use chat_core::{create_embedding_service, create_vector_store, AppConfig};
use memory::RetrievalMemory;
use memory_core::decode_document;
use tracing::info;

/// Documents recalled for one query, plus how many the collection holds.
#[derive(Debug)]
pub struct Recalled {
    pub stored: usize,
    pub documents: Vec<String>,
}

/// Queries the configured collection.
///
/// The API key is only checked when the query will be embedded, i.e. once the
/// collection holds at least top-k turns. Below that every stored turn comes back.
pub async fn recall(config: &AppConfig, query: &str) -> Result<Recalled> {
    let store = create_vector_store(config).await?;
    let stored = store.count().await.context("Failed to count documents")?;
    if stored >= config.top_k {
        config.embedding.validate()?;
    }

    let retrieval = RetrievalMemory::open(store, create_embedding_service(config)?, config.top_k)
        .await
        .context("Failed to open retrieval memory")?;
    let documents = retrieval.query(query).await?;
    info!(stored, recalled = documents.len(), "recall finished");
    Ok(Recalled { stored, documents })
}

/// Prints each recalled turn as its `User:` / `Bot:` lines.
pub fn print_recalled(collection: &str, recalled: &Recalled) {
    if recalled.documents.is_empty() {
        println!("No stored turns in collection {}.", collection);
        return;
    }

    println!(
        "{} turn(s) recalled from {} ({} stored):\n",
        recalled.documents.len(),
        collection,
        recalled.stored
    );
    for (i, document) in recalled.documents.iter().enumerate() {
        println!("[{}]", i + 1);
        match decode_document(document) {
            Ok(turn) => {
                for line in turn.lines() {
                    println!("{}", line);
                }
            }
            Err(e) => println!("(malformed document: {}) {:?}", e, document),
        }
        println!();
    }
}
