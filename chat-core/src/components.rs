//! Component factory: builds stores, memory and sessions from [`AppConfig`].

use std::sync::Arc;

use anyhow::{Context, Result};
use embedding::EmbeddingService;
use llm_client::{LlmClient, OpenAILlmClient};
use memory::{ChatMemory, MemoryMode, RetrievalMemory};
use memory_core::VectorStore;
use memory_inmemory::InMemoryVectorStore;
use memory_sqlite::SQLiteVectorStore;
use openai_embedding::OpenAIEmbedding;
use prompt::{PromptAssembler, INPUT_VARIABLE};
use tracing::{info, instrument};

use crate::config::{AppConfig, StoreKind};
use crate::session::ChatSession;

/// Opens the vector store for the configured collection.
#[instrument(skip(config), fields(store = %config.store, collection = %config.collection))]
pub async fn create_vector_store(config: &AppConfig) -> Result<Arc<dyn VectorStore>> {
    let store: Arc<dyn VectorStore> = match config.store {
        StoreKind::Sqlite => {
            info!(db_path = %config.db_path.display(), "Using SQLite vector store");
            Arc::new(
                SQLiteVectorStore::open(&config.db_path, config.collection.clone())
                    .await
                    .with_context(|| {
                        format!("Failed to open SQLite store at {}", config.db_path.display())
                    })?,
            )
        }
        StoreKind::InMemory => {
            info!("Using in-memory vector store");
            Arc::new(InMemoryVectorStore::new(config.collection.clone()))
        }
    };
    Ok(store)
}

/// OpenAI embedding client from the embedding section of the config.
pub fn create_embedding_service(config: &AppConfig) -> Result<Arc<dyn EmbeddingService>> {
    let service = OpenAIEmbedding::from_config(&config.embedding)
        .context("Failed to build embedding client")?;
    Ok(Arc::new(service))
}

/// Opens retrieval memory over the configured store.
pub async fn open_retrieval_memory(
    config: &AppConfig,
    embedding_service: Arc<dyn EmbeddingService>,
) -> Result<RetrievalMemory> {
    let store = create_vector_store(config).await?;
    let retrieval = RetrievalMemory::open(store, embedding_service, config.top_k).await?;
    Ok(retrieval)
}

/// Builds the chat session: system prompt, memory per mode and the OpenAI client.
#[instrument(
    skip(config),
    fields(mode = %config.memory_mode, style = %config.prompt_style, model = %config.llm.llm_model)
)]
pub async fn build_session(config: &AppConfig) -> Result<ChatSession> {
    config.validate()?;

    let system = Arc::new(config.load_system_prompt()?);
    let assembler = PromptAssembler::new(system, [INPUT_VARIABLE])?;

    let memory = match config.memory_mode {
        MemoryMode::Buffer => ChatMemory::buffer(),
        MemoryMode::Retrieval => {
            let embedding_service = create_embedding_service(config)?;
            ChatMemory::retrieval(open_retrieval_memory(config, embedding_service).await?)
        }
    };

    let llm: Arc<dyn LlmClient> = Arc::new(
        OpenAILlmClient::from_config(&config.llm).context("Failed to build LLM client")?,
    );

    let session = ChatSession::new(memory, assembler, llm).with_prompt_style(config.prompt_style);
    info!(session_id = %session.id(), "step: chat session ready");
    Ok(session)
}
