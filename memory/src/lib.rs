//! # Memory Crate
//!
//! Conversational memory for the chat front-end.
//!
//! ## Components
//!
//! - [`ConversationMemory`] - linear transcript, rendered as role-tagged lines
//! - [`RetrievalMemory`] - embedding recall of past turns from a vector store
//! - [`ChatMemory`] - selects one of the two as the prompt's history source
//!
//! ## Quick Start
//!
//! ```rust
//! use memory::ConversationMemory;
//!
//! let mut memory = ConversationMemory::new();
//! memory.push("hi", "hello");
//! assert_eq!(memory.render(), "User: hi\nBot: hello");
//! ```
//!
//! ## External Interactions
//!
//! - **Embedding services**: `embedding::EmbeddingService` (e.g. `openai-embedding`)
//! - **Vector stores**: `memory_core::VectorStore` (`memory-inmemory`, `memory-sqlite`)

pub mod chat_memory;
pub mod conversation;
pub mod retrieval;

pub use chat_memory::{ChatMemory, MemoryMode};
pub use conversation::ConversationMemory;
pub use memory_core::{MemoryError, StoredSession, Turn};
pub use retrieval::RetrievalMemory;
