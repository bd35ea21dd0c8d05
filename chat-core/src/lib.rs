//! # chat-core
//!
//! Session pipeline for the memory chat bot: [`ChatSession`] runs one turn through
//! memory, prompt assembly and the LLM. Also holds [`AppConfig`], the component
//! factory, [`ChatError`] and tracing initialization. UI-agnostic; used by chat-cli.

pub mod components;
pub mod config;
pub mod error;
pub mod logger;
pub mod session;

pub use components::{
    build_session, create_embedding_service, create_vector_store, open_retrieval_memory,
};
pub use config::{AppConfig, PromptStyle, StoreKind};
pub use error::{ChatError, ErrorKind, Result};
pub use logger::init_tracing;
pub use session::ChatSession;
