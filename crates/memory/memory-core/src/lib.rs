//! # memory-core
//!
//! Core types and traits for the memory layer: [`Turn`], [`StoredSession`],
//! [`VectorRecord`], the [`VectorStore`] trait, the two-line document codec and the
//! [`MemoryError`] taxonomy. Used by `memory`, `memory-inmemory` and `memory-sqlite`.

pub mod codec;
pub mod error;
pub mod similarity;
pub mod store;
pub mod types;

pub use codec::{decode_document, encode_document};
pub use error::{FormatError, MemoryError, Result};
pub use similarity::{cosine_similarity, top_k_by_score};
pub use store::VectorStore;
pub use types::{
    format_line, render_lines, StoredSession, Turn, VectorRecord, BOT_LABEL, USER_LABEL,
};
