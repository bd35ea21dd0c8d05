//! # Chat Memory
//!
//! Chooses where the prompt's history comes from. The two sources are mutually
//! exclusive per configuration:
//!
//! - [`MemoryMode::Buffer`]: the full linear transcript
//! - [`MemoryMode::Retrieval`]: the top-K past turns most similar to the new input
//!
//! The linear transcript is kept in both modes because the host displays it and
//! archives it on "new chat".

use std::fmt;
use std::str::FromStr;

use memory_core::{MemoryError, Result, StoredSession, Turn};
use tracing::{debug, instrument};

use crate::conversation::ConversationMemory;
use crate::retrieval::RetrievalMemory;

/// Which memory supplies the prompt history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MemoryMode {
    /// Full linear conversation buffer.
    #[default]
    Buffer,
    /// Similarity recall over every stored turn.
    Retrieval,
}

impl fmt::Display for MemoryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemoryMode::Buffer => f.write_str("buffer"),
            MemoryMode::Retrieval => f.write_str("retrieval"),
        }
    }
}

impl FromStr for MemoryMode {
    type Err = MemoryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "buffer" | "linear" => Ok(MemoryMode::Buffer),
            "retrieval" | "embedding" => Ok(MemoryMode::Retrieval),
            other => Err(MemoryError::Configuration(format!(
                "unknown memory mode {:?} (expected \"buffer\" or \"retrieval\")",
                other
            ))),
        }
    }
}

/// Transcript buffer plus, in retrieval mode, the retrieval index.
#[derive(Debug, Default)]
pub struct ChatMemory {
    conversation: ConversationMemory,
    retrieval: Option<RetrievalMemory>,
}

impl ChatMemory {
    /// History from the linear buffer.
    pub fn buffer() -> Self {
        Self::default()
    }

    /// History from similarity recall.
    pub fn retrieval(retrieval: RetrievalMemory) -> Self {
        Self {
            conversation: ConversationMemory::new(),
            retrieval: Some(retrieval),
        }
    }

    pub fn mode(&self) -> MemoryMode {
        if self.retrieval.is_some() {
            MemoryMode::Retrieval
        } else {
            MemoryMode::Buffer
        }
    }

    /// Turns to place in the prompt before `input`.
    #[instrument(skip(self, input), fields(mode = %self.mode()))]
    pub async fn history(&self, input: &str) -> Result<Vec<Turn>> {
        let turns = match &self.retrieval {
            Some(retrieval) => retrieval.query_turns(input).await?,
            None => self.conversation.turns().to_vec(),
        };
        debug!(turns = turns.len(), "history selected");
        Ok(turns)
    }

    /// Records a completed exchange.
    ///
    /// In retrieval mode the turn is stored in the index first; if that fails the
    /// transcript is left unchanged.
    pub async fn record(
        &mut self,
        user: impl Into<String>,
        response: impl Into<String>,
    ) -> Result<&Turn> {
        let turn = Turn::new(user, response);
        if let Some(retrieval) = &self.retrieval {
            retrieval.add_turn(&turn).await?;
        }
        Ok(self.conversation.append(turn))
    }

    /// Archives the transcript and starts an empty one. The retrieval index keeps
    /// every turn.
    pub fn new_chat(&mut self) -> Option<&StoredSession> {
        self.conversation.clear()
    }

    pub fn clear_stored_sessions(&mut self) -> usize {
        self.conversation.clear_stored_sessions()
    }

    pub fn conversation(&self) -> &ConversationMemory {
        &self.conversation
    }

    pub fn retrieval_memory(&self) -> Option<&RetrievalMemory> {
        self.retrieval.as_ref()
    }
}
