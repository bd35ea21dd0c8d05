//! # Conversation Memory
//!
//! Linear, ordered transcript of the dialogue. Every completed exchange appends one
//! [`Turn`]; `render` produces the role-tagged history block for the prompt.
//!
//! The buffer has no length bound: long conversations grow the prompt without limit.
//!
//! ## New chat
//!
//! `clear` archives the buffer as a [`StoredSession`] before emptying it. Archived
//! sessions accumulate for the lifetime of the memory and are only removed by
//! `clear_stored_sessions`.

use memory_core::{render_lines, StoredSession, Turn};
use tracing::debug;

/// Ordered transcript plus the archive of previous chats in this session.
#[derive(Debug, Clone, Default)]
pub struct ConversationMemory {
    buffer: Vec<Turn>,
    stored_sessions: Vec<StoredSession>,
}

impl ConversationMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a turn to the end of the buffer.
    pub fn append(&mut self, turn: Turn) -> &Turn {
        self.buffer.push(turn);
        debug!(len = self.buffer.len(), "conversation buffer append");
        &self.buffer[self.buffer.len() - 1]
    }

    /// Appends the exchange `(user, response)`.
    pub fn push(&mut self, user: impl Into<String>, response: impl Into<String>) -> &Turn {
        self.append(Turn::new(user, response))
    }

    /// Turns in conversation order; a turn's index is its position.
    pub fn turns(&self) -> &[Turn] {
        &self.buffer
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Role-tagged lines, alternating `User: ...` / `Bot: ...`, in order.
    pub fn render_lines(&self) -> Vec<String> {
        render_lines(&self.buffer)
    }

    /// The history block: rendered lines joined by `\n`.
    pub fn render(&self) -> String {
        self.render_lines().join("\n")
    }

    /// Archives the current buffer verbatim, then empties it.
    ///
    /// Returns the new archive entry, or `None` when the buffer was already empty
    /// (empty chats are not archived).
    pub fn clear(&mut self) -> Option<&StoredSession> {
        if self.buffer.is_empty() {
            return None;
        }
        let session = StoredSession::from_turns(&self.buffer);
        self.buffer.clear();
        self.stored_sessions.push(session);
        debug!(
            stored_sessions = self.stored_sessions.len(),
            "conversation buffer archived"
        );
        self.stored_sessions.last()
    }

    /// Archived sessions, oldest first.
    pub fn stored_sessions(&self) -> &[StoredSession] {
        &self.stored_sessions
    }

    /// Drops every archived session; returns how many were removed.
    pub fn clear_stored_sessions(&mut self) -> usize {
        let removed = self.stored_sessions.len();
        self.stored_sessions.clear();
        removed
    }
}
