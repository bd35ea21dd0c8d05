//! # Core Types
//!
//! This module defines the core types shared by the conversation buffer and the
//! retrieval index.
//!
//! ## Turn
//!
//! One completed exchange: what the user said and what the model answered.
//! The sequence index is implicit (position in the owning buffer).
//!
//! ## StoredSession
//!
//! An archived, read-only transcript created when the user starts a new chat.
//!
//! ## VectorRecord
//!
//! A single document in the vector index together with its embedding.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Speaker tag for user lines in rendered history and stored documents.
pub const USER_LABEL: &str = "User";

/// Speaker tag for model lines in rendered history and stored documents.
pub const BOT_LABEL: &str = "Bot";

/// Formats one role-tagged line, e.g. `User: hello`.
pub fn format_line(label: &str, text: &str) -> String {
    format!("{}: {}", label, text)
}

/// One (user utterance, model response) pair. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    user: String,
    response: String,
}

impl Turn {
    /// Creates a new turn from the user utterance and the model response.
    pub fn new(user: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            response: response.into(),
        }
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn response(&self) -> &str {
        &self.response
    }

    /// Returns the two role-tagged lines for this turn: `User: ...` then `Bot: ...`.
    pub fn lines(&self) -> [String; 2] {
        [
            format_line(USER_LABEL, &self.user),
            format_line(BOT_LABEL, &self.response),
        ]
    }
}

/// Renders turns as alternating role-tagged lines, in order.
pub fn render_lines(turns: &[Turn]) -> Vec<String> {
    turns.iter().flat_map(|turn| turn.lines()).collect()
}

/// Archived transcript of a finished chat. Displayed, never replayed into the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSession {
    /// When the session was archived
    archived_at: DateTime<Utc>,
    /// Role-tagged lines in conversation order
    lines: Vec<String>,
}

impl StoredSession {
    /// Archives the given turns verbatim (same turns, same order).
    pub fn from_turns(turns: &[Turn]) -> Self {
        Self {
            archived_at: Utc::now(),
            lines: render_lines(turns),
        }
    }

    pub fn archived_at(&self) -> DateTime<Utc> {
        self.archived_at
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of turns in the archived transcript.
    pub fn turn_count(&self) -> usize {
        self.lines.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// A document in the vector index: identifier, encoded text and embedding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorRecord {
    /// Collection-unique, strictly increasing identifier
    pub id: u64,
    /// Encoded document text (see [`crate::codec`])
    pub document: String,
    /// Embedding vector for similarity search
    pub embedding: Vec<f32>,
}

impl VectorRecord {
    pub fn new(id: u64, document: impl Into<String>, embedding: Vec<f32>) -> Self {
        Self {
            id,
            document: document.into(),
            embedding,
        }
    }
}
