//! # Chat Session
//!
//! Typed per-user session state owned by the UI host, plus the per-turn pipeline:
//!
//! 1. history for the input (linear buffer or retrieval recall, per mode)
//! 2. prompt assembly, per [`PromptStyle`]: one text prompt (system + history +
//!    `User: input`) or a message list (system, user/assistant pairs, input)
//! 3. one completion request
//! 4. record the exchange (index first in retrieval mode, then transcript)
//!
//! Each step is awaited before the next; a session handles one turn at a time.
//! Upstream failures before the reply are returned unmodified and the turn is not
//! recorded. A failure while recording returns the reply inside [`ChatError::Record`].

use std::sync::Arc;

use chrono::{DateTime, Utc};
use llm_client::LlmClient;
use memory::{ChatMemory, MemoryMode, StoredSession};
use memory_core::render_lines;
use prompt::PromptAssembler;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::config::PromptStyle;
use crate::error::{ChatError, Result};

/// One chat: memory, prompt template and model client.
pub struct ChatSession {
    id: Uuid,
    started_at: DateTime<Utc>,
    memory: ChatMemory,
    assembler: PromptAssembler,
    prompt_style: PromptStyle,
    llm: Arc<dyn LlmClient>,
}

impl ChatSession {
    pub fn new(memory: ChatMemory, assembler: PromptAssembler, llm: Arc<dyn LlmClient>) -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            memory,
            assembler,
            prompt_style: PromptStyle::default(),
            llm,
        }
    }

    pub fn with_prompt_style(mut self, prompt_style: PromptStyle) -> Self {
        self.prompt_style = prompt_style;
        self
    }

    pub fn prompt_style(&self) -> PromptStyle {
        self.prompt_style
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn mode(&self) -> MemoryMode {
        self.memory.mode()
    }

    /// Model the session's completions are requested from.
    pub fn model(&self) -> &str {
        self.llm.model()
    }

    pub fn memory(&self) -> &ChatMemory {
        &self.memory
    }

    /// Runs one turn and returns the model reply.
    ///
    /// Blank input is ignored: `Ok(None)`, nothing is sent and nothing recorded.
    ///
    /// # Errors
    ///
    /// - [`ChatError::Memory`] if recall fails (including embedding errors)
    /// - [`ChatError::Completion`] if the model request fails; the turn is not recorded
    /// - [`ChatError::Record`] if the reply arrived but storing the exchange failed
    #[instrument(
        skip(self, input),
        fields(session_id = %self.id, mode = %self.memory.mode(), style = %self.prompt_style)
    )]
    pub async fn submit(&mut self, input: &str) -> Result<Option<String>> {
        if input.trim().is_empty() {
            return Ok(None);
        }

        let history = self.memory.history(input).await?;
        let completion = match self.prompt_style {
            PromptStyle::Text => {
                let prompt = self.assembler.format(input, render_lines(&history));
                info!(
                    history_turns = history.len(),
                    prompt_len = prompt.len(),
                    "step: prompt assembled"
                );
                self.llm.complete(&prompt).await
            }
            PromptStyle::Chat => {
                let messages = self
                    .assembler
                    .format_messages(input, history.iter().map(|t| (t.user(), t.response())));
                info!(
                    history_turns = history.len(),
                    messages = messages.len(),
                    "step: prompt assembled"
                );
                self.llm.get_llm_response_with_messages(messages).await
            }
        };
        let reply = completion.map_err(ChatError::Completion)?;
        info!(reply_len = reply.len(), "step: completion received");

        if let Err(source) = self.memory.record(input, reply.as_str()).await {
            warn!(error = %source, "step: reply not recorded");
            return Err(ChatError::Record { reply, source });
        }
        Ok(Some(reply))
    }

    /// Archives the transcript and starts a new chat. Returns the archived session, if
    /// the transcript was not empty.
    pub fn new_chat(&mut self) -> Option<&StoredSession> {
        let archived = self.memory.new_chat();
        info!(
            session_id = %self.id,
            archived = archived.is_some(),
            "step: new chat"
        );
        archived
    }

    /// Archived chats of this session, oldest first.
    pub fn stored_sessions(&self) -> &[StoredSession] {
        self.memory.conversation().stored_sessions()
    }

    pub fn clear_stored_sessions(&mut self) -> usize {
        self.memory.clear_stored_sessions()
    }

    /// Transcript for download: one `User:` and one `Bot:` line per turn, in
    /// conversation order, newline-terminated.
    pub fn transcript(&self) -> String {
        let mut text = String::new();
        for line in self.memory.conversation().render_lines() {
            text.push_str(&line);
            text.push('\n');
        }
        text
    }

    /// The current history block as it would be replayed in buffer mode.
    pub fn buffer_preview(&self) -> String {
        self.memory.conversation().render()
    }

    /// Documents in the retrieval index, or `None` in buffer mode.
    pub async fn memory_count(&self) -> Result<Option<usize>> {
        match self.memory.retrieval_memory() {
            Some(retrieval) => Ok(Some(retrieval.count().await?)),
            None => Ok(None),
        }
    }
}

impl std::fmt::Debug for ChatSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatSession")
            .field("id", &self.id)
            .field("started_at", &self.started_at)
            .field("mode", &self.memory.mode())
            .field("prompt_style", &self.prompt_style)
            .field("model", &self.llm.model())
            .field("turns", &self.memory.conversation().len())
            .finish()
    }
}
