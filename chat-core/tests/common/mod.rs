//! Shared test utilities for chat-core integration tests.
//!
//! A scripted LLM that records every prompt it receives, and a deterministic
//! embedding service, so sessions run without network access.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use embedding::EmbeddingService;
use llm_client::LlmClient;
use prompt::ChatMessage;

/// Replies from a fixed script (then "ok") and keeps the prompts it was sent, both
/// joined as text and as the raw message list.
#[allow(dead_code)]
#[derive(Default)]
pub struct ScriptedLlm {
    replies: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<String>>,
    messages: Mutex<Vec<Vec<ChatMessage>>>,
}

#[allow(dead_code)]
impl ScriptedLlm {
    pub fn new<I, S>(replies: I) -> Arc<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Arc::new(Self {
            replies: Mutex::new(replies.into_iter().map(Into::into).collect()),
            prompts: Mutex::new(Vec::new()),
            messages: Mutex::new(Vec::new()),
        })
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }

    pub fn last_messages(&self) -> Option<Vec<ChatMessage>> {
        self.messages.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl LlmClient for ScriptedLlm {
    fn model(&self) -> &str {
        "scripted"
    }

    async fn get_llm_response_with_messages(
        &self,
        messages: Vec<ChatMessage>,
    ) -> anyhow::Result<String> {
        let prompt = messages
            .iter()
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        self.prompts.lock().unwrap().push(prompt);
        self.messages.lock().unwrap().push(messages);
        Ok(self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| "ok".to_string()))
    }
}

/// LLM that always fails, like an API outage.
#[allow(dead_code)]
pub struct FailingLlm;

#[async_trait]
impl LlmClient for FailingLlm {
    fn model(&self) -> &str {
        "failing"
    }

    async fn get_llm_response_with_messages(
        &self,
        _messages: Vec<ChatMessage>,
    ) -> anyhow::Result<String> {
        Err(anyhow::anyhow!("503 Service Unavailable"))
    }
}

/// Letter-frequency embeddings; counts calls.
#[allow(dead_code)]
#[derive(Default)]
pub struct LetterEmbedding {
    calls: AtomicUsize,
}

#[allow(dead_code)]
impl LetterEmbedding {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

fn letters(text: &str) -> Vec<f32> {
    let mut v = vec![0.0; 26];
    for c in text.chars().filter(|c| c.is_ascii_alphabetic()) {
        v[(c.to_ascii_lowercase() as u8 - b'a') as usize] += 1.0;
    }
    v
}

#[async_trait]
impl EmbeddingService for LetterEmbedding {
    async fn embed(&self, text: &str) -> anyhow::Result<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(letters(text))
    }

    async fn embed_batch(&self, texts: &[String]) -> anyhow::Result<Vec<Vec<f32>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(texts.iter().map(|t| letters(t)).collect())
    }
}
