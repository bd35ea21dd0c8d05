//! LlmClient backed by openai-client.

use anyhow::Result;
use async_trait::async_trait;
use prompt::ChatMessage;
use tracing::instrument;

use super::{chat_message_to_openai, LlmClient};
use crate::config::LlmConfig;

/// OpenAI chat-completion client for one model and temperature.
#[derive(Clone)]
pub struct OpenAILlmClient {
    client: openai_client::OpenAIClient,
    model: String,
    temperature: Option<f32>,
}

impl OpenAILlmClient {
    /// Builds the client from config: credential, endpoint, proxy, model and temperature.
    pub fn from_config(config: &dyn LlmConfig) -> Result<Self> {
        let api_key = config.api_key().to_string();
        let base_url = config.base_url().map(str::to_string);
        let client = match (config.proxy(), base_url) {
            (Some(proxy), base_url) => {
                openai_client::OpenAIClient::with_proxy(api_key, base_url, proxy)?
            }
            (None, Some(base_url)) => openai_client::OpenAIClient::with_base_url(api_key, base_url),
            (None, None) => openai_client::OpenAIClient::new(api_key),
        };
        Ok(Self {
            client,
            model: config.model().to_string(),
            temperature: Some(config.temperature()),
        })
    }
}

#[async_trait]
impl LlmClient for OpenAILlmClient {
    fn model(&self) -> &str {
        &self.model
    }

    #[instrument(skip(self, messages), fields(model = %self.model, message_count = messages.len()))]
    async fn get_llm_response_with_messages(&self, messages: Vec<ChatMessage>) -> Result<String> {
        let openai_messages = messages
            .iter()
            .map(chat_message_to_openai)
            .collect::<Result<Vec<_>>>()?;
        self.client
            .chat_completion(&self.model, openai_messages, self.temperature)
            .await
    }
}
