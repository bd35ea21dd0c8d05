//! # OpenAI API client
//!
//! Thin wrapper around [async-openai] for chat completion.
//! Provides token masking for safe logging and a simple request/response API.

use anyhow::Context;
use async_openai::{config::OpenAIConfig, types::CreateChatCompletionRequestArgs, Client};
use std::sync::Arc;

pub use async_openai::types::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
};

/// Masks an API key/token for safe logging: shows first 7 chars + "***" + last 4 chars.
/// If length <= 11, returns "***" to avoid leaking any part of the key.
pub fn mask_token(token: &str) -> String {
    let len = token.len();
    if len <= 11 || !token.is_ascii() {
        return "***".to_string();
    }
    format!("{}***{}", &token[..7], &token[len - 4..])
}

/// OpenAI chat client. Wraps async-openai client; keeps the API key only for masked logging.
#[derive(Clone)]
pub struct OpenAIClient {
    client: Arc<Client<OpenAIConfig>>,
    api_key_for_logging: String,
}

impl OpenAIClient {
    fn build(api_key: String, base_url: Option<String>, http_client: Option<reqwest::Client>) -> Self {
        let mut config = OpenAIConfig::new().with_api_key(api_key.clone());
        if let Some(url) = base_url {
            config = config.with_api_base(url);
        }
        let mut client = Client::with_config(config);
        if let Some(http_client) = http_client {
            client = client.with_http_client(http_client);
        }
        Self {
            client: Arc::new(client),
            api_key_for_logging: api_key,
        }
    }

    /// Builds a client using the given API key and default API base URL.
    pub fn new(api_key: String) -> Self {
        Self::build(api_key, None, None)
    }

    /// Builds a client with a custom base URL (e.g. for compatible endpoints).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self::build(api_key, Some(base_url), None)
    }

    /// Builds a client whose HTTP traffic goes through `proxy` (e.g. `http://127.0.0.1:7890`).
    ///
    /// # Errors
    ///
    /// Fails if `proxy` is not a valid proxy URL.
    pub fn with_proxy(
        api_key: String,
        base_url: Option<String>,
        proxy: &str,
    ) -> anyhow::Result<Self> {
        let http_client = reqwest::Client::builder()
            .proxy(reqwest::Proxy::all(proxy).context("Invalid proxy url")?)
            .build()
            .context("Build HTTP client with proxy")?;
        Ok(Self::build(api_key, base_url, Some(http_client)))
    }

    /// Sends a chat completion request and returns the assistant reply as a string.
    ///
    /// Logs masked API key, request JSON, and token usage. Returns the first choice's content
    /// or an error if the response has no choices.
    pub async fn chat_completion(
        &self,
        model: &str,
        messages: Vec<ChatCompletionRequestMessage>,
        temperature: Option<f32>,
    ) -> anyhow::Result<String> {
        let masked = mask_token(&self.api_key_for_logging);

        tracing::info!(
            model = %model,
            message_count = messages.len(),
            api_key = %masked,
            "OpenAI chat_completion request"
        );

        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(model).messages(messages);
        if let Some(t) = temperature {
            args.temperature(t);
        }
        let request = args.build()?;

        if let Ok(json) = serde_json::to_string_pretty(&request) {
            tracing::debug!(request_json = %json, "OpenAI chat_completion request JSON");
        }

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .context("OpenAI chat completion request")?;

        if let Some(ref u) = response.usage {
            tracing::info!(
                prompt_tokens = u.prompt_tokens,
                completion_tokens = u.completion_tokens,
                total_tokens = u.total_tokens,
                "OpenAI chat_completion usage"
            );
        }

        response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.unwrap_or_default())
            .ok_or_else(|| anyhow::anyhow!("No choices in OpenAI response"))
    }
}
