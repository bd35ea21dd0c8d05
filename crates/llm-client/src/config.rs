//! LLM configuration: trait and env-based implementation.

use anyhow::Result;
use std::env;

/// Chat model used when MODEL is not set.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Sampling temperature used when LLM_TEMPERATURE is not set.
pub const DEFAULT_TEMPERATURE: f32 = 1.0;

/// LLM configuration interface for OpenAI-compatible APIs.
pub trait LlmConfig: Send + Sync {
    fn api_key(&self) -> &str;
    fn base_url(&self) -> Option<&str>;
    fn proxy(&self) -> Option<&str>;
    fn model(&self) -> &str;
    fn temperature(&self) -> f32;
}

/// LLM config loaded from environment variables.
#[derive(Debug, Clone)]
pub struct EnvLlmConfig {
    pub openai_api_key: String,
    pub openai_base_url: Option<String>,
    pub openai_proxy: Option<String>,
    pub llm_model: String,
    pub llm_temperature: f32,
}

impl LlmConfig for EnvLlmConfig {
    fn api_key(&self) -> &str {
        &self.openai_api_key
    }
    fn base_url(&self) -> Option<&str> {
        self.openai_base_url.as_deref()
    }
    fn proxy(&self) -> Option<&str> {
        self.openai_proxy.as_deref()
    }
    fn model(&self) -> &str {
        &self.llm_model
    }
    fn temperature(&self) -> f32 {
        self.llm_temperature
    }
}

impl EnvLlmConfig {
    /// Load from environment variables. The API key may be empty here and supplied
    /// later by the host; call [`validate`](Self::validate) before building a client.
    pub fn from_env() -> Result<Self> {
        let openai_api_key = env::var("OPENAI_API_KEY").unwrap_or_default();
        let openai_base_url = env::var("OPENAI_BASE_URL")
            .ok()
            .filter(|s| !s.trim().is_empty());
        let openai_proxy = env::var("OPENAI_PROXY")
            .or_else(|_| env::var("openai_proxy"))
            .ok()
            .filter(|s| !s.trim().is_empty());
        let llm_model = env::var("MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let llm_temperature = match env::var("LLM_TEMPERATURE") {
            Ok(s) => s
                .trim()
                .parse()
                .map_err(|e| anyhow::anyhow!("LLM_TEMPERATURE is not a number ({}): {}", s, e))?,
            Err(_) => DEFAULT_TEMPERATURE,
        };
        Ok(Self {
            openai_api_key,
            openai_base_url,
            openai_proxy,
            llm_model,
            llm_temperature,
        })
    }

    /// Validate config: API key present, temperature within the API's range.
    pub fn validate(&self) -> Result<()> {
        if self.openai_api_key.trim().is_empty() {
            anyhow::bail!("API key required: set OPENAI_API_KEY or pass --api-key. The key is not stored.");
        }
        if !(0.0..=2.0).contains(&self.llm_temperature) {
            anyhow::bail!(
                "LLM_TEMPERATURE must be between 0.0 and 2.0, got {}",
                self.llm_temperature
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> EnvLlmConfig {
        EnvLlmConfig {
            openai_api_key: "sk-test".to_string(),
            openai_base_url: None,
            openai_proxy: None,
            llm_model: DEFAULT_MODEL.to_string(),
            llm_temperature: DEFAULT_TEMPERATURE,
        }
    }

    #[test]
    fn test_validate() {
        assert!(config().validate().is_ok());

        let mut missing_key = config();
        missing_key.openai_api_key = "  ".to_string();
        assert!(missing_key.validate().is_err());

        let mut too_hot = config();
        too_hot.llm_temperature = 3.5;
        assert!(too_hot.validate().is_err());
    }
}
