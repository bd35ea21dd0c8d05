//! Application configuration loaded from environment variables.
//!
//! LLM and embedding settings come from their own crates ([`EnvLlmConfig`],
//! [`EnvEmbeddingConfig`]); this struct adds memory, store, prompt and logging
//! settings on top. CLI flags override fields after loading.

use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use embedding::EnvEmbeddingConfig;
use llm_client::EnvLlmConfig;
use memory::MemoryMode;
use prompt::{PromptError, SystemPrompt};

pub const DEFAULT_SYSTEM_PROMPT_FILE: &str = "public/system.txt";
pub const DEFAULT_TOP_K: usize = 3;
pub const DEFAULT_COLLECTION: &str = "memory1";
pub const DEFAULT_DB_PATH: &str = ".memorydb/memory.db";
pub const DEFAULT_LOG_FILE: &str = "logs/memorybot.log";

/// Backing store for retrieval memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreKind {
    /// Persisted in a SQLite file; survives restarts.
    #[default]
    Sqlite,
    /// Lives as long as the process.
    InMemory,
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreKind::Sqlite => f.write_str("sqlite"),
            StoreKind::InMemory => f.write_str("inmemory"),
        }
    }
}

impl FromStr for StoreKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(StoreKind::Sqlite),
            "inmemory" | "memory" => Ok(StoreKind::InMemory),
            other => anyhow::bail!(
                "unknown memory store {:?} (expected \"sqlite\" or \"inmemory\")",
                other
            ),
        }
    }
}

/// How the assembled prompt is sent to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromptStyle {
    /// System text, history lines and input joined into one user message.
    #[default]
    Text,
    /// A system message, then one user/assistant pair per past turn, then the input.
    Chat,
}

impl fmt::Display for PromptStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PromptStyle::Text => f.write_str("text"),
            PromptStyle::Chat => f.write_str("chat"),
        }
    }
}

impl FromStr for PromptStyle {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(PromptStyle::Text),
            "chat" | "messages" => Ok(PromptStyle::Chat),
            other => anyhow::bail!(
                "unknown prompt style {:?} (expected \"text\" or \"chat\")",
                other
            ),
        }
    }
}

/// Everything needed to build a chat session.
#[derive(Clone)]
pub struct AppConfig {
    pub llm: EnvLlmConfig,
    pub embedding: EnvEmbeddingConfig,
    /// `None` falls back to the built-in system message.
    pub system_prompt_file: Option<PathBuf>,
    pub memory_mode: MemoryMode,
    pub prompt_style: PromptStyle,
    pub top_k: usize,
    pub collection: String,
    pub db_path: PathBuf,
    pub store: StoreKind,
    pub log_file: PathBuf,
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.trim().is_empty())
}

impl AppConfig {
    /// Loads from environment variables (call `dotenvy::dotenv()` first to pick up `.env`).
    ///
    /// `SYSTEM_PROMPT_FILE` defaults to `public/system.txt` when that file exists.
    pub fn from_env() -> Result<Self> {
        let llm = EnvLlmConfig::from_env()?;
        let embedding = EnvEmbeddingConfig::from_env()?;

        let system_prompt_file = non_empty_var("SYSTEM_PROMPT_FILE")
            .map(PathBuf::from)
            .or_else(|| {
                let default = Path::new(DEFAULT_SYSTEM_PROMPT_FILE);
                default.is_file().then(|| default.to_path_buf())
            });

        let memory_mode = match non_empty_var("MEMORY_MODE") {
            Some(s) => s.parse::<MemoryMode>().context("MEMORY_MODE")?,
            None => MemoryMode::default(),
        };
        let prompt_style = match non_empty_var("PROMPT_STYLE") {
            Some(s) => s.parse::<PromptStyle>().context("PROMPT_STYLE")?,
            None => PromptStyle::default(),
        };
        let top_k = match non_empty_var("MEMORY_TOP_K") {
            Some(s) => s
                .trim()
                .parse::<usize>()
                .with_context(|| format!("MEMORY_TOP_K is not a number: {}", s))?,
            None => DEFAULT_TOP_K,
        };
        let collection =
            non_empty_var("MEMORY_COLLECTION").unwrap_or_else(|| DEFAULT_COLLECTION.to_string());
        let db_path = non_empty_var("MEMORY_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH));
        let store = match non_empty_var("MEMORY_STORE") {
            Some(s) => s.parse::<StoreKind>().context("MEMORY_STORE")?,
            None => StoreKind::default(),
        };
        let log_file = non_empty_var("LOG_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

        Ok(Self {
            llm,
            embedding,
            system_prompt_file,
            memory_mode,
            prompt_style,
            top_k,
            collection,
            db_path,
            store,
            log_file,
        })
    }

    /// Uses `api_key` for both chat completions and embeddings. The key is held in
    /// memory only.
    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        let api_key = api_key.into();
        self.llm.openai_api_key = api_key.clone();
        self.embedding.openai_api_key = api_key;
    }

    /// Checks the settings a chat session needs before any network call is made.
    pub fn validate(&self) -> Result<()> {
        self.llm.validate()?;
        if self.top_k == 0 {
            anyhow::bail!("MEMORY_TOP_K must be at least 1");
        }
        if self.memory_mode == MemoryMode::Retrieval {
            self.embedding.validate()?;
            if self.collection.trim().is_empty() {
                anyhow::bail!("MEMORY_COLLECTION must not be empty");
            }
        }
        Ok(())
    }

    /// Loads the configured system prompt, or the built-in default when none is set.
    pub fn load_system_prompt(&self) -> std::result::Result<SystemPrompt, PromptError> {
        match &self.system_prompt_file {
            Some(path) => SystemPrompt::from_file(path),
            None => Ok(SystemPrompt::default()),
        }
    }
}
