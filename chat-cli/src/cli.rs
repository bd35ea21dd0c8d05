//! CLI parser and config loading.

use std::path::PathBuf;

use anyhow::Result;
use chat_core::{AppConfig, PromptStyle, StoreKind};
use clap::{Args, Parser, Subcommand};
use memory::MemoryMode;

#[derive(Parser)]
#[command(name = "memorybot")]
#[command(about = "Chat with an LLM that remembers: conversation buffer or retrieval memory", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive chat in the terminal (type /help for commands).
    Chat {
        /// OpenAI API key; overrides OPENAI_API_KEY. Held in memory only.
        #[arg(long)]
        api_key: Option<String>,

        /// Chat model; overrides MODEL.
        #[arg(short, long)]
        model: Option<String>,

        /// System prompt file; overrides SYSTEM_PROMPT_FILE.
        #[arg(long)]
        system_file: Option<PathBuf>,

        /// text: one prompt string; chat: system/user/assistant messages.
        /// Overrides PROMPT_STYLE.
        #[arg(long)]
        prompt_style: Option<PromptStyle>,

        #[command(flatten)]
        memory: MemoryArgs,
    },

    /// Query the retrieval index and print the recalled turns, most similar first.
    ///
    /// While the collection holds fewer than top-k turns every turn is printed and no
    /// API key is needed.
    Recall {
        /// Text to search for.
        query: String,

        /// OpenAI API key for the query embedding; overrides OPENAI_API_KEY.
        #[arg(long)]
        api_key: Option<String>,

        #[command(flatten)]
        memory: MemoryArgs,
    },

    /// Print the number of documents in the retrieval collection.
    Count {
        #[command(flatten)]
        memory: MemoryArgs,
    },
}

/// Memory and store overrides shared by all subcommands.
#[derive(Args, Debug, Clone, Default)]
pub struct MemoryArgs {
    /// History source: buffer or retrieval; overrides MEMORY_MODE.
    #[arg(long)]
    pub mode: Option<MemoryMode>,

    /// Turns recalled per query; overrides MEMORY_TOP_K.
    #[arg(short = 'k', long)]
    pub top_k: Option<usize>,

    /// Collection name in the vector store; overrides MEMORY_COLLECTION.
    #[arg(long)]
    pub collection: Option<String>,

    /// SQLite database file; overrides MEMORY_DB_PATH.
    #[arg(long)]
    pub db_path: Option<PathBuf>,

    /// Keep the index in process memory instead of SQLite.
    #[arg(long)]
    pub in_memory: bool,
}

impl MemoryArgs {
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(mode) = self.mode {
            config.memory_mode = mode;
        }
        if let Some(top_k) = self.top_k {
            config.top_k = top_k;
        }
        if let Some(collection) = &self.collection {
            config.collection = collection.clone();
        }
        if let Some(db_path) = &self.db_path {
            config.db_path = db_path.clone();
        }
        if self.in_memory {
            config.store = StoreKind::InMemory;
        }
    }
}

/// Loads [`AppConfig`] from env, then applies CLI overrides.
pub fn load_config(
    api_key: Option<String>,
    model: Option<String>,
    system_file: Option<PathBuf>,
    prompt_style: Option<PromptStyle>,
    memory: &MemoryArgs,
) -> Result<AppConfig> {
    let mut config = AppConfig::from_env()?;
    if let Some(api_key) = api_key {
        config.set_api_key(api_key);
    }
    if let Some(model) = model {
        config.llm.llm_model = model;
    }
    if let Some(system_file) = system_file {
        config.system_prompt_file = Some(system_file);
    }
    if let Some(prompt_style) = prompt_style {
        config.prompt_style = prompt_style;
    }
    memory.apply(&mut config);
    Ok(config)
}
