//! memorybot CLI: interactive chat, recall from the retrieval index, count stored turns.
//! Config from env (.env supported) with CLI overrides.

use anyhow::{Context, Result};
use chat_cli::{load_config, print_recalled, recall, run_chat_loop, Cli, Commands};
use chat_core::{build_session, create_vector_store, init_tracing};
use clap::Parser;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Chat {
            api_key,
            model,
            system_file,
            prompt_style,
            memory,
        } => {
            let config = load_config(api_key, model, system_file, prompt_style, &memory)?;
            init_tracing(&config.log_file).context("Failed to initialize logging")?;
            let session = build_session(&config).await?;
            info!(session_id = %session.id(), "memorybot chat started");
            run_chat_loop(session).await
        }
        Commands::Recall {
            query,
            api_key,
            memory,
        } => {
            let config = load_config(api_key, None, None, None, &memory)?;
            init_tracing(&config.log_file).context("Failed to initialize logging")?;
            handle_recall(&config, &query).await
        }
        Commands::Count { memory } => {
            let config = load_config(None, None, None, None, &memory)?;
            init_tracing(&config.log_file).context("Failed to initialize logging")?;
            let store = create_vector_store(&config).await?;
            let count = store.count().await.context("Failed to count documents")?;
            println!("{}: {} document(s)", config.collection, count);
            Ok(())
        }
    }
}

/// Handle the recall command: query the index and print each recalled turn.
async fn handle_recall(config: &chat_core::AppConfig, query: &str) -> Result<()> {
    let recalled = recall(config, query).await?;
    print_recalled(&config.collection, &recalled);
    Ok(())
}
