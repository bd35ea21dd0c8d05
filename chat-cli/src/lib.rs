//! # chat-cli
//!
//! Terminal host for the memory chat bot: argument parsing with config overrides, the
//! interactive chat loop and recall output. Session logic lives in chat-core.

pub mod chat;
pub mod cli;
pub mod recall;

pub use chat::{export_transcript, print_help, run_chat_loop};
pub use cli::{load_config, Cli, Commands, MemoryArgs};
pub use recall::{print_recalled, recall, Recalled};
