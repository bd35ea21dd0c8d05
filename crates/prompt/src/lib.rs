//! # Prompt
//!
//! Assembles the text sent to the language model from three parts:
//!
//! - **System**: fixed instructions, loaded once per process ([`SystemPrompt`])
//! - **History**: role-tagged lines from either the linear conversation buffer or
//!   retrieval memory (never both in one configuration)
//! - **Input**: the current user utterance, tagged with the user speaker label
//!
//! ## Format
//!
//! ```text
//! {system}
//! User: hi
//! Bot: hello
//! User: {input}
//! ```
//!
//! Parts are joined by a single `\n`; an empty history block is omitted.
//!
//! ## External interactions
//!
//! - **AI models**: Output is sent to chat-completion APIs through `llm-client`.

mod assembler;
mod error;
mod message;
mod system;

pub use assembler::{PromptAssembler, DEFAULT_USER_LABEL, INPUT_VARIABLE};
pub use error::PromptError;
pub use message::{ChatMessage, MessageRole};
pub use system::{SystemPrompt, DEFAULT_SYSTEM_MESSAGE};
