use std::path::PathBuf;
use thiserror::Error;

/// Prompt configuration errors, raised when the prompt is built rather than at format time.
#[derive(Error, Debug)]
pub enum PromptError {
    /// The template must declare exactly the variable set `{"input"}`.
    #[error("prompt template must declare exactly the input variable \"input\", got {0:?}")]
    InvalidInputVariables(Vec<String>),

    /// The system prompt file could not be read.
    #[error("failed to read system prompt from {path}: {source}")]
    SystemPromptIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
