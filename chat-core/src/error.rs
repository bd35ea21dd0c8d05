use memory_core::MemoryError;
use prompt::PromptError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChatError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Prompt error: {0}")]
    Prompt(#[from] PromptError),

    #[error("Memory error: {0}")]
    Memory(#[from] MemoryError),

    #[error("Completion failed: {0:#}")]
    Completion(anyhow::Error),

    /// The model replied but the exchange could not be stored. The reply is kept so
    /// the host can still show it.
    #[error("Reply not recorded: {source}")]
    Record {
        reply: String,
        #[source]
        source: MemoryError,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification used for user-facing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad settings; fix the config and restart.
    Configuration,
    /// The LLM or embedding API failed; the turn can be retried.
    Upstream,
    /// A stored document did not match the two-line format.
    Format,
    /// The vector store could not be read or written.
    Store,
    Io,
}

fn memory_kind(e: &MemoryError) -> ErrorKind {
    match e {
        MemoryError::Configuration(_) => ErrorKind::Configuration,
        MemoryError::Embedding(_) => ErrorKind::Upstream,
        MemoryError::Format(_) => ErrorKind::Format,
        MemoryError::Store(_) => ErrorKind::Store,
    }
}

impl ChatError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ChatError::Config(_) | ChatError::Prompt(PromptError::InvalidInputVariables(_)) => {
                ErrorKind::Configuration
            }
            ChatError::Prompt(PromptError::SystemPromptIo { .. }) | ChatError::Io(_) => {
                ErrorKind::Io
            }
            ChatError::Memory(source) | ChatError::Record { source, .. } => memory_kind(source),
            ChatError::Completion(_) => ErrorKind::Upstream,
        }
    }

    /// The model reply carried by a [`ChatError::Record`] failure.
    pub fn unrecorded_reply(&self) -> Option<&str> {
        match self {
            ChatError::Record { reply, .. } => Some(reply),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ChatError>;

#[cfg(test)]
mod tests {
    use super::*;
    use memory_core::FormatError;

    #[test]
    fn test_kind_classification() {
        assert_eq!(
            ChatError::Config("x".into()).kind(),
            ErrorKind::Configuration
        );
        assert_eq!(
            ChatError::from(PromptError::InvalidInputVariables(vec!["extra".into()])).kind(),
            ErrorKind::Configuration
        );
        assert_eq!(
            ChatError::from(MemoryError::Embedding(anyhow::anyhow!("timeout"))).kind(),
            ErrorKind::Upstream
        );
        assert_eq!(
            ChatError::Completion(anyhow::anyhow!("rate limited")).kind(),
            ErrorKind::Upstream
        );
        assert_eq!(
            ChatError::from(MemoryError::from(FormatError::LineCount { found: 3 })).kind(),
            ErrorKind::Format
        );
        assert_eq!(
            ChatError::from(MemoryError::Store(anyhow::anyhow!("locked"))).kind(),
            ErrorKind::Store
        );
    }

    #[test]
    fn test_completion_error_keeps_cause_chain() {
        let err = ChatError::Completion(
            anyhow::anyhow!("connection reset").context("chat completion request"),
        );
        assert_eq!(
            err.to_string(),
            "Completion failed: chat completion request: connection reset"
        );
    }

    #[test]
    fn test_record_error_keeps_reply_and_source_kind() {
        let err = ChatError::Record {
            reply: "Hi Bob".to_string(),
            source: MemoryError::Embedding(anyhow::anyhow!("timeout")),
        };
        assert_eq!(err.kind(), ErrorKind::Upstream);
        assert_eq!(err.unrecorded_reply(), Some("Hi Bob"));
        assert!(err.to_string().starts_with("Reply not recorded: "));
        assert!(std::error::Error::source(&err).is_some());

        let err = ChatError::Record {
            reply: "Hi".to_string(),
            source: MemoryError::Store(anyhow::anyhow!("disk full")),
        };
        assert_eq!(err.kind(), ErrorKind::Store);
        assert_eq!(ChatError::Config("x".into()).unrecorded_reply(), None);
    }
}
