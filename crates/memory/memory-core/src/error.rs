use thiserror::Error;

/// Errors raised by the memory layer. All of them bubble to the UI host.
#[derive(Error, Debug)]
pub enum MemoryError {
    /// Invalid construction parameters (e.g. `top_k == 0`).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The embedding service failed; propagated unmodified and never retried.
    #[error("Embedding error: {0:#}")]
    Embedding(anyhow::Error),

    /// The vector store failed to read or write.
    #[error("Store error: {0:#}")]
    Store(anyhow::Error),

    /// A stored document does not follow the two-line turn format.
    #[error("Format error: {0}")]
    Format(#[from] FormatError),
}

/// Violations of the stored document format (see [`crate::codec`]).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("document has {found} line(s), expected 2")]
    LineCount { found: usize },

    #[error("line is missing the {label:?} speaker label: {line:?}")]
    MissingLabel { label: String, line: String },

    #[error("invalid escape sequence {sequence:?}")]
    InvalidEscape { sequence: String },
}

pub type Result<T> = std::result::Result<T, MemoryError>;
