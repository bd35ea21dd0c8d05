//! System instructions, loaded once at startup and shared by reference.

use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::PromptError;

/// Fallback system instruction when no system prompt file is configured.
pub const DEFAULT_SYSTEM_MESSAGE: &str = "You are a helpful assistant.";

/// Fixed system instruction block. Construct once and share with `Arc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemPrompt {
    text: String,
    source: Option<PathBuf>,
}

impl SystemPrompt {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: None,
        }
    }

    /// Reads the system prompt from a text file. Trailing whitespace is trimmed so the
    /// file's final newline does not produce an empty line in the prompt.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, PromptError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| PromptError::SystemPromptIo {
            path: path.to_path_buf(),
            source,
        })?;
        let text = text.trim_end().to_string();
        info!(path = %path.display(), len = text.len(), "step: system prompt loaded");
        Ok(Self {
            text,
            source: Some(path.to_path_buf()),
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// File the prompt was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

impl Default for SystemPrompt {
    fn default() -> Self {
        Self::new(DEFAULT_SYSTEM_MESSAGE)
    }
}
