//! Prompt assembly with a construction-time check of the declared input variables.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::error::PromptError;
use crate::message::ChatMessage;
use crate::system::SystemPrompt;

/// The single free variable a prompt template may declare.
pub const INPUT_VARIABLE: &str = "input";

/// Speaker tag placed before the current user input.
pub const DEFAULT_USER_LABEL: &str = "User";

/// Composes system text, a history block and the current user input.
///
/// The history block is supplied by the caller from exactly one memory source.
/// Formatting is pure: the same arguments always produce the same text.
#[derive(Debug, Clone)]
pub struct PromptAssembler {
    system: Arc<SystemPrompt>,
    user_label: String,
}

impl PromptAssembler {
    /// Creates an assembler whose template declares `input_variables`.
    ///
    /// # Errors
    ///
    /// [`PromptError::InvalidInputVariables`] unless the declared set is exactly `{"input"}`.
    pub fn new<I, S>(system: Arc<SystemPrompt>, input_variables: I) -> Result<Self, PromptError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let declared: BTreeSet<String> = input_variables.into_iter().map(Into::into).collect();
        if declared.len() != 1 || !declared.contains(INPUT_VARIABLE) {
            return Err(PromptError::InvalidInputVariables(
                declared.into_iter().collect(),
            ));
        }
        Ok(Self {
            system,
            user_label: DEFAULT_USER_LABEL.to_string(),
        })
    }

    /// Creates an assembler declaring only `input`; cannot fail.
    pub fn with_system(system: Arc<SystemPrompt>) -> Self {
        Self {
            system,
            user_label: DEFAULT_USER_LABEL.to_string(),
        }
    }

    /// Overrides the speaker tag placed before the current input.
    pub fn with_user_label(mut self, label: impl Into<String>) -> Self {
        self.user_label = label.into();
        self
    }

    pub fn system(&self) -> &SystemPrompt {
        &self.system
    }

    /// Returns `system + "\n" + history lines + "\n" + "User: " + input`.
    ///
    /// An empty history (or an empty system text) is omitted together with its separator.
    pub fn format<H, L>(&self, input: &str, history: H) -> String
    where
        H: IntoIterator<Item = L>,
        L: AsRef<str>,
    {
        let mut parts: Vec<String> = Vec::new();
        if !self.system.text().is_empty() {
            parts.push(self.system.text().to_string());
        }
        parts.extend(history.into_iter().map(|line| line.as_ref().to_string()));
        parts.push(format!("{}: {}", self.user_label, input));
        parts.join("\n")
    }

    /// Chat-message form of the same prompt: system message, one user/assistant pair
    /// per past exchange, then the raw user input.
    pub fn format_messages<'a, E>(&self, input: &str, exchanges: E) -> Vec<ChatMessage>
    where
        E: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut messages = Vec::new();
        if !self.system.text().is_empty() {
            messages.push(ChatMessage::system(self.system.text()));
        }
        for (user, response) in exchanges {
            messages.push(ChatMessage::user(user));
            messages.push(ChatMessage::assistant(response));
        }
        messages.push(ChatMessage::user(input));
        messages
    }
}
