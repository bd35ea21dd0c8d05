//! Tests for `PromptAssembler` and `SystemPrompt`.
//!
//! Verifies the input-variable contract at construction, the exact text layout and
//! the chat-message form. External interactions: none except a temp file.

use std::io::Write;
use std::sync::Arc;

use prompt::{
    ChatMessage, MessageRole, PromptAssembler, PromptError, SystemPrompt,
    DEFAULT_SYSTEM_MESSAGE,
};

fn system(text: &str) -> Arc<SystemPrompt> {
    Arc::new(SystemPrompt::new(text))
}

/// **Test: Declaring exactly {"input"} succeeds.**
#[test]
fn new_accepts_input_only() {
    assert!(PromptAssembler::new(system("S"), ["input"]).is_ok());
    // duplicates collapse to the same set
    assert!(PromptAssembler::new(system("S"), vec!["input", "input"]).is_ok());
}

/// **Test: Any other declared set is a configuration error at construction.**
#[test]
fn new_rejects_other_variable_sets() {
    let err = PromptAssembler::new(system("S"), ["input", "extra"]).unwrap_err();
    match err {
        PromptError::InvalidInputVariables(vars) => {
            assert_eq!(vars, vec!["extra".to_string(), "input".to_string()])
        }
        other => panic!("unexpected error: {other}"),
    }

    assert!(matches!(
        PromptAssembler::new(system("S"), ["history"]),
        Err(PromptError::InvalidInputVariables(_))
    ));
    assert!(matches!(
        PromptAssembler::new(system("S"), Vec::<String>::new()),
        Err(PromptError::InvalidInputVariables(_))
    ));
}

/// **Test: System, one past turn and the current input join with single newlines.**
#[test]
fn format_concatenates_system_history_and_input() {
    let assembler = PromptAssembler::new(system("S"), ["input"]).unwrap();
    let prompt = assembler.format("how are you", ["User: hi", "Bot: hello"]);
    assert_eq!(prompt, "S\nUser: hi\nBot: hello\nUser: how are you");
}

/// **Test: Empty history omits the history block.**
#[test]
fn format_without_history() {
    let assembler = PromptAssembler::with_system(system("S"));
    assert_eq!(assembler.format("x", Vec::<String>::new()), "S\nUser: x");
}

/// **Test: Empty system text is omitted.**
#[test]
fn format_without_system() {
    let assembler = PromptAssembler::with_system(system(""));
    assert_eq!(assembler.format("x", ["User: a", "Bot: b"]), "User: a\nBot: b\nUser: x");
}

/// **Test: format is pure; repeated calls give identical output.**
#[test]
fn format_is_deterministic() {
    let assembler = PromptAssembler::with_system(system("S"));
    let history = vec!["User: a".to_string(), "Bot: b".to_string()];
    assert_eq!(assembler.format("q", &history), assembler.format("q", &history));
}

/// **Test: A custom user label tags the current input.**
#[test]
fn format_with_custom_user_label() {
    let assembler = PromptAssembler::with_system(system("S")).with_user_label("Traveler");
    assert_eq!(assembler.format("hi", Vec::<&str>::new()), "S\nTraveler: hi");
}

/// **Test: Chat-message form alternates user/assistant and ends with the raw input.**
#[test]
fn format_messages_uses_roles() {
    let assembler = PromptAssembler::with_system(system("S"));
    let msgs = assembler.format_messages("how are you", [("hi", "hello")]);
    assert_eq!(
        msgs,
        vec![
            ChatMessage::system("S"),
            ChatMessage::user("hi"),
            ChatMessage::assistant("hello"),
            ChatMessage::user("how are you"),
        ]
    );
    assert_eq!(msgs.last().map(|m| m.role), Some(MessageRole::User));
}

/// **Test: SystemPrompt::from_file reads the file and trims the trailing newline.**
#[test]
fn system_prompt_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "You are Paimon.").unwrap();

    let prompt = SystemPrompt::from_file(file.path()).unwrap();
    assert_eq!(prompt.text(), "You are Paimon.");
    assert_eq!(prompt.source(), Some(file.path()));
}

/// **Test: A missing system prompt file is reported with its path.**
#[test]
fn system_prompt_missing_file() {
    let err = SystemPrompt::from_file("/nonexistent/system.txt").unwrap_err();
    assert!(matches!(err, PromptError::SystemPromptIo { .. }));
    assert!(err.to_string().contains("/nonexistent/system.txt"));
}

/// **Test: Default system prompt is the built-in instruction.**
#[test]
fn system_prompt_default() {
    assert_eq!(SystemPrompt::default().text(), DEFAULT_SYSTEM_MESSAGE);
    assert!(SystemPrompt::default().source().is_none());
}
