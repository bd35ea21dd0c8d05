//! Document format for turns stored in the vector index.
//!
//! A document is exactly two lines joined by a single `\n`:
//!
//! ```text
//! User: <user text>
//! Bot: <response text>
//! ```
//!
//! Backslashes and newlines inside the texts are escaped as `\\` and `\n`, so every
//! encoded document splits into exactly two lines and decodes back to the same turn.

use crate::error::FormatError;
use crate::types::{format_line, Turn, BOT_LABEL, USER_LABEL};

/// Encodes a turn as a two-line document.
pub fn encode_document(turn: &Turn) -> String {
    format!(
        "{}\n{}",
        format_line(USER_LABEL, &escape(turn.user())),
        format_line(BOT_LABEL, &escape(turn.response()))
    )
}

/// Decodes a two-line document back into a turn.
pub fn decode_document(document: &str) -> Result<Turn, FormatError> {
    let lines: Vec<&str> = document.split('\n').collect();
    if lines.len() != 2 {
        return Err(FormatError::LineCount { found: lines.len() });
    }
    let user = unescape(strip_label(lines[0], USER_LABEL)?)?;
    let response = unescape(strip_label(lines[1], BOT_LABEL)?)?;
    Ok(Turn::new(user, response))
}

fn strip_label<'a>(line: &'a str, label: &str) -> Result<&'a str, FormatError> {
    line.strip_prefix(label)
        .and_then(|rest| rest.strip_prefix(": "))
        .ok_or_else(|| FormatError::MissingLabel {
            label: label.to_string(),
            line: line.to_string(),
        })
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out
}

fn unescape(text: &str) -> Result<String, FormatError> {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('n') => out.push('\n'),
            other => {
                return Err(FormatError::InvalidEscape {
                    sequence: other.map(|c| format!("\\{}", c)).unwrap_or_else(|| "\\".into()),
                })
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_plain_turn() {
        let turn = Turn::new("hi", "hello");
        assert_eq!(encode_document(&turn), "User: hi\nBot: hello");
    }

    #[test]
    fn test_decode_plain_document() {
        let turn = decode_document("User: hi\nBot: hello").unwrap();
        assert_eq!(turn, Turn::new("hi", "hello"));
    }

    #[test]
    fn test_multiline_text_stays_two_lines() {
        let turn = Turn::new("line one\nline two", "a\\b\nc");
        let doc = encode_document(&turn);
        assert_eq!(doc.split('\n').count(), 2);
        assert_eq!(decode_document(&doc).unwrap(), turn);
    }

    #[test]
    fn test_literal_backslash_n_is_not_a_newline() {
        let turn = Turn::new("path C:\\new", "ok");
        let decoded = decode_document(&encode_document(&turn)).unwrap();
        assert_eq!(decoded.user(), "path C:\\new");
    }

    #[test]
    fn test_empty_texts() {
        let turn = Turn::new("", "");
        assert_eq!(encode_document(&turn), "User: \nBot: ");
        assert_eq!(decode_document("User: \nBot: ").unwrap(), turn);
    }

    #[test]
    fn test_decode_rejects_wrong_line_count() {
        assert_eq!(
            decode_document("User: hi\nBot: hello\nextra"),
            Err(FormatError::LineCount { found: 3 })
        );
        assert_eq!(
            decode_document("User: hi"),
            Err(FormatError::LineCount { found: 1 })
        );
    }

    #[test]
    fn test_decode_rejects_missing_label() {
        let err = decode_document("Human: hi\nBot: hello").unwrap_err();
        assert!(matches!(err, FormatError::MissingLabel { ref label, .. } if label == "User"));
    }

    #[test]
    fn test_decode_rejects_dangling_escape() {
        let err = decode_document("User: hi\\\nBot: hello").unwrap_err();
        assert_eq!(
            err,
            FormatError::InvalidEscape {
                sequence: "\\".to_string()
            }
        );
        let err = decode_document("User: \\t\nBot: hello").unwrap_err();
        assert_eq!(
            err,
            FormatError::InvalidEscape {
                sequence: "\\t".to_string()
            }
        );
    }
}
