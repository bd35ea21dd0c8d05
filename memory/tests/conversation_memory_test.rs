//! Tests for ConversationMemory: ordering, rendering and archive-on-clear.

use memory::{ConversationMemory, Turn};

/// **Test: After N appends, render yields exactly N turns in append order.**
#[test]
fn render_after_n_appends_keeps_order() {
    for n in [0usize, 1, 2, 7] {
        let mut memory = ConversationMemory::new();
        for i in 0..n {
            memory.push(format!("q{i}"), format!("a{i}"));
        }

        assert_eq!(memory.len(), n);
        let lines = memory.render_lines();
        assert_eq!(lines.len(), 2 * n);
        for i in 0..n {
            assert_eq!(lines[2 * i], format!("User: q{i}"));
            assert_eq!(lines[2 * i + 1], format!("Bot: a{i}"));
        }
    }
}

/// **Test: render joins role-tagged lines with single newlines.**
#[test]
fn render_formats_alternating_lines() {
    let mut memory = ConversationMemory::new();
    memory.append(Turn::new("hi", "hello"));
    memory.append(Turn::new("how are you", "fine"));
    assert_eq!(
        memory.render(),
        "User: hi\nBot: hello\nUser: how are you\nBot: fine"
    );
    assert_eq!(memory.turns()[1], Turn::new("how are you", "fine"));
}

/// **Test: clear archives the buffer verbatim, empties it, and archives accumulate.**
#[test]
fn clear_archives_then_empties() {
    let mut memory = ConversationMemory::new();
    memory.push("a", "b");
    memory.push("c", "d");
    let expected_first = memory.render_lines();

    let archived = memory.clear().expect("non-empty buffer is archived").clone();
    assert_eq!(archived.lines(), expected_first.as_slice());
    assert!(memory.is_empty());
    assert_eq!(memory.render(), "");

    memory.push("e", "f");
    memory.clear();

    let sessions = memory.stored_sessions();
    assert_eq!(sessions.len(), 2);
    assert_eq!(sessions[0].lines(), expected_first.as_slice());
    assert_eq!(sessions[1].lines(), ["User: e", "Bot: f"]);
}

/// **Test: Clearing an empty buffer archives nothing.**
#[test]
fn clear_empty_buffer_is_noop() {
    let mut memory = ConversationMemory::new();
    assert!(memory.clear().is_none());
    assert!(memory.stored_sessions().is_empty());
}

/// **Test: clear_stored_sessions drops the archive but not the live buffer.**
#[test]
fn clear_stored_sessions_keeps_buffer() {
    let mut memory = ConversationMemory::new();
    memory.push("a", "b");
    memory.clear();
    memory.push("c", "d");

    assert_eq!(memory.clear_stored_sessions(), 1);
    assert!(memory.stored_sessions().is_empty());
    assert_eq!(memory.len(), 1);
}
