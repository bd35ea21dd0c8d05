//! Interactive chat loop for the `chat` subcommand.
//!
//! Reads lines from stdin until EOF or /quit. Lines starting with `/` are commands;
//! anything else is one turn sent through the session.

use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use chat_core::{ChatError, ChatSession, ErrorKind};
use memory::StoredSession;

/// Prints help message for interactive chat commands.
pub fn print_help() {
    println!("Available commands:");
    println!("  /new            - Archive this chat and start a new one");
    println!("  /sessions       - List archived chats");
    println!("  /clear-all      - Delete all archived chats");
    println!("  /buffer         - Show the conversation buffer");
    println!("  /memory         - Show how many turns the retrieval index holds");
    println!("  /export <path>  - Save the current transcript to a file");
    println!("  /help           - Show this help message");
    println!("  /quit, /exit    - Exit the chat");
    println!("  Any other text is sent to the model.");
}

fn print_error(e: &ChatError) {
    if let Some(reply) = e.unrecorded_reply() {
        println!("{}", reply);
        eprintln!("(This exchange was not saved to memory)");
    }
    eprintln!("Error: {}", e);
    match e.kind() {
        ErrorKind::Upstream => eprintln!("(The API request failed; you can send the message again)"),
        ErrorKind::Format => eprintln!("(A stored memory is malformed; try /new or another collection)"),
        _ => {}
    }
}

fn print_stored_session(index: usize, session: &StoredSession) {
    println!(
        "--- Conversation {} ({} turn(s), archived {}) ---",
        index + 1,
        session.turn_count(),
        session.archived_at().format("%Y-%m-%d %H:%M:%S")
    );
    for line in session.lines() {
        println!("{}", line);
    }
}

/// Writes the transcript to `path`; returns the number of bytes written.
pub fn export_transcript(session: &ChatSession, path: &Path) -> Result<usize> {
    let transcript = session.transcript();
    std::fs::write(path, &transcript)
        .with_context(|| format!("Failed to write transcript to {}", path.display()))?;
    Ok(transcript.len())
}

/// Handles one slash command. Returns `false` when the loop should stop.
async fn handle_command(session: &mut ChatSession, line: &str) -> Result<bool> {
    let (command, arg) = match line.split_once(char::is_whitespace) {
        Some((command, arg)) => (command, arg.trim()),
        None => (line, ""),
    };

    match command {
        "/help" => print_help(),
        "/quit" | "/exit" => {
            println!("Goodbye!");
            return Ok(false);
        }
        "/new" => match session.new_chat() {
            Some(archived) => println!(
                "Started a new chat ({} turn(s) archived).",
                archived.turn_count()
            ),
            None => println!("Started a new chat."),
        },
        "/sessions" => {
            let sessions = session.stored_sessions();
            if sessions.is_empty() {
                println!("No archived chats.");
            }
            for (i, stored) in sessions.iter().enumerate() {
                print_stored_session(i, stored);
            }
        }
        "/clear-all" => {
            let removed = session.clear_stored_sessions();
            println!("Deleted {} archived chat(s).", removed);
        }
        "/buffer" => {
            let preview = session.buffer_preview();
            if preview.is_empty() {
                println!("(buffer is empty)");
            } else {
                println!("{}", preview);
            }
        }
        "/memory" => match session.memory_count().await {
            Ok(Some(count)) => println!("Retrieval index holds {} turn(s).", count),
            Ok(None) => println!("Buffer mode: no retrieval index."),
            Err(e) => print_error(&e),
        },
        "/export" => {
            if arg.is_empty() {
                println!("Usage: /export <path>");
            } else {
                match export_transcript(session, Path::new(arg)) {
                    Ok(bytes) => println!("Saved transcript to {} ({} bytes).", arg, bytes),
                    Err(e) => eprintln!("Error: {:#}", e),
                }
            }
        }
        other => println!("Unknown command {}; type /help.", other),
    }
    Ok(true)
}

/// Interactive chat loop: read lines from stdin until EOF or /quit.
pub async fn run_chat_loop(mut session: ChatSession) -> Result<()> {
    println!(
        "MemoryBot ({} memory, model {}). Type /help for commands, /quit to exit.",
        session.mode(),
        session.model()
    );
    println!();

    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        let n = io::stdin().read_line(&mut line)?;
        if n == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if line.starts_with('/') {
            if !handle_command(&mut session, line).await? {
                break;
            }
            continue;
        }

        match session.submit(line).await {
            Ok(Some(reply)) => println!("{}", reply),
            Ok(None) => {}
            Err(e) => print_error(&e),
        }
        println!();
    }
    Ok(())
}
