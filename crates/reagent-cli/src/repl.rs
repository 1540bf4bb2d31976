//! Interactive chat loop.
//!
//! Uses `rustyline` for readline-style editing with persistent history.

use anyhow::Result;
use rustyline::config::Configurer;
use rustyline::history::DefaultHistory;
use rustyline::{DefaultEditor, Editor};
use tracing::debug;

use reagent_agent::ReactAgent;

use crate::helpers;

/// Exit commands (case-insensitive match).
const EXIT_COMMANDS: &[&str] = &["exit", "quit", "/exit", "/quit", ":q"];

/// Commands that clear conversation history.
const RESET_COMMANDS: &[&str] = &["reset", "/reset"];

/// Run the interactive chat loop on the given agent.
pub async fn run(agent: &mut ReactAgent) -> Result<()> {
    helpers::print_banner();

    let mut editor = create_editor()?;

    loop {
        let input = match editor.readline("You: ") {
            Ok(line) => line,
            Err(rustyline::error::ReadlineError::Interrupted) => {
                // Ctrl-C — exit cleanly
                break;
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                // Ctrl-D — exit cleanly
                break;
            }
            Err(e) => {
                eprintln!("Input error: {e}");
                break;
            }
        };

        let trimmed = input.trim();
        if trimmed.is_empty() {
            continue;
        }

        if is_exit_command(trimmed) {
            println!("\nGoodbye! 👋");
            break;
        }

        if is_reset_command(trimmed) {
            agent.reset();
            println!("Conversation history cleared.");
            continue;
        }

        let _ = editor.add_history_entry(&input);

        debug!(input = trimmed, "processing input");
        helpers::print_thinking();

        let response = agent.chat(trimmed).await;
        helpers::clear_thinking();
        helpers::print_response(&response);
    }

    save_history(&mut editor);

    Ok(())
}

/// Create a rustyline editor with history.
fn create_editor() -> Result<Editor<(), DefaultHistory>> {
    let mut editor = DefaultEditor::new()?;
    editor.set_max_history_size(1000)?;

    let history_path = history_path();
    if history_path.exists() {
        let _ = editor.load_history(&history_path);
        debug!("loaded chat history from {}", history_path.display());
    }

    Ok(editor)
}

/// Save history to disk.
fn save_history(editor: &mut Editor<(), DefaultHistory>) {
    let path = history_path();
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    if let Err(e) = editor.save_history(&path) {
        debug!("failed to save history: {e}");
    }
}

/// Path to the history file (`~/.reagent/history/cli_history`).
fn history_path() -> std::path::PathBuf {
    dirs_next::home_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join(".reagent")
        .join("history")
        .join("cli_history")
}

/// Check if input is an exit command.
fn is_exit_command(input: &str) -> bool {
    let lower = input.to_lowercase();
    EXIT_COMMANDS.contains(&lower.as_str())
}

/// Check if input is a reset command.
fn is_reset_command(input: &str) -> bool {
    let lower = input.to_lowercase();
    RESET_COMMANDS.contains(&lower.as_str())
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
