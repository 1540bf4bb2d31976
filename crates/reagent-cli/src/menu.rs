//! Interactive menu — the default entry when no subcommand is given.
//!
//! Numbered choices; invalid input re-prompts, and errors inside a choice
//! never end the session.

use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use rustyline::DefaultEditor;

use reagent_agent::{AgentSettings, ReactAgent, Router};
use reagent_providers::LlmProvider;

use crate::{helpers, repl};

/// Demo tasks for the single-agent choice.
const AGENT_DEMO_TASKS: &[&str] = &[
    "List the files in the current directory, then tell me how many there are.",
    "What is 15% of 240?",
];

/// Demo tasks for the router choice — one per likely category.
const ROUTER_DEMO_TASKS: &[&str] = &[
    "Find all Rust source files in the current directory tree",
    "Run 'uname -a' and summarize what it says about this machine",
];

/// Run the menu loop until the user exits.
pub async fn run(provider: Arc<dyn LlmProvider>, settings: AgentSettings) -> Result<()> {
    helpers::print_banner();
    let mut editor = DefaultEditor::new()?;

    loop {
        print_menu();

        let input = match editor.readline("> ") {
            Ok(line) => line,
            Err(rustyline::error::ReadlineError::Interrupted)
            | Err(rustyline::error::ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("Input error: {e}");
                break;
            }
        };

        match input.trim() {
            "1" => run_agent_demo(provider.clone(), settings.clone()).await,
            "2" => run_router_demo(provider.clone(), settings.clone()).await,
            "3" => {
                let mut agent = ReactAgent::new(provider.clone(), settings.clone());
                repl::run(&mut agent).await?;
            }
            "4" => break,
            "" => continue,
            other => {
                println!("{}", format!("'{other}' is not an option — choose 1-4.").yellow());
            }
        }
    }

    println!("\nGoodbye! 👋");
    Ok(())
}

fn print_menu() {
    println!();
    println!("{}", "What would you like to do?".bold());
    println!("  1) Run a demo task on a single agent");
    println!("  2) Route demo tasks through the multi-agent router");
    println!("  3) Interactive chat");
    println!("  4) Exit");
}

async fn run_agent_demo(provider: Arc<dyn LlmProvider>, settings: AgentSettings) {
    let mut agent = ReactAgent::new(provider, settings);
    for task in AGENT_DEMO_TASKS {
        println!("\n{} {task}", "Task:".bold());
        let answer = agent.run(task).await;
        helpers::print_response(&answer);
    }
}

async fn run_router_demo(provider: Arc<dyn LlmProvider>, settings: AgentSettings) {
    let router = Router::new(provider, settings);
    for task in ROUTER_DEMO_TASKS {
        println!("\n{} {task}", "Task:".bold());
        let (category, answer) = router.route_with_category(task).await;
        println!("{} {}", "Category:".bold(), category.as_str().cyan());
        helpers::print_response(&answer);
    }
}
