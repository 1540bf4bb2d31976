//! Reagent CLI — entry point.
//!
//! # Commands
//!
//! - `reagent` — interactive menu
//! - `reagent run -m MESSAGE` — run one task on a single agent
//! - `reagent route -m MESSAGE` — classify the task, delegate to a specialist
//! - `reagent chat` — interactive multi-turn chat

mod helpers;
mod menu;
mod repl;

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};

use reagent_agent::{AgentSettings, ReactAgent, Router};
use reagent_core::config::{load_config, Config};
use reagent_providers::HttpProvider;

// ─────────────────────────────────────────────
// CLI definition
// ─────────────────────────────────────────────

/// ⚗️ Reagent — a ReAct agent with tools, in Rust
#[derive(Parser)]
#[command(name = "reagent", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable debug logging
    #[arg(long, global = true, default_value_t = false)]
    logs: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single task on one agent and print the answer
    Run {
        /// The task to run
        #[arg(short, long)]
        message: String,
    },

    /// Classify the task and run it on a specialized agent
    Route {
        /// The task to route
        #[arg(short, long)]
        message: String,
    },

    /// Interactive multi-turn chat with a single agent
    Chat,
}

// ─────────────────────────────────────────────
// Entrypoint
// ─────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.logs);

    let config = load_config(None);
    let provider = build_provider(&config)?;
    let settings = AgentSettings::from(&config.agent);

    match cli.command {
        Some(Commands::Run { message }) => {
            let mut agent = ReactAgent::new(provider, settings);
            let answer = agent.run(&message).await;
            helpers::print_response(&answer);
        }
        Some(Commands::Route { message }) => {
            let router = Router::new(provider, settings);
            let answer = router.route(&message).await;
            helpers::print_response(&answer);
        }
        Some(Commands::Chat) => {
            let mut agent = ReactAgent::new(provider, settings);
            repl::run(&mut agent).await?;
        }
        None => {
            menu::run(provider, settings).await?;
        }
    }

    Ok(())
}

/// Build the HTTP provider from configuration, refusing to start without
/// an API key.
fn build_provider(config: &Config) -> Result<Arc<HttpProvider>> {
    if !config.provider.is_configured() {
        anyhow::bail!(
            "No API key configured.\n\
             Set the REAGENT_PROVIDER__API_KEY environment variable, or add\n\
             \"apiKey\" under \"provider\" in ~/.reagent/config.json"
        );
    }
    Ok(Arc::new(HttpProvider::new(
        &config.provider,
        &config.agent.model,
    )))
}

/// Initialize tracing/logging.
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("reagent=debug,info")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
