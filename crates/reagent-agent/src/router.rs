//! Router — classify a task, then hand it to a specialized agent.
//!
//! Classification is a single cheap LLM call (no tools, low temperature,
//! a handful of tokens). The label picks a specialization paragraph; a
//! fresh `ReactAgent` carrying that paragraph then runs the task. Labels
//! the model invents fall back to the general category.

use std::sync::Arc;

use reagent_core::types::Message;
use reagent_providers::{LlmProvider, LlmRequestConfig};
use tracing::{debug, info};

use crate::agent::{AgentSettings, ReactAgent};

const CLASSIFY_PROMPT: &str = "Classify the user's task into exactly one category. \
    Reply with a single word, nothing else.\n\n\
    Categories:\n\
    - explore: finding, listing, or searching files and directories\n\
    - code: reading, writing, or modifying source code\n\
    - bash: running shell commands or system operations\n\
    - general: anything else (questions, math, conversation)";

// ─────────────────────────────────────────────
// Category
// ─────────────────────────────────────────────

/// Task categories the router distinguishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    Explore,
    Code,
    Bash,
    General,
}

impl Category {
    /// Parse a classifier label. Unknown or empty labels map to `General`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "explore" => Category::Explore,
            "code" => Category::Code,
            "bash" => Category::Bash,
            _ => Category::General,
        }
    }

    /// The canonical label for this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Explore => "explore",
            Category::Code => "code",
            Category::Bash => "bash",
            Category::General => "general",
        }
    }

    /// The specialization paragraph given to the delegated agent.
    pub fn specialization(&self) -> &'static str {
        match self {
            Category::Explore => {
                "You are a file exploration specialist. Prefer list_dir, \
                 read_file, and search_files to navigate directory trees, find \
                 files, and summarize project structure."
            }
            Category::Code => {
                "You are an expert software engineer. Read code with read_file \
                 before changing it, and write clear, working code with \
                 write_file."
            }
            Category::Bash => {
                "You are a systems administration specialist. Use the bash tool \
                 carefully and check command output before concluding."
            }
            Category::General => {
                "You are a knowledgeable generalist assistant. Answer directly, \
                 using any of your tools only when they actually help."
            }
        }
    }
}

// ─────────────────────────────────────────────
// Router
// ─────────────────────────────────────────────

/// Classifies tasks and delegates each to a fresh specialized agent.
pub struct Router {
    provider: Arc<dyn LlmProvider>,
    settings: AgentSettings,
}

impl Router {
    pub fn new(provider: Arc<dyn LlmProvider>, settings: AgentSettings) -> Self {
        Self { provider, settings }
    }

    /// Classify a task with a single no-tools LLM call.
    pub async fn classify(&self, task: &str) -> Category {
        let messages = vec![Message::system(CLASSIFY_PROMPT), Message::user(task)];
        // Classification wants determinism, not creativity
        let config = LlmRequestConfig {
            max_tokens: 10,
            temperature: 0.1,
        };

        let response = self
            .provider
            .chat(&messages, None, &self.settings.model, &config)
            .await;

        let label = response.content.unwrap_or_default();
        let category = Category::from_label(&label);
        debug!(label = %label.trim(), category = category.as_str(), "classified task");
        category
    }

    /// Classify the task, then run it on a fresh agent specialized for the
    /// category. Each routed task starts with empty history.
    pub async fn route(&self, task: &str) -> String {
        self.route_with_category(task).await.1
    }

    /// Like [`route`](Self::route), but also returns the category that was
    /// used. Classification happens exactly once per task.
    pub async fn route_with_category(&self, task: &str) -> (Category, String) {
        let category = self.classify(task).await;
        info!(category = category.as_str(), "routing task");

        let mut agent = ReactAgent::new(self.provider.clone(), self.settings.clone())
            .with_specialization(category.specialization());
        let answer = agent.run(task).await;
        (category, answer)
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
