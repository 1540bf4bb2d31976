//! ReactAgent — the reasoning loop.
//!
//! Each step sends the conversation to the LLM with the tool declarations
//! attached. If the model answers with tool calls, every call is executed
//! and its result appended as a tool message before the next query; if it
//! answers with text, that text is the final answer. The loop gives up
//! after a configurable number of iterations.

use std::collections::HashMap;
use std::sync::Arc;

use reagent_core::config::AgentConfig;
use reagent_core::types::Message;
use reagent_core::utils::truncate_string;
use reagent_providers::{LlmProvider, LlmRequestConfig};
use tracing::{debug, info};

use crate::tools::calc::CalculatorTool;
use crate::tools::filesystem::{ListDirTool, ReadFileTool, WriteFileTool};
use crate::tools::search::SearchFilesTool;
use crate::tools::shell::BashTool;
use crate::tools::ToolRegistry;

/// Base system prompt for the reasoning loop. The tool catalog and optional
/// specialization are appended at construction time.
const BASE_PROMPT: &str = "You are a helpful AI assistant that solves tasks step by step.\n\n\
    Work in a loop of Thought, Action, Observation:\n\
    1. Think about what the task needs.\n\
    2. If a tool would help, call it and read its result.\n\
    3. Repeat until you can answer, then reply with the final answer as plain text.\n\n\
    Tool results that start with 'Error:' describe a failure — adjust your \
    approach and try again rather than giving up.";

// ─────────────────────────────────────────────
// Settings
// ─────────────────────────────────────────────

/// Runtime settings for an agent instance.
#[derive(Clone, Debug)]
pub struct AgentSettings {
    /// Model identifier sent to the provider.
    pub model: String,
    /// Maximum reasoning iterations before giving up.
    pub max_iterations: usize,
    /// Log each step at info level instead of debug.
    pub verbose: bool,
    /// Per-request generation parameters.
    pub request: LlmRequestConfig,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            model: "moonshot-v1-8k".to_string(),
            max_iterations: 10,
            verbose: true,
            request: LlmRequestConfig::default(),
        }
    }
}

impl From<&AgentConfig> for AgentSettings {
    fn from(cfg: &AgentConfig) -> Self {
        Self {
            model: cfg.model.clone(),
            max_iterations: cfg.max_iterations as usize,
            verbose: cfg.verbose,
            request: LlmRequestConfig {
                max_tokens: cfg.max_tokens,
                temperature: cfg.temperature,
            },
        }
    }
}

// ─────────────────────────────────────────────
// ReactAgent
// ─────────────────────────────────────────────

/// An agent that reasons in a loop, calling tools until it has an answer.
pub struct ReactAgent {
    provider: Arc<dyn LlmProvider>,
    settings: AgentSettings,
    tools: ToolRegistry,
    specialization: Option<String>,
    messages: Vec<Message>,
}

impl ReactAgent {
    /// Create an agent with the default tool set.
    pub fn new(provider: Arc<dyn LlmProvider>, settings: AgentSettings) -> Self {
        Self::with_registry(provider, settings, Self::default_registry())
    }

    /// Create an agent with a custom tool registry.
    pub fn with_registry(
        provider: Arc<dyn LlmProvider>,
        settings: AgentSettings,
        tools: ToolRegistry,
    ) -> Self {
        Self {
            provider,
            settings,
            tools,
            specialization: None,
            messages: Vec::new(),
        }
    }

    /// Prepend a specialization paragraph to the system prompt.
    pub fn with_specialization(mut self, specialization: impl Into<String>) -> Self {
        self.specialization = Some(specialization.into());
        self
    }

    /// The standard tool set: shell, file read/write, directory listing,
    /// file search, calculator.
    pub fn default_registry() -> ToolRegistry {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(BashTool::default()));
        registry.register(Arc::new(ReadFileTool));
        registry.register(Arc::new(WriteFileTool));
        registry.register(Arc::new(ListDirTool));
        registry.register(Arc::new(SearchFilesTool));
        registry.register(Arc::new(CalculatorTool));
        registry
    }

    /// Build the full system prompt: specialization, base instructions,
    /// then the tool catalog.
    fn system_prompt(&self) -> String {
        let mut prompt = String::new();
        if let Some(specialization) = &self.specialization {
            prompt.push_str(specialization);
            prompt.push_str("\n\n");
        }
        prompt.push_str(BASE_PROMPT);
        if !self.tools.is_empty() {
            prompt.push_str("\n\nAvailable tools:\n");
            for (name, description) in self.tools.catalog() {
                prompt.push_str(&format!("- {name}: {description}\n"));
            }
        }
        prompt
    }

    /// Run a single task on a fresh conversation.
    ///
    /// Previous history is discarded. The answer is returned but not kept
    /// in history; use [`chat`](Self::chat) for multi-turn conversations.
    pub async fn run(&mut self, task: &str) -> String {
        self.messages = vec![Message::system(self.system_prompt()), Message::user(task)];
        match self.drive().await {
            Some(answer) => answer,
            None => self.exhaustion_warning(),
        }
    }

    /// Continue a multi-turn conversation.
    ///
    /// History persists across calls; the system prompt is seeded on the
    /// first turn only. The assistant answer is appended to history so the
    /// next turn sees it.
    pub async fn chat(&mut self, user_message: &str) -> String {
        if self.messages.is_empty() {
            self.messages.push(Message::system(self.system_prompt()));
        }
        self.messages.push(Message::user(user_message));
        match self.drive().await {
            Some(answer) => {
                self.messages.push(Message::assistant(answer.clone()));
                answer
            }
            None => self.exhaustion_warning(),
        }
    }

    /// Clear conversation history.
    pub fn reset(&mut self) {
        self.messages.clear();
    }

    /// The conversation history so far.
    pub fn history(&self) -> &[Message] {
        &self.messages
    }

    /// The agent's tool registry.
    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    fn exhaustion_warning(&self) -> String {
        format!(
            "Warning: reached maximum iterations ({}) without completing the task",
            self.settings.max_iterations
        )
    }

    /// The loop itself. Returns `None` when the iteration ceiling is hit
    /// before the model produces a final text answer.
    async fn drive(&mut self) -> Option<String> {
        let definitions = self.tools.definitions();
        let tools = if definitions.is_empty() {
            None
        } else {
            Some(definitions.as_slice())
        };

        for iteration in 1..=self.settings.max_iterations {
            if self.settings.verbose {
                info!(iteration, "agent step");
            } else {
                debug!(iteration, "agent step");
            }

            let response = self
                .provider
                .chat(
                    &self.messages,
                    tools,
                    &self.settings.model,
                    &self.settings.request,
                )
                .await;

            if !response.has_tool_calls() {
                let answer = match response.content {
                    Some(text) if !text.trim().is_empty() => text,
                    _ => "(no answer)".to_string(),
                };
                return Some(answer);
            }

            self.messages.push(Message::assistant_tool_calls(
                response.content.clone(),
                response.tool_calls.clone(),
            ));

            // Every tool call gets exactly one tool message with its id,
            // even when the tool is unknown or its arguments are malformed.
            for call in &response.tool_calls {
                let name = &call.function.name;
                let params: HashMap<String, serde_json::Value> =
                    serde_json::from_str(&call.function.arguments).unwrap_or_default();

                if self.settings.verbose {
                    info!(tool = %name, args = %call.function.arguments, "tool call");
                } else {
                    debug!(tool = %name, args = %call.function.arguments, "tool call");
                }

                let result = self.tools.execute(name, params).await;
                if self.settings.verbose {
                    info!(tool = %name, result = %truncate_string(&result, 200), "tool result");
                } else {
                    debug!(tool = %name, result = %truncate_string(&result, 200), "tool result");
                }
                self.messages.push(Message::tool_result(&call.id, result));
            }
        }

        None
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
