//! LLM Provider trait — the model-service boundary.
//!
//! The service is a black box: conversation in, either final text or tool
//! requests out. The main implementation is `HttpProvider` in
//! `http_provider.rs`, which covers any OpenAI-compatible API.

use async_trait::async_trait;
use reagent_core::types::{LlmResponse, Message, ToolDefinition};

/// Configuration passed to each LLM call.
#[derive(Clone, Debug)]
pub struct LlmRequestConfig {
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Sampling temperature (0.0 – 2.0).
    pub temperature: f64,
}

impl Default for LlmRequestConfig {
    fn default() -> Self {
        Self {
            max_tokens: 4096,
            temperature: 0.7,
        }
    }
}

/// Trait that all LLM providers must implement.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Send a chat completion request.
    ///
    /// # Arguments
    /// * `messages` — Conversation history in OpenAI format.
    /// * `tools`    — Optional list of tool definitions the LLM can call.
    /// * `model`    — Model identifier (e.g. `"moonshot-v1-8k"`).
    /// * `config`   — Temperature, max_tokens.
    ///
    /// # Returns
    /// An `LlmResponse` with content and/or tool calls.
    /// On API errors, returns `LlmResponse::error(...)` instead of propagating.
    async fn chat(
        &self,
        messages: &[Message],
        tools: Option<&[ToolDefinition]>,
        model: &str,
        config: &LlmRequestConfig,
    ) -> LlmResponse;

    /// The default model for this provider instance.
    fn default_model(&self) -> &str;

    /// Display name for logging.
    fn display_name(&self) -> &str;
}
