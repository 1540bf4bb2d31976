//! Generic HTTP-based LLM provider for OpenAI-compatible APIs.
//!
//! Makes direct `reqwest` calls to a `/chat/completions` endpoint.
//! Covers Moonshot/Kimi, OpenAI, DeepSeek, vLLM, and any other service
//! speaking the same wire format.

use async_trait::async_trait;
use tracing::{debug, error};

use reagent_core::config::ProviderConfig;
use reagent_core::types::{
    ChatCompletionRequest, ChatCompletionResponse, LlmResponse, Message, ToolDefinition,
};

use crate::traits::{LlmProvider, LlmRequestConfig};

// ─────────────────────────────────────────────
// HttpProvider
// ─────────────────────────────────────────────

/// A generic LLM provider that talks to any OpenAI-compatible HTTP API.
pub struct HttpProvider {
    /// HTTP client (shared, connection-pooled).
    client: reqwest::Client,
    /// API base URL (e.g. `"https://api.moonshot.cn/v1"`).
    api_base: String,
    /// API key for Bearer authentication.
    api_key: String,
    /// Default model for this provider instance.
    default_model: String,
}

impl std::fmt::Debug for HttpProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpProvider")
            .field("api_base", &self.api_base)
            .field("default_model", &self.default_model)
            .finish()
    }
}

impl HttpProvider {
    /// Create a new HttpProvider.
    ///
    /// # Arguments
    /// * `config` — API key and base URL.
    /// * `model`  — The default model to use.
    pub fn new(config: &ProviderConfig, model: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .expect("Failed to build HTTP client");

        HttpProvider {
            client,
            api_base: config.api_base.clone(),
            api_key: config.api_key.clone(),
            default_model: model.to_string(),
        }
    }

    /// Build the full chat completions URL.
    fn completions_url(&self) -> String {
        let base = self.api_base.trim_end_matches('/');
        format!("{}/chat/completions", base)
    }
}

#[async_trait]
impl LlmProvider for HttpProvider {
    async fn chat(
        &self,
        messages: &[Message],
        tools: Option<&[ToolDefinition]>,
        model: &str,
        config: &LlmRequestConfig,
    ) -> LlmResponse {
        debug!(
            model = %model,
            messages = messages.len(),
            tools = tools.map_or(0, |t| t.len()),
            "Calling LLM"
        );

        let request_body = ChatCompletionRequest {
            model: model.to_string(),
            messages: messages.to_vec(),
            tools: tools.map(|t| t.to_vec()),
            // The service decides autonomously whether to call a tool
            tool_choice: tools.map(|_| "auto".to_string()),
            max_tokens: Some(config.max_tokens),
            temperature: Some(config.temperature),
        };

        let url = self.completions_url();

        let result = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await;

        let response = match result {
            Ok(resp) => resp,
            Err(e) => {
                error!(error = %e, "HTTP request failed");
                return LlmResponse::error(format!("Error calling LLM: {}", e));
            }
        };

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            error!(status = %status, body = %error_text, "API error");
            return LlmResponse::error(format!("Error calling LLM: {} — {}", status, error_text));
        }

        match response.json::<ChatCompletionResponse>().await {
            Ok(chat_resp) => {
                let llm_resp: LlmResponse = chat_resp.into();
                debug!(
                    has_content = llm_resp.content.is_some(),
                    tool_calls = llm_resp.tool_calls.len(),
                    finish_reason = llm_resp.finish_reason.as_deref().unwrap_or("?"),
                    "LLM response received"
                );
                llm_resp
            }
            Err(e) => {
                error!(error = %e, "Failed to parse LLM response");
                LlmResponse::error(format!("Error parsing LLM response: {}", e))
            }
        }
    }

    fn default_model(&self) -> &str {
        &self.default_model
    }

    fn display_name(&self) -> &str {
        "OpenAI-compatible HTTP"
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
