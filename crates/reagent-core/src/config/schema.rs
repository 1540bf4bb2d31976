//! Configuration schema — typed agent and provider settings.
//!
//! Hierarchy: `Config` → `AgentConfig`, `ProviderConfig`.
//!
//! JSON on disk uses **camelCase** keys; Rust uses snake_case.
//! We use `#[serde(rename_all = "camelCase")]` to handle the conversion.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────
// Root Config
// ─────────────────────────────────────────────

/// Root configuration — loaded from `~/.reagent/config.json` + env vars.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub agent: AgentConfig,
    pub provider: ProviderConfig,
}

// ─────────────────────────────────────────────
// Agent
// ─────────────────────────────────────────────

/// Agent settings. Fixed at agent construction; immutable for the
/// instance's lifetime.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AgentConfig {
    /// LLM model identifier.
    pub model: String,
    /// Maximum tokens to generate per response.
    pub max_tokens: u32,
    /// Sampling temperature (0.0 – 2.0).
    pub temperature: f64,
    /// Maximum reasoning/acting iterations before forced termination.
    pub max_iterations: u32,
    /// Log loop progress at info level instead of debug.
    pub verbose: bool,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            model: "moonshot-v1-8k".to_string(),
            max_tokens: 4096,
            temperature: 0.7,
            max_iterations: 10,
            verbose: true,
        }
    }
}

// ─────────────────────────────────────────────
// Provider
// ─────────────────────────────────────────────

/// Connection settings for the OpenAI-compatible model service.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProviderConfig {
    /// API key for Bearer authentication.
    pub api_key: String,
    /// Chat-completions API base URL.
    pub api_base: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base: "https://api.moonshot.cn/v1".to_string(),
        }
    }
}

impl ProviderConfig {
    /// Whether this provider has a configured API key.
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.agent.model, "moonshot-v1-8k");
        assert_eq!(config.agent.max_iterations, 10);
        assert_eq!(config.agent.max_tokens, 4096);
        assert!(config.agent.verbose);
        assert!(!config.provider.is_configured());
        assert_eq!(config.provider.api_base, "https://api.moonshot.cn/v1");
    }

    #[test]
    fn test_camel_case_round_trip() {
        let json = r#"{
            "agent": { "model": "gpt-4o", "maxIterations": 5, "maxTokens": 2048 },
            "provider": { "apiKey": "sk-test", "apiBase": "https://example.com/v1" }
        }"#;
        let config: Config = serde_json::from_str(json).unwrap();

        assert_eq!(config.agent.model, "gpt-4o");
        assert_eq!(config.agent.max_iterations, 5);
        assert_eq!(config.agent.max_tokens, 2048);
        // Unspecified fields keep their defaults
        assert_eq!(config.agent.temperature, 0.7);
        assert!(config.provider.is_configured());

        let out = serde_json::to_value(&config).unwrap();
        assert_eq!(out["agent"]["maxIterations"], 5);
        assert_eq!(out["provider"]["apiKey"], "sk-test");
    }

    #[test]
    fn test_is_configured() {
        let mut provider = ProviderConfig::default();
        assert!(!provider.is_configured());
        provider.api_key = "sk-abc".into();
        assert!(provider.is_configured());
    }
}
