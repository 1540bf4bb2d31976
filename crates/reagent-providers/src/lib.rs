//! Reagent providers — the model-service boundary.
//!
//! The `LlmProvider` trait abstracts the chat-completion service; the
//! `HttpProvider` implementation talks to any OpenAI-compatible
//! `/chat/completions` endpoint.

pub mod http_provider;
pub mod traits;

pub use http_provider::HttpProvider;
pub use traits::{LlmProvider, LlmRequestConfig};
