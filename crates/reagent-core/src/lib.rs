//! Reagent core — shared types, configuration, and utilities.
//!
//! This crate contains:
//! - **types**: OpenAI-format messages, tool calls, tool definitions, and
//!   chat-completion request/response wire types
//! - **config**: typed config schema, JSON loader, and env var overrides
//! - **utils**: path expansion and small string helpers

pub mod config;
pub mod types;
pub mod utils;
