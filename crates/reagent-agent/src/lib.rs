//! Reagent agent — the reasoning/acting core.
//!
//! This crate contains:
//! - **tools**: Tool trait, registry, and the built-in tools (shell,
//!   filesystem, search, calculator)
//! - **agent**: the `ReactAgent` loop driving model queries and tool dispatch
//! - **router**: the single-shot classifier that picks a specialization
//!   before delegating to a fresh agent

pub mod agent;
pub mod router;
pub mod tools;

pub use agent::{AgentSettings, ReactAgent};
pub use router::{Category, Router};
pub use tools::{Tool, ToolRegistry};
