//! Tool modules for the Reagent agent.

pub mod base;
pub mod calc;
pub mod filesystem;
pub mod registry;
pub mod search;
pub mod shell;

pub use base::{optional_string, require_string, Tool};
pub use registry::ToolRegistry;
