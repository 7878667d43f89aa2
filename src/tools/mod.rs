//! Tool Capabilities
//!
//! Tools are what agents call upon while reasoning: named, invocable units
//! with a string-in/string-out contract ([`ToolCapability`]). The
//! [`registry`](crate::tools::registry) module provides shared lookup by
//! name; agents additionally carry their own ordered tool sequence.
//!
//! # Built-in tools
//!
//! - [`Calculator`] — arithmetic expression evaluation
//! - [`Clock`] — current UTC time in a few formats
//! - [`LlmTool`] — a model backend exposed as a tool
//! - [`AgentTool`] — a whole agent exposed as a tool to another orchestrator
//!
//! ```ignore
//! use agentry::{ToolRegistry, tools::Calculator};
//! use std::sync::Arc;
//!
//! let mut registry = ToolRegistry::new();
//! registry.register(Arc::new(Calculator));
//!
//! let answer = registry.invoke("calculate", "2 + 2 * 3").await?; // "8"
//! ```

/// Arithmetic expression evaluation.
pub mod calculator;
/// Current date and time.
pub mod clock;
/// Model backends and agents exposed as tools.
pub mod llm;
/// The tool contract and named registry.
pub mod registry;

pub use calculator::Calculator;
pub use clock::Clock;
pub use llm::{AgentTool, LlmTool};
pub use registry::{ToolCapability, ToolRegistry};
