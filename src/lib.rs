//! # agentry — composable LLM agent abstractions
//!
//! An agent combines a language model, a prompt strategy, and a set of
//! callable tools to produce decisions or actions. This crate defines that
//! abstraction: how an agent is typed, how it is composed from
//! interchangeable model backends and prompt templates, how tools are
//! attached, and how a declared [`AgentType`] is dispatched to a concrete
//! runnable implementation.
//!
//! ## Overview
//!
//! The crate is a library-level abstraction — it ships no network client and
//! no server. Model invocation is behind the [`ModelBackend`] trait; tools
//! are behind [`ToolCapability`]. One concrete reasoning strategy is
//! included, the plan-work-solve [`RewooAgent`], and it is the one kind the
//! default type registry resolves.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use agentry::{
//!     AgentType, BaseAgent, Binding, ModelBackend, RewooAgent,
//!     tools::{Calculator, Clock},
//! };
//! use agentry::agents::Agent;
//! use std::sync::Arc;
//!
//! # async fn demo(backend: Arc<dyn ModelBackend>) -> agentry::Result<()> {
//! let base = BaseAgent::builder("researcher", AgentType::Rewoo)
//!     .description("Answers questions by planning tool calls")
//!     .backend(Binding::single(backend))
//!     .tool(Arc::new(Calculator))
//!     .tool(Arc::new(Clock))
//!     .build()?;
//!
//! let agent = RewooAgent::new(base);
//! let output = agent.run("What is 17 * 23, and what time is it?").await?;
//! println!("{}", output.text);
//! # Ok(())
//! # }
//! ```
//!
//! ### Registry dispatch
//!
//! ```rust,ignore
//! use agentry::{agents, AgentType, BaseAgent};
//!
//! let constructor = agents::resolve(AgentType::Rewoo)?;
//! let base = BaseAgent::builder("planner", AgentType::Rewoo).build()?;
//! let agent = constructor(base, &Default::default())?;
//! ```
//!
//! ### Manifest-driven assembly
//!
//! ```rust,ignore
//! use agentry::{AgentFactory, AgentManifest, ToolRegistry};
//! use std::sync::Arc;
//!
//! let manifest = AgentManifest::load("agents.toml")?;
//! let factory = AgentFactory::builder()
//!     .with_manifest(manifest)
//!     .with_backend("default", backend)
//!     .with_tool_registry(Arc::new(ToolRegistry::with_default_tools()))
//!     .build()?;
//!
//! let agent = factory.create_agent("researcher")?;
//! ```
//!
//! ## Modules
//!
//! - [`agents`] - The agent contract, base entity, type registry, ReWOO
//!   strategy, and manifest factory
//! - [`llm`] - The model backend trait
//! - [`prompt`] - Prompt templates with `{var}` placeholders
//! - [`tools`] - Tool contract, registry, and built-in tools
//! - [`types`] - Core types (agent kinds, bindings, outputs, errors)
//! - [`utils`] - TOML manifest loading

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

/// Agent abstractions: contract, base entity, registry, strategies, factory.
pub mod agents;
/// Model backend trait.
pub mod llm;
/// Prompt template rendering.
pub mod prompt;
/// Tool definitions and registry.
pub mod tools;
/// Core types (agent kinds, bindings, outputs, errors).
pub mod types;
/// Configuration utilities (TOML manifests).
pub mod utils;

// Re-export commonly used types
pub use agents::{
    Agent, AgentFactory, AgentFactoryBuilder, AgentTypeRegistry, BaseAgent, BaseAgentBuilder,
    RewooAgent, ToolSet, ValidationPolicy,
};
pub use llm::ModelBackend;
pub use prompt::PromptTemplate;
pub use tools::{ToolCapability, ToolRegistry};
pub use types::{AgentError, AgentOutput, AgentType, Binding, ReasoningStep, Result, ToolDefinition};
pub use utils::toml_config::{AgentManifest, ConfigError};
