//! Agent Abstractions
//!
//! An agent combines a model backend, a prompt strategy, and a set of tools
//! to decide or take actions. This module holds the pieces that make that
//! composable:
//!
//! - [`base`] — the [`BaseAgent`] entity every concrete agent embeds
//! - [`registry`] — dispatch from a declared [`AgentType`] to a constructor
//! - [`rewoo`] — the plan-work-solve strategy, the one kind the default
//!   registry resolves
//! - [`factory`] — assembly of ready-to-run agents from a TOML manifest
//!
//! The [`Agent`] trait below is the execution contract: concrete strategies
//! embed a `BaseAgent`, expose it through `base()`/`base_mut()`, and
//! implement `run`.

pub mod base;
pub mod factory;
pub mod registry;
pub mod rewoo;

use crate::tools::ToolCapability;
use crate::types::{AgentOutput, AgentType, Result};
use async_trait::async_trait;
use std::sync::Arc;

// Re-export commonly used types
pub use base::{BaseAgent, BaseAgentBuilder, ToolSet, ValidationPolicy};
pub use factory::{AgentFactory, AgentFactoryBuilder};
pub use registry::{
    default_registry, resolve, AgentConstructor, AgentParams, AgentTypeRegistry,
};
pub use rewoo::RewooAgent;

/// The contract every concrete agent satisfies.
///
/// Identity, bindings, and tools all live on the embedded [`BaseAgent`];
/// this trait adds the execution entry point. The provided methods delegate
/// the common reads and the tool-attachment mutation to the base so callers
/// can work against `dyn Agent` without knowing the concrete strategy.
#[async_trait]
pub trait Agent: Send + Sync {
    /// The embedded base entity.
    fn base(&self) -> &BaseAgent;

    /// Mutable access to the embedded base entity.
    fn base_mut(&mut self) -> &mut BaseAgent;

    /// Execute the agent against an instruction.
    async fn run(&self, instruction: &str) -> Result<AgentOutput>;

    /// The agent's name.
    fn name(&self) -> &str {
        self.base().name()
    }

    /// The agent's description, as shown to orchestrating models.
    fn description(&self) -> &str {
        self.base().description()
    }

    /// The declared agent kind.
    fn agent_type(&self) -> AgentType {
        self.base().agent_type()
    }

    /// Append tools to the agent's tool sequence (order-preserving, never
    /// deduplicating; an empty vector is a no-op).
    fn add_tools(&mut self, tools: Vec<Arc<dyn ToolCapability>>) {
        self.base_mut().add_tools(tools);
    }
}

impl std::fmt::Debug for dyn Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agent")
            .field("name", &self.name())
            .field("agent_type", &self.agent_type())
            .finish_non_exhaustive()
    }
}
