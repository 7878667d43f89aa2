//! Agent Type Registry
//!
//! Maps declared [`AgentType`] values to constructors for the concrete types
//! that implement them. Declaring a kind and implementing it are separate
//! steps: the enumeration is always fully available, while this registry
//! decides which kinds can actually be dispatched in a given build.
//!
//! The process-wide [`default_registry`] is initialized lazily on first use
//! and registers exactly one constructor: [`AgentType::Rewoo`]. Embedders
//! that implement further kinds build their own [`AgentTypeRegistry`] and
//! register alongside or instead of the default table.

use crate::agents::base::BaseAgent;
use crate::agents::Agent;
use crate::types::{AgentError, AgentType, Result};
use std::collections::HashMap;
use std::sync::OnceLock;

/// Strategy-specific construction knobs, keyed by name.
///
/// Factories fill this from manifest extras; programmatic callers can pass
/// an empty map and rely on defaults.
pub type AgentParams = HashMap<String, serde_json::Value>;

/// Constructor turning a configured [`BaseAgent`] into a runnable agent.
pub type AgentConstructor = fn(BaseAgent, &AgentParams) -> Result<Box<dyn Agent>>;

/// Registry mapping agent kinds to their constructors.
pub struct AgentTypeRegistry {
    constructors: HashMap<AgentType, AgentConstructor>,
}

impl Default for AgentTypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentTypeRegistry {
    /// Create an empty registry: every resolution fails until something is
    /// registered.
    pub fn new() -> Self {
        Self {
            constructors: HashMap::new(),
        }
    }

    /// Create a registry with the built-in constructor table.
    ///
    /// Only [`AgentType::Rewoo`] is registered; the remaining declared kinds
    /// resolve to an "Unresolved agent type" error until an embedder
    /// registers constructors for them.
    pub fn with_default_constructors() -> Self {
        let mut registry = Self::new();
        registry.register(AgentType::Rewoo, crate::agents::rewoo::RewooAgent::construct);
        registry
    }

    /// Install (or replace) the constructor for a declared kind.
    pub fn register(&mut self, agent_type: AgentType, constructor: AgentConstructor) {
        tracing::debug!("Registering constructor for agent type '{}'", agent_type);
        self.constructors.insert(agent_type, constructor);
    }

    /// Resolve a declared kind to its constructor.
    ///
    /// Fails with [`AgentError::UnresolvedAgentType`] — naming the value —
    /// when no constructor is registered. Repeated resolution of the same
    /// value is idempotent.
    pub fn resolve(&self, agent_type: AgentType) -> Result<AgentConstructor> {
        self.constructors
            .get(&agent_type)
            .copied()
            .ok_or(AgentError::UnresolvedAgentType(agent_type))
    }

    /// Check whether a kind has a constructor.
    pub fn is_registered(&self, agent_type: AgentType) -> bool {
        self.constructors.contains_key(&agent_type)
    }

    /// All kinds with a registered constructor.
    pub fn registered_types(&self) -> Vec<AgentType> {
        self.constructors.keys().copied().collect()
    }
}

/// The process-wide default registry, initialized once on first use.
pub fn default_registry() -> &'static AgentTypeRegistry {
    static REGISTRY: OnceLock<AgentTypeRegistry> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        tracing::debug!("Initializing default agent type registry");
        AgentTypeRegistry::with_default_constructors()
    })
}

/// Resolve a kind against the [`default_registry`].
pub fn resolve(agent_type: AgentType) -> Result<AgentConstructor> {
    default_registry().resolve(agent_type)
}
