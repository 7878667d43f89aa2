use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// ============= Agent Types =============

/// Closed enumeration of recognized agent kinds.
///
/// Every value can be declared, serialized, and inspected freely; only values
/// with a constructor registered in an [`AgentTypeRegistry`](crate::agents::AgentTypeRegistry)
/// can actually be dispatched. The enumeration is fixed — new kinds are added
/// here, not at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentType {
    /// Single-shot OpenAI-style function-calling agent.
    Openai,
    /// Multi-step OpenAI-style function-calling agent.
    OpenaiMulti,
    /// OpenAI-style agent restricted to declared tools.
    OpenaiTool,
    /// Self-ask decomposition agent.
    SelfAsk,
    /// Iterative reason-act agent.
    React,
    /// Plan-work-solve agent (the one kind with a default constructor).
    Rewoo,
    /// Plain completion agent with no tool use.
    Vanilla,
}

impl AgentType {
    /// Every declared agent kind, in declaration order.
    pub const ALL: [AgentType; 7] = [
        AgentType::Openai,
        AgentType::OpenaiMulti,
        AgentType::OpenaiTool,
        AgentType::SelfAsk,
        AgentType::React,
        AgentType::Rewoo,
        AgentType::Vanilla,
    ];

    /// The serialized identifier for this kind (matches the serde form).
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentType::Openai => "openai",
            AgentType::OpenaiMulti => "openai_multi",
            AgentType::OpenaiTool => "openai_tool",
            AgentType::SelfAsk => "self_ask",
            AgentType::React => "react",
            AgentType::Rewoo => "rewoo",
            AgentType::Vanilla => "vanilla",
        }
    }
}

impl fmt::Display for AgentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgentType {
    type Err = AgentError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "openai" => Ok(AgentType::Openai),
            "openai_multi" => Ok(AgentType::OpenaiMulti),
            "openai_tool" => Ok(AgentType::OpenaiTool),
            "self_ask" => Ok(AgentType::SelfAsk),
            "react" => Ok(AgentType::React),
            "rewoo" => Ok(AgentType::Rewoo),
            "vanilla" => Ok(AgentType::Vanilla),
            other => Err(AgentError::InvalidInput(format!(
                "Unknown agent type: {}",
                other
            ))),
        }
    }
}

// ============= Bindings =============

/// A value supplied either once for the whole agent or per purpose label.
///
/// Model backends and prompt templates both use this shape: a simple agent
/// gets `Single`, while a strategy with distinct sub-roles (say a planner
/// model and a solver model) gets `ByPurpose`. The shape is preserved as
/// supplied — a single value and a one-entry map stay distinguishable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Binding<T> {
    /// One value serving every purpose.
    Single(T),
    /// Distinct values keyed by purpose label.
    ByPurpose(HashMap<String, T>),
}

impl<T> Binding<T> {
    /// Wrap a single value.
    pub fn single(value: T) -> Self {
        Binding::Single(value)
    }

    /// Build a purpose-keyed binding from `(label, value)` pairs.
    pub fn by_purpose<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, T)>,
    {
        Binding::ByPurpose(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Whether this is the single-value shape.
    pub fn is_single(&self) -> bool {
        matches!(self, Binding::Single(_))
    }

    /// Whether this is the purpose-keyed shape.
    pub fn is_by_purpose(&self) -> bool {
        matches!(self, Binding::ByPurpose(_))
    }

    /// Resolve the value for a purpose label.
    ///
    /// A `Single` binding answers every label with its one value; a
    /// `ByPurpose` binding answers only labels present in the map.
    pub fn for_purpose(&self, purpose: &str) -> Option<&T> {
        match self {
            Binding::Single(value) => Some(value),
            Binding::ByPurpose(map) => map.get(purpose),
        }
    }

    /// The single value, if this binding has the single shape.
    pub fn as_single(&self) -> Option<&T> {
        match self {
            Binding::Single(value) => Some(value),
            Binding::ByPurpose(_) => None,
        }
    }

    /// Purpose labels carried by this binding (empty for `Single`).
    pub fn purposes(&self) -> Vec<&str> {
        match self {
            Binding::Single(_) => Vec::new(),
            Binding::ByPurpose(map) => map.keys().map(|k| k.as_str()).collect(),
        }
    }

    /// Map every value through a fallible function, preserving the shape.
    pub fn try_map<U, F>(&self, mut f: F) -> Result<Binding<U>>
    where
        F: FnMut(&T) -> Result<U>,
    {
        match self {
            Binding::Single(value) => Ok(Binding::Single(f(value)?)),
            Binding::ByPurpose(map) => {
                let mut mapped = HashMap::with_capacity(map.len());
                for (key, value) in map {
                    mapped.insert(key.clone(), f(value)?);
                }
                Ok(Binding::ByPurpose(mapped))
            }
        }
    }
}

// ============= Tool Types =============

/// Name and description of a tool, as presented to models and orchestrators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Tool name used for selection.
    pub name: String,
    /// What the tool does and when to use it.
    pub description: String,
}

// ============= Agent Output Types =============

/// One intermediate tool execution recorded during an agent run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReasoningStep {
    /// Step identifier, e.g. the evidence label `#E1`.
    pub label: String,
    /// The plan sentence that motivated this step.
    pub plan: String,
    /// Name of the tool that was invoked.
    pub tool: String,
    /// Tool input after evidence substitution.
    pub input: String,
    /// What the tool returned.
    pub output: String,
}

/// Result of a single agent run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentOutput {
    /// Unique id for this run.
    pub run_id: Uuid,
    /// Kind of agent that produced the output.
    pub agent_type: AgentType,
    /// Final answer text.
    pub text: String,
    /// Intermediate steps, in execution order.
    pub steps: Vec<ReasoningStep>,
}

// ============= Error Types =============

/// Crate-wide error type.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// An `AgentType` value with no registered constructor was dispatched.
    #[error("Unresolved agent type: {0}")]
    UnresolvedAgentType(AgentType),

    /// Missing or inconsistent wiring: backends, purpose keys, manifest names.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Prompt template rendering failed.
    #[error("Template error: {0}")]
    Template(String),

    /// A model backend failed to produce a completion.
    #[error("Model error: {0}")]
    Model(String),

    /// A tool invocation failed.
    #[error("Tool error: {0}")]
    Tool(String),

    /// No tool with the requested name is attached or registered.
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// Caller-supplied value that cannot be interpreted.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A reasoning strategy failed mid-run.
    #[error("Execution error: {0}")]
    Execution(String),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, AgentError>;
