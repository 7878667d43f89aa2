use crate::types::{AgentError, Result, ToolDefinition};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

/// A named, invocable capability an agent may call upon while reasoning.
///
/// Tools take a plain string as input and return a plain string, keeping the
/// boundary model-friendly: input is whatever the plan put between the
/// brackets, output is whatever should be recorded as evidence.
#[async_trait]
pub trait ToolCapability: Send + Sync {
    /// Tool name, used for selection by plans and registries.
    fn name(&self) -> &str;

    /// What the tool does and when to use it, as shown to the model.
    fn description(&self) -> &str;

    /// Run the tool against the given input.
    async fn invoke(&self, input: &str) -> Result<String>;
}

/// Named lookup table of shared tools.
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn ToolCapability>>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Create a registry with the built-in tools (calculator, clock).
    pub fn with_default_tools() -> Self {
        let mut registry = Self::new();

        registry.register(Arc::new(crate::tools::calculator::Calculator));
        registry.register(Arc::new(crate::tools::clock::Clock));

        registry
    }

    /// Register a tool under its own name, replacing any previous entry.
    pub fn register(&mut self, tool: Arc<dyn ToolCapability>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    /// Get a tool by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn ToolCapability>> {
        self.tools.get(name).cloned()
    }

    /// Name/description pairs for every registered tool.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .values()
            .map(|tool| ToolDefinition {
                name: tool.name().to_string(),
                description: tool.description().to_string(),
            })
            .collect()
    }

    /// Invoke a tool by name.
    pub async fn invoke(&self, name: &str, input: &str) -> Result<String> {
        if let Some(tool) = self.tools.get(name) {
            tool.invoke(input).await
        } else {
            Err(AgentError::ToolNotFound(name.to_string()))
        }
    }

    /// Names of all registered tools.
    pub fn tool_names(&self) -> Vec<String> {
        self.tools.keys().cloned().collect()
    }

    /// Check whether a tool is registered.
    pub fn has_tool(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
