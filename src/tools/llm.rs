use crate::agents::Agent;
use crate::llm::ModelBackend;
use crate::tools::registry::ToolCapability;
use crate::types::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Exposes a model backend as a tool: input is the prompt, output the
/// completion. Useful when a plan wants free-form reasoning as one step.
pub struct LlmTool {
    name: String,
    description: String,
    backend: Arc<dyn ModelBackend>,
}

impl LlmTool {
    /// Wrap a backend under the default name `llm`.
    pub fn new(backend: Arc<dyn ModelBackend>) -> Self {
        Self {
            name: "llm".to_string(),
            description: "Answer a question or transform text with the language model".to_string(),
            backend,
        }
    }

    /// Override the tool name, so multiple backends can coexist in one plan.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Override the description shown to the planning model.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

#[async_trait]
impl ToolCapability for LlmTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    async fn invoke(&self, input: &str) -> Result<String> {
        self.backend.complete(input).await
    }
}

/// Exposes a whole agent as a tool to another orchestrator.
///
/// Tool name and description come straight from the wrapped agent, so the
/// agent's `description` field is what tells the outer model how and when to
/// call it.
pub struct AgentTool {
    agent: Box<dyn Agent>,
}

impl AgentTool {
    /// Wrap an agent.
    pub fn new(agent: Box<dyn Agent>) -> Self {
        Self { agent }
    }
}

#[async_trait]
impl ToolCapability for AgentTool {
    fn name(&self) -> &str {
        self.agent.name()
    }

    fn description(&self) -> &str {
        self.agent.description()
    }

    async fn invoke(&self, input: &str) -> Result<String> {
        let output = self.agent.run(input).await?;
        Ok(output.text)
    }
}
