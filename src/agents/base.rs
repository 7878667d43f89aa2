//! The composable agent entity and its construction.
//!
//! [`BaseAgent`] holds what every concrete agent is made of: identity (name,
//! description, [`AgentType`]), model backend binding(s), prompt template
//! binding(s), and an ordered tool collection. Concrete strategies embed a
//! `BaseAgent` and read from it on every reasoning step.

use crate::llm::ModelBackend;
use crate::prompt::PromptTemplate;
use crate::tools::ToolCapability;
use crate::types::{AgentError, AgentType, Binding, Result, ToolDefinition};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

/// Ordered collection of tool references owned by one agent.
///
/// Mutation goes through [`ToolSet::add`] only: appends preserve existing
/// order and the relative order of the new tools, and nothing is
/// deduplicated — attaching the same tool twice means it appears twice.
#[derive(Default)]
pub struct ToolSet {
    tools: Vec<Arc<dyn ToolCapability>>,
}

impl ToolSet {
    /// Create an empty tool set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append tools, preserving order. An empty sequence is a no-op.
    pub fn add<I>(&mut self, tools: I)
    where
        I: IntoIterator<Item = Arc<dyn ToolCapability>>,
    {
        self.tools.extend(tools);
    }

    /// Iterate the tools in attachment order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn ToolCapability>> {
        self.tools.iter()
    }

    /// First attached tool with the given name.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn ToolCapability>> {
        self.tools.iter().find(|tool| tool.name() == name)
    }

    /// Tool names in attachment order (duplicates included).
    pub fn names(&self) -> Vec<String> {
        self.tools.iter().map(|tool| tool.name().to_string()).collect()
    }

    /// Name/description pairs in attachment order.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .iter()
            .map(|tool| ToolDefinition {
                name: tool.name().to_string(),
                description: tool.description().to_string(),
            })
            .collect()
    }

    /// Number of attached tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check whether no tools are attached.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// Opt-in validation switches, consulted by concrete agents at first use.
///
/// Everything defaults to off: attachment never validates, and a freshly
/// built agent enforces nothing until a strategy calls
/// [`BaseAgent::ensure_ready`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationPolicy {
    /// Fail when two attached tools share a name.
    #[serde(default)]
    pub reject_duplicate_tool_names: bool,
    /// Fail when no tools are attached.
    #[serde(default)]
    pub require_tools: bool,
    /// Fail when no model backend is configured.
    #[serde(default)]
    pub require_backend: bool,
}

impl ValidationPolicy {
    /// Every check enabled.
    pub fn strict() -> Self {
        Self {
            reject_duplicate_tool_names: true,
            require_tools: true,
            require_backend: true,
        }
    }
}

/// The composable entity every concrete agent embeds.
///
/// Identity (`name`, `agent_type`) is fixed at construction. Backends and
/// prompts are bound either once or per purpose label (see [`Binding`]);
/// the shape supplied is the shape read back. Tools are attached through
/// [`BaseAgent::add_tools`] and queried by strategies at execution time.
pub struct BaseAgent {
    name: String,
    agent_type: AgentType,
    description: String,
    backend: Option<Binding<Arc<dyn ModelBackend>>>,
    prompts: Option<Binding<PromptTemplate>>,
    tools: ToolSet,
    policy: ValidationPolicy,
}

impl BaseAgent {
    /// Start building an agent. Name and type are fixed up front.
    pub fn builder(name: impl Into<String>, agent_type: AgentType) -> BaseAgentBuilder {
        BaseAgentBuilder {
            name: name.into(),
            agent_type,
            description: String::new(),
            backend: None,
            prompts: None,
            tools: Vec::new(),
            policy: ValidationPolicy::default(),
        }
    }

    /// The agent's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared agent kind.
    pub fn agent_type(&self) -> AgentType {
        self.agent_type
    }

    /// Free-text description telling an orchestrating model how and when to
    /// use this agent; may embed few-shot examples.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The model backend binding, in the shape it was supplied.
    pub fn backend(&self) -> Option<&Binding<Arc<dyn ModelBackend>>> {
        self.backend.as_ref()
    }

    /// The prompt template binding, in the shape it was supplied.
    pub fn prompts(&self) -> Option<&Binding<PromptTemplate>> {
        self.prompts.as_ref()
    }

    /// The attached tools.
    pub fn tools(&self) -> &ToolSet {
        &self.tools
    }

    /// The validation policy for this agent.
    pub fn policy(&self) -> &ValidationPolicy {
        &self.policy
    }

    /// Append tools to the agent's tool sequence.
    ///
    /// Order-preserving, never deduplicating, never validating — the one
    /// mutation this entity supports after construction. An empty vector is
    /// a no-op.
    pub fn add_tools(&mut self, tools: Vec<Arc<dyn ToolCapability>>) {
        if tools.is_empty() {
            return;
        }
        tracing::debug!(
            "Agent '{}': attaching {} tool(s): {:?}",
            self.name,
            tools.len(),
            tools.iter().map(|t| t.name()).collect::<Vec<_>>()
        );
        self.tools.add(tools);
    }

    /// Resolve the backend for a purpose label.
    ///
    /// A `Single` binding serves every purpose; a `ByPurpose` binding must
    /// contain the label. Missing backend or missing label is a
    /// configuration error — raised here, at the point of use, not at
    /// construction.
    pub fn backend_for(&self, purpose: &str) -> Result<&Arc<dyn ModelBackend>> {
        let binding = self.backend.as_ref().ok_or_else(|| {
            AgentError::Configuration(format!(
                "Agent '{}' has no model backend configured",
                self.name
            ))
        })?;
        binding.for_purpose(purpose).ok_or_else(|| {
            AgentError::Configuration(format!(
                "Agent '{}' has no model backend for purpose '{}'",
                self.name, purpose
            ))
        })
    }

    /// Resolve the prompt template for a purpose label, if one was supplied.
    pub fn prompt_for(&self, purpose: &str) -> Option<&PromptTemplate> {
        self.prompts
            .as_ref()
            .and_then(|binding| binding.for_purpose(purpose))
    }

    /// Run the agent's validation policy.
    ///
    /// Concrete strategies call this at the start of a run so that policy
    /// failures surface next to the operation that needed the missing piece.
    pub fn ensure_ready(&self) -> Result<()> {
        if self.policy.require_backend && self.backend.is_none() {
            return Err(AgentError::Configuration(format!(
                "Agent '{}' requires a model backend",
                self.name
            )));
        }

        if self.policy.require_tools && self.tools.is_empty() {
            return Err(AgentError::Configuration(format!(
                "Agent '{}' requires at least one tool",
                self.name
            )));
        }

        if self.policy.reject_duplicate_tool_names {
            let mut seen = HashSet::new();
            for tool in self.tools.iter() {
                if !seen.insert(tool.name()) {
                    return Err(AgentError::Configuration(format!(
                        "Agent '{}' has duplicate tool '{}'",
                        self.name,
                        tool.name()
                    )));
                }
            }
        }

        Ok(())
    }
}

/// Builder for [`BaseAgent`] with fluent API.
pub struct BaseAgentBuilder {
    name: String,
    agent_type: AgentType,
    description: String,
    backend: Option<Binding<Arc<dyn ModelBackend>>>,
    prompts: Option<Binding<PromptTemplate>>,
    tools: Vec<Arc<dyn ToolCapability>>,
    policy: ValidationPolicy,
}

impl BaseAgentBuilder {
    /// Set the description shown to orchestrating models.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Bind the model backend(s).
    pub fn backend(mut self, backend: Binding<Arc<dyn ModelBackend>>) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Bind the prompt template(s).
    pub fn prompts(mut self, prompts: Binding<PromptTemplate>) -> Self {
        self.prompts = Some(prompts);
        self
    }

    /// Attach one tool.
    pub fn tool(mut self, tool: Arc<dyn ToolCapability>) -> Self {
        self.tools.push(tool);
        self
    }

    /// Attach tools, preserving their order.
    pub fn tools(mut self, tools: Vec<Arc<dyn ToolCapability>>) -> Self {
        self.tools.extend(tools);
        self
    }

    /// Set the validation policy.
    pub fn policy(mut self, policy: ValidationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Build the agent. Fails only on an empty (or whitespace-only) name.
    pub fn build(self) -> Result<BaseAgent> {
        if self.name.trim().is_empty() {
            return Err(AgentError::Configuration(
                "Agent name must not be empty".to_string(),
            ));
        }

        let mut tools = ToolSet::new();
        tools.add(self.tools);

        Ok(BaseAgent {
            name: self.name,
            agent_type: self.agent_type,
            description: self.description,
            backend: self.backend,
            prompts: self.prompts,
            tools,
            policy: self.policy,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct StubTool(&'static str);

    #[async_trait]
    impl ToolCapability for StubTool {
        fn name(&self) -> &str {
            self.0
        }

        fn description(&self) -> &str {
            "stub"
        }

        async fn invoke(&self, input: &str) -> Result<String> {
            Ok(input.to_string())
        }
    }

    struct StubBackend;

    #[async_trait]
    impl ModelBackend for StubBackend {
        async fn complete(&self, _prompt: &str) -> Result<String> {
            Ok("stub".to_string())
        }

        fn model_name(&self) -> &str {
            "stub-model"
        }
    }

    fn fresh_agent() -> BaseAgent {
        BaseAgent::builder("planner", AgentType::Rewoo)
            .build()
            .unwrap()
    }

    #[test]
    fn test_empty_name_rejected() {
        assert!(BaseAgent::builder("", AgentType::Rewoo).build().is_err());
        assert!(BaseAgent::builder("   ", AgentType::Rewoo).build().is_err());
    }

    #[test]
    fn test_identity_is_fixed_at_construction() {
        let agent = BaseAgent::builder("summarizer", AgentType::Vanilla)
            .description("Summarizes documents")
            .build()
            .unwrap();

        assert_eq!(agent.name(), "summarizer");
        assert_eq!(agent.agent_type(), AgentType::Vanilla);
        assert_eq!(agent.description(), "Summarizes documents");
        assert!(agent.tools().is_empty());
    }

    #[test]
    fn test_add_tools_concatenates_in_order() {
        let mut agent = fresh_agent();

        agent.add_tools(vec![Arc::new(StubTool("a")), Arc::new(StubTool("b"))]);
        assert_eq!(agent.tools().names(), vec!["a", "b"]);

        agent.add_tools(vec![Arc::new(StubTool("c"))]);
        assert_eq!(agent.tools().names(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_add_tools_keeps_duplicates() {
        let mut agent = fresh_agent();

        agent.add_tools(vec![Arc::new(StubTool("dup")), Arc::new(StubTool("dup"))]);
        assert_eq!(agent.tools().len(), 2);
        assert_eq!(agent.tools().names(), vec!["dup", "dup"]);
    }

    #[test]
    fn test_add_tools_empty_is_noop() {
        let mut agent = fresh_agent();
        agent.add_tools(vec![Arc::new(StubTool("a"))]);

        agent.add_tools(vec![]);
        assert_eq!(agent.tools().names(), vec!["a"]);
    }

    #[test]
    fn test_backend_shape_is_preserved() {
        let single = BaseAgent::builder("s", AgentType::Rewoo)
            .backend(Binding::single(Arc::new(StubBackend) as Arc<dyn ModelBackend>))
            .build()
            .unwrap();
        assert!(single.backend().unwrap().is_single());

        let keyed = BaseAgent::builder("k", AgentType::Rewoo)
            .backend(Binding::by_purpose([(
                "planner",
                Arc::new(StubBackend) as Arc<dyn ModelBackend>,
            )]))
            .build()
            .unwrap();
        assert!(keyed.backend().unwrap().is_by_purpose());
    }

    #[test]
    fn test_backend_for_single_serves_all_purposes() {
        let agent = BaseAgent::builder("s", AgentType::Rewoo)
            .backend(Binding::single(Arc::new(StubBackend) as Arc<dyn ModelBackend>))
            .build()
            .unwrap();

        assert!(agent.backend_for("planner").is_ok());
        assert!(agent.backend_for("solver").is_ok());
    }

    #[test]
    fn test_backend_for_missing_purpose_is_configuration_error() {
        let agent = BaseAgent::builder("k", AgentType::Rewoo)
            .backend(Binding::by_purpose([(
                "planner",
                Arc::new(StubBackend) as Arc<dyn ModelBackend>,
            )]))
            .build()
            .unwrap();

        let err = agent.backend_for("solver").unwrap_err();
        assert!(err.to_string().contains("purpose 'solver'"));

        let bare = fresh_agent();
        assert!(bare.backend_for("planner").is_err());
    }

    #[test]
    fn test_default_policy_enforces_nothing() {
        let mut agent = fresh_agent();
        agent.add_tools(vec![Arc::new(StubTool("dup")), Arc::new(StubTool("dup"))]);

        assert!(agent.ensure_ready().is_ok());
    }

    #[test]
    fn test_strict_policy_rejects_duplicates_at_use() {
        let mut agent = BaseAgent::builder("strict", AgentType::Rewoo)
            .backend(Binding::single(Arc::new(StubBackend) as Arc<dyn ModelBackend>))
            .policy(ValidationPolicy::strict())
            .build()
            .unwrap();

        // Attachment itself never fails
        agent.add_tools(vec![Arc::new(StubTool("dup")), Arc::new(StubTool("dup"))]);
        assert_eq!(agent.tools().len(), 2);

        let err = agent.ensure_ready().unwrap_err();
        assert!(err.to_string().contains("duplicate tool 'dup'"));
    }

    #[test]
    fn test_require_backend_policy() {
        let agent = BaseAgent::builder("needy", AgentType::Rewoo)
            .policy(ValidationPolicy {
                require_backend: true,
                ..Default::default()
            })
            .build()
            .unwrap();

        let err = agent.ensure_ready().unwrap_err();
        assert!(err.to_string().contains("requires a model backend"));
    }
}
