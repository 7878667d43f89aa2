//! Assembly of runnable agents from a manifest.
//!
//! An [`AgentFactory`] joins four things: an [`AgentManifest`] of
//! declarations, an [`AgentTypeRegistry`] for dispatch, a table of named
//! [`ModelBackend`]s, and a shared [`ToolRegistry`]. `create_agent` turns a
//! declaration into a ready-to-run `Box<dyn Agent>`, resolving every
//! symbolic name along the way.

use crate::agents::base::BaseAgent;
use crate::agents::registry::{AgentParams, AgentTypeRegistry};
use crate::agents::Agent;
use crate::llm::ModelBackend;
use crate::prompt::PromptTemplate;
use crate::tools::ToolRegistry;
use crate::types::{AgentError, Result};
use crate::utils::toml_config::AgentManifest;
use std::collections::HashMap;
use std::sync::Arc;

/// Factory assembling agents from a manifest, named backends, and tools.
pub struct AgentFactory {
    manifest: AgentManifest,
    registry: AgentTypeRegistry,
    backends: HashMap<String, Arc<dyn ModelBackend>>,
    tool_registry: Arc<ToolRegistry>,
}

impl AgentFactory {
    /// Start building a factory.
    pub fn builder() -> AgentFactoryBuilder {
        AgentFactoryBuilder::new()
    }

    /// Names of all agents the manifest declares.
    pub fn agent_names(&self) -> Vec<String> {
        self.manifest.agent_names()
    }

    /// Check whether the manifest declares an agent.
    pub fn has_agent(&self, name: &str) -> bool {
        self.manifest.get_agent(name).is_some()
    }

    /// Assemble a runnable agent from its manifest declaration.
    ///
    /// Fails when the name is not declared, the declared type has no
    /// registered constructor, a model name has no backend, or a declared
    /// tool is not registered. Binding shapes pass through unchanged: a
    /// single model name becomes a `Single` backend binding, a purpose-keyed
    /// table stays purpose-keyed.
    pub fn create_agent(&self, name: &str) -> Result<Box<dyn Agent>> {
        let decl = self.manifest.get_agent(name).ok_or_else(|| {
            AgentError::Configuration(format!("Agent '{}' not found in manifest", name))
        })?;

        let constructor = self.registry.resolve(decl.agent_type)?;

        let backend = decl
            .model
            .as_ref()
            .map(|binding| {
                binding.try_map(|model_name| {
                    self.backends.get(model_name).cloned().ok_or_else(|| {
                        AgentError::Configuration(format!(
                            "Model backend '{}' for agent '{}' is not registered",
                            model_name, name
                        ))
                    })
                })
            })
            .transpose()?;

        let prompts = decl
            .prompt
            .as_ref()
            .map(|binding| binding.try_map(|text| Ok(PromptTemplate::new(text))))
            .transpose()?;

        let mut tools = Vec::with_capacity(decl.tools.len());
        for tool_name in &decl.tools {
            let tool = self
                .tool_registry
                .get(tool_name)
                .ok_or_else(|| AgentError::ToolNotFound(tool_name.clone()))?;
            tools.push(tool);
        }

        let mut builder = BaseAgent::builder(name, decl.agent_type)
            .description(&decl.description)
            .tools(tools)
            .policy(decl.validation);
        if let Some(backend) = backend {
            builder = builder.backend(backend);
        }
        if let Some(prompts) = prompts {
            builder = builder.prompts(prompts);
        }
        let base = builder.build()?;

        let params = extras_to_params(&decl.extra)?;

        tracing::debug!(
            "Assembling agent '{}' of type '{}' with {} tool(s)",
            name,
            decl.agent_type,
            base.tools().len()
        );
        constructor(base, &params)
    }
}

/// Convert manifest extras to the JSON params constructors consume.
fn extras_to_params(extra: &HashMap<String, toml::Value>) -> Result<AgentParams> {
    let mut params = AgentParams::with_capacity(extra.len());
    for (key, value) in extra {
        let json = serde_json::to_value(value).map_err(|e| {
            AgentError::Configuration(format!("Parameter '{}' is not representable: {}", key, e))
        })?;
        params.insert(key.clone(), json);
    }
    Ok(params)
}

/// Builder for [`AgentFactory`] with fluent API.
pub struct AgentFactoryBuilder {
    manifest: Option<AgentManifest>,
    registry: Option<AgentTypeRegistry>,
    backends: HashMap<String, Arc<dyn ModelBackend>>,
    tool_registry: Option<Arc<ToolRegistry>>,
}

impl AgentFactoryBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            manifest: None,
            registry: None,
            backends: HashMap::new(),
            tool_registry: None,
        }
    }

    /// Set the manifest (required).
    pub fn with_manifest(mut self, manifest: AgentManifest) -> Self {
        self.manifest = Some(manifest);
        self
    }

    /// Override the type registry; the default constructor table is used
    /// otherwise.
    pub fn with_registry(mut self, registry: AgentTypeRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Register a named model backend the manifest may reference.
    pub fn with_backend(mut self, name: &str, backend: Arc<dyn ModelBackend>) -> Self {
        self.backends.insert(name.to_string(), backend);
        self
    }

    /// Set the tool registry; an empty one is used otherwise.
    pub fn with_tool_registry(mut self, tool_registry: Arc<ToolRegistry>) -> Self {
        self.tool_registry = Some(tool_registry);
        self
    }

    /// Build the factory.
    pub fn build(self) -> Result<AgentFactory> {
        let manifest = self.manifest.ok_or_else(|| {
            AgentError::Configuration("AgentManifest is required for AgentFactory".to_string())
        })?;

        Ok(AgentFactory {
            manifest,
            registry: self
                .registry
                .unwrap_or_else(AgentTypeRegistry::with_default_constructors),
            backends: self.backends,
            tool_registry: self
                .tool_registry
                .unwrap_or_else(|| Arc::new(ToolRegistry::new())),
        })
    }
}

impl Default for AgentFactoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_without_manifest_fails() {
        let result = AgentFactoryBuilder::new().build();
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_agent_name() {
        let factory = AgentFactory::builder()
            .with_manifest(AgentManifest::default())
            .build()
            .unwrap();

        let err = factory.create_agent("ghost").unwrap_err();
        assert!(err.to_string().contains("Agent 'ghost' not found"));
    }

    #[test]
    fn test_unregistered_type_propagates_unresolved_error() {
        let manifest = AgentManifest::parse("[agents.thinker]\ntype = \"react\"").unwrap();
        let factory = AgentFactory::builder()
            .with_manifest(manifest)
            .build()
            .unwrap();

        let err = factory.create_agent("thinker").unwrap_err();
        assert!(err.to_string().contains("Unresolved agent type: react"));
    }

    #[test]
    fn test_unknown_backend_name() {
        let manifest =
            AgentManifest::parse("[agents.r]\ntype = \"rewoo\"\nmodel = \"missing\"").unwrap();
        let factory = AgentFactory::builder()
            .with_manifest(manifest)
            .build()
            .unwrap();

        let err = factory.create_agent("r").unwrap_err();
        assert!(err.to_string().contains("Model backend 'missing'"));
    }

    #[test]
    fn test_unknown_tool_name() {
        let manifest =
            AgentManifest::parse("[agents.r]\ntype = \"rewoo\"\ntools = [\"teleport\"]").unwrap();
        let factory = AgentFactory::builder()
            .with_manifest(manifest)
            .build()
            .unwrap();

        let err = factory.create_agent("r").unwrap_err();
        assert!(err.to_string().contains("Tool not found: teleport"));
    }
}
