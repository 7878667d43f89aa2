//! TOML agent manifests.
//!
//! A manifest declares agents by name: their kind, description, model and
//! prompt bindings, tool names, validation policy, and any strategy-specific
//! extras. Names in a manifest are symbolic — the
//! [`AgentFactory`](crate::agents::AgentFactory) maps model names to actual
//! backends and tool names to registered tools at assembly time.

use crate::agents::base::ValidationPolicy;
use crate::types::{AgentError, AgentType, Binding};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Root manifest structure loaded from a TOML document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentManifest {
    /// Agent declarations keyed by name.
    #[serde(default)]
    pub agents: HashMap<String, AgentDecl>,
}

/// One declared agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentDecl {
    /// Declared agent kind; resolved through the type registry at assembly.
    #[serde(rename = "type")]
    pub agent_type: AgentType,

    /// Description shown to orchestrating models.
    #[serde(default)]
    pub description: String,

    /// Backend name(s): either one name or a purpose-keyed table of names.
    #[serde(default)]
    pub model: Option<Binding<String>>,

    /// Prompt template text, in the same single-or-keyed shape as `model`.
    #[serde(default)]
    pub prompt: Option<Binding<String>>,

    /// Names of registered tools to attach, in declaration order.
    #[serde(default)]
    pub tools: Vec<String>,

    /// Opt-in validation switches; everything defaults to off.
    #[serde(default)]
    pub validation: ValidationPolicy,

    /// Strategy-specific extras (e.g. `tool_timeout_secs`), passed to the
    /// resolved constructor as params.
    #[serde(flatten)]
    pub extra: HashMap<String, toml::Value>,
}

/// Errors that can occur while loading a manifest.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The manifest path does not exist.
    #[error("Manifest file not found: {0}")]
    FileNotFound(PathBuf),

    /// The manifest file could not be read.
    #[error("Failed to read manifest file: {0}")]
    ReadError(#[from] std::io::Error),

    /// The manifest is not valid TOML or does not match the schema.
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    /// The manifest parsed but is structurally inconsistent.
    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl From<ConfigError> for AgentError {
    fn from(err: ConfigError) -> Self {
        AgentError::Configuration(err.to_string())
    }
}

impl AgentManifest {
    /// Parse a manifest from TOML text and validate it.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let manifest: AgentManifest = toml::from_str(content)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Load a manifest from a TOML file and validate it.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Validate the manifest for structural consistency.
    ///
    /// Whether an agent's wiring is complete (backend present, purpose keys
    /// covering what its strategy needs) is not checked here — that
    /// surfaces at assembly or first use. This only rejects shapes that can
    /// never be meaningful: empty names and empty purpose-keyed tables.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, decl) in &self.agents {
            if name.trim().is_empty() {
                return Err(ConfigError::ValidationError(
                    "Agent name must not be empty".to_string(),
                ));
            }

            for (field, binding) in [("model", &decl.model), ("prompt", &decl.prompt)] {
                if let Some(Binding::ByPurpose(map)) = binding {
                    if map.is_empty() {
                        return Err(ConfigError::ValidationError(format!(
                            "Agent '{}' has an empty purpose-keyed '{}' table",
                            name, field
                        )));
                    }
                    for purpose in map.keys() {
                        if purpose.trim().is_empty() {
                            return Err(ConfigError::ValidationError(format!(
                                "Agent '{}' has an empty purpose label in '{}'",
                                name, field
                            )));
                        }
                    }
                }
            }

            for tool in &decl.tools {
                if tool.trim().is_empty() {
                    return Err(ConfigError::ValidationError(format!(
                        "Agent '{}' declares an empty tool name",
                        name
                    )));
                }
            }
        }

        Ok(())
    }

    /// Get a declaration by agent name.
    pub fn get_agent(&self, name: &str) -> Option<&AgentDecl> {
        self.agents.get(name)
    }

    /// Names of all declared agents.
    pub fn agent_names(&self) -> Vec<String> {
        self.agents.keys().cloned().collect()
    }
}
