//! Configuration utilities.

/// TOML agent manifests.
pub mod toml_config;

pub use toml_config::{AgentDecl, AgentManifest, ConfigError};
