//! Prompt Templates
//!
//! A [`PromptTemplate`] renders a model-ready prompt string from named
//! variables. Placeholders use `{name}` syntax where `name` is a word
//! (`\w+`); anything else between braces is left untouched, so JSON snippets
//! and empty braces survive rendering unchanged.
//!
//! Rendering is strict about declared placeholders — every one must be
//! supplied — and lenient about extras, which are ignored.

use crate::types::{AgentError, Result};
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();

fn placeholder_regex() -> &'static Regex {
    PLACEHOLDER.get_or_init(|| Regex::new(r"\{(\w+)\}").expect("placeholder pattern is valid"))
}

/// A prompt template with `{name}` placeholders.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptTemplate {
    template: String,
    variables: Vec<String>,
}

impl PromptTemplate {
    /// Create a template from text, recording its placeholder names in
    /// first-appearance order (duplicates collapse to one entry).
    pub fn new(template: impl Into<String>) -> Self {
        let template = template.into();
        let mut variables = Vec::new();
        for caps in placeholder_regex().captures_iter(&template) {
            let name = caps[1].to_string();
            if !variables.contains(&name) {
                variables.push(name);
            }
        }
        Self {
            template,
            variables,
        }
    }

    /// The raw template text.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Placeholder names this template requires.
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    /// Render the template, substituting every placeholder.
    ///
    /// Fails with a template error naming the first placeholder that has no
    /// value. Supplied variables the template does not mention are ignored.
    pub fn render(&self, vars: &HashMap<String, String>) -> Result<String> {
        for name in &self.variables {
            if !vars.contains_key(name) {
                return Err(AgentError::Template(format!(
                    "Missing variable '{}' for template",
                    name
                )));
            }
        }

        for key in vars.keys() {
            if !self.variables.iter().any(|v| v == key) {
                tracing::debug!("Ignoring variable '{}' not used by template", key);
            }
        }

        let rendered = placeholder_regex().replace_all(&self.template, |caps: &regex::Captures| {
            match vars.get(&caps[1]) {
                Some(value) => value.clone(),
                None => caps[0].to_string(),
            }
        });

        Ok(rendered.into_owned())
    }
}
