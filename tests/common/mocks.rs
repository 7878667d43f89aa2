//! Mock implementations for testing.
//!
//! This module provides mock model backends and tools that can be used
//! across different test files without duplication.

use agentry::{AgentError, ModelBackend, Result, ToolCapability};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

/// Mock model backend that replays scripted completions in order.
///
/// Each `complete` call pops the next scripted response and records the
/// prompt it was given, so tests can assert both what an agent sent to the
/// model and what it did with the reply.
///
/// # Examples
///
/// ```ignore
/// // A backend that first returns a plan, then a final answer
/// let backend = ScriptedBackend::new(&["#E1 = echo[hi]", "done"]);
///
/// // A backend that always fails
/// let backend = ScriptedBackend::failing();
/// ```
pub struct ScriptedBackend {
    name: String,
    responses: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<String>>,
    should_fail: bool,
}

impl ScriptedBackend {
    /// Create a backend that returns the given responses, in order.
    pub fn new(responses: &[&str]) -> Self {
        Self {
            name: "scripted-model".to_string(),
            responses: Mutex::new(responses.iter().map(|r| r.to_string()).collect()),
            prompts: Mutex::new(Vec::new()),
            should_fail: false,
        }
    }

    /// Override the model name reported for logging.
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Create a backend that always returns an error.
    pub fn failing() -> Self {
        Self {
            name: "failing-model".to_string(),
            responses: Mutex::new(VecDeque::new()),
            prompts: Mutex::new(Vec::new()),
            should_fail: true,
        }
    }

    /// The prompts this backend has received, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelBackend for ScriptedBackend {
    async fn complete(&self, prompt: &str) -> Result<String> {
        if self.should_fail {
            return Err(AgentError::Model("Mock backend failure".to_string()));
        }

        self.prompts.lock().unwrap().push(prompt.to_string());

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| AgentError::Model("Scripted backend has no responses left".to_string()))
    }

    fn model_name(&self) -> &str {
        &self.name
    }
}

/// Tool that returns its input unchanged.
pub struct EchoTool {
    name: String,
}

impl EchoTool {
    /// Create an echo tool named `echo`.
    pub fn new() -> Self {
        Self {
            name: "echo".to_string(),
        }
    }

    /// Override the tool name.
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }
}

impl Default for EchoTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ToolCapability for EchoTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "Returns its input unchanged"
    }

    async fn invoke(&self, input: &str) -> Result<String> {
        Ok(input.to_string())
    }
}

/// Tool that records every input it receives and returns a fixed output.
///
/// Hold on to an `Arc<RecordingTool>` to assert on `calls()` after a run.
pub struct RecordingTool {
    name: String,
    output: String,
    calls: Mutex<Vec<String>>,
}

impl RecordingTool {
    /// Create a recording tool with the given name and fixed output.
    pub fn new(name: &str, output: &str) -> Self {
        Self {
            name: name.to_string(),
            output: output.to_string(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Inputs this tool has been invoked with, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ToolCapability for RecordingTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "Records its input and returns a fixed value"
    }

    async fn invoke(&self, input: &str) -> Result<String> {
        self.calls.lock().unwrap().push(input.to_string());
        Ok(self.output.clone())
    }
}

/// Tool that sleeps before answering, for timeout tests.
pub struct SlowTool {
    delay: Duration,
}

impl SlowTool {
    /// Create a tool that sleeps for `delay` before returning.
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl ToolCapability for SlowTool {
    fn name(&self) -> &str {
        "slow"
    }

    fn description(&self) -> &str {
        "Takes a long time to answer"
    }

    async fn invoke(&self, _input: &str) -> Result<String> {
        tokio::time::sleep(self.delay).await;
        Ok("finally".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_backend_replays_in_order() {
        let backend = ScriptedBackend::new(&["first", "second"]);

        assert_eq!(backend.complete("a").await.unwrap(), "first");
        assert_eq!(backend.complete("b").await.unwrap(), "second");
        assert!(backend.complete("c").await.is_err());
        assert_eq!(backend.prompts(), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_scripted_backend_failing() {
        let backend = ScriptedBackend::failing();
        assert!(backend.complete("prompt").await.is_err());
    }

    #[tokio::test]
    async fn test_recording_tool_records_calls() {
        let tool = RecordingTool::new("probe", "fixed");

        assert_eq!(tool.invoke("one").await.unwrap(), "fixed");
        assert_eq!(tool.invoke("two").await.unwrap(), "fixed");
        assert_eq!(tool.calls(), vec!["one", "two"]);
    }
}
