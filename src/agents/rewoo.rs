//! ReWOO: plan first, work the tools, then solve.
//!
//! A [`RewooAgent`] runs in three phases. The planner model writes the whole
//! plan up front as interleaved `#Plan<n>` / `#E<n> = Tool[input]` lines.
//! The worker executes each `#E` step in order, substituting the outputs of
//! earlier steps wherever their evidence labels appear in a tool input. The
//! solver model then reads the full plan/evidence transcript and produces
//! the final answer.
//!
//! Planner and solver may be distinct models (a `ByPurpose` binding with the
//! [`PURPOSE_PLANNER`] and [`PURPOSE_SOLVER`] labels) or one model serving
//! both (a `Single` binding). Prompt templates follow the same rule, with
//! built-in defaults when the agent carries none.

use crate::agents::base::BaseAgent;
use crate::agents::registry::AgentParams;
use crate::agents::Agent;
use crate::prompt::PromptTemplate;
use crate::types::{AgentError, AgentOutput, ReasoningStep, Result};
use async_trait::async_trait;
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;
use std::time::Duration;
use uuid::Uuid;

/// Purpose label for the planning model and prompt.
pub const PURPOSE_PLANNER: &str = "planner";

/// Purpose label for the solving model and prompt.
pub const PURPOSE_SOLVER: &str = "solver";

const DEFAULT_TOOL_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_PLAN_STEPS: usize = 10;

const DEFAULT_PLANNER_PROMPT: &str = "\
For the following task, make plans that can solve the problem step by step. \
For each plan, indicate which external tool together with tool input to \
retrieve evidence. You can store the evidence into a variable #E that can be \
called by later tools.

Tools can be one of the following:
{tool_description}

Respond only with interleaved plan and evidence lines in this form:
#Plan1: <describe the first step>
#E1 = ToolName[tool input, may reference earlier evidence like #E1]
#Plan2: <describe the next step>
#E2 = ToolName[tool input]

Task: {task}";

const DEFAULT_SOLVER_PROMPT: &str = "\
Solve the following task. To assist you, we have made step-by-step plans and \
retrieved the corresponding evidence for each plan. Use them with caution, \
since long evidence might contain irrelevant information.

{plan_evidence}

Now answer the task directly, according to the evidence above.

Task: {task}

Answer:";

static PLAN_LINE: OnceLock<Regex> = OnceLock::new();
static EVIDENCE_LINE: OnceLock<Regex> = OnceLock::new();
static EVIDENCE_REF: OnceLock<Regex> = OnceLock::new();

fn plan_line_regex() -> &'static Regex {
    PLAN_LINE.get_or_init(|| Regex::new(r"(?m)^#Plan(\d+)\s*[:=]\s*(.+)$").expect("valid pattern"))
}

fn evidence_line_regex() -> &'static Regex {
    EVIDENCE_LINE
        .get_or_init(|| Regex::new(r"(?m)^#E(\d+)\s*[:=]\s*(\w+)\s*\[(.*)\]\s*$").expect("valid pattern"))
}

fn evidence_ref_regex() -> &'static Regex {
    EVIDENCE_REF.get_or_init(|| Regex::new(r"#E(\d+)").expect("valid pattern"))
}

/// One parsed step of a ReWOO plan.
#[derive(Debug, Clone, PartialEq)]
struct PlanStep {
    /// The `n` in `#E<n>`.
    index: usize,
    /// The `#Plan<n>` sentence, empty when the planner omitted it.
    plan: String,
    /// Tool name between `=` and `[`.
    tool: String,
    /// Raw tool input between the brackets, before evidence substitution.
    input: String,
}

/// Plan-work-solve agent; the one kind the default registry resolves.
pub struct RewooAgent {
    base: BaseAgent,
    tool_timeout: Duration,
    max_plan_steps: usize,
}

impl RewooAgent {
    /// Wrap a configured base agent with default strategy knobs.
    pub fn new(base: BaseAgent) -> Self {
        Self {
            base,
            tool_timeout: Duration::from_secs(DEFAULT_TOOL_TIMEOUT_SECS),
            max_plan_steps: DEFAULT_MAX_PLAN_STEPS,
        }
    }

    /// Override the per-tool-invocation timeout.
    pub fn with_tool_timeout(mut self, timeout: Duration) -> Self {
        self.tool_timeout = timeout;
        self
    }

    /// Override the maximum number of plan steps executed.
    pub fn with_max_plan_steps(mut self, max_plan_steps: usize) -> Self {
        self.max_plan_steps = max_plan_steps;
        self
    }

    /// Registry constructor: build from a base agent and strategy params.
    ///
    /// Recognized params: `tool_timeout_secs` (non-negative integer seconds)
    /// and `max_plan_steps` (non-negative integer). A param of the wrong
    /// type is a configuration error; unrecognized params are ignored.
    pub fn construct(base: BaseAgent, params: &AgentParams) -> Result<Box<dyn Agent>> {
        let mut agent = Self::new(base);

        if let Some(secs) = integer_param(params, "tool_timeout_secs")? {
            agent.tool_timeout = Duration::from_secs(secs);
        }
        if let Some(steps) = integer_param(params, "max_plan_steps")? {
            agent.max_plan_steps = steps as usize;
        }

        Ok(Box::new(agent))
    }

    /// One line per attached tool, in the form the planner prompt expects:
    /// `name[input]: description`.
    fn tool_description(&self) -> String {
        self.base
            .tools()
            .iter()
            .map(|tool| format!("{}[input]: {}", tool.name(), tool.description()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Render the prompt for a purpose, preferring the agent's own template.
    fn render_prompt(
        &self,
        purpose: &str,
        default_template: &str,
        vars: &HashMap<String, String>,
    ) -> Result<String> {
        match self.base.prompt_for(purpose) {
            Some(template) => template.render(vars),
            None => PromptTemplate::new(default_template).render(vars),
        }
    }

    /// Parse planner output into ordered steps.
    ///
    /// A plan with no parseable `#E` line is an execution error: the model
    /// produced something this strategy cannot work with, and the caller
    /// should see that rather than get the raw text fed to the solver.
    fn parse_plan(&self, plan_text: &str) -> Result<Vec<PlanStep>> {
        let mut plans: HashMap<usize, String> = HashMap::new();
        for caps in plan_line_regex().captures_iter(plan_text) {
            if let Ok(index) = caps[1].parse::<usize>() {
                plans.insert(index, caps[2].trim().to_string());
            }
        }

        let mut steps = Vec::new();
        for caps in evidence_line_regex().captures_iter(plan_text) {
            let Ok(index) = caps[1].parse::<usize>() else {
                continue;
            };
            steps.push(PlanStep {
                index,
                plan: plans.get(&index).cloned().unwrap_or_default(),
                tool: caps[2].to_string(),
                input: caps[3].trim().to_string(),
            });
        }

        if steps.is_empty() {
            return Err(AgentError::Execution(format!(
                "Planner produced no parseable #E steps: {}",
                plan_text.trim()
            )));
        }

        steps.sort_by_key(|step| step.index);

        if steps.len() > self.max_plan_steps {
            tracing::warn!(
                "Plan has {} steps, dropping all beyond the configured maximum of {}",
                steps.len(),
                self.max_plan_steps
            );
            steps.truncate(self.max_plan_steps);
        }

        Ok(steps)
    }

    /// Replace `#E<n>` references in a tool input with recorded evidence.
    ///
    /// References to labels with no recorded output (a forward reference, or
    /// a step that was dropped) are left verbatim with a warning.
    fn substitute_evidence(input: &str, evidence: &HashMap<usize, String>) -> String {
        evidence_ref_regex()
            .replace_all(input, |caps: &regex::Captures| {
                match caps[1].parse::<usize>().ok().and_then(|n| evidence.get(&n)) {
                    Some(output) => output.clone(),
                    None => {
                        tracing::warn!(
                            "Evidence reference {} has no recorded output; leaving it in place",
                            &caps[0]
                        );
                        caps[0].to_string()
                    }
                }
            })
            .into_owned()
    }

    async fn execute_steps(&self, steps: &[PlanStep]) -> Result<Vec<ReasoningStep>> {
        let mut evidence: HashMap<usize, String> = HashMap::new();
        let mut executed = Vec::with_capacity(steps.len());

        for step in steps {
            let tool = self
                .base
                .tools()
                .get(&step.tool)
                .ok_or_else(|| AgentError::ToolNotFound(step.tool.clone()))?;

            let input = Self::substitute_evidence(&step.input, &evidence);
            tracing::debug!(
                "Agent '{}': step #E{} invoking tool '{}' with input '{}'",
                self.base.name(),
                step.index,
                step.tool,
                input
            );

            let output = tokio::time::timeout(self.tool_timeout, tool.invoke(&input))
                .await
                .map_err(|_| {
                    AgentError::Tool(format!(
                        "Tool '{}' timed out after {}s",
                        step.tool,
                        self.tool_timeout.as_secs()
                    ))
                })??;

            evidence.insert(step.index, output.clone());
            executed.push(ReasoningStep {
                label: format!("#E{}", step.index),
                plan: step.plan.clone(),
                tool: step.tool.clone(),
                input,
                output,
            });
        }

        Ok(executed)
    }

    /// The `#Plan`/`#E` transcript with outputs, as shown to the solver.
    fn plan_evidence(steps: &[ReasoningStep]) -> String {
        steps
            .iter()
            .map(|step| {
                format!(
                    "Plan: {}\n{} = {}[{}]\nEvidence: {}",
                    step.plan, step.label, step.tool, step.input, step.output
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

#[async_trait]
impl Agent for RewooAgent {
    fn base(&self) -> &BaseAgent {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseAgent {
        &mut self.base
    }

    async fn run(&self, instruction: &str) -> Result<AgentOutput> {
        self.base.ensure_ready()?;

        let run_id = Uuid::new_v4();
        tracing::debug!(
            "Agent '{}' ({}): starting run {}",
            self.base.name(),
            self.base.agent_type(),
            run_id
        );

        let planner_vars = HashMap::from([
            ("tool_description".to_string(), self.tool_description()),
            ("task".to_string(), instruction.to_string()),
        ]);
        let planner_prompt =
            self.render_prompt(PURPOSE_PLANNER, DEFAULT_PLANNER_PROMPT, &planner_vars)?;

        let planner = self.base.backend_for(PURPOSE_PLANNER)?;
        let plan_text = planner.complete(&planner_prompt).await?;
        let plan = self.parse_plan(&plan_text)?;
        tracing::debug!(
            "Agent '{}': plan from '{}' has {} step(s)",
            self.base.name(),
            planner.model_name(),
            plan.len()
        );

        let steps = self.execute_steps(&plan).await?;

        let solver_vars = HashMap::from([
            ("task".to_string(), instruction.to_string()),
            ("plan_evidence".to_string(), Self::plan_evidence(&steps)),
        ]);
        let solver_prompt =
            self.render_prompt(PURPOSE_SOLVER, DEFAULT_SOLVER_PROMPT, &solver_vars)?;

        let solver = self.base.backend_for(PURPOSE_SOLVER)?;
        let text = solver.complete(&solver_prompt).await?;

        Ok(AgentOutput {
            run_id,
            agent_type: self.base.agent_type(),
            text,
            steps,
        })
    }
}

/// Read an optional non-negative integer param; wrong types are
/// configuration errors.
fn integer_param(params: &AgentParams, key: &str) -> Result<Option<u64>> {
    match params.get(key) {
        None => Ok(None),
        Some(value) => value.as_u64().map(Some).ok_or_else(|| {
            AgentError::Configuration(format!(
                "Parameter '{}' must be a non-negative integer, got {}",
                key, value
            ))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AgentType;

    fn plain_agent() -> RewooAgent {
        RewooAgent::new(
            BaseAgent::builder("planner", AgentType::Rewoo)
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn test_parse_plan_interleaved_lines() {
        let agent = plain_agent();
        let steps = agent
            .parse_plan(
                "#Plan1: Work out the subtotal\n\
                 #E1 = calculate[3 * 7]\n\
                 #Plan2: Add tax to the subtotal\n\
                 #E2 = calculate[#E1 * 1.2]\n",
            )
            .unwrap();

        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].plan, "Work out the subtotal");
        assert_eq!(steps[0].tool, "calculate");
        assert_eq!(steps[0].input, "3 * 7");
        assert_eq!(steps[1].input, "#E1 * 1.2");
    }

    #[test]
    fn test_parse_plan_accepts_colon_after_label() {
        let agent = plain_agent();
        let steps = agent.parse_plan("#E1: clock[iso]").unwrap();
        assert_eq!(steps[0].tool, "clock");
        assert_eq!(steps[0].plan, "");
    }

    #[test]
    fn test_parse_plan_orders_by_index() {
        let agent = plain_agent();
        let steps = agent
            .parse_plan("#E2 = clock[unix]\n#E1 = clock[iso]")
            .unwrap();
        assert_eq!(steps[0].index, 1);
        assert_eq!(steps[1].index, 2);
    }

    #[test]
    fn test_parse_plan_without_steps_is_execution_error() {
        let agent = plain_agent();
        let err = agent.parse_plan("I cannot make a plan for this.").unwrap_err();
        assert!(err.to_string().contains("no parseable #E steps"));
    }

    #[test]
    fn test_parse_plan_truncates_to_max_steps() {
        let agent = plain_agent().with_max_plan_steps(2);
        let steps = agent
            .parse_plan("#E1 = clock[iso]\n#E2 = clock[iso]\n#E3 = clock[iso]")
            .unwrap();
        assert_eq!(steps.len(), 2);
    }

    #[test]
    fn test_substitute_known_and_unknown_evidence() {
        let evidence = HashMap::from([(1, "21".to_string())]);
        let substituted = RewooAgent::substitute_evidence("#E1 + #E9", &evidence);
        assert_eq!(substituted, "21 + #E9");
    }

    #[test]
    fn test_construct_rejects_bad_param_types() {
        let base = BaseAgent::builder("p", AgentType::Rewoo).build().unwrap();
        let params =
            AgentParams::from([("tool_timeout_secs".to_string(), serde_json::json!("soon"))]);

        let err = RewooAgent::construct(base, &params).unwrap_err();
        assert!(err.to_string().contains("tool_timeout_secs"));
    }

    #[test]
    fn test_construct_ignores_unrecognized_params() {
        let base = BaseAgent::builder("p", AgentType::Rewoo).build().unwrap();
        let params = AgentParams::from([("colour".to_string(), serde_json::json!("mauve"))]);

        assert!(RewooAgent::construct(base, &params).is_ok());
    }

    #[test]
    fn test_default_prompts_render() {
        let vars = HashMap::from([
            ("tool_description".to_string(), "calculate[input]: math".to_string()),
            ("task".to_string(), "add things".to_string()),
        ]);
        let rendered = PromptTemplate::new(DEFAULT_PLANNER_PROMPT).render(&vars).unwrap();
        assert!(rendered.contains("calculate[input]: math"));
        assert!(rendered.contains("Task: add things"));

        let vars = HashMap::from([
            ("task".to_string(), "add things".to_string()),
            ("plan_evidence".to_string(), "#E1 = x".to_string()),
        ]);
        let rendered = PromptTemplate::new(DEFAULT_SOLVER_PROMPT).render(&vars).unwrap();
        assert!(rendered.contains("#E1 = x"));
    }
}
