use crate::tools::registry::ToolCapability;
use crate::types::{AgentError, Result};
use async_trait::async_trait;

/// Arithmetic expression evaluator.
///
/// Supports `+`, `-`, `*`, `/`, `^` and parentheses over floating-point
/// numbers. Input is the expression itself, e.g. `12 / (3 + 1)`.
pub struct Calculator;

#[async_trait]
impl ToolCapability for Calculator {
    fn name(&self) -> &str {
        "calculate"
    }

    fn description(&self) -> &str {
        "Evaluate an arithmetic expression with +, -, *, /, ^ and parentheses, e.g. '12 / (3 + 1)'"
    }

    async fn invoke(&self, input: &str) -> Result<String> {
        let value = evaluate(input)?;
        Ok(value.to_string())
    }
}

/// Evaluate an arithmetic expression string.
pub fn evaluate(expr: &str) -> Result<f64> {
    let expr: String = expr.chars().filter(|c| !c.is_whitespace()).collect();
    if expr.is_empty() {
        return Err(AgentError::InvalidInput("Empty expression".to_string()));
    }
    eval_expr(&expr)
}

fn eval_expr(expr: &str) -> Result<f64> {
    // Fold innermost parentheses into their value first
    if let Some(open) = expr.rfind('(') {
        let close = expr[open..].find(')').ok_or_else(|| {
            AgentError::InvalidInput(format!("Unbalanced parentheses in '{}'", expr))
        })?;
        let inner = eval_expr(&expr[open + 1..open + close])?;
        let folded = format!("{}{}{}", &expr[..open], inner, &expr[open + close + 1..]);
        return eval_expr(&folded);
    }

    // Addition and subtraction bind loosest, so they split the tree first.
    // A '+'/'-' only counts as an operator when it follows a value, which
    // keeps unary minus (as in '4*-3') attached to its number.
    for (i, c) in expr.char_indices().rev() {
        if (c == '+' || c == '-') && i > 0 {
            let prev = expr.as_bytes()[i - 1] as char;
            if prev.is_ascii_digit() || prev == '.' {
                let left = eval_expr(&expr[..i])?;
                let right = eval_expr(&expr[i + 1..])?;
                return Ok(if c == '+' { left + right } else { left - right });
            }
        }
    }

    for (i, c) in expr.char_indices().rev() {
        if c == '*' || c == '/' {
            let left = eval_expr(&expr[..i])?;
            let right = eval_expr(&expr[i + 1..])?;
            if c == '/' {
                if right == 0.0 {
                    return Err(AgentError::Tool("Division by zero".to_string()));
                }
                return Ok(left / right);
            }
            return Ok(left * right);
        }
    }

    if let Some(i) = expr.find('^') {
        let base = eval_expr(&expr[..i])?;
        let exponent = eval_expr(&expr[i + 1..])?;
        return Ok(base.powf(exponent));
    }

    expr.parse::<f64>()
        .map_err(|_| AgentError::InvalidInput(format!("Cannot evaluate '{}'", expr)))
}
