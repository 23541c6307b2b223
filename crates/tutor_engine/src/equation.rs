//! Pulling a `left = right` equation out of a free-form step.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

use crate::error::EquationError;
use crate::evaluator::EvalError;
use crate::expression::Expression;
use crate::options::ValidatorOptions;

static RE_EQUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^=]+\s*=\s*[^=]+").expect("valid regex literal"));

/// First `left = right` run in `step`, trimmed. Surrounding prose and any
/// second `=` are left out.
pub fn extract_equation(step: &str) -> Option<&str> {
    RE_EQUATION
        .find(step)
        .map(|m| m.as_str().trim())
        .filter(|eq| !eq.is_empty())
}

/// Split on the single `=`; any other count is an error.
pub fn split_equation(equation: &str) -> Result<(&str, &str), EquationError> {
    let count = equation.matches('=').count();
    if count != 1 {
        return Err(EquationError::EqualsCount(count));
    }
    match equation.split_once('=') {
        Some((left, right)) => Ok((left.trim(), right.trim())),
        None => Err(EquationError::EqualsCount(0)),
    }
}

/// Both sides of an equation, parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct EquationSides {
    pub left: Expression,
    pub right: Expression,
}

impl EquationSides {
    /// Extract, split and parse an equation from a student's step.
    pub fn from_step(step: &str) -> Result<Self, EquationError> {
        let equation = extract_equation(step).ok_or(EquationError::NotFound)?;
        Self::from_equation(equation)
    }

    /// Split and parse text already known to be an equation.
    pub fn from_equation(equation: &str) -> Result<Self, EquationError> {
        let (left, right) = split_equation(equation)?;
        let left = Expression::parse(left).map_err(|source| EquationError::Side {
            side: "left",
            source,
        })?;
        let right = Expression::parse(right).map_err(|source| EquationError::Side {
            side: "right",
            source,
        })?;
        Ok(Self { left, right })
    }

    pub fn mentions(&self, variable: &str) -> bool {
        self.left.mentions(variable) || self.right.mentions(variable)
    }

    /// `left - right` with the variable bound to `value`.
    pub fn residual_at(&self, value: f64, opts: &ValidatorOptions) -> Result<f64, EvalError> {
        let l = self.left.eval_at(value, opts)?;
        let r = self.right.eval_at(value, opts)?;
        Ok(l - r)
    }

    /// Whether the equation holds at `value`; `None` when a side fails to evaluate.
    pub fn holds_at(&self, value: f64, opts: &ValidatorOptions) -> Option<bool> {
        self.residual_at(value, opts)
            .ok()
            .map(|residual| residual.abs() < opts.tolerance)
    }
}

impl fmt::Display for EquationSides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.left, self.right)
    }
}
