//! Step validation: does `current` follow from `previous`?
//!
//! The checks run in a fixed order and the first failure decides the
//! verdict:
//!
//! 1. both steps must contain a parsable `left = right` equation
//! 2. both equations must be balanced
//! 3. the error classifier may name a mistake
//! 4. every solution probe satisfying `previous` must satisfy `current`
//!
//! The classifier only looks at surface text, so its verdict is dropped
//! when `current` is `previous` scaled by a nonzero constant
//! (`residuals_proportional`). That covers moving terms and dividing through
//! without depending on the solution landing on a probe.

use tracing::{debug, trace};

use crate::classifier::classify_error;
use crate::equation::EquationSides;
use crate::equivalence::are_equivalent;
use crate::error::{EngineError, EquationError};
use crate::options::ValidatorOptions;
use crate::types::{ErrorType, StepValidation};

/// Outcome of the solution-preservation check.
#[derive(Debug, Clone, PartialEq)]
pub enum Preservation {
    /// `previous` holds at `at` but `current` does not (or cannot be evaluated)
    Broken { at: f64 },
    /// No probe broke the step; `witnesses` are the probes where both held
    Preserved { witnesses: Vec<f64> },
}

impl Preservation {
    pub fn is_broken(&self) -> bool {
        matches!(self, Preservation::Broken { .. })
    }
}

/// Check that solutions of `previous` found among the probes survive into
/// `current`. Probes where `previous` does not hold, or cannot be evaluated,
/// say nothing about the step and are skipped.
pub fn check_preservation(
    previous: &EquationSides,
    current: &EquationSides,
    opts: &ValidatorOptions,
) -> Preservation {
    let mut witnesses = Vec::new();
    for &probe in &opts.solution_probes {
        if previous.holds_at(probe, opts) != Some(true) {
            continue;
        }
        match current.holds_at(probe, opts) {
            Some(true) => witnesses.push(probe),
            other => {
                trace!(probe, current_holds = ?other, "solution lost");
                return Preservation::Broken { at: probe };
            }
        }
    }
    Preservation::Preserved { witnesses }
}

/// Whether `L₂ - R₂ = k·(L₁ - R₁)` for one nonzero `k` at every expression
/// probe where both residuals are defined.
///
/// A probe where only one residual is defined, or where only one of them is
/// zero, fails the check. So does a `current` that holds everywhere.
pub fn residuals_proportional(
    previous: &EquationSides,
    current: &EquationSides,
    opts: &ValidatorOptions,
) -> bool {
    let mut scale: Option<f64> = None;
    for &probe in &opts.expression_probes {
        let before = previous.residual_at(probe, opts);
        let after = current.residual_at(probe, opts);
        let (before, after) = match (before, after) {
            (Ok(before), Ok(after)) => (before, after),
            (Err(_), Err(_)) => continue,
            _ => return false,
        };
        if before.abs() < opts.tolerance {
            if after.abs() < opts.tolerance {
                continue;
            }
            return false;
        }
        let ratio = after / before;
        match scale {
            None => scale = Some(ratio),
            Some(k) if (ratio - k).abs() <= opts.tolerance * k.abs().max(1.0) => {}
            Some(k) => {
                trace!(probe, ratio, expected = k, "residuals not proportional");
                return false;
            }
        }
    }
    matches!(scale, Some(k) if k.abs() >= opts.tolerance)
}

/// Whether an equation is a sensible step on its own.
///
/// Without the variable both sides must be equal. With it, the equation
/// must be evaluable at some solution probe; whether it is true there is
/// left to the preservation check.
pub fn is_balanced(equation: &EquationSides, opts: &ValidatorOptions) -> bool {
    if !equation.mentions(&opts.variable) {
        return are_equivalent(&equation.left, &equation.right, opts);
    }
    opts.solution_probes
        .iter()
        .any(|&probe| equation.residual_at(probe, opts).is_ok())
}

fn incomplete(err: &EquationError) -> StepValidation {
    let message = match err {
        EquationError::NotFound => "Could not parse equation".to_string(),
        EquationError::EqualsCount(_) => "Invalid equation format".to_string(),
        EquationError::Side { side, source } => {
            format!("Could not read the {} side: {}", side, source)
        }
    };
    StepValidation::invalid(ErrorType::IncompleteStep, message)
}

/// Validate a step. Never fails: internal errors become an
/// `ALGEBRAIC_MISTAKE` verdict carrying the error text.
pub fn validate_step(previous: &str, current: &str, opts: &ValidatorOptions) -> StepValidation {
    let verdict = match try_validate_step(previous, current, opts) {
        Ok(verdict) => verdict,
        Err(e) => StepValidation::invalid(
            ErrorType::AlgebraicMistake,
            format!("Error validating step: {}", e),
        ),
    };
    debug!(
        previous,
        current,
        valid = verdict.is_valid(),
        error_type = ?verdict.error_type(),
        "validated step"
    );
    verdict
}

fn try_validate_step(
    previous: &str,
    current: &str,
    opts: &ValidatorOptions,
) -> Result<StepValidation, EngineError> {
    opts.validate()?;

    let prev = match EquationSides::from_step(previous) {
        Ok(eq) => eq,
        Err(e) => return Ok(incomplete(&e)),
    };
    let curr = match EquationSides::from_step(current) {
        Ok(eq) => eq,
        Err(e) => return Ok(incomplete(&e)),
    };

    if !is_balanced(&prev, opts) {
        return Ok(StepValidation::invalid(
            ErrorType::AlgebraicMistake,
            "Previous equation is invalid",
        ));
    }
    if !is_balanced(&curr, opts) {
        return Ok(StepValidation::invalid(
            ErrorType::AlgebraicMistake,
            "Current equation is invalid",
        ));
    }

    let classified = classify_error(&prev, &curr, opts);
    let preservation = check_preservation(&prev, &curr, opts);
    trace!(prev = %prev, curr = %curr, ?classified, ?preservation, "step checks");

    if let Some(error_type) = classified {
        if !residuals_proportional(&prev, &curr, opts) {
            return Ok(StepValidation::invalid(error_type, error_type.message()));
        }
        trace!(?error_type, "classifier verdict dropped, step rescales the equation");
    }
    if preservation.is_broken() {
        return Ok(StepValidation::invalid(
            ErrorType::AlgebraicMistake,
            "This step doesn't maintain equivalence",
        ));
    }
    Ok(StepValidation::valid())
}
